mod imp;
mod error;

mod vector;

use allocvec_logging::LogCategory;

pub use error::*;
pub use vector::*;

pub(crate) const LOG_CAT : LogCategory = LogCategory::new_with_sub("Collections", "Vector");

//--------------------------------------------------------------

macro_rules! impl_slice_partial_eq_generic {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty $(where $ty:ty: $bound:ident)?) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs  where
            T : PartialEq<U>,
            $($ty: $bound)?
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
            #[inline]
            fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
        }
    };
}
use impl_slice_partial_eq_generic;

//--------------------------------------------------------------

/// A trait used to define a strategy to reserve additional memory for containers.
pub trait ReserveStrategy {
    /// Calculate the new capacity for a container.
    ///
    /// `cur_capacity` represents the current capacity of the container.
    ///
    /// `min_capacity` represents the minimum required capacity to be able to resize.
    ///
    /// The returned capacity is never smaller than `min_capacity`.
    ///
    /// Returns `Err(TryReserveError::CapacityOverflow)` if the capacity were to overflow
    fn calculate(cur_capacity: usize, min_capacity: usize) -> core::result::Result<usize, TryReserveError>;
}

/// A reserve strategy that sizes the container to 1.5 times the required capacity, rounded down.
pub struct ThreeHalvesReserveStrategy;

impl ReserveStrategy for ThreeHalvesReserveStrategy {
    fn calculate(_cur_capacity: usize, min_capacity: usize) -> core::result::Result<usize, TryReserveError> {
        min_capacity.checked_add(min_capacity / 2)
            .filter(|cap| *cap <= isize::MAX as usize)
            .ok_or(TryReserveError::CapacityOverflow)
    }
}

/// A reserve strategy that will try to either return double the current capacity, or the minimum required capacity, whichever is bigger.
pub struct DoubleOrMinReserveStrategy;

impl ReserveStrategy for DoubleOrMinReserveStrategy {
    fn calculate(cur_capacity: usize, min_capacity: usize) -> core::result::Result<usize, TryReserveError> {
        let double_cap = cur_capacity.saturating_mul(2);
        let new_cap = double_cap.max(min_capacity);
        if new_cap <= isize::MAX as usize {
            Ok(new_cap)
        } else {
            Err(TryReserveError::CapacityOverflow)
        }
    }
}

/// A reserve strategy that never reserves more than the required capacity
pub struct ExactReserveStrategy;

impl ReserveStrategy for ExactReserveStrategy {
    fn calculate(_cur_capacity: usize, min_capacity: usize) -> core::result::Result<usize, TryReserveError> {
        if min_capacity <= isize::MAX as usize {
            Ok(min_capacity)
        } else {
            Err(TryReserveError::CapacityOverflow)
        }
    }
}

//--------------------------------------------------------------

/// Central function for reserve error handling in the panicking APIs
#[cold]
pub(crate) fn handle_error(e: TryReserveError) -> ! {
    match e {
        TryReserveError::CapacityOverflow => capacity_overflow(),
        TryReserveError::AllocError(layout) => std::alloc::handle_alloc_error(layout),
    }
}

fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
