//! allocvec: an allocator-aware, value-semantic dynamic array.
//!
//! [`Vector`] owns a single contiguous buffer obtained from an [`Allocator`] chosen at compile time,
//! either the zero-sized [`Global`] handle, or an allocator value held by each vector.
//!
//! ```
//! use allocvec::{prelude::*, alloc::composable::BudgetAllocator, alloc::primitives::Mallocator};
//!
//! let a = vector![1, 2];
//! let b = vector![3, 4];
//! assert_eq!(&a + &b, [1, 2, 3, 4]);
//!
//! let mut v: Vector<u32, _> = Vector::new_in(BudgetAllocator::new(Mallocator, 16));
//! v.extend_from_slice(&[1, 2, 3]).unwrap();
//! assert!(v.push(4).is_err());
//! assert_eq!(v, [1, 2, 3]);
//! ```

pub use allocvec_common::*;
pub use allocvec_common::vector;

pub use allocvec_logging as logging;
