use core::{
    alloc::Layout,
    marker::PhantomData,
    mem::{align_of, size_of},
    ptr::NonNull,
};

use allocvec_logging::{log_verbose, log_warning};

use crate::{
    alloc::Allocator,
    collections::{ReserveStrategy, TryReserveError, LOG_CAT},
};

/// Low level utility for allocating, growing, shrinking and deallocating a buffer of `T`s in an allocator, without having to worry about the corner cases involved.
/// In particular:
///
/// - Produces a dangling pointer on zero-sized types and zero-length allocations, and never frees it.
/// - Catches all overflows in capacity computations (promotes them to "capacity overflow" errors).
/// - Leaves the buffer untouched when the allocator refuses a request.
///
/// This type does not in any way inspect the memory it manages. When dropped it *will* free its memory, but it *won't* try to drop its contents.
/// It is up to the user of `RawArray` to handle the actual things *stored* inside of `RawArray`.
///
/// Note that the capacity of a zero-sized type is always `usize::MAX`, as they never need memory.
pub(crate) struct RawArray<T, A: Allocator, R: ReserveStrategy> {
    ptr:      NonNull<T>,
    cap:      usize,
    alloc:    A,
    _phantom: PhantomData<fn() -> R>,
}

impl<T, A: Allocator, R: ReserveStrategy> RawArray<T, A, R> {
    const IS_ZST: bool = size_of::<T>() == 0;

    /// Creates a `RawArray` without allocating.
    pub const fn new_in(alloc: A) -> Self {
        Self { ptr: NonNull::dangling(), cap: 0, alloc, _phantom: PhantomData }
    }

    /// Tries to create a `RawArray` with exactly the capacity and alignment requirements for a `[T; capacity]`.
    /// This is equivalent to calling `RawArray::new_in` when `capacity` is `0` or `T` is zero-sized.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, TryReserveError> {
        let mut arr = Self::new_in(alloc);
        if !Self::IS_ZST && capacity != 0 {
            arr.allocate_exact(capacity)?;
        }
        Ok(arr)
    }

    /// Get the capacity of the allocation.
    ///
    /// This will always be `usize::MAX` if `T` is zero-sized.
    pub fn capacity(&self) -> usize {
        if Self::IS_ZST {
            usize::MAX
        } else {
            self.cap
        }
    }

    /// Get the allocator used for the allocation.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Get a raw pointer to the start of the allocation.
    /// Note that this is a dangling pointer when either `capacity() == 0` or `T` is zero-sized.
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    fn current_memory(&self) -> Option<(NonNull<u8>, Layout)> {
        if Self::IS_ZST || self.cap == 0 {
            None
        } else {
            // The buffer was allocated with this layout, so it can't overflow
            unsafe {
                let layout = Layout::from_size_align_unchecked(size_of::<T>() * self.cap, align_of::<T>());
                Some((self.ptr.cast(), layout))
            }
        }
    }

    fn layout_for(capacity: usize) -> Result<Layout, TryReserveError> {
        Layout::array::<T>(capacity).map_err(|_| TryReserveError::CapacityOverflow)
    }

    /// Ensures that the buffer can hold at least `min_capacity` elements, while `len` elements are live.
    ///
    /// - When there are no live elements, a fresh buffer of exactly `min_capacity` elements replaces the current one.
    /// - Otherwise the buffer is grown to the capacity calculated by the reserve strategy, relocating it when needed.
    ///
    /// On failure, the buffer is left as it was.
    pub fn try_ensure_capacity(&mut self, len: usize, min_capacity: usize) -> Result<(), TryReserveError> {
        if min_capacity <= self.capacity() {
            return Ok(());
        }

        if Self::IS_ZST {
            // A zero-sized type has a capacity of `usize::MAX`, so getting here means the array is overfull
            return Err(TryReserveError::CapacityOverflow);
        }

        let res = if len == 0 {
            self.allocate_exact(min_capacity)
        } else {
            R::calculate(self.cap, min_capacity).and_then(|new_cap| self.grow(new_cap))
        };

        if let Err(err) = res {
            log_warning!(LOG_CAT, "Failed to grow from {} to at least {} elements: {}", self.cap, min_capacity, err);
        }
        res
    }

    /// Shrinks the buffer down to the specified capacity.
    /// If the given amount is 0, actually completely deallocates.
    ///
    /// Returns `true` if the buffer now has a capacity of `capacity`, or `false` if the allocator refused to shrink it.
    ///
    /// # Panics
    ///
    /// Panics if the given amount is *larger* than the current capacity.
    pub fn try_shrink_to(&mut self, capacity: usize) -> bool {
        assert!(capacity <= self.capacity(), "Tried to shrink to a larger capacity");

        let Some((ptr, layout)) = self.current_memory() else {
            return true;
        };
        if capacity == self.cap {
            return true;
        }

        if capacity == 0 {
            unsafe { self.alloc.dealloc(ptr, layout) };
            self.ptr = NonNull::dangling();
            self.cap = 0;
            return true;
        }

        let new_layout = unsafe { Layout::from_size_align_unchecked(size_of::<T>() * capacity, align_of::<T>()) };
        match unsafe { self.alloc.shrink(ptr, layout, new_layout) } {
            Some(new_ptr) => {
                self.ptr = new_ptr.cast();
                self.cap = capacity;
                true
            },
            None => {
                log_verbose!(LOG_CAT, "Allocator could not shrink from {} to {} elements", self.cap, capacity);
                false
            }
        }
    }

    //--------------------------------------------------------------

    /// Replace the current buffer with a new buffer of exactly `capacity` elements, without keeping its contents.
    fn allocate_exact(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        let layout = Self::layout_for(capacity)?;
        let new_ptr = unsafe { self.alloc.alloc(layout) }.ok_or(TryReserveError::AllocError(layout))?;

        if let Some((old_ptr, old_layout)) = self.current_memory() {
            unsafe { self.alloc.dealloc(old_ptr, old_layout) };
        }

        self.ptr = new_ptr.cast();
        self.cap = capacity;
        Ok(())
    }

    fn grow(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        debug_assert!(capacity > self.cap);

        let new_layout = Self::layout_for(capacity)?;
        let new_ptr = match self.current_memory() {
            Some((ptr, layout)) => unsafe { self.alloc.grow(ptr, layout, new_layout) },
            None => unsafe { self.alloc.alloc(new_layout) },
        }.ok_or(TryReserveError::AllocError(new_layout))?;

        self.ptr = new_ptr.cast();
        self.cap = capacity;
        Ok(())
    }
}

impl<T, A: Allocator, R: ReserveStrategy> Drop for RawArray<T, A, R> {
    fn drop(&mut self) {
        if let Some((ptr, layout)) = self.current_memory() {
            unsafe { self.alloc.dealloc(ptr, layout) };
        }
    }
}
