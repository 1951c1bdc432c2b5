use core::{alloc::Layout, ptr::{self, NonNull}};

//------------------------------------------------------------------------------------------------------------------------------

/// Allocator/Arena that can provide access to heap memory for the program
///
/// Containers take their allocator as a generic parameter, so calls are statically dispatched.
/// An allocator is either held by value by a container (an instance allocator), or is a zero-sized handle to a process-wide allocator, like [`Global`](super::Global).
///
/// All layouts passed to an allocator have a non-zero size.
pub trait Allocator {
    /// Allocate memory from an allocator/arena
    ///
    /// # Return
    ///
    /// If no memory could be allocated, `None` should be returned.
    ///
    /// # Safety
    ///
    /// `layout` must have a non-zero size.
    unsafe fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>>;

    /// Deallocate an allocation
    ///
    /// # Panics
    ///
    /// Deallocation may panic, since an incorrect allocation should not happen
    ///
    /// # Safety
    ///
    /// `ptr` must have been allocated by this allocator with `layout`, and must not be used afterwards.
    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout);

    /// Grow an allocation to `new_layout`, either in place or by moving it to a new location.
    ///
    /// The first `old_layout.size()` bytes are preserved.
    /// If `None` is returned, the original allocation is left untouched and is still valid.
    ///
    /// The default implementation allocates a new block, copies the contents over and deallocates the old block.
    ///
    /// # Safety
    ///
    /// - `ptr` must have been allocated by this allocator with `old_layout`.
    /// - `new_layout.size()` must be greater than or equal to `old_layout.size()`.
    /// - On success, `ptr` must no longer be used, only the returned pointer.
    unsafe fn grow(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        grow_by_relocating(self, ptr, old_layout, new_layout)
    }

    /// Shrink an allocation to `new_layout`, releasing the trailing memory back to the allocator.
    ///
    /// If `None` is returned, the allocation is left untouched and is still valid.
    ///
    /// The default implementation does not support shrinking.
    ///
    /// # Safety
    ///
    /// - `ptr` must have been allocated by this allocator with `old_layout`.
    /// - `new_layout.size()` must be smaller than or equal to `old_layout.size()`, and non-zero.
    /// - On success, `ptr` must no longer be used, only the returned pointer.
    unsafe fn shrink(&mut self, _ptr: NonNull<u8>, _old_layout: Layout, _new_layout: Layout) -> Option<NonNull<u8>> {
        None
    }

    /// Check if the allocator own the allocation
    ///
    /// This function is mainly meant for composed allocators, to know which sub-allocator an allocation belongs to.
    fn owns(&self, ptr: NonNull<u8>, layout: Layout) -> bool;

    /// Does the allocator support freeing of memory, if not, it means freeing of memory will only happen when the full allocator has been reset
    ///
    /// Default implementation assumes the allocator can free
    fn supports_free(&self) -> bool { true }
}

/// Grow an allocation by allocating a new block, copying the old contents, and freeing the old block.
///
/// # Safety
///
/// Same requirements as [`Allocator::grow`].
pub unsafe fn grow_by_relocating<A: Allocator + ?Sized>(alloc: &mut A, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
    debug_assert!(new_layout.size() >= old_layout.size());

    let new_ptr = alloc.alloc(new_layout)?;
    ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr(), old_layout.size());
    alloc.dealloc(ptr, old_layout);
    Some(new_ptr)
}
