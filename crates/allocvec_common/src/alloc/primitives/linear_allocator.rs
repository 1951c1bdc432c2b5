use core::{alloc::Layout, ptr::NonNull};

use allocvec_logging::log_verbose;

use crate::alloc::{Allocator, LOG_CAT, grow_by_relocating};
use super::Mallocator;

/// Linear/Bump allocator
///
/// An allocator that can freely allocate when there is enough space left in it, but can only give memory back for its most recent allocation.
/// The most recent allocation can also be grown or shrunk in place, any other allocation is moved when grown, and cannot be shrunk.
/// Deallocation of all allocations at once happens in `reset()`
pub struct LinearAllocator {
    buffer:        NonNull<u8>,
    buffer_layout: Layout,
    head:          usize,
    last:          Option<usize>,
}

impl LinearAllocator {
    /// Alignment of the backing buffer
    pub const BUFFER_ALIGN: usize = 16;

    /// Create a new linear allocator, with a buffer of `size` bytes retrieved from the [`Mallocator`].
    ///
    /// Returns `None` if `size` is 0, or if the buffer could not be allocated.
    pub fn new(size: usize) -> Option<Self> {
        if size == 0 {
            return None;
        }

        let buffer_layout = Layout::from_size_align(size, Self::BUFFER_ALIGN).ok()?;
        let buffer = unsafe { Mallocator.alloc(buffer_layout)? };
        Some(Self { buffer, buffer_layout, head: 0, last: None })
    }

    /// Reset the linear allocator to its empty state
    ///
    /// Any memory handed out before the reset must not be used anymore.
    pub fn reset(&mut self) {
        self.head = 0;
        self.last = None;
    }

    /// Get the total size of the backing buffer
    pub fn size(&self) -> usize {
        self.buffer_layout.size()
    }

    /// Get the number of bytes in use, including padding
    pub fn used(&self) -> usize {
        self.head
    }

    /// Get the number of bytes still available, not accounting for padding
    pub fn remaining(&self) -> usize {
        self.size() - self.head
    }

    fn offset_of(&self, ptr: NonNull<u8>) -> usize {
        ptr.as_ptr() as usize - self.buffer.as_ptr() as usize
    }

    fn is_last(&self, ptr: NonNull<u8>) -> bool {
        self.last == Some(self.offset_of(ptr))
    }
}

impl Allocator for LinearAllocator {
    unsafe fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        let base = self.buffer.as_ptr() as usize;
        let start = (base + self.head).checked_next_multiple_of(layout.align())? - base;
        let end = start.checked_add(layout.size())?;

        if end > self.size() {
            log_verbose!(LOG_CAT, "Linear allocator out of memory, requested {} bytes with {} bytes left", layout.size(), self.remaining());
            return None;
        }

        self.head = end;
        self.last = Some(start);
        Some(NonNull::new_unchecked(self.buffer.as_ptr().add(start)))
    }

    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout) {
        assert!(self.owns(ptr, layout), "Cannot deallocate an allocation that isn't owned by the allocator");

        // Only the most recent allocation can be given back, everything else waits for a reset
        if self.is_last(ptr) {
            self.head = self.offset_of(ptr);
            self.last = None;
        }
    }

    unsafe fn grow(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        let offset = self.offset_of(ptr);
        let aligned = ptr.as_ptr() as usize % new_layout.align() == 0;
        if self.is_last(ptr) && aligned && offset + new_layout.size() <= self.size() {
            self.head = offset + new_layout.size();
            return Some(ptr);
        }
        log_verbose!(LOG_CAT, "Linear allocator relocating allocation of {} bytes to grow it to {} bytes", old_layout.size(), new_layout.size());
        grow_by_relocating(self, ptr, old_layout, new_layout)
    }

    unsafe fn shrink(&mut self, ptr: NonNull<u8>, _old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        if !self.is_last(ptr) || ptr.as_ptr() as usize % new_layout.align() != 0 {
            return None;
        }
        self.head = self.offset_of(ptr) + new_layout.size();
        Some(ptr)
    }

    fn owns(&self, ptr: NonNull<u8>, _layout: Layout) -> bool {
        let addr = ptr.as_ptr() as usize;
        let base = self.buffer.as_ptr() as usize;
        addr >= base && addr < base + self.size()
    }

    fn supports_free(&self) -> bool {
        false
    }
}

impl Drop for LinearAllocator {
    fn drop(&mut self) {
        unsafe { Mallocator.dealloc(self.buffer, self.buffer_layout) };
    }
}

impl core::fmt::Debug for LinearAllocator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinearAllocator")
            .field("size", &self.size())
            .field("used", &self.used())
            .finish()
    }
}
