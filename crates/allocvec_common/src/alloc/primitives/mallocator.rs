use core::{
    alloc::{GlobalAlloc, Layout},
    ptr::NonNull,
};

use crate::alloc::{Allocator, grow_by_relocating};

/// Allocator calling directly to the system allocator
///
/// Mallocator uses mimalloc to retrieve memory, and can resize allocations in place when mimalloc allows it.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Mallocator;

static MI_MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

impl Allocator for Mallocator {
    unsafe fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        NonNull::new(MI_MALLOC.alloc(layout))
    }

    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout) {
        MI_MALLOC.dealloc(ptr.as_ptr(), layout);
    }

    unsafe fn grow(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        // `realloc` keeps the old alignment, so a change in alignment needs a fresh block
        if old_layout.align() != new_layout.align() {
            return grow_by_relocating(self, ptr, old_layout, new_layout);
        }
        NonNull::new(MI_MALLOC.realloc(ptr.as_ptr(), old_layout, new_layout.size()))
    }

    unsafe fn shrink(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        if old_layout.align() != new_layout.align() {
            return None;
        }
        NonNull::new(MI_MALLOC.realloc(ptr.as_ptr(), old_layout, new_layout.size()))
    }

    fn owns(&self, _ptr: NonNull<u8>, _layout: Layout) -> bool {
        // We have no real way of knowing that we allocated this, so we'll just assume that we allocated it
        true
    }
}
