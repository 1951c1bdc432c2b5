use core::{alloc::Layout, ptr::NonNull};

use crate::mem::get_memory_manager;
use super::Allocator;

/// Handle to the process-wide allocator.
///
/// `Global` carries no state, so containers using it pay no storage overhead for their allocator.
/// All allocations are routed through the [`MemoryManager`](crate::mem::MemoryManager), which tracks them when the `memory_tracking` feature is enabled.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Global;

static_assertions::assert_eq_size!(Global, ());

impl Allocator for Global {
    #[inline]
    unsafe fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        get_memory_manager().alloc(layout)
    }

    #[inline]
    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout) {
        get_memory_manager().dealloc(ptr, layout)
    }

    #[inline]
    unsafe fn grow(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        get_memory_manager().grow(ptr, old_layout, new_layout)
    }

    #[inline]
    unsafe fn shrink(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        get_memory_manager().shrink(ptr, old_layout, new_layout)
    }

    fn owns(&self, _ptr: NonNull<u8>, _layout: Layout) -> bool {
        // Anything without a more specific owner comes from the system allocator
        true
    }
}
