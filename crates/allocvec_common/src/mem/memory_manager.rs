use core::{alloc::Layout, ptr::NonNull};
#[cfg(feature = "memory_tracking")]
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::alloc::{Allocator, primitives::Mallocator};

static MEMORY_MANAGER : MemoryManager = MemoryManager::new();

/// Get the process-wide memory manager
pub fn get_memory_manager() -> &'static MemoryManager {
    &MEMORY_MANAGER
}

/// Snapshot of the allocations made through a [`MemoryManager`]
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct MemoryStats {
    /// Number of allocations that have not been freed yet
    pub live_allocs  : usize,
    /// Number of bytes that have not been freed yet
    pub live_bytes   : usize,
    /// Total number of allocations made since startup
    pub total_allocs : usize,
}

cfg_if::cfg_if! {
    if #[cfg(feature = "memory_tracking")] {
        struct Tracking {
            live_allocs  : AtomicUsize,
            live_bytes   : AtomicUsize,
            total_allocs : AtomicUsize,
        }

        impl Tracking {
            const fn new() -> Self {
                Self {
                    live_allocs: AtomicUsize::new(0),
                    live_bytes: AtomicUsize::new(0),
                    total_allocs: AtomicUsize::new(0),
                }
            }

            fn on_alloc(&self, size: usize) {
                self.live_allocs.fetch_add(1, Ordering::Relaxed);
                self.total_allocs.fetch_add(1, Ordering::Relaxed);
                self.live_bytes.fetch_add(size, Ordering::Relaxed);
            }

            fn on_dealloc(&self, size: usize) {
                self.live_allocs.fetch_sub(1, Ordering::Relaxed);
                self.live_bytes.fetch_sub(size, Ordering::Relaxed);
            }

            fn on_resize(&self, old_size: usize, new_size: usize) {
                if new_size >= old_size {
                    self.live_bytes.fetch_add(new_size - old_size, Ordering::Relaxed);
                } else {
                    self.live_bytes.fetch_sub(old_size - new_size, Ordering::Relaxed);
                }
            }

            fn stats(&self) -> MemoryStats {
                MemoryStats {
                    live_allocs: self.live_allocs.load(Ordering::Relaxed),
                    live_bytes: self.live_bytes.load(Ordering::Relaxed),
                    total_allocs: self.total_allocs.load(Ordering::Relaxed),
                }
            }
        }
    } else {
        struct Tracking;

        impl Tracking {
            const fn new() -> Self {
                Self
            }

            fn on_alloc(&self, _size: usize) {}
            fn on_dealloc(&self, _size: usize) {}
            fn on_resize(&self, _old_size: usize, _new_size: usize) {}

            fn stats(&self) -> MemoryStats {
                MemoryStats::default()
            }
        }
    }
}

/// Memory manager
///
/// Entry point for all memory going through the [`Global`](crate::alloc::Global) allocator.
/// Memory is retrieved from the [`Mallocator`], and is tracked when the `memory_tracking` feature is enabled.
pub struct MemoryManager {
    tracking : Tracking,
}

impl MemoryManager {
    /// Create a new memory manager
    pub const fn new() -> Self {
        Self { tracking: Tracking::new() }
    }

    /// Allocate memory with the given layout
    ///
    /// # Safety
    ///
    /// `layout` must have a non-zero size.
    pub unsafe fn alloc(&self, layout: Layout) -> Option<NonNull<u8>> {
        let ptr = Mallocator.alloc(layout)?;
        self.tracking.on_alloc(layout.size());
        Some(ptr)
    }

    /// Deallocate memory
    ///
    /// # Safety
    ///
    /// `ptr` must have been allocated by this memory manager with `layout`.
    pub unsafe fn dealloc(&self, ptr: NonNull<u8>, layout: Layout) {
        Mallocator.dealloc(ptr, layout);
        self.tracking.on_dealloc(layout.size());
    }

    /// Grow an allocation, see [`Allocator::grow`]
    ///
    /// # Safety
    ///
    /// Same requirements as [`Allocator::grow`].
    pub unsafe fn grow(&self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        let ptr = Mallocator.grow(ptr, old_layout, new_layout)?;
        self.tracking.on_resize(old_layout.size(), new_layout.size());
        Some(ptr)
    }

    /// Shrink an allocation, see [`Allocator::shrink`]
    ///
    /// # Safety
    ///
    /// Same requirements as [`Allocator::shrink`].
    pub unsafe fn shrink(&self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        let ptr = Mallocator.shrink(ptr, old_layout, new_layout)?;
        self.tracking.on_resize(old_layout.size(), new_layout.size());
        Some(ptr)
    }

    /// Get the current memory statistics
    ///
    /// Without the `memory_tracking` feature, all statistics are 0.
    pub fn stats(&self) -> MemoryStats {
        self.tracking.stats()
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}
