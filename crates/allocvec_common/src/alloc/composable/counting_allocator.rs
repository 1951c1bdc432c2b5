use core::{
    alloc::Layout,
    ptr::NonNull,
    sync::atomic::{AtomicUsize, Ordering},
};
use std::sync::Arc;

use crate::alloc::*;

/// Counters recorded by a [`CountingAllocator`]
#[derive(Default, Debug)]
pub struct AllocStats {
    allocs:     AtomicUsize,
    grows:      AtomicUsize,
    shrinks:    AtomicUsize,
    deallocs:   AtomicUsize,
    failures:   AtomicUsize,
    live_bytes: AtomicUsize,
}

impl AllocStats {
    /// Number of successful allocations
    pub fn allocs(&self) -> usize {
        self.allocs.load(Ordering::Relaxed)
    }

    /// Number of successful grows
    pub fn grows(&self) -> usize {
        self.grows.load(Ordering::Relaxed)
    }

    /// Number of successful shrinks
    pub fn shrinks(&self) -> usize {
        self.shrinks.load(Ordering::Relaxed)
    }

    /// Number of deallocations
    pub fn deallocs(&self) -> usize {
        self.deallocs.load(Ordering::Relaxed)
    }

    /// Number of requests the underlying allocator refused
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Number of bytes currently allocated
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.load(Ordering::Relaxed)
    }

    fn record<T>(&self, res: Option<T>, counter: &AtomicUsize) -> Option<T> {
        match res {
            Some(_) => counter.fetch_add(1, Ordering::Relaxed),
            None => self.failures.fetch_add(1, Ordering::Relaxed),
        };
        res
    }
}

/// Counting allocator
///
/// Wraps an allocator and counts every request made to it.
/// Clones share their counters, so the statistics of a container and its copies can be observed through a single handle.
#[derive(Clone, Debug)]
pub struct CountingAllocator<A: Allocator> {
    alloc: A,
    stats: Arc<AllocStats>,
}

impl<A: Allocator> CountingAllocator<A> {
    /// Create a new counting allocator around `alloc`
    pub fn new(alloc: A) -> Self {
        Self { alloc, stats: Arc::new(AllocStats::default()) }
    }

    /// Get a handle to the counters
    pub fn stats(&self) -> Arc<AllocStats> {
        self.stats.clone()
    }
}

impl<A: Allocator> Allocator for CountingAllocator<A> {
    unsafe fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        let res = self.stats.record(self.alloc.alloc(layout), &self.stats.allocs);
        if res.is_some() {
            self.stats.live_bytes.fetch_add(layout.size(), Ordering::Relaxed);
        }
        res
    }

    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout) {
        self.alloc.dealloc(ptr, layout);
        self.stats.deallocs.fetch_add(1, Ordering::Relaxed);
        self.stats.live_bytes.fetch_sub(layout.size(), Ordering::Relaxed);
    }

    unsafe fn grow(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        let res = self.stats.record(self.alloc.grow(ptr, old_layout, new_layout), &self.stats.grows);
        if res.is_some() {
            self.stats.live_bytes.fetch_add(new_layout.size() - old_layout.size(), Ordering::Relaxed);
        }
        res
    }

    unsafe fn shrink(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        let res = self.stats.record(self.alloc.shrink(ptr, old_layout, new_layout), &self.stats.shrinks);
        if res.is_some() {
            self.stats.live_bytes.fetch_sub(old_layout.size() - new_layout.size(), Ordering::Relaxed);
        }
        res
    }

    fn owns(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
        self.alloc.owns(ptr, layout)
    }

    fn supports_free(&self) -> bool {
        self.alloc.supports_free()
    }
}
