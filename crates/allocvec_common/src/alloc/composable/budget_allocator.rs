use core::{alloc::Layout, ptr::NonNull};

use allocvec_logging::log_verbose;

use crate::alloc::*;

/// Budget allocator
///
/// Wraps an allocator and refuses any request that would push the number of live bytes past a fixed budget.
///
/// Cloning a budget allocator gives a fresh allocator with the same budget and nothing allocated from it.
#[derive(Debug)]
pub struct BudgetAllocator<A: Allocator> {
    alloc:  A,
    budget: usize,
    used:   usize,
}

impl<A: Allocator> BudgetAllocator<A> {
    /// Create a new budget allocator allowing at most `budget` live bytes from `alloc`
    pub fn new(alloc: A, budget: usize) -> Self {
        Self { alloc, budget, used: 0 }
    }

    /// Get the budget in bytes
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Get the number of bytes currently allocated
    pub fn used(&self) -> usize {
        self.used
    }

    /// Get the number of bytes that can still be allocated
    pub fn remaining(&self) -> usize {
        self.budget - self.used
    }

    fn fits(&self, extra: usize) -> bool {
        extra <= self.remaining()
    }
}

impl<A: Allocator + Clone> Clone for BudgetAllocator<A> {
    fn clone(&self) -> Self {
        Self::new(self.alloc.clone(), self.budget)
    }
}

impl<A: Allocator> Allocator for BudgetAllocator<A> {
    unsafe fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        if !self.fits(layout.size()) {
            log_verbose!(LOG_CAT, "Allocation of {} bytes exceeds budget ({}/{} bytes used)", layout.size(), self.used, self.budget);
            return None;
        }

        let ptr = self.alloc.alloc(layout)?;
        self.used += layout.size();
        Some(ptr)
    }

    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout) {
        self.alloc.dealloc(ptr, layout);
        self.used -= layout.size();
    }

    unsafe fn grow(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        let extra = new_layout.size() - old_layout.size();
        if !self.fits(extra) {
            log_verbose!(LOG_CAT, "Growing to {} bytes exceeds budget ({}/{} bytes used)", new_layout.size(), self.used, self.budget);
            return None;
        }

        let ptr = self.alloc.grow(ptr, old_layout, new_layout)?;
        self.used += extra;
        Some(ptr)
    }

    unsafe fn shrink(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        let ptr = self.alloc.shrink(ptr, old_layout, new_layout)?;
        self.used -= old_layout.size() - new_layout.size();
        Some(ptr)
    }

    fn owns(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
        self.alloc.owns(ptr, layout)
    }

    fn supports_free(&self) -> bool {
        self.alloc.supports_free()
    }
}
