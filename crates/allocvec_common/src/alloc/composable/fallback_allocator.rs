use core::{alloc::Layout, ptr::{self, NonNull}};

use crate::alloc::*;

/// Fallback allocator
///
/// An allocator that will first try to allocate memory using its main allocator, if that fails, the allocator will fallback on its secondary allocator.
/// Growing an allocation owned by the main allocator that the main allocator cannot satisfy moves it into the fallback allocator.
#[derive(Clone, Debug)]
pub struct FallbackAllocator<A: Allocator, F: Allocator> {
    main:     A,
    fallback: F,
}

impl<A: Allocator, F: Allocator> FallbackAllocator<A, F> {
    /// Create a new fallback allocator
    ///
    /// `main` denotes the main allocator
    ///
    /// `fallback` denotes the secondary allocator to use when the main allocator fails to allocate the memory
    pub fn new(main: A, fallback: F) -> Self {
        Self { main, fallback }
    }

    /// Get the main allocator
    pub fn main(&self) -> &A {
        &self.main
    }

    /// Get the fallback allocator
    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

impl<A: Allocator, F: Allocator> Allocator for FallbackAllocator<A, F> {
    unsafe fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        self.main.alloc(layout).or_else(|| self.fallback.alloc(layout))
    }

    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout) {
        if self.main.owns(ptr, layout) {
            self.main.dealloc(ptr, layout);
        } else if self.fallback.owns(ptr, layout) {
            self.fallback.dealloc(ptr, layout);
        } else {
            panic!("Cannot deallocate an allocation that isn't owned by the allocator");
        }
    }

    unsafe fn grow(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        if !self.main.owns(ptr, old_layout) {
            return self.fallback.grow(ptr, old_layout, new_layout);
        }

        if let Some(new_ptr) = self.main.grow(ptr, old_layout, new_layout) {
            return Some(new_ptr);
        }

        let new_ptr = self.fallback.alloc(new_layout)?;
        ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr(), old_layout.size());
        self.main.dealloc(ptr, old_layout);
        Some(new_ptr)
    }

    unsafe fn shrink(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Option<NonNull<u8>> {
        if self.main.owns(ptr, old_layout) {
            self.main.shrink(ptr, old_layout, new_layout)
        } else {
            self.fallback.shrink(ptr, old_layout, new_layout)
        }
    }

    fn owns(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
        self.main.owns(ptr, layout) || self.fallback.owns(ptr, layout)
    }

    fn supports_free(&self) -> bool {
        self.main.supports_free() && self.fallback.supports_free()
    }
}

#[cfg(test)]
mod tests {
    use core::alloc::Layout;

    use crate::alloc::{*, primitives::*, composable::*};

    #[test]
    fn falls_back_when_main_is_full() {
        let main = LinearAllocator::new(16).unwrap();
        let mut alloc = FallbackAllocator::new(main, Mallocator);
        let layout = Layout::array::<u8>(12).unwrap();

        unsafe {
            let first = alloc.alloc(layout).unwrap();
            assert!(alloc.main().owns(first, layout));

            let second = alloc.alloc(layout).unwrap();
            assert!(!alloc.main().owns(second, layout));

            alloc.dealloc(second, layout);
            alloc.dealloc(first, layout);
        }
    }

    #[test]
    fn grow_migrates_to_fallback() {
        let main = LinearAllocator::new(16).unwrap();
        let mut alloc = FallbackAllocator::new(main, Mallocator);
        let small = Layout::array::<u32>(2).unwrap();
        let big = Layout::array::<u32>(64).unwrap();

        unsafe {
            let ptr = alloc.alloc(small).unwrap();
            ptr.cast::<u32>().as_ptr().write(42);

            let grown = alloc.grow(ptr, small, big).unwrap();
            assert!(!alloc.main().owns(grown, big));
            assert_eq!(grown.cast::<u32>().as_ptr().read(), 42);
            assert_eq!(alloc.main().used(), 0);

            alloc.dealloc(grown, big);
        }
    }
}
