use core::{alloc::Layout, ops::AddAssign, ptr::NonNull};
use std::rc::Rc;

use crate::{
    alloc::{primitives::*, composable::*},
    collections::{DoubleOrMinReserveStrategy, ExactReserveStrategy},
    vector,
};
use super::*;

/// Allocator that can grow (by relocating), but never shrinks
#[derive(Clone, Copy, Default, Debug)]
struct NoShrinkAllocator;

impl Allocator for NoShrinkAllocator {
    unsafe fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        Mallocator.alloc(layout)
    }

    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout) {
        Mallocator.dealloc(ptr, layout)
    }

    fn owns(&self, _ptr: NonNull<u8>, _layout: Layout) -> bool {
        true
    }
}

#[test]
fn vector_new() {
    let v = Vector::<i32>::new();
    assert_eq!(v.capacity(), 0);
    assert_eq!(v.len(), 0);
    assert!(v.is_empty());

    let v = Vector::<i32>::with_capacity(21).unwrap();
    assert_eq!(v.capacity(), 21);
    assert_eq!(v.len(), 0);

    let v = Vector::<i32>::default();
    assert_eq!(v.capacity(), 0);
}

#[test]
fn vector_new_does_not_allocate() {
    let alloc = CountingAllocator::new(Mallocator);
    let stats = alloc.stats();

    let v: Vector<u64, _> = Vector::new_in(alloc);
    drop(v);

    assert_eq!(stats.allocs(), 0);
    assert_eq!(stats.deallocs(), 0);
}

#[test]
fn vector_from_list() {
    let v = vector![1, 2, 3];
    assert_eq!(v.len(), 3);
    assert_eq!(v.capacity(), 3);
    assert_eq!(v.front(), Ok(&1));
    assert_eq!(v.back(), Ok(&3));

    let v = Vector::from([4, 5]);
    assert_eq!(v, [4, 5]);

    let v = vector![7; 4];
    assert_eq!(v, [7, 7, 7, 7]);
    assert_eq!(v.capacity(), 4);

    let v: Vector<i32> = vector![];
    assert_eq!(v.capacity(), 0);
}

#[test]
fn vector_from_array_in_reports_failure() {
    let res: Result<Vector<u32, _>> = Vector::from_array_in([1, 2, 3, 4], BudgetAllocator::new(Mallocator, 8));
    assert_eq!(res.unwrap_err(), Error::AllocError(Layout::array::<u32>(4).unwrap()));
}

#[test]
fn vector_from_sequence() {
    let v: Vector<i32> = Vector::try_from_iter_in((0..10).filter(|x| x % 2 == 0), Global).unwrap();
    assert_eq!(v, [0, 2, 4, 6, 8]);

    let v: Vector<i32> = (1..=3).collect();
    assert_eq!(v.as_slice(), &[1, 2, 3]);

    let v = Vector::from(&[1, 2, 3][..]);
    assert_eq!(v, [1, 2, 3]);
    assert_eq!(v.capacity(), 3);
}

#[test]
fn vector_push_and_access() {
    let mut v = Vector::<i32>::new();

    for i in 0..100 {
        v.push(i * 2).unwrap();
    }
    assert_eq!(v.len(), 100);
    for i in 0..100 {
        assert_eq!(v[i], i as i32 * 2);
        assert_eq!(v.get(i), Ok(&(i as i32 * 2)));
    }

    *v.get_mut(3).unwrap() = -1;
    v[4] = -2;
    assert_eq!(v[3], -1);
    assert_eq!(*v.get(4).unwrap(), -2);

    let mut v = vector![1, 2, 3];
    assert_eq!(v.push_within_capacity(4), Err(4));
    v.reserve(4).unwrap();
    assert_eq!(v.push_within_capacity(4), Ok(()));
    assert_eq!(v[3], 4);
}

#[test]
fn vector_index_out_of_bounds() {
    let mut v = vector![1, 2, 3];
    assert_eq!(v.get(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));
    assert!(v.get_mut(usize::MAX).unwrap_err().is_bounds());
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn vector_index_panics() {
    let v = vector![1, 2, 3];
    let _elem = v[3];
}

#[test]
fn vector_growth_policy() {
    let mut v = Vector::<u32>::new();
    let mut caps = Vec::new();
    for i in 0..11 {
        v.push(i).unwrap();
        if caps.last() != Some(&v.capacity()) {
            caps.push(v.capacity());
        }
    }
    assert_eq!(caps, [1, 3, 6, 10, 16]);
}

#[test]
fn vector_growth_is_amortized() {
    let alloc = CountingAllocator::new(Mallocator);
    let stats = alloc.stats();

    let mut v: Vector<u32, _> = Vector::new_in(alloc);
    for i in 0..1000 {
        v.push(i).unwrap();
    }

    assert_eq!(v.len(), 1000);
    assert_eq!(v.capacity(), 1063);
    assert_eq!(stats.allocs(), 1);
    assert_eq!(stats.grows(), 14);
    assert!(v.iter().copied().eq(0..1000));

    drop(v);
    assert_eq!(stats.deallocs(), 1);
    assert_eq!(stats.live_bytes(), 0);
}

#[test]
fn vector_reserve_strategies() {
    let mut v: Vector<u32, Global, DoubleOrMinReserveStrategy> = Vector::new_in(Global);
    for i in 0..5 {
        v.push(i).unwrap();
    }
    assert_eq!(v.capacity(), 8);

    let mut v: Vector<u32, Global, ExactReserveStrategy> = Vector::new_in(Global);
    for i in 0..5 {
        v.push(i).unwrap();
    }
    assert_eq!(v.capacity(), 5);
}

#[test]
fn vector_reserve() {
    let mut v = Vector::<i32>::new();
    v.reserve(10).unwrap();
    assert_eq!(v.capacity(), 10);
    assert_eq!(v.len(), 0);

    for i in 0..10 {
        v.push(i).unwrap();
    }
    assert_eq!(v.capacity(), 10);

    v.reserve(11).unwrap();
    assert_eq!(v.capacity(), 16);
    assert_eq!(v.len(), 10);

    // Already large enough
    v.reserve(4).unwrap();
    assert_eq!(v.capacity(), 16);

    let mut v = Vector::<u64>::new();
    assert_eq!(v.reserve(usize::MAX), Err(Error::CapacityOverflow));
    assert_eq!(v.capacity(), 0);
}

#[test]
fn vector_reserve_on_empty_allocates_fresh() {
    let alloc = CountingAllocator::new(Mallocator);
    let stats = alloc.stats();

    let mut v: Vector<u32, _> = Vector::new_in(alloc);
    v.reserve(4).unwrap();
    v.reserve(7).unwrap();
    assert_eq!(v.capacity(), 7);
    assert_eq!(stats.allocs(), 2);
    assert_eq!(stats.deallocs(), 1);
    assert_eq!(stats.grows(), 0);
}

#[test]
fn vector_growth_failure_is_reported() {
    let mut v: Vector<u32, _> = Vector::new_in(BudgetAllocator::new(Mallocator, 16));
    v.push(1).unwrap();
    v.push(2).unwrap();
    v.push(3).unwrap();
    assert_eq!(v.capacity(), 3);

    let err = v.push(4).unwrap_err();
    assert_eq!(err, Error::AllocError(Layout::array::<u32>(6).unwrap()));
    assert!(!err.is_bounds());
    assert_eq!(v, [1, 2, 3]);
    assert_eq!(v.capacity(), 3);

    assert!(v.extend_from_slice(&[4, 5, 6]).is_err());
    assert!(v.assign_from_slice(&[9; 8]).is_err());
    assert!(v.reserve(100).is_err());
    assert!(v.set_length(10).is_err());
    assert_eq!(v, [1, 2, 3]);
}

#[test]
fn vector_append_iter_failure_keeps_written_elements() {
    let mut v: Vector<u32, _> = Vector::new_in(BudgetAllocator::new(Mallocator, 16));
    let res = v.append_iter((0..10).filter(|_| true));
    assert!(res.is_err());
    assert_eq!(v, [0, 1, 2]);
}

#[test]
fn vector_pop() {
    let mut v = vector![1, 2, 3];
    assert_eq!(v.pop_front(), Err(Error::NotImplemented("pop_front")));
    assert_eq!(v.len(), 3);

    assert_eq!(v.pop_back(), Ok(3));
    assert_eq!(v.pop_back(), Ok(2));
    assert_eq!(v.pop_back(), Ok(1));
    assert_eq!(v.capacity(), 3);

    assert_eq!(v.pop_back(), Err(Error::Empty));
    assert_eq!(v.len(), 0);
    assert_eq!(v.pop_front(), Err(Error::NotImplemented("pop_front")));
    assert_eq!(v.front(), Err(Error::Empty));
    assert_eq!(v.back(), Err(Error::Empty));
}

#[test]
fn vector_front_back_mut() {
    let mut v = vector![1, 2, 3];
    *v.front_mut().unwrap() = 10;
    *v.back_mut().unwrap() = 30;
    assert_eq!(v, [10, 2, 30]);
}

#[test]
fn vector_set_length() {
    let mut v = vector![1, 2, 3];
    v.set_length(5).unwrap();
    assert_eq!(v, [1, 2, 3, 0, 0]);
    assert_eq!(v.capacity(), 7);

    v.set_length(1).unwrap();
    assert_eq!(v, [1]);
    assert_eq!(v.capacity(), 7);

    let mut v = vector![1, 2];
    v.resize(4, 9).unwrap();
    assert_eq!(v, [1, 2, 9, 9]);
    v.resize(1, 9).unwrap();
    assert_eq!(v, [1]);
}

#[test]
fn vector_shrink() {
    let mut v = vector![1, 2, 3, 4, 5];
    v.reserve(10).unwrap();
    assert!(v.shrink());
    assert_eq!(v.capacity(), 5);
    assert_eq!(v, [1, 2, 3, 4, 5]);

    assert!(v.shrink_to(2));
    assert_eq!(v, [1, 2]);
    assert_eq!(v.capacity(), 2);

    // Already at the requested capacity
    assert!(v.shrink_to(2));

    // Clamped to the length
    assert!(v.shrink_to(10));
    assert_eq!(v.len(), 2);
    assert_eq!(v.capacity(), 2);

    assert!(v.shrink_to(0));
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 0);
}

#[test]
fn vector_shrink_to_above_length_keeps_requested_capacity() {
    let mut v = vector![1, 2, 3, 4, 5];
    v.reserve(10).unwrap();
    v.truncate(2);
    assert_eq!(v.capacity(), 15);

    assert!(v.shrink_to(6));
    assert_eq!(v, [1, 2]);
    assert_eq!(v.capacity(), 6);

    // Never grows the buffer
    assert!(v.shrink_to(20));
    assert_eq!(v.capacity(), 6);
}

#[test]
fn reserve_after_clear_is_exact() {
    let mut v = vector![1, 2, 3];
    v.clear();
    v.reserve(7).unwrap();
    assert_eq!(v.capacity(), 7);
    assert!(v.is_empty());
}

#[test]
fn vector_shrink_failure_still_sets_length() {
    let mut v: Vector<u32, _> = Vector::from_array_in([1, 2, 3, 4, 5], NoShrinkAllocator).unwrap();
    assert!(!v.shrink_to(2));
    assert_eq!(v, [1, 2]);
    assert_eq!(v.capacity(), 5);

    // Releasing the whole buffer doesn't need the allocator to shrink
    assert!(v.shrink_to(0));
    assert_eq!(v.capacity(), 0);
}

#[test]
fn vector_shrink_in_linear_allocator() {
    let mut v: Vector<u32, _> = Vector::new_in(LinearAllocator::new(1024).unwrap());
    for i in 0..10 {
        v.push(i).unwrap();
    }
    assert_eq!(v.capacity(), 10);
    assert_eq!(v.allocator().used(), 40);

    assert!(v.shrink_to(4));
    assert_eq!(v, [0, 1, 2, 3]);
    assert_eq!(v.capacity(), 4);
    assert_eq!(v.allocator().used(), 16);
}

#[test]
fn vector_fallback_allocator() {
    let alloc = FallbackAllocator::new(LinearAllocator::new(16).unwrap(), Mallocator);
    let mut v: Vector<u32, _> = Vector::new_in(alloc);
    for i in 0..10 {
        v.push(i).unwrap();
    }

    assert!(v.iter().copied().eq(0..10));
    assert_eq!(v.allocator().main().used(), 0);
}

#[test]
fn vector_clear() {
    let mut v = vector![1, 2, 3];
    v.clear();
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 3);
}

#[test]
fn vector_assign() {
    let mut v = vector![1, 2, 3];
    v.assign([7, 8]).unwrap();
    assert_eq!(v, [7, 8]);
    assert_eq!(v.capacity(), 3);

    v.assign_from_slice(&[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(v, [1, 2, 3, 4, 5]);

    v.assign(core::iter::empty()).unwrap();
    assert!(v.is_empty());
}

#[test]
fn vector_append() {
    let mut v = vector![1, 2];
    v.extend_from_slice(&[3, 4]).unwrap();
    v.append_iter([5, 6]).unwrap();
    v.extend([7]);
    v.extend(&[8]);
    assert_eq!(v, [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn vector_concat() {
    let a = vector![1, 2];
    let b = vector![3, 4];

    let c = a.concat(&b).unwrap();
    assert_eq!(c, [1, 2, 3, 4]);
    assert_eq!(c.capacity(), 4);
    assert_eq!(a, [1, 2]);
    assert_eq!(b, [3, 4]);

    let d = &a + &b;
    assert_eq!(d, c);
    let e = &d + &[5][..];
    assert_eq!(e, [1, 2, 3, 4, 5]);
}

#[test]
fn vector_slice() {
    let mut v = vector![1, 2, 3];
    v.push(4).unwrap();
    assert_eq!(v, [1, 2, 3, 4]);

    assert_eq!(v.slice(1, 3), Ok(&[2, 3][..]));
    assert_eq!(v.slice(2, 2), Ok(&[][..]));

    let v = vector![1, 2, 3];
    assert_eq!(v.slice(0, 3), Err(Error::RangeOutOfBounds { start: 0, end: 3, len: 3 }));
    assert!(v.slice(3, 3).unwrap_err().is_bounds());
    assert!(v.slice(2, 1).is_err());
    assert_eq!(&v[..], &[1, 2, 3]);
    assert_eq!(&v[1..v.len()], &[2, 3]);
}

#[test]
fn vector_slice_mut() {
    let mut v = vector![1, 2, 3];
    v.slice_mut(0, 2).unwrap()[1] = 20;
    assert_eq!(v, [1, 20, 3]);
    assert!(v.slice_mut(0, 3).is_err());
}

#[test]
fn vector_slice_assign() {
    let mut v = vector![1, 2, 3];
    v.assign_all(0);
    assert_eq!(v, [0, 0, 0]);

    let mut v = vector![1, 2, 3, 4];
    v.assign_range(1, 3, 9).unwrap();
    assert_eq!(v, [1, 9, 9, 4]);
    assert!(v.assign_range(1, 4, 0).is_err());
    assert_eq!(v, [1, 9, 9, 4]);
}

#[test]
fn vector_slice_apply() {
    let mut v = vector![1, 2, 3];
    v.apply_range(0, 2, 5, <i32 as AddAssign>::add_assign).unwrap();
    assert_eq!(v, [6, 7, 3]);

    v.apply_all(1, |elem, val| *elem -= val);
    assert_eq!(v, [5, 6, 2]);

    assert!(v.apply_range(0, 3, 1, |elem, val| *elem += val).is_err());
    assert_eq!(v, [5, 6, 2]);
}

#[test]
fn vector_clone_is_independent() {
    let mut v = vector![1, 2, 3];
    v.reserve(10).unwrap();

    let mut w = v.clone();
    assert_eq!(w, v);
    assert_eq!(w.capacity(), v.capacity());
    assert_ne!(w.as_ptr(), v.as_ptr());

    w[0] = 100;
    v[1] = 200;
    assert_eq!(v, [1, 200, 3]);
    assert_eq!(w, [100, 2, 3]);
}

#[test]
fn vector_clone_duplicates_allocator() {
    let alloc = CountingAllocator::new(Mallocator);
    let stats = alloc.stats();

    let v: Vector<u32, _> = Vector::from_array_in([1, 2, 3], alloc).unwrap();
    let w = v.try_clone().unwrap();
    assert_eq!(w, [1, 2, 3]);
    assert_eq!(stats.allocs(), 2);

    drop(v);
    drop(w);
    assert_eq!(stats.deallocs(), 2);
}

#[test]
fn vector_try_clone_reports_failure() {
    let mut v: Vector<u32, _> = Vector::new_in(BudgetAllocator::new(Mallocator, 16));
    v.reserve(4).unwrap();
    v.push(1).unwrap();

    // A cloned budget allocator starts empty, so the copy fits
    let w = v.try_clone().unwrap();
    assert_eq!(w.capacity(), 4);

    let big: Vector<u32, _> = Vector::from_array_in([0; 8], BudgetAllocator::new(Mallocator, 32)).unwrap();
    assert!(big.concat(&[1]).is_err());
}

#[test]
fn vector_drops_elements() {
    let item = Rc::new(5);
    let mut v = Vector::new();
    for _ in 0..10 {
        v.push(item.clone()).unwrap();
    }
    assert_eq!(Rc::strong_count(&item), 11);

    v.truncate(6);
    assert_eq!(Rc::strong_count(&item), 7);

    let popped = v.pop_back().unwrap();
    assert_eq!(Rc::strong_count(&item), 7);
    drop(popped);
    assert_eq!(Rc::strong_count(&item), 6);

    v.shrink_to(2);
    assert_eq!(Rc::strong_count(&item), 3);

    drop(v);
    assert_eq!(Rc::strong_count(&item), 1);
}

#[test]
fn vector_zero_sized() {
    let mut v = Vector::<()>::new();
    for _ in 0..10 {
        v.push(()).unwrap();
    }
    assert_eq!(v.len(), 10);
    assert_eq!(v.capacity(), usize::MAX);
    assert_eq!(v.pop_back(), Ok(()));
    assert!(v.shrink());
    assert_eq!(v.len(), 9);
}

#[test]
fn vector_iterate() {
    let mut v = vector![1, 2, 3];
    for elem in &mut v {
        *elem *= 2;
    }
    let sum: i32 = (&v).into_iter().sum();
    assert_eq!(sum, 12);
    assert_eq!(format!("{v:?}"), "[2, 4, 6]");
}

#[cfg(feature = "memory_tracking")]
#[test]
fn vector_global_allocations_are_tracked() {
    use crate::mem::get_memory_manager;

    let before = get_memory_manager().stats().total_allocs;
    let v = vector![1u64, 2, 3];
    assert!(get_memory_manager().stats().total_allocs > before);
    drop(v);
}
