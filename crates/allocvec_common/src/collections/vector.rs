use core::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::ManuallyDrop,
    ops::{self, Add, Index, IndexMut},
    ptr,
    slice::{self, SliceIndex},
};

use crate::alloc::{Allocator, Global};
use super::{
    imp::raw_array::RawArray,
    handle_error, impl_slice_partial_eq_generic,
    Error, Result, ReserveStrategy, ThreeHalvesReserveStrategy, TryReserveError,
};

#[cfg(test)]
mod tests;

/// Creates a [`Vector`] containing the arguments.
///
/// `vector!` allows a `Vector` to be defined with the same syntax as an array expression.
/// There are 2 forms of this macro:
///
/// - Create a `Vector` containing a given list of elements, with a capacity of exactly the number of elements:
///
/// ```
/// # use allocvec_common::vector;
/// let v = vector![1, 2, 3];
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.capacity(), 3);
/// ```
///
/// - Create a `Vector` from a given element and size:
///
/// ```
/// # use allocvec_common::vector;
/// let v = vector![1; 3];
/// assert_eq!(v, [1, 1, 1]);
/// ```
///
/// The vector uses the [`Global`] allocator, and panics if it could not allocate.
#[macro_export]
macro_rules! vector {
    () => {
        $crate::collections::Vector::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::collections::Vector::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::collections::Vector::from_array([$($x),+])
    };
}

/// A contiguous growable array type with a pluggable allocator, written as `Vector<T>`, short for 'vector'.
///
/// The allocator is a generic parameter: a vector either uses the zero-sized [`Global`] handle to the process-wide allocator,
/// or holds its own allocator by value, which is cloned when the vector is cloned, and moved when the vector is moved.
///
/// Unlike `Vec`, every operation that may need memory reports allocation failure through its result,
/// and leaves the vector as it was before the call.
///
/// # Examples
///
/// ```
/// # use allocvec_common::collections::Vector;
/// let mut v = Vector::new();
/// v.push(1).unwrap();
/// v.push(2).unwrap();
///
/// assert_eq!(v.len(), 2);
/// assert_eq!(v[0], 1);
///
/// assert_eq!(v.pop_back(), Ok(2));
/// assert_eq!(v.len(), 1);
///
/// v.extend_from_slice(&[7, 8]).unwrap();
/// assert_eq!(v, [1, 7, 8]);
/// ```
///
/// # Capacity and reallocation
///
/// The *capacity* of a vector is the number of elements it can hold without reallocating, the *length* is the number of live elements.
/// When the length needs to exceed the capacity, the buffer is grown:
///
/// - An empty vector gets a fresh buffer of exactly the requested size.
/// - A non-empty vector asks its allocator to grow the buffer to the size calculated by its [`ReserveStrategy`],
///   which by default is 1.5 times the requested length.
///
/// # Slicing
///
/// Besides the usual `Index` and `Deref` slicing, [`Vector::slice`] gives checked access to a sub-range.
/// Note that it only accepts ranges with `start < len` and `end < len`.
pub struct Vector<T, A: Allocator = Global, R: ReserveStrategy = ThreeHalvesReserveStrategy> {
    arr:      RawArray<T, A, R>,
    len:      usize,
    // Tells drop check the vector owns its `T`s
    _phantom: PhantomData<T>,
}

static_assertions::assert_eq_size!(Vector<u32>, [usize; 3]);

unsafe impl<T: Send, A: Allocator + Send, R: ReserveStrategy> Send for Vector<T, A, R> {}
unsafe impl<T: Sync, A: Allocator + Sync, R: ReserveStrategy> Sync for Vector<T, A, R> {}

impl<T> Vector<T> {
    /// Constructs a new, empty `Vector<T>` using the global allocator.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Constructs a new, empty `Vector<T>` with exactly `capacity` elements worth of memory, using the global allocator.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Constructs a `Vector<T>` containing the elements of `array`, with a capacity of exactly `N`, using the global allocator.
    ///
    /// # Panics
    ///
    /// Panics if the memory could not be allocated.
    pub fn from_array<const N: usize>(array: [T; N]) -> Self {
        match Self::try_from_array_in(array, Global) {
            Ok(arr) => arr,
            Err(err) => handle_error(err),
        }
    }
}

impl<T: Clone> Vector<T> {
    /// Constructs a `Vector<T>` containing `n` clones of `elem`, using the global allocator.
    ///
    /// # Panics
    ///
    /// Panics if the memory could not be allocated.
    pub fn from_elem(elem: T, n: usize) -> Self {
        let mut arr = Self::new();
        if let Err(err) = arr.ensure_capacity(n) {
            handle_error(err);
        }
        arr.extend_with(n, |_| elem.clone());
        arr
    }
}

impl<T, A: Allocator, R: ReserveStrategy> Vector<T, A, R> {
    /// Constructs a new, empty `Vector<T, A>` using the provided allocator.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    #[inline]
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Self { arr: RawArray::new_in(alloc), len: 0, _phantom: PhantomData }
    }

    /// Constructs a new, empty `Vector<T, A>` with exactly `capacity` elements worth of memory, using the provided allocator.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity overflows, or if the allocator could not provide the memory.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self> {
        let arr = RawArray::try_with_capacity_in(capacity, alloc)?;
        Ok(Self { arr, len: 0, _phantom: PhantomData })
    }

    /// Constructs a `Vector<T, A>` containing the elements of `array`, with a capacity of exactly `N`, using the provided allocator.
    pub fn from_array_in<const N: usize>(array: [T; N], alloc: A) -> Result<Self> {
        Ok(Self::try_from_array_in(array, alloc)?)
    }

    fn try_from_array_in<const N: usize>(array: [T; N], alloc: A) -> core::result::Result<Self, TryReserveError> {
        let arr = RawArray::try_with_capacity_in(N, alloc)?;
        let array = ManuallyDrop::new(array);
        unsafe { ptr::copy_nonoverlapping(array.as_ptr(), arr.ptr(), N) };
        Ok(Self { arr, len: N, _phantom: PhantomData })
    }

    /// Constructs a `Vector<T, A>` from the elements of `iter`, using the provided allocator.
    ///
    /// This behaves like [`assign`](Vector::assign) on an empty vector.
    pub fn try_from_iter_in<I: IntoIterator<Item = T>>(iter: I, alloc: A) -> Result<Self> {
        let mut arr = Self::new_in(alloc);
        arr.assign(iter)?;
        Ok(arr)
    }

    /// Returns the number of elements the vector can hold without reallocating.
    ///
    /// For a zero-sized `T`, this is always `usize::MAX`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arr.capacity()
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the vector's allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.arr.allocator()
    }

    /// Ensures the vector can hold at least `min_capacity` elements in total.
    ///
    /// The length of the vector is not affected.
    /// An empty vector is given exactly `min_capacity` elements, a non-empty vector grows according to its reserve strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity overflows, or if the allocator could not provide the memory, in which case the vector is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use allocvec_common::collections::Vector;
    /// let mut v = Vector::<i32>::new();
    /// v.reserve(10).unwrap();
    /// assert_eq!(v.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, min_capacity: usize) -> Result<()> {
        Ok(self.ensure_capacity(min_capacity)?)
    }

    /// Shrinks the capacity of the vector to its length.
    ///
    /// Returns whether the allocator was able to release the memory.
    pub fn shrink(&mut self) -> bool {
        self.shrink_to(self.len)
    }

    /// Shrinks the vector to `new_len` elements, and asks the allocator to shrink the capacity to `new_len`.
    ///
    /// Elements past `new_len` are dropped, and the length is set to `new_len` even when the allocator refuses to shrink the buffer.
    /// When `new_len` is larger than the length, the length is kept and only the capacity past `new_len` is released.
    /// A `new_len` of 0 releases the buffer.
    ///
    /// Returns whether the capacity is now `new_len`, or unchanged if it already was smaller.
    ///
    /// # Examples
    ///
    /// ```
    /// # use allocvec_common::vector;
    /// let mut v = vector![1, 2, 3, 4];
    /// assert!(v.shrink_to(2));
    /// assert_eq!(v, [1, 2]);
    /// assert_eq!(v.capacity(), 2);
    /// ```
    pub fn shrink_to(&mut self, new_len: usize) -> bool {
        self.truncate(new_len);
        let new_cap = new_len.min(self.capacity());
        self.arr.try_shrink_to(new_cap)
    }

    /// Shortens the vector, keeping the first `len` elements and dropping the rest.
    ///
    /// If `len` is greater or equal to the vector's current length, this has no effect.
    /// This has no effect on the capacity of the vector.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        unsafe {
            let remaining_len = self.len - len;
            let tail = ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(len), remaining_len);
            // Set the length first, so a panicking drop can't cause a double drop
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Clears the vector, dropping all values.
    ///
    /// This has no effect on the capacity of the vector.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice containing the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Returns a raw pointer to the vector's buffer, or a dangling pointer if the vector didn't allocate.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.arr.ptr()
    }

    /// Returns a raw mutable pointer to the vector's buffer, or a dangling pointer if the vector didn't allocate.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.arr.ptr()
    }

    /// Always fails, removing elements from the front of a vector is not supported.
    pub fn pop_front(&mut self) -> Result<T> {
        Err(Error::NotImplemented("pop_front"))
    }

    /// Removes the last element from the vector and returns it.
    ///
    /// The capacity of the vector is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the vector is empty.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::Empty);
        }

        unsafe {
            self.len -= 1;
            Ok(ptr::read(self.as_ptr().add(self.len)))
        }
    }

    /// Returns a reference to the first element.
    pub fn front(&self) -> Result<&T> {
        self.as_slice().first().ok_or(Error::Empty)
    }

    /// Returns a mutable reference to the first element.
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice().first_mut().ok_or(Error::Empty)
    }

    /// Returns a reference to the last element.
    pub fn back(&self) -> Result<&T> {
        self.as_slice().last().ok_or(Error::Empty)
    }

    /// Returns a mutable reference to the last element.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice().last_mut().ok_or(Error::Empty)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len;
        self.as_slice().get(index).ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Returns the elements in `start..end`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] unless `start < len`, `end < len` and `start <= end`.
    /// This means a range ending at the length of the vector is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// # use allocvec_common::vector;
    /// let v = vector![1, 2, 3, 4];
    /// assert_eq!(v.slice(1, 3).unwrap(), &[2, 3]);
    /// assert!(v.slice(0, 4).is_err());
    /// ```
    pub fn slice(&self, start: usize, end: usize) -> Result<&[T]> {
        self.check_range(start, end)?;
        Ok(&self.as_slice()[start..end])
    }

    /// Returns the elements in `start..end` mutably.
    ///
    /// # Errors
    ///
    /// Same as [`Vector::slice`].
    pub fn slice_mut(&mut self, start: usize, end: usize) -> Result<&mut [T]> {
        self.check_range(start, end)?;
        Ok(&mut self.as_mut_slice()[start..end])
    }

    /// Applies `op` with a clone of `value` to every element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use allocvec_common::vector;
    /// let mut v = vector![1, 2, 3];
    /// v.apply_all(2, |elem, val| *elem *= val);
    /// assert_eq!(v, [2, 4, 6]);
    /// ```
    pub fn apply_all<U: Clone, F: FnMut(&mut T, U)>(&mut self, value: U, mut op: F) {
        for elem in self.as_mut_slice() {
            op(elem, value.clone());
        }
    }

    /// Applies `op` with a clone of `value` to every element in `start..end`.
    ///
    /// # Errors
    ///
    /// Same bounds as [`Vector::slice`], nothing is modified on an error.
    pub fn apply_range<U: Clone, F: FnMut(&mut T, U)>(&mut self, start: usize, end: usize, value: U, mut op: F) -> Result<()> {
        for elem in self.slice_mut(start, end)? {
            op(elem, value.clone());
        }
        Ok(())
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector needed to grow and couldn't, `value` is dropped in that case.
    pub fn push(&mut self, value: T) -> Result<()> {
        let len = self.len;
        if len == self.capacity() {
            let min_capacity = len.checked_add(1).ok_or(Error::CapacityOverflow)?;
            self.ensure_capacity(min_capacity)?;
        }
        unsafe {
            ptr::write(self.as_mut_ptr().add(len), value);
        }
        self.len += 1;
        Ok(())
    }

    /// Appends an element if there is sufficient spare capacity, otherwise the element is returned.
    ///
    /// Unlike [`push`], this method will never allocate.
    ///
    /// [`push`]: Vector::push
    pub fn push_within_capacity(&mut self, value: T) -> core::result::Result<(), T> {
        if self.len == self.capacity() {
            return Err(value);
        }
        unsafe {
            ptr::write(self.as_mut_ptr().add(self.len), value);
        }
        self.len += 1;
        Ok(())
    }

    /// Replaces the contents of the vector with the elements of `iter`.
    ///
    /// The vector is first made large enough for the number of elements `iter` reports, if that fails, the vector is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector couldn't grow.
    /// If `iter` yields more elements than it reported, and growing for those fails, the elements written so far are kept.
    pub fn assign<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.ensure_capacity(lower)?;
        self.clear();
        Ok(self.extend_desugared(iter)?)
    }

    /// Appends all elements of `iter` to the back of the vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector couldn't grow, the elements written so far are kept.
    pub fn append_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        Ok(self.extend_desugared(iter.into_iter())?)
    }

    //--------------------------------------------------------------

    /// Ensure there is space for `min_capacity` elements, with the current length.
    fn ensure_capacity(&mut self, min_capacity: usize) -> core::result::Result<(), TryReserveError> {
        self.arr.try_ensure_capacity(self.len, min_capacity)
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        let len = self.len;
        if start < len && end < len && start <= end {
            Ok(())
        } else {
            Err(Error::RangeOutOfBounds { start, end, len })
        }
    }

    fn extend_desugared<I: Iterator<Item = T>>(&mut self, mut iter: I) -> core::result::Result<(), TryReserveError> {
        let (lower, _) = iter.size_hint();
        let min_capacity = self.len.checked_add(lower).ok_or(TryReserveError::CapacityOverflow)?;
        self.ensure_capacity(min_capacity)?;

        while let Some(elem) = iter.next() {
            let len = self.len;
            if len == self.capacity() {
                let (lower, _) = iter.size_hint();
                let min_capacity = len.checked_add(lower)
                    .and_then(|cap| cap.checked_add(1))
                    .ok_or(TryReserveError::CapacityOverflow)?;
                self.ensure_capacity(min_capacity)?;
            }
            unsafe {
                ptr::write(self.as_mut_ptr().add(len), elem);
            }
            self.len += 1;
        }
        Ok(())
    }

    /// Write `count` elements produced by `f` after the live elements.
    ///
    /// The capacity needs to have been ensured by the caller.
    /// If `f` panics, the elements written so far are kept.
    fn extend_with<F: FnMut(usize) -> T>(&mut self, count: usize, mut f: F) {
        debug_assert!(self.capacity() - self.len >= count);

        let base = self.arr.ptr();
        let start = self.len;
        let mut len = scopeguard::guard(start, |len| self.len = len);
        for i in 0..count {
            unsafe { base.add(*len).write(f(i)) };
            *len += 1;
        }
    }
}

impl<T: Default, A: Allocator, R: ReserveStrategy> Vector<T, A, R> {
    /// Sets the length of the vector.
    ///
    /// When `new_len` is greater than the current length, the vector is grown as needed and new elements are set to `T::default()`.
    /// When `new_len` is smaller, the trailing elements are dropped, and the buffer is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector couldn't grow, in which case the vector is unchanged.
    pub fn set_length(&mut self, new_len: usize) -> Result<()> {
        if new_len <= self.len {
            self.truncate(new_len);
        } else {
            self.ensure_capacity(new_len)?;
            self.extend_with(new_len - self.len, |_| T::default());
        }
        Ok(())
    }
}

impl<T: Clone, A: Allocator, R: ReserveStrategy> Vector<T, A, R> {
    /// Resizes the vector in-place so that its length is equal to `new_len`.
    ///
    /// If `new_len` is greater than the current length, the vector is extended by clones of `value`.
    /// If `new_len` is smaller, the vector is truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector couldn't grow, in which case the vector is unchanged.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<()> {
        if new_len <= self.len {
            self.truncate(new_len);
        } else {
            self.ensure_capacity(new_len)?;
            self.extend_with(new_len - self.len, |_| value.clone());
        }
        Ok(())
    }

    /// Replaces the contents of the vector with clones of the elements in `other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector couldn't grow, in which case the vector is unchanged.
    pub fn assign_from_slice(&mut self, other: &[T]) -> Result<()> {
        self.ensure_capacity(other.len())?;
        self.clear();
        self.extend_with(other.len(), |i| other[i].clone());
        Ok(())
    }

    /// Clones and appends all elements in `other` to the vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector couldn't grow, in which case the vector is unchanged.
    pub fn extend_from_slice(&mut self, other: &[T]) -> Result<()> {
        let min_capacity = self.len.checked_add(other.len()).ok_or(Error::CapacityOverflow)?;
        self.ensure_capacity(min_capacity)?;
        self.extend_with(other.len(), |i| other[i].clone());
        Ok(())
    }

    /// Sets every element to a clone of `value`.
    pub fn assign_all(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Sets every element in `start..end` to a clone of `value`.
    ///
    /// # Errors
    ///
    /// Same bounds as [`Vector::slice`], nothing is modified on an error.
    pub fn assign_range(&mut self, start: usize, end: usize, value: T) -> Result<()> {
        self.slice_mut(start, end)?.fill(value);
        Ok(())
    }
}

impl<T: Clone, A: Allocator + Clone, R: ReserveStrategy> Vector<T, A, R> {
    /// Creates an independent copy of the vector.
    ///
    /// The copy has the same capacity as the vector, holds clones of its elements, and a clone of its allocator.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory for the copy could not be allocated.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(self.clone_impl()?)
    }

    /// Creates a new vector with clones of the elements of the vector, followed by clones of the elements of `other`.
    ///
    /// Neither operand is modified, and the result uses a clone of this vector's allocator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use allocvec_common::vector;
    /// let a = vector![1, 2];
    /// let b = vector![3, 4];
    /// assert_eq!(a.concat(&b).unwrap(), [1, 2, 3, 4]);
    /// ```
    pub fn concat(&self, other: &[T]) -> Result<Self> {
        Ok(self.concat_impl(other)?)
    }

    fn clone_impl(&self) -> core::result::Result<Self, TryReserveError> {
        let arr = RawArray::try_with_capacity_in(self.capacity(), self.allocator().clone())?;
        let mut clone = Self { arr, len: 0, _phantom: PhantomData };
        clone.extend_with(self.len, |i| self[i].clone());
        Ok(clone)
    }

    fn concat_impl(&self, other: &[T]) -> core::result::Result<Self, TryReserveError> {
        let len = self.len.checked_add(other.len()).ok_or(TryReserveError::CapacityOverflow)?;
        let mut res = Self::new_in(self.allocator().clone());
        res.ensure_capacity(len)?;
        res.extend_with(self.len, |i| self[i].clone());
        res.extend_with(other.len(), |i| other[i].clone());
        Ok(res)
    }
}

impl<T, A: Allocator, R: ReserveStrategy> ops::Deref for Vector<T, A, R> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: Allocator, R: ReserveStrategy> ops::DerefMut for Vector<T, A, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator, R: ReserveStrategy> Drop for Vector<T, A, R> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len))
        }
        // RawArray handles deallocation
    }
}

impl<T: Clone, A: Allocator + Clone, R: ReserveStrategy> Clone for Vector<T, A, R> {
    /// # Panics
    ///
    /// Panics if the memory for the copy could not be allocated, use [`Vector::try_clone`] to handle the error.
    fn clone(&self) -> Self {
        match self.clone_impl() {
            Ok(clone) => clone,
            Err(err) => handle_error(err),
        }
    }
}

impl<T, A: Allocator + Default, R: ReserveStrategy> Default for Vector<T, A, R> {
    /// Creates an empty `Vector<T, A>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: fmt::Debug, A: Allocator, R: ReserveStrategy> fmt::Debug for Vector<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: Hash, A: Allocator, R: ReserveStrategy> Hash for Vector<T, A, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&**self, state)
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator, R: ReserveStrategy> Index<I> for Vector<T, A, R> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator, R: ReserveStrategy> IndexMut<I> for Vector<T, A, R> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

impl<T, A: Allocator + Default, R: ReserveStrategy> FromIterator<T> for Vector<T, A, R> {
    /// # Panics
    ///
    /// Panics if the memory could not be allocated, use [`Vector::try_from_iter_in`] to handle the error.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::default();
        if let Err(err) = arr.extend_desugared(iter.into_iter()) {
            handle_error(err);
        }
        arr
    }
}

impl<'a, T, A: Allocator, R: ReserveStrategy> IntoIterator for &'a Vector<T, A, R> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator, R: ReserveStrategy> IntoIterator for &'a mut Vector<T, A, R> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A: Allocator, R: ReserveStrategy> Extend<T> for Vector<T, A, R> {
    /// # Panics
    ///
    /// Panics if the memory could not be allocated, use [`Vector::append_iter`] to handle the error.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(err) = self.extend_desugared(iter.into_iter()) {
            handle_error(err);
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator, R: ReserveStrategy> Extend<&'a T> for Vector<T, A, R> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T: Clone, A: Allocator + Clone, R: ReserveStrategy> Add<&[T]> for &Vector<T, A, R> {
    type Output = Vector<T, A, R>;

    /// Concatenates both operands into a new vector.
    ///
    /// # Panics
    ///
    /// Panics if the memory could not be allocated, use [`Vector::concat`] to handle the error.
    fn add(self, rhs: &[T]) -> Self::Output {
        match self.concat_impl(rhs) {
            Ok(res) => res,
            Err(err) => handle_error(err),
        }
    }
}

impl<T: Clone, A: Allocator + Clone, R: ReserveStrategy, A1: Allocator, R1: ReserveStrategy> Add<&Vector<T, A1, R1>> for &Vector<T, A, R> {
    type Output = Vector<T, A, R>;

    /// Concatenates both operands into a new vector.
    ///
    /// # Panics
    ///
    /// Panics if the memory could not be allocated, use [`Vector::concat`] to handle the error.
    fn add(self, rhs: &Vector<T, A1, R1>) -> Self::Output {
        self + rhs.as_slice()
    }
}

impl_slice_partial_eq_generic!([A0: Allocator, A1: Allocator, R0: ReserveStrategy, R1: ReserveStrategy] Vector<T, A0, R0>, Vector<U, A1, R1>);
impl_slice_partial_eq_generic!([A: Allocator, R: ReserveStrategy] Vector<T, A, R>, &[U]);
impl_slice_partial_eq_generic!([A: Allocator, R: ReserveStrategy] Vector<T, A, R>, &mut [U]);
impl_slice_partial_eq_generic!([A: Allocator, R: ReserveStrategy] &[T], Vector<U, A, R>);
impl_slice_partial_eq_generic!([A: Allocator, R: ReserveStrategy] &mut [T], Vector<U, A, R>);
impl_slice_partial_eq_generic!([A: Allocator, R: ReserveStrategy] Vector<T, A, R>, [U]);
impl_slice_partial_eq_generic!([A: Allocator, R: ReserveStrategy] [T], Vector<U, A, R>);
impl_slice_partial_eq_generic!([A: Allocator, R: ReserveStrategy, const N: usize] Vector<T, A, R>, [U; N]);
impl_slice_partial_eq_generic!([A: Allocator, R: ReserveStrategy, const N: usize] Vector<T, A, R>, &[U; N]);
impl_slice_partial_eq_generic!([A: Allocator, R: ReserveStrategy, const N: usize] [T; N], Vector<U, A, R>);

impl<T: Eq, A: Allocator, R: ReserveStrategy> Eq for Vector<T, A, R> {}

impl<T, A: Allocator, R: ReserveStrategy> AsRef<[T]> for Vector<T, A, R> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator, R: ReserveStrategy> AsMut<[T]> for Vector<T, A, R> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    /// Allocate a `Vector<T>` and move `array`'s items into it.
    ///
    /// # Panics
    ///
    /// Panics if the memory could not be allocated.
    fn from(array: [T; N]) -> Self {
        Self::from_array(array)
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    /// Allocate a `Vector<T>` and fill it by cloning `s`'s items.
    ///
    /// # Panics
    ///
    /// Panics if the memory could not be allocated.
    fn from(s: &[T]) -> Self {
        let mut arr = Self::new();
        if let Err(err) = arr.ensure_capacity(s.len()) {
            handle_error(err);
        }
        arr.extend_with(s.len(), |i| s[i].clone());
        arr
    }
}
