//! Owning, growable, contiguous array storage.
//!
//! [`Array`] holds exactly one contiguous allocation of `capacity` slots,
//! of which the first `len` hold live elements and the rest are allocated
//! but unconstructed. Raw allocation is delegated to the private
//! [`RawBuffer`](crate::raw::RawBuffer) memory provider; all element
//! construction and destruction happens here.
//!
//! Growth is amortized O(1): a full buffer doubles its capacity, and an
//! empty one starts at a small constant so the first couple of insertions
//! do not reallocate. Bulk insertion reallocates tightly, and reallocating
//! paths clone new values before moving live elements, so a failure leaves
//! the prior state intact.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::error::ArrayError;
use crate::raw::{non_null_or_dangling, RawBuffer};
use crate::view::ArrayView;

/// Capacity of a freshly constructed non-empty [`Array`]. Avoids
/// reallocating on the first couple of insertions.
const MIN_CAPACITY: usize = 2;

/// Drops the elements it has counted when a clone panics mid-fill,
/// rolling an interrupted bulk construction back.
struct InitGuard<T> {
    start: *mut T,
    count: usize,
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `count` elements starting at `start` were
        // constructed before the unwind began.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.start, self.count)) };
    }
}

/// A growable array in one contiguous allocation.
///
/// The contiguity guarantee is the point: the whole content can be handed
/// to code that expects flat memory via [`as_ptr`](Self::as_ptr) /
/// [`as_slice`](Self::as_slice), and sub-ranges can be viewed through
/// [`ArrayView`]. Slots `[0, len)` are live; slots `[len, capacity)` are
/// allocated but not constructed.
///
/// Allocation is fallible throughout: operations that may allocate return
/// [`ArrayError::AllocationFailed`] instead of aborting.
///
/// # View invalidation
///
/// Any operation that may reallocate ([`reserve`](Self::reserve) growth,
/// capacity-exceeding insertion, [`swap`](Self::swap), destruction)
/// invalidates every [`ArrayView`] previously derived from this array.
pub struct Array<T> {
    buf: RawBuffer<T>,
    len: usize,
}

impl<T> Array<T> {
    /// An array with length 0 and capacity 0. Never allocates.
    pub const fn empty() -> Self {
        Self {
            buf: RawBuffer::empty(),
            len: 0,
        }
    }

    /// An empty array with a small preallocated capacity.
    pub fn new() -> Result<Self, ArrayError> {
        Ok(Self {
            buf: RawBuffer::allocate(MIN_CAPACITY)?,
            len: 0,
        })
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Equivalent to `len() == 0`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total allocated slot count. Always `>= len()`.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Start of the owned block, for code expecting flat memory.
    pub fn as_ptr(&self) -> *const T {
        non_null_or_dangling(self.buf.ptr())
    }

    /// Mutable start of the owned block.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        non_null_or_dangling(self.buf.ptr())
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are live by the container invariant.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots `[0, len)` are live by the container invariant.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Borrow the whole array as a view.
    ///
    /// Takes `&mut self` because a view grants write access. The view is
    /// a weak alias: it must not outlive any reallocating operation on
    /// this array (see the type-level notes on invalidation).
    pub fn view(&mut self) -> ArrayView<T> {
        // SAFETY: slots `[0, len)` are live; validity holds until the next
        // reallocating operation, which is the view's documented contract.
        unsafe { ArrayView::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// View of the sub-range `[begin, end)` of this array.
    ///
    /// Fails with [`ArrayError::LimitsOutOfRange`] unless
    /// `begin <= end && end <= len`.
    pub fn subarray(&mut self, begin: usize, end: usize) -> Result<ArrayView<T>, ArrayError> {
        self.view().subarray(begin, end)
    }

    /// Append `value`, growing the capacity if the buffer is full.
    ///
    /// Amortized O(1) via the doubling policy of [`grow`](Self::grow).
    pub fn push_back(&mut self, value: T) -> Result<(), ArrayError> {
        self.grow()?;
        // SAFETY: `grow` guarantees `len < capacity`; the slot at `len` is
        // allocated and unconstructed.
        unsafe { self.as_mut_ptr().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Destroy the last element.
    ///
    /// # Panics
    ///
    /// Panics when the array is empty; calling `pop_back` on an empty
    /// array is a broken caller contract.
    pub fn pop_back(&mut self) {
        assert!(!self.is_empty(), "pop_back on empty Array");
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` held a live element; the
        // length was decremented first so it is no longer reachable.
        unsafe { ptr::drop_in_place(self.as_mut_ptr().add(self.len)) };
    }

    /// Insert `value` at `index`, shifting the tail back by one.
    ///
    /// `index == len` is equivalent to [`push_back`](Self::push_back).
    /// After success the inserted element is at `index`; the relative
    /// order of all other elements is preserved.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        if index > self.len {
            return Err(ArrayError::LimitsOutOfRange {
                begin: index,
                end: index,
                len: self.len,
            });
        }
        if index == self.len {
            return self.push_back(value);
        }
        self.grow()?;
        let data = self.as_mut_ptr();
        // SAFETY: `grow` guarantees one free slot past `len`; the tail
        // shift stays within `[index, len]` and the overlapping copy is
        // handled by `ptr::copy`.
        unsafe {
            ptr::copy(data.add(index), data.add(index + 1), self.len - index);
            data.add(index).write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove the element at `index`, shifting the tail left by one.
    ///
    /// After success the element that followed the removed one is at
    /// `index`.
    pub fn erase(&mut self, index: usize) -> Result<(), ArrayError> {
        if index >= self.len {
            return Err(ArrayError::LimitsOutOfRange {
                begin: index,
                end: index + 1,
                len: self.len,
            });
        }
        let old_len = self.len;
        // Fence the length down: a panicking element drop leaks the slots
        // in flux instead of exposing a dropped one to `Drop`.
        self.len = index;
        let data = self.as_mut_ptr();
        // SAFETY: the slot at `index` is live; the shift copies the live
        // range `[index + 1, old_len)` left by one, and the duplicate bits
        // at the end stay past the restored length.
        unsafe {
            ptr::drop_in_place(data.add(index));
            ptr::copy(data.add(index + 1), data.add(index), old_len - index - 1);
        }
        self.len = old_len - 1;
        Ok(())
    }

    /// Remove the range `[begin, end)`, shifting the tail left.
    ///
    /// After success the element that followed the erased range is at
    /// `begin`. Fails with [`ArrayError::LimitsOutOfRange`] unless
    /// `begin <= end && end <= len`.
    pub fn erase_range(&mut self, begin: usize, end: usize) -> Result<(), ArrayError> {
        if begin > end || end > self.len {
            return Err(ArrayError::LimitsOutOfRange {
                begin,
                end,
                len: self.len,
            });
        }
        let count = end - begin;
        let old_len = self.len;
        // Fence the length down while the range is dropped, as in `erase`.
        self.len = begin;
        let data = self.as_mut_ptr();
        // SAFETY: `[begin, end)` is live and dropped exactly once; the
        // surviving tail `[end, old_len)` is copied over the gap and the
        // trailing duplicates stay past the restored length.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(data.add(begin), count));
            ptr::copy(data.add(end), data.add(begin), old_len - end);
        }
        self.len = old_len - count;
        Ok(())
    }

    /// Destroy all live elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        let live = self.len;
        self.len = 0;
        // SAFETY: the first `live` slots held live elements; the length is
        // zeroed first so a panicking element drop cannot expose them.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), live));
        }
    }

    /// Grow the capacity to exactly `new_capacity`.
    ///
    /// A no-op when `new_capacity <= capacity()`. Never changes the length
    /// or the element values. On failure the array is unchanged.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        if new_capacity <= self.buf.capacity() {
            return Ok(());
        }
        let new_buf = RawBuffer::allocate(new_capacity)?;
        // SAFETY: both blocks hold at least `len` slots and are distinct
        // allocations; the live elements are moved, and the old block is
        // released without dropping them.
        unsafe {
            ptr::copy_nonoverlapping(
                self.as_ptr(),
                non_null_or_dangling(new_buf.ptr()),
                self.len,
            );
        }
        self.buf = new_buf;
        Ok(())
    }

    /// The zero-argument growth policy behind [`push_back`](Self::push_back).
    ///
    /// Capacity 0 becomes the small initial constant; a full buffer
    /// (`len == capacity`) doubles. Otherwise a no-op. The doubling is what
    /// amortizes `push_back` to O(1).
    pub fn grow(&mut self) -> Result<(), ArrayError> {
        let cap = self.buf.capacity();
        if cap == 0 {
            self.reserve(MIN_CAPACITY)
        } else if self.len == cap {
            let doubled = cap
                .checked_mul(2)
                .ok_or(ArrayError::AllocationFailed { elements: cap })?;
            self.reserve(doubled)
        } else {
            Ok(())
        }
    }

    /// O(1) exchange of buffer, length, and capacity with `rhs`.
    ///
    /// Full ownership transfer; no element-level work. Views into either
    /// array keep referring to the buffer they were created over.
    pub fn swap(&mut self, rhs: &mut Self) {
        mem::swap(self, rhs);
    }
}

impl<T: Default> Array<T> {
    /// An array of `len` default-constructed elements.
    ///
    /// Capacity equals `len` exactly (tight allocation).
    pub fn with_len(len: usize) -> Result<Self, ArrayError> {
        let buf = RawBuffer::allocate(len)?;
        let data: *mut T = non_null_or_dangling(buf.ptr());
        let mut guard = InitGuard {
            start: data,
            count: 0,
        };
        for k in 0..len {
            // SAFETY: `k < len <= capacity`; the slot is unconstructed.
            unsafe { data.add(k).write(T::default()) };
            guard.count += 1;
        }
        mem::forget(guard);
        Ok(Self { buf, len })
    }
}

impl<T: Clone> Array<T> {
    /// An array of `len` clones of `value`. Tight allocation.
    pub fn from_elem(len: usize, value: T) -> Result<Self, ArrayError> {
        let buf = RawBuffer::allocate(len)?;
        let data: *mut T = non_null_or_dangling(buf.ptr());
        let mut guard = InitGuard {
            start: data,
            count: 0,
        };
        for k in 0..len {
            // SAFETY: `k < len <= capacity`; the slot is unconstructed.
            unsafe { data.add(k).write(value.clone()) };
            guard.count += 1;
        }
        mem::forget(guard);
        Ok(Self { buf, len })
    }

    /// An array copy-constructed from an existing sequence. Tight
    /// allocation.
    pub fn from_slice(src: &[T]) -> Result<Self, ArrayError> {
        let buf = RawBuffer::allocate(src.len())?;
        let data: *mut T = non_null_or_dangling(buf.ptr());
        let mut guard = InitGuard {
            start: data,
            count: 0,
        };
        for (k, item) in src.iter().enumerate() {
            // SAFETY: `k < src.len() <= capacity`; the slot is
            // unconstructed.
            unsafe { data.add(k).write(item.clone()) };
            guard.count += 1;
        }
        mem::forget(guard);
        Ok(Self {
            buf,
            len: src.len(),
        })
    }

    /// An array copy-constructed from a view over foreign memory.
    pub fn from_view(view: &ArrayView<T>) -> Result<Self, ArrayError> {
        Self::from_slice(view.as_slice())
    }

    /// An independent copy, preserving this array's capacity.
    pub fn try_clone(&self) -> Result<Self, ArrayError> {
        let buf = RawBuffer::allocate(self.buf.capacity())?;
        let data: *mut T = non_null_or_dangling(buf.ptr());
        let mut guard = InitGuard {
            start: data,
            count: 0,
        };
        for (k, item) in self.as_slice().iter().enumerate() {
            // SAFETY: `k < len <= capacity`; the slot is unconstructed.
            unsafe { data.add(k).write(item.clone()) };
            guard.count += 1;
        }
        mem::forget(guard);
        Ok(Self {
            buf,
            len: self.len,
        })
    }

    /// Value assignment from another array.
    ///
    /// When the lengths match, an in-place element-wise copy that keeps the
    /// existing storage. When they differ, copy-and-swap: a full temporary
    /// copy of `rhs` is built first and the internals exchanged, so this
    /// array is completely unmodified if building the copy fails.
    pub fn assign(&mut self, rhs: &Array<T>) -> Result<(), ArrayError> {
        self.assign_slice(rhs.as_slice())
    }

    /// Value assignment from a slice; same contract as
    /// [`assign`](Self::assign).
    pub fn assign_slice(&mut self, rhs: &[T]) -> Result<(), ArrayError> {
        if self.len == rhs.len() {
            self.as_mut_slice().clone_from_slice(rhs);
        } else {
            let mut temp = Array::from_slice(rhs)?;
            self.swap(&mut temp);
        }
        Ok(())
    }

    /// Insert `count` clones of `value` at `index`.
    ///
    /// After success the first inserted element is at `index` and the
    /// relative order of all other elements is preserved. Three cases:
    ///
    /// - `len + count` reaches the capacity: reallocate tightly to
    ///   `len + count`, assembling prefix, new values, and suffix in the
    ///   new buffer. The clones are made before any live element moves, so
    ///   a failure leaves this array untouched.
    /// - `index + count` reaches or passes the old length: the shifted
    ///   tail lands entirely in unconstructed slots past the old end.
    /// - Strictly inside with room to spare: relocate the last `count`
    ///   live elements into fresh slots, shift the middle block backward,
    ///   then write the new values into the opened gap.
    pub fn insert_n(&mut self, index: usize, count: usize, value: T) -> Result<(), ArrayError> {
        if index > self.len {
            return Err(ArrayError::LimitsOutOfRange {
                begin: index,
                end: index,
                len: self.len,
            });
        }
        let new_len = self
            .len
            .checked_add(count)
            .ok_or(ArrayError::AllocationFailed { elements: usize::MAX })?;

        if new_len >= self.buf.capacity() {
            let new_buf = RawBuffer::allocate(new_len)?;
            let dst: *mut T = non_null_or_dangling(new_buf.ptr());
            let mut guard = InitGuard {
                // SAFETY: `index + count <= new_len`, within the new block.
                start: unsafe { dst.add(index) },
                count: 0,
            };
            for k in 0..count {
                // SAFETY: slot `index + k` of the new block is
                // unconstructed.
                unsafe { dst.add(index + k).write(value.clone()) };
                guard.count += 1;
            }
            mem::forget(guard);
            // SAFETY: prefix and suffix move into disjoint regions of the
            // fresh block; the old block is released without dropping the
            // moved-out elements.
            unsafe {
                let src = self.as_ptr();
                ptr::copy_nonoverlapping(src, dst, index);
                ptr::copy_nonoverlapping(
                    src.add(index),
                    dst.add(index + count),
                    self.len - index,
                );
            }
            self.buf = new_buf;
            self.len = new_len;
        } else if index + count >= self.len {
            let old_len = self.len;
            // Fence the length down: a panicking clone below leaks the
            // slots in flux instead of double-dropping them.
            self.len = index;
            let data = self.as_mut_ptr();
            // SAFETY: `index + count >= old_len` makes source and
            // destination of the tail move disjoint, and the destination
            // `[index + count, new_len)` lies within capacity. The moved-out
            // and never-constructed slots `[index, index + count)` are then
            // each written exactly once.
            unsafe {
                ptr::copy_nonoverlapping(
                    data.add(index),
                    data.add(index + count),
                    old_len - index,
                );
                for k in 0..count {
                    data.add(index + k).write(value.clone());
                }
            }
            self.len = new_len;
        } else {
            let old_len = self.len;
            let shifted = old_len - index - count;
            self.len = index;
            let data = self.as_mut_ptr();
            // SAFETY: the last `count` live elements move into fresh slots
            // `[old_len, old_len + count)` (disjoint, within capacity); the
            // middle block shifts backward with an overlap-safe copy; the
            // opened gap `[index, index + count)` is then written exactly
            // once per slot.
            unsafe {
                ptr::copy_nonoverlapping(data.add(old_len - count), data.add(old_len), count);
                ptr::copy(data.add(index), data.add(index + count), shifted);
                for k in 0..count {
                    data.add(index + k).write(value.clone());
                }
            }
            self.len = new_len;
        }
        Ok(())
    }

    /// Insert clones of `src`'s elements at `index`, in order.
    ///
    /// Same three cases, boundary conditions, and ordering guarantees as
    /// [`insert_n`](Self::insert_n).
    pub fn insert_slice(&mut self, index: usize, src: &[T]) -> Result<(), ArrayError> {
        if index > self.len {
            return Err(ArrayError::LimitsOutOfRange {
                begin: index,
                end: index,
                len: self.len,
            });
        }
        let count = src.len();
        let new_len = self
            .len
            .checked_add(count)
            .ok_or(ArrayError::AllocationFailed { elements: usize::MAX })?;

        if new_len >= self.buf.capacity() {
            let new_buf = RawBuffer::allocate(new_len)?;
            let dst: *mut T = non_null_or_dangling(new_buf.ptr());
            let mut guard = InitGuard {
                // SAFETY: `index + count <= new_len`, within the new block.
                start: unsafe { dst.add(index) },
                count: 0,
            };
            for (k, item) in src.iter().enumerate() {
                // SAFETY: slot `index + k` of the new block is
                // unconstructed.
                unsafe { dst.add(index + k).write(item.clone()) };
                guard.count += 1;
            }
            mem::forget(guard);
            // SAFETY: as in `insert_n`: disjoint moves into the fresh
            // block, old block released without dropping moved elements.
            unsafe {
                let old = self.as_ptr();
                ptr::copy_nonoverlapping(old, dst, index);
                ptr::copy_nonoverlapping(
                    old.add(index),
                    dst.add(index + count),
                    self.len - index,
                );
            }
            self.buf = new_buf;
            self.len = new_len;
        } else if index + count >= self.len {
            let old_len = self.len;
            self.len = index;
            let data = self.as_mut_ptr();
            // SAFETY: as in `insert_n`'s tail case; `src` cannot alias the
            // buffer because it is borrowed while `self` is borrowed
            // mutably.
            unsafe {
                ptr::copy_nonoverlapping(
                    data.add(index),
                    data.add(index + count),
                    old_len - index,
                );
                for (k, item) in src.iter().enumerate() {
                    data.add(index + k).write(item.clone());
                }
            }
            self.len = new_len;
        } else {
            let old_len = self.len;
            let shifted = old_len - index - count;
            self.len = index;
            let data = self.as_mut_ptr();
            // SAFETY: as in `insert_n`'s strictly-inside case.
            unsafe {
                ptr::copy_nonoverlapping(data.add(old_len - count), data.add(old_len), count);
                ptr::copy(data.add(index), data.add(index + count), shifted);
                for (k, item) in src.iter().enumerate() {
                    data.add(index + k).write(item.clone());
                }
            }
            self.len = new_len;
        }
        Ok(())
    }

    /// Resize to `new_len`, filling new slots with clones of `value`.
    ///
    /// Shrinking erases the trailing range; growing bulk-inserts at the
    /// end.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), ArrayError> {
        if new_len < self.len {
            self.erase_range(new_len, self.len)
        } else if self.len < new_len {
            self.insert_n(self.len, new_len - self.len, value)
        } else {
            Ok(())
        }
    }
}

impl<T: Default + Clone> Array<T> {
    /// [`resize`](Self::resize) with a default-constructed fill value.
    pub fn resize_default(&mut self, new_len: usize) -> Result<(), ArrayError> {
        self.resize(new_len, T::default())
    }
}

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        self.clear();
        // `buf` releases the raw block.
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// SAFETY: `Array` exclusively owns its buffer; sending it moves sole access
// to the elements along with it.
unsafe impl<T: Send> Send for Array<T> {}
// SAFETY: shared access to `Array` only hands out `&T`.
unsafe impl<T: Sync> Sync for Array<T> {}

impl<T> Deref for Array<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Array<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Array<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: PartialEq> PartialEq for Array<T> {
    /// Element-wise comparison; `false` when the lengths differ.
    fn eq(&self, rhs: &Self) -> bool {
        self.as_slice() == rhs.as_slice()
    }
}

impl<T: PartialEq> PartialEq<[T]> for Array<T> {
    fn eq(&self, rhs: &[T]) -> bool {
        self.as_slice() == rhs
    }
}

impl<T: PartialEq> PartialEq<ArrayView<T>> for Array<T> {
    fn eq(&self, rhs: &ArrayView<T>) -> bool {
        self.as_slice() == rhs.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts drops so leak and double-drop bugs show up as wrong tallies.
    #[derive(Clone)]
    struct Tally(Rc<Cell<usize>>);

    impl Tally {
        fn new(counter: &Rc<Cell<usize>>) -> Self {
            Self(Rc::clone(counter))
        }
    }

    impl Drop for Tally {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn new_preallocates_minimum_capacity() {
        let arr = Array::<i32>::new().unwrap();
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.capacity(), MIN_CAPACITY);
    }

    #[test]
    fn empty_never_allocates() {
        let arr = Array::<i32>::empty();
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.capacity(), 0);
        assert!(arr.as_slice().is_empty());
    }

    #[test]
    fn with_len_default_fills() {
        let arr = Array::<i32>::with_len(4).unwrap();
        assert_eq!(arr.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(arr.capacity(), 4);
    }

    #[test]
    fn from_elem_fills() {
        let arr = Array::from_elem(3, 7).unwrap();
        assert_eq!(arr.as_slice(), &[7, 7, 7]);
        assert_eq!(arr.capacity(), 3);
    }

    #[test]
    fn from_slice_is_tight() {
        let arr = Array::from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
        assert_eq!(arr.capacity(), 3);
    }

    #[test]
    fn push_back_doubles_when_full() {
        // Capacity 2, length 2; the next push doubles to 4.
        let mut arr = Array::from_slice(&['a', 'b']).unwrap();
        assert_eq!(arr.capacity(), 2);
        arr.push_back('c').unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.capacity(), 4);
        assert_eq!(arr.as_slice(), &['a', 'b', 'c']);
    }

    #[test]
    fn push_then_pop_restores_state() {
        let mut arr = Array::from_slice(&[1, 2, 3]).unwrap();
        arr.push_back(4).unwrap();
        arr.pop_back();
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn pop_back_destroys_the_element() {
        let drops = Rc::new(Cell::new(0));
        let mut arr = Array::from_elem(3, Tally::new(&drops)).unwrap();
        let baseline = drops.get(); // the prototype value itself
        arr.pop_back();
        assert_eq!(drops.get(), baseline + 1);
        assert_eq!(arr.len(), 2);
    }

    #[test]
    #[should_panic(expected = "pop_back on empty Array")]
    fn pop_back_on_empty_panics() {
        let mut arr = Array::<i32>::empty();
        arr.pop_back();
    }

    #[test]
    fn insert_then_erase_restores_sequence() {
        let mut arr = Array::from_slice(&[1, 2, 3]).unwrap();
        arr.insert(1, 9).unwrap();
        assert_eq!(arr.as_slice(), &[1, 9, 2, 3]);
        arr.erase(1).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn insert_at_end_is_push_back() {
        let mut arr = Array::from_slice(&[1, 2]).unwrap();
        arr.insert(2, 3).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn insert_past_end_is_an_error() {
        let mut arr = Array::from_slice(&[1, 2]).unwrap();
        assert_eq!(
            arr.insert(3, 9),
            Err(ArrayError::LimitsOutOfRange {
                begin: 3,
                end: 3,
                len: 2
            })
        );
    }

    #[test]
    fn insert_n_reallocates_tightly_when_capacity_reached() {
        // len 3, capacity 3: 3 + 2 >= 3 takes the reallocating branch and
        // the new capacity is exactly the new length.
        let mut arr = Array::from_slice(&[1, 2, 3]).unwrap();
        arr.insert_n(1, 2, 9).unwrap();
        assert_eq!(arr.as_slice(), &[1, 9, 9, 2, 3]);
        assert_eq!(arr.capacity(), 5);
    }

    #[test]
    fn insert_n_boundary_at_exact_capacity_reallocates() {
        // len 3, capacity 4, inserting 1: new length 4 == capacity still
        // reallocates (the boundary is >=, not >).
        let mut arr = Array::from_slice(&[1, 2, 3]).unwrap();
        arr.reserve(4).unwrap();
        arr.insert_n(1, 1, 9).unwrap();
        assert_eq!(arr.as_slice(), &[1, 9, 2, 3]);
        assert_eq!(arr.capacity(), 4);
    }

    #[test]
    fn insert_n_tail_branch() {
        // index 3 + count 3 >= len 4: the shifted tail lands past the old
        // end.
        let mut arr = Array::from_slice(&[1, 2, 3, 4]).unwrap();
        arr.reserve(10).unwrap();
        arr.insert_n(3, 3, 9).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3, 9, 9, 9, 4]);
        assert_eq!(arr.capacity(), 10);
    }

    #[test]
    fn insert_n_tail_branch_boundary() {
        // index 2 + count 3 == len 5 sits exactly on the tail-branch
        // boundary (>=).
        let mut arr = Array::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        arr.reserve(12).unwrap();
        arr.insert_n(2, 3, 9).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 9, 9, 9, 3, 4, 5]);
        assert_eq!(arr.capacity(), 12);
    }

    #[test]
    fn insert_n_strictly_inside_branch() {
        // index 1 + count 2 < len 5 with room to spare: middle-shift
        // branch.
        let mut arr = Array::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        arr.reserve(12).unwrap();
        arr.insert_n(1, 2, 9).unwrap();
        assert_eq!(arr.as_slice(), &[1, 9, 9, 2, 3, 4, 5]);
        assert_eq!(arr.capacity(), 12);
    }

    #[test]
    fn insert_slice_all_branches() {
        // Reallocating branch.
        let mut arr = Array::from_slice(&[1, 2, 3]).unwrap();
        arr.insert_slice(1, &[7, 8]).unwrap();
        assert_eq!(arr.as_slice(), &[1, 7, 8, 2, 3]);
        assert_eq!(arr.capacity(), 5);

        // Tail branch: index 4 + count 2 >= len 5.
        let mut arr = Array::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        arr.reserve(12).unwrap();
        arr.insert_slice(4, &[7, 8]).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3, 4, 7, 8, 5]);

        // Strictly-inside branch: index 1 + count 2 < len 5.
        let mut arr = Array::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        arr.reserve(12).unwrap();
        arr.insert_slice(1, &[7, 8]).unwrap();
        assert_eq!(arr.as_slice(), &[1, 7, 8, 2, 3, 4, 5]);
    }

    #[test]
    fn insert_empty_slice_preserves_content() {
        let mut arr = Array::from_slice(&[1, 2, 3]).unwrap();
        arr.reserve(8).unwrap();
        arr.insert_slice(1, &[]).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn erase_range_shifts_and_destroys() {
        let drops = Rc::new(Cell::new(0));
        let mut arr = Array::from_elem(5, Tally::new(&drops)).unwrap();
        let baseline = drops.get();
        arr.erase_range(1, 4).unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(drops.get(), baseline + 3);
    }

    #[test]
    fn erase_range_keeps_order() {
        let mut arr = Array::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        arr.erase_range(1, 3).unwrap();
        assert_eq!(arr.as_slice(), &[1, 4, 5]);
    }

    #[test]
    fn erase_rejects_bad_bounds() {
        let mut arr = Array::from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(
            arr.erase(3),
            Err(ArrayError::LimitsOutOfRange {
                begin: 3,
                end: 4,
                len: 3
            })
        );
        assert_eq!(
            arr.erase_range(2, 1),
            Err(ArrayError::LimitsOutOfRange {
                begin: 2,
                end: 1,
                len: 3
            })
        );
    }

    #[test]
    fn clear_keeps_capacity() {
        let drops = Rc::new(Cell::new(0));
        let mut arr = Array::from_elem(4, Tally::new(&drops)).unwrap();
        let baseline = drops.get();
        arr.clear();
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.capacity(), 4);
        assert_eq!(drops.get(), baseline + 4);
    }

    #[test]
    fn reserve_grows_exactly_and_preserves_values() {
        let mut arr = Array::from_slice(&[1, 2, 3]).unwrap();
        arr.reserve(10).unwrap();
        assert_eq!(arr.capacity(), 10);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.as_slice(), &[1, 2, 3]);

        // Never shrinks.
        arr.reserve(4).unwrap();
        assert_eq!(arr.capacity(), 10);
    }

    #[test]
    fn grow_policy() {
        let mut arr = Array::<i32>::empty();
        arr.grow().unwrap();
        assert_eq!(arr.capacity(), MIN_CAPACITY);

        let mut arr = Array::from_slice(&[1, 2, 3]).unwrap();
        arr.grow().unwrap();
        assert_eq!(arr.capacity(), 6);

        // Not full: no-op.
        let mut arr = Array::from_slice(&[1]).unwrap();
        arr.reserve(8).unwrap();
        arr.grow().unwrap();
        assert_eq!(arr.capacity(), 8);
    }

    #[test]
    fn resize_shrinks_and_grows() {
        let mut arr = Array::from_slice(&[1, 2, 3, 4]).unwrap();
        arr.resize(2, 0).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2]);
        arr.resize(5, 9).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 9, 9, 9]);
        arr.resize_default(6).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 9, 9, 9, 0]);
    }

    #[test]
    fn swap_exchanges_ownership() {
        let mut a = Array::from_slice(&[1, 2, 3]).unwrap();
        let mut b = Array::from_slice(&[7]).unwrap();
        b.reserve(9).unwrap();
        a.swap(&mut b);
        assert_eq!(a.as_slice(), &[7]);
        assert_eq!(a.capacity(), 9);
        assert_eq!(b.as_slice(), &[1, 2, 3]);
        assert_eq!(b.capacity(), 3);
    }

    #[test]
    fn assign_matching_length_keeps_storage() {
        let mut a = Array::from_slice(&[1, 2, 3]).unwrap();
        a.reserve(10).unwrap();
        let b = Array::from_slice(&[7, 8, 9]).unwrap();
        a.assign(&b).unwrap();
        assert_eq!(a.as_slice(), &[7, 8, 9]);
        assert_eq!(a.capacity(), 10);
    }

    #[test]
    fn assign_differing_length_swaps_in_a_copy() {
        let mut a = Array::from_slice(&[1, 2, 3]).unwrap();
        let b = Array::from_slice(&[7]).unwrap();
        a.assign(&b).unwrap();
        assert_eq!(a.as_slice(), &[7]);
        // `b` is untouched.
        assert_eq!(b.as_slice(), &[7]);
    }

    #[test]
    fn try_clone_preserves_capacity() {
        let mut arr = Array::from_slice(&[1, 2, 3]).unwrap();
        arr.reserve(8).unwrap();
        let copy = arr.try_clone().unwrap();
        assert_eq!(copy.as_slice(), &[1, 2, 3]);
        assert_eq!(copy.capacity(), 8);
    }

    #[test]
    fn subarray_writes_through_to_owner() {
        let mut arr = Array::from_slice(&[5, 6, 7]).unwrap();
        let mut sub = arr.subarray(1, 3).unwrap();
        assert_eq!(sub.as_slice(), &[6, 7]);
        sub[0] = 60;
        assert_eq!(arr.as_slice(), &[5, 60, 7]);
    }

    #[test]
    fn overlapping_view_swap_uses_a_temporary() {
        // Overlapping exchange detours through a saved copy of `lo`:
        // lo <- hi leaves [2, 3, 4, 4], then hi <- saved [1, 2, 3].
        let mut arr = Array::from_slice(&[1, 2, 3, 4]).unwrap();
        let mut lo = arr.subarray(0, 3).unwrap();
        let mut hi = arr.subarray(1, 4).unwrap();
        lo.swap_data(&mut hi).unwrap();
        assert_eq!(arr.as_slice(), &[2, 1, 2, 3]);
    }

    #[test]
    fn drop_destroys_all_live_elements() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut arr = Array::from_elem(3, Tally::new(&drops)).unwrap();
            let baseline = drops.get();
            arr.push_back(Tally::new(&drops)).unwrap();
            assert_eq!(drops.get(), baseline, "push_back moves, never drops");
        }
        // 3 fill clones + 1 pushed element + the fill prototype.
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn insert_and_erase_account_for_every_drop() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut arr = Array::from_elem(4, Tally::new(&drops)).unwrap();
            arr.insert_n(2, 3, Tally::new(&drops)).unwrap();
            assert_eq!(arr.len(), 7);
            // Only the two prototype values have been dropped so far.
            assert_eq!(drops.get(), 2);
            arr.erase_range(1, 5).unwrap();
            assert_eq!(drops.get(), 6);
        }
        // 7 clones + 2 prototypes.
        assert_eq!(drops.get(), 9);
    }

    /// Increments a counter on drop and panics while armed, to observe what
    /// an unwinding element destructor leaves behind.
    struct Bomb {
        armed: bool,
        drops: Rc<Cell<usize>>,
    }

    impl Drop for Bomb {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
            if self.armed {
                panic!("armed drop");
            }
        }
    }

    #[test]
    fn erase_fences_length_when_a_drop_panics() {
        let drops = Rc::new(Cell::new(0));
        let mut arr = Array::empty();
        for k in 0..4 {
            arr.push_back(Bomb {
                armed: k == 1,
                drops: Rc::clone(&drops),
            })
            .unwrap();
        }
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| arr.erase(1)));
        assert!(result.is_err());
        // The length was fenced to the erase point, so the slots in flux
        // leak instead of being seen again by `Drop`.
        assert_eq!(arr.len(), 1);
        drop(arr);
        // The armed element plus the surviving prefix; nothing twice.
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn erase_range_fences_length_when_a_drop_panics() {
        let drops = Rc::new(Cell::new(0));
        let mut arr = Array::empty();
        for k in 0..5 {
            arr.push_back(Bomb {
                armed: k == 2,
                drops: Rc::clone(&drops),
            })
            .unwrap();
        }
        let result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| arr.erase_range(1, 4)));
        assert!(result.is_err());
        assert_eq!(arr.len(), 1);
        drop(arr);
        // Slice drop glue keeps destroying the rest of the range during the
        // unwind: elements 1, 2 (armed), and 3, then the prefix element 0.
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn zero_sized_elements() {
        let mut arr = Array::<()>::empty();
        for _ in 0..100 {
            arr.push_back(()).unwrap();
        }
        assert_eq!(arr.len(), 100);
        arr.insert_n(50, 10, ()).unwrap();
        assert_eq!(arr.len(), 110);
        arr.erase_range(0, 105).unwrap();
        assert_eq!(arr.len(), 5);
    }

    #[test]
    fn growth_reallocation_count_is_logarithmic() {
        let mut arr = Array::<usize>::empty();
        let mut reallocations = 0;
        let mut cap = arr.capacity();
        let n = 1000;
        for i in 0..n {
            arr.push_back(i).unwrap();
            if arr.capacity() != cap {
                reallocations += 1;
                cap = arr.capacity();
            }
        }
        assert_eq!(arr.len(), n);
        // 0 -> 2 -> 4 -> ... -> 1024: one initial allocation plus
        // ceil(log2(n / 2)) doublings.
        assert!(
            reallocations <= (n as f64).log2() as usize + 2,
            "{reallocations} reallocations for {n} pushes"
        );
    }

    proptest! {
        #[test]
        fn push_pop_identity(
            data in prop::collection::vec(-1000i32..1000, 0..32),
            value in -1000i32..1000,
        ) {
            let mut arr = Array::from_slice(&data).unwrap();
            arr.push_back(value).unwrap();
            arr.pop_back();
            prop_assert_eq!(arr.as_slice(), &data[..]);
        }

        #[test]
        fn insert_erase_identity(
            data in prop::collection::vec(-1000i32..1000, 0..32),
            index in 0usize..33,
            value in -1000i32..1000,
        ) {
            let index = index.min(data.len());
            let mut arr = Array::from_slice(&data).unwrap();
            arr.insert(index, value).unwrap();
            prop_assert_eq!(arr[index], value);
            arr.erase(index).unwrap();
            prop_assert_eq!(arr.as_slice(), &data[..]);
        }

        #[test]
        fn bulk_insert_matches_vec_splice(
            data in prop::collection::vec(-1000i32..1000, 0..24),
            index in 0usize..25,
            insert in prop::collection::vec(-1000i32..1000, 0..12),
            spare in 0usize..16,
        ) {
            // `spare` steers which of the three branches runs.
            let index = index.min(data.len());
            let mut arr = Array::from_slice(&data).unwrap();
            arr.reserve(data.len() + spare).unwrap();
            arr.insert_slice(index, &insert).unwrap();

            let mut expected = data.clone();
            expected.splice(index..index, insert.iter().copied());
            prop_assert_eq!(arr.as_slice(), &expected[..]);
        }

        #[test]
        fn bulk_insert_n_matches_vec_splice(
            data in prop::collection::vec(-1000i32..1000, 0..24),
            index in 0usize..25,
            count in 0usize..12,
            value in -1000i32..1000,
            spare in 0usize..16,
        ) {
            let index = index.min(data.len());
            let mut arr = Array::from_slice(&data).unwrap();
            arr.reserve(data.len() + spare).unwrap();
            arr.insert_n(index, count, value).unwrap();

            let mut expected = data.clone();
            expected.splice(index..index, std::iter::repeat(value).take(count));
            prop_assert_eq!(arr.as_slice(), &expected[..]);
        }

        #[test]
        fn erase_range_matches_vec_drain(
            data in prop::collection::vec(-1000i32..1000, 0..24),
            begin in 0usize..25,
            end in 0usize..25,
        ) {
            let begin = begin.min(data.len());
            let end = end.min(data.len()).max(begin);
            let mut arr = Array::from_slice(&data).unwrap();
            arr.erase_range(begin, end).unwrap();

            let mut expected = data.clone();
            expected.drain(begin..end);
            prop_assert_eq!(arr.as_slice(), &expected[..]);
        }

        #[test]
        fn reserve_never_alters_content(
            data in prop::collection::vec(-1000i32..1000, 0..24),
            extra in 0usize..64,
        ) {
            let mut arr = Array::from_slice(&data).unwrap();
            let old_cap = arr.capacity();
            arr.reserve(extra).unwrap();
            prop_assert!(arr.capacity() >= old_cap);
            prop_assert_eq!(arr.len(), data.len());
            prop_assert_eq!(arr.as_slice(), &data[..]);
        }
    }
}
