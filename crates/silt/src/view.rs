//! Non-owning views over contiguous element ranges.
//!
//! [`ArrayView`] is a `{length, pointer}` descriptor: it never allocates or
//! frees memory, and it is the leaf the owning [`Array`](crate::Array) builds
//! on. Copy and swap between views are alias-aware — overlapping ranges are
//! handled with an explicit direction test (copy) or a full temporary
//! (swap), so a source slot is never overwritten before it is read.
//!
//! # Validity
//!
//! A view is only as valid as the memory behind it. Any operation on the
//! owning container that may reallocate (capacity growth, bulk insertion,
//! swap, destruction) invalidates every outstanding view into the old
//! buffer. This follows standard iterator-invalidation rules and is not
//! detected at runtime.

use std::fmt;
use std::ptr;
use std::slice;

use crate::array::Array;
use crate::error::ArrayError;
use crate::raw::non_null_or_dangling;

/// A non-owning view of a contiguous range of `len` elements.
///
/// The empty view carries a null pointer; every other view was constructed
/// from a caller-supplied range via [`ArrayView::from_raw_parts`] or borrowed
/// from an [`Array`](crate::Array). The view trusts those bounds: all
/// accessors are safe functions relying on the construction contract.
pub struct ArrayView<T> {
    len: usize,
    data: *mut T,
}

impl<T> Clone for ArrayView<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayView<T> {}

impl<T> ArrayView<T> {
    /// The empty view: length 0, null pointer.
    ///
    /// An empty view is special for [`assign`](Self::assign): it adopts the
    /// right-hand side's range instead of copying contents.
    pub const fn empty() -> Self {
        Self {
            len: 0,
            data: ptr::null_mut(),
        }
    }

    /// Wrap an existing contiguous range of exactly `len` elements.
    ///
    /// No validation is performed beyond trusting the caller's bounds.
    ///
    /// # Safety
    ///
    /// `data` must point to `len` initialized elements, valid for reads and
    /// writes, for as long as the view (or any copy or sub-range of it) is
    /// used — or `len` must be 0.
    pub const unsafe fn from_raw_parts(data: *mut T, len: usize) -> Self {
        Self { len, data }
    }

    /// Number of elements in the view.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Equivalent to `len() == 0`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start of the viewed range. Null for the empty view.
    pub fn as_ptr(&self) -> *const T {
        self.data
    }

    /// Mutable start of the viewed range. Null for the empty view.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data
    }

    /// The viewed range as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the construction contract guarantees `len` initialized
        // elements; a null pointer only occurs at len 0 and is substituted
        // with a well-aligned dangling one.
        unsafe { slice::from_raw_parts(non_null_or_dangling(self.data), self.len) }
    }

    /// The viewed range as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, plus the construction contract grants
        // write access.
        unsafe { slice::from_raw_parts_mut(non_null_or_dangling(self.data), self.len) }
    }

    /// Forward iterator over the elements. Call `.rev()` for backward order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Forward iterator over mutable references to the elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Element at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable element at `index`, or `None` when out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// First element, or `None` when the view is empty.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Mutable first element, or `None` when the view is empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Last element, or `None` when the view is empty.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Mutable last element, or `None` when the view is empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Whether `offset` addresses an element of the view.
    pub fn is_inside(&self, offset: isize) -> bool {
        0 <= offset && (offset as usize) < self.len
    }

    /// View of the sub-range `[begin, end)`.
    ///
    /// Fails with [`ArrayError::LimitsOutOfRange`] unless
    /// `begin <= end && end <= len`.
    pub fn subarray(&self, begin: usize, end: usize) -> Result<ArrayView<T>, ArrayError> {
        if begin > end || end > self.len {
            return Err(ArrayError::LimitsOutOfRange {
                begin,
                end,
                len: self.len,
            });
        }
        // SAFETY: `[begin, end)` lies within this view's range, which the
        // construction contract guarantees valid.
        Ok(unsafe { ArrayView::from_raw_parts(self.data.add(begin), end - begin) })
    }
}

impl<T: Clone> ArrayView<T> {
    /// Overwrite every element with a clone of `value`.
    pub fn init(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Assign from another view.
    ///
    /// Three cases:
    /// - this view is empty (null pointer): adopt `rhs`'s range — aliasing,
    ///   not copying;
    /// - both views reference the identical starting address: no-op;
    /// - otherwise: shape-checked element-wise content copy, as
    ///   [`copy_from`](Self::copy_from).
    pub fn assign(&mut self, rhs: &ArrayView<T>) -> Result<(), ArrayError> {
        if self.data.is_null() {
            self.data = rhs.data;
            self.len = rhs.len;
            Ok(())
        } else if ptr::eq(self.data, rhs.data) {
            Ok(())
        } else {
            self.copy_impl(rhs)
        }
    }

    /// Element-wise content copy from `rhs`.
    ///
    /// A no-op when both views reference the identical starting address;
    /// fails with [`ArrayError::ShapeMismatch`] when the lengths differ.
    /// Alias-correct for overlapping ranges: copies forward when this view
    /// starts at or before `rhs`, backward otherwise, so a source slot is
    /// never overwritten before it is read.
    pub fn copy_from(&mut self, rhs: &ArrayView<T>) -> Result<(), ArrayError> {
        if ptr::eq(self.data, rhs.data) {
            return Ok(());
        }
        self.copy_impl(rhs)
    }

    fn copy_impl(&mut self, rhs: &ArrayView<T>) -> Result<(), ArrayError> {
        if self.len != rhs.len {
            return Err(ArrayError::ShapeMismatch {
                left: self.len,
                right: rhs.len,
            });
        }
        if (self.data as *const T) <= (rhs.data as *const T) {
            for k in 0..self.len {
                // SAFETY: k < len for both ranges. Copying forward, any slot
                // shared by the two ranges is read (self starts lower) before
                // the write reaches it.
                unsafe {
                    let value = (*rhs.data.add(k)).clone();
                    *self.data.add(k) = value;
                }
            }
        } else {
            for k in (0..self.len).rev() {
                // SAFETY: k < len for both ranges. Copying backward, any slot
                // shared by the two ranges is read (self starts higher) before
                // the write reaches it.
                unsafe {
                    let value = (*rhs.data.add(k)).clone();
                    *self.data.add(k) = value;
                }
            }
        }
        Ok(())
    }

    /// Element-wise content exchange with `rhs` (contents, not pointers).
    ///
    /// A no-op when both views reference the identical starting address;
    /// fails with [`ArrayError::ShapeMismatch`] when the lengths differ.
    /// Disjoint ranges are swapped element by element. Partially-overlapping
    /// ranges cannot be — the overlap would be corrupted mid-swap — so the
    /// exchange goes through a full independent copy of this view: copy
    /// `rhs` into this view, then the saved copy into `rhs`. The detour
    /// allocates and can fail with [`ArrayError::AllocationFailed`].
    pub fn swap_data(&mut self, rhs: &mut ArrayView<T>) -> Result<(), ArrayError> {
        if ptr::eq(self.data, rhs.data) {
            return Ok(());
        }
        if self.len != rhs.len {
            return Err(ArrayError::ShapeMismatch {
                left: self.len,
                right: rhs.len,
            });
        }
        // SAFETY: one-past-the-end pointers of valid ranges; computed only
        // for the disjointness comparison.
        let disjoint = unsafe {
            (self.data.add(self.len) as *const T) <= (rhs.data as *const T)
                || (rhs.data.add(rhs.len) as *const T) <= (self.data as *const T)
        };
        if disjoint {
            for k in 0..self.len {
                // SAFETY: k < len for both ranges, and the ranges are
                // disjoint, so the two slots never alias.
                unsafe { ptr::swap_nonoverlapping(self.data.add(k), rhs.data.add(k), 1) };
            }
            Ok(())
        } else {
            let mut saved = Array::from_view(&*self)?;
            self.copy_impl(rhs)?;
            rhs.copy_impl(&saved.view())
        }
    }
}

impl<T> std::ops::Index<usize> for ArrayView<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> std::ops::IndexMut<usize> for ArrayView<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: PartialEq> PartialEq for ArrayView<T> {
    /// Element-wise comparison; `false` when the lengths differ.
    fn eq(&self, rhs: &Self) -> bool {
        self.as_slice() == rhs.as_slice()
    }
}

impl<T: PartialEq> PartialEq<[T]> for ArrayView<T> {
    fn eq(&self, rhs: &[T]) -> bool {
        self.as_slice() == rhs
    }
}

impl<T: PartialEq> PartialEq<Array<T>> for ArrayView<T> {
    fn eq(&self, rhs: &Array<T>) -> bool {
        self.as_slice() == rhs.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
