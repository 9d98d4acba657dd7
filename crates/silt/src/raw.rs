//! Raw memory provider for [`Array`](crate::Array).
//!
//! [`RawBuffer`] owns exactly one contiguous allocation of `capacity` element
//! slots and nothing else: it never constructs or destroys elements. The
//! live/unconstructed split of the slots is tracked by `Array`, which keeps
//! all element lifecycle logic in one place.
//!
//! This module contains the crate's allocation `unsafe`. Each block carries
//! a `SAFETY` comment.

use std::alloc::{alloc, dealloc, Layout};
use std::mem;
use std::ptr::{self, NonNull};

use crate::error::ArrayError;

/// Substitute a well-aligned dangling pointer for null.
///
/// Null pointers only occur paired with length 0, but slice construction
/// requires a non-null, aligned pointer even then.
pub(crate) fn non_null_or_dangling<T>(ptr: *mut T) -> *mut T {
    if ptr.is_null() {
        NonNull::dangling().as_ptr()
    } else {
        ptr
    }
}

/// One contiguous raw allocation of `capacity` slots of `T`.
///
/// The pointer is null when `capacity == 0` and the element type is sized;
/// for zero-sized element types it is a dangling, well-aligned pointer and
/// no memory is ever requested from the allocator. `Drop` releases the block
/// without touching element contents.
pub(crate) struct RawBuffer<T> {
    ptr: *mut T,
    cap: usize,
}

impl<T> RawBuffer<T> {
    /// A buffer with no allocation and capacity 0.
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: ptr::null_mut(),
            cap: 0,
        }
    }

    /// Allocate a block of exactly `cap` slots.
    ///
    /// Returns [`ArrayError::AllocationFailed`] when the allocator reports
    /// failure or when `cap` slots overflow the maximum allocation size.
    pub(crate) fn allocate(cap: usize) -> Result<Self, ArrayError> {
        if cap == 0 {
            return Ok(Self::empty());
        }
        if mem::size_of::<T>() == 0 {
            // Zero-sized elements occupy no memory; any aligned pointer works.
            return Ok(Self {
                ptr: NonNull::dangling().as_ptr(),
                cap,
            });
        }
        let layout =
            Layout::array::<T>(cap).map_err(|_| ArrayError::AllocationFailed { elements: cap })?;
        // SAFETY: `layout` has non-zero size (cap > 0 and T is sized).
        let ptr = unsafe { alloc(layout) } as *mut T;
        if ptr.is_null() {
            return Err(ArrayError::AllocationFailed { elements: cap });
        }
        Ok(Self { ptr, cap })
    }

    /// Start of the block. Null iff the capacity is 0 and `T` is sized.
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr
    }

    /// Total slot count of the block.
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.cap == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        // The layout was valid at allocation time, so it is valid here.
        let layout = Layout::array::<T>(self.cap).expect("layout was valid at allocation");
        // SAFETY: `ptr` was returned by `alloc` with this exact layout and
        // has not been freed; capacity 0 and zero-sized T never reach here.
        unsafe { dealloc(self.ptr as *mut u8, layout) };
    }
}
