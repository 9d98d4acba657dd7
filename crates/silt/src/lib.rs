//! Silt: growable contiguous array and non-owning view primitives.
//!
//! The foundation beneath numeric routines that want a flat, addressable
//! sequence — coefficient buffers, root lists, pixel rows. Two types:
//!
//! - [`Array<T>`] owns exactly one contiguous allocation with an explicit
//!   capacity, and grows, inserts, and erases with amortized-O(1) appends.
//! - [`ArrayView<T>`] is a non-owning `{length, pointer}` descriptor with
//!   alias-safe element-wise copy and swap, including between overlapping
//!   sub-ranges of the same buffer.
//!
//! # Quick start
//!
//! ```rust
//! use silt::{Array, ArrayError};
//!
//! let mut coeffs = Array::from_slice(&[1.0, 2.0, 3.0])?;
//! coeffs.push_back(4.0)?;
//! coeffs.insert(1, 9.0)?;
//! assert_eq!(coeffs.as_slice(), &[1.0, 9.0, 2.0, 3.0, 4.0]);
//!
//! // Borrow a sub-range and write through it.
//! let mut tail = coeffs.subarray(2, 5)?;
//! tail.init(0.0);
//! assert_eq!(coeffs.as_slice(), &[1.0, 9.0, 0.0, 0.0, 0.0]);
//! # Ok::<(), ArrayError>(())
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`array`] | [`Array`], the owning growable container |
//! | [`view`] | [`ArrayView`], the non-owning range descriptor |
//! | [`error`] | [`ArrayError`] |
//!
//! # Safety model
//!
//! Allocation and element lifecycle use bounded `unsafe` behind safe
//! methods; every block carries a `SAFETY` comment. The one contract the
//! crate cannot check for you: a view must not be used after its owner
//! reallocates (iterator-invalidation rules, documented on both types).
//! There is no internal locking — an `Array` mutated from several threads
//! must be serialized externally.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod array;
pub mod error;
mod raw;
pub mod view;

pub use array::Array;
pub use error::ArrayError;
pub use view::ArrayView;
