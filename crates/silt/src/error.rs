//! Error types for array and view operations.
//!
//! Two failure families exist: broken caller contracts (shape mismatches and
//! out-of-range bounds) and allocation failure from the memory provider.
//! Both are reported as explicit `Result`s rather than unwinding, so the
//! caller decides whether a failure is fatal at a coarser boundary.

use std::error::Error;
use std::fmt;

/// Errors from [`Array`](crate::Array) and [`ArrayView`](crate::ArrayView)
/// operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A shape-sensitive operation (copy, swap, assign) was given two ranges
    /// of different lengths and neither side could adopt the other.
    ShapeMismatch {
        /// Length of the destination range.
        left: usize,
        /// Length of the source range.
        right: usize,
    },
    /// A sub-range request violated `begin <= end <= len`.
    LimitsOutOfRange {
        /// Requested start of the range.
        begin: usize,
        /// Requested end of the range (exclusive).
        end: usize,
        /// Length of the range being sliced.
        len: usize,
    },
    /// The memory provider could not supply a contiguous block of the
    /// requested size. Also raised when the request overflows the maximum
    /// allocation size.
    AllocationFailed {
        /// Number of element slots requested.
        elements: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { left, right } => {
                write!(f, "shape mismatch: left length {left}, right length {right}")
            }
            Self::LimitsOutOfRange { begin, end, len } => {
                write!(f, "limits out of range: [{begin}, {end}) of length {len}")
            }
            Self::AllocationFailed { elements } => {
                write!(f, "allocation of {elements} element slots failed")
            }
        }
    }
}

impl Error for ArrayError {}
