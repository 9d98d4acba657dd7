//! Benchmark fixtures for the silt array primitives.
//!
//! Provides pre-built arrays at the sizes the benches exercise:
//!
//! - [`ramp`]: an `Array<f32>` filled with a deterministic ramp
//! - [`SMALL`], [`LARGE`]: the two reference element counts

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use silt::Array;

/// Element count for the small benchmark profile.
pub const SMALL: usize = 1_000;

/// Element count for the large benchmark profile.
pub const LARGE: usize = 100_000;

/// Build an array of `len` f32 values forming a deterministic ramp.
///
/// The values are `(k % 251) as f32` so content is reproducible and does
/// not collapse to a constant the optimizer can fold away.
pub fn ramp(len: usize) -> Array<f32> {
    let mut arr = Array::empty();
    arr.reserve(len).expect("benchmark allocation");
    for k in 0..len {
        arr.push_back((k % 251) as f32).expect("within reserved capacity");
    }
    arr
}
