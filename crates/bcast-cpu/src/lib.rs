//! Reference CPU applier for broadcast elementwise arithmetic.
//!
//! An intentionally simple, safe Rust oracle: eager `f32` arrays plus
//! kernels that materialize broadcast binary arithmetic. It prioritizes
//! correctness and readability over performance; strided or view-based
//! evaluation belongs to an optimizing backend.

pub mod array;
pub mod kernels;

pub use array::Array;
pub use kernels::{binary_elementwise, source_offset};
