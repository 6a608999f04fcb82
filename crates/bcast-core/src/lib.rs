//! Shape model and broadcasting rules for elementwise array arithmetic.
//!
//! `bcast-core` provides the foundational [`Shape`] type and the
//! broadcast-compatibility evaluator ([`reconcile`]) used to align two
//! operand shapes before an elementwise operation.
//!
//! Incompatibility between two shapes is a normal, expected outcome and is
//! reported through [`BroadcastResult::Incompatible`]; [`BcastError`] is
//! reserved for the applier boundary and for caller contract violations
//! such as a negative dimension size.

pub mod broadcast;
pub mod shape;

pub use broadcast::{AlignedShapePair, BroadcastResult, effective, reconcile};
pub use shape::Shape;

pub type Result<T> = std::result::Result<T, BcastError>;

#[derive(thiserror::Error, Debug)]
pub enum BcastError {
    #[error(
        "shapes {lhs} and {rhs} could not be broadcast together \
         (axis {axis} from trailing: {lhs_size} vs {rhs_size})"
    )]
    ShapeIncompatibility {
        lhs: Shape,
        rhs: Shape,
        axis: usize,
        lhs_size: i64,
        rhs_size: i64,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
