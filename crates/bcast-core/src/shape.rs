//! The `Shape` type: ordered dimension sizes, outermost first.

use crate::{BcastError, Result};

/// Array shape (dimension sizes, leading to trailing).
///
/// A scalar has an empty shape (rank 0). Shapes are immutable values;
/// no operation in this crate mutates an operand's shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape(pub Vec<i64>);

impl Shape {
    pub fn new(dims: impl Into<Vec<i64>>) -> Self {
        Self(dims.into())
    }

    /// Scalar (rank-0) shape.
    pub fn scalar() -> Self {
        Self(vec![])
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements.
    pub fn numel(&self) -> i64 {
        self.0.iter().product()
    }

    /// Get dimension at axis (supports negative indexing).
    pub fn dim(&self, axis: i32) -> Option<i64> {
        let ndim = self.0.len() as i32;
        let idx = if axis < 0 { ndim + axis } else { axis };
        if idx >= 0 && idx < ndim {
            Some(self.0[idx as usize])
        } else {
            None
        }
    }

    /// Reject shapes with a negative dimension size.
    ///
    /// Broadcasting itself is total over any shape pair; a negative size
    /// is a caller contract violation and is surfaced here, at the point
    /// where data gets attached to a shape.
    pub fn validate(&self) -> Result<()> {
        if let Some(&d) = self.0.iter().find(|&&d| d < 0) {
            return Err(BcastError::InvalidArgument(format!(
                "negative dimension size {d} in shape {self}"
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}
