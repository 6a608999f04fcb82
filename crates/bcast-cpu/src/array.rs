//! Eager `f32` arrays with broadcast elementwise arithmetic.

use bcast_core::{BcastError, Result, Shape, reconcile};
use tracing::debug;

use crate::kernels::binary_elementwise;

/// A dense, row-major `f32` array.
#[derive(Clone, Debug, PartialEq)]
pub struct Array {
    data: Vec<f32>,
    shape: Shape,
}

impl Array {
    // ── Constructors ────────────────────────────────────────────────────

    /// Create an array from f32 data.
    pub fn from_f32(data: &[f32], shape: &Shape) -> Result<Self> {
        shape.validate()?;
        let expected = shape.numel() as usize;
        if data.len() != expected {
            return Err(BcastError::InvalidArgument(format!(
                "data length {} does not match shape {} (expected {})",
                data.len(),
                shape,
                expected,
            )));
        }
        Ok(Self {
            data: data.to_vec(),
            shape: shape.clone(),
        })
    }

    /// Create an array filled with zeros.
    pub fn zeros(shape: &Shape) -> Result<Self> {
        Self::filled(shape, 0.0)
    }

    /// Create an array filled with ones.
    pub fn ones(shape: &Shape) -> Result<Self> {
        Self::filled(shape, 1.0)
    }

    /// Rank-0 array holding a single value.
    pub fn scalar(value: f32) -> Self {
        Self {
            data: vec![value],
            shape: Shape::scalar(),
        }
    }

    fn filled(shape: &Shape, value: f32) -> Result<Self> {
        shape.validate()?;
        Ok(Self {
            data: vec![value; shape.numel() as usize],
            shape: shape.clone(),
        })
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Value at a full coordinate, or `None` if out of range.
    pub fn get(&self, coords: &[i64]) -> Option<f32> {
        if coords.len() != self.shape.ndim() {
            return None;
        }
        let mut flat = 0i64;
        for (&c, &dim) in coords.iter().zip(self.shape.0.iter()) {
            if c < 0 || c >= dim {
                return None;
            }
            flat = flat * dim + c;
        }
        Some(self.data[flat as usize])
    }

    // ── Elementwise ops ─────────────────────────────────────────────────

    /// Element-wise addition with broadcasting.
    pub fn add(&self, rhs: &Array) -> Result<Array> {
        self.binary_op(rhs, |a, b| a + b)
    }

    /// Element-wise subtraction with broadcasting.
    pub fn sub(&self, rhs: &Array) -> Result<Array> {
        self.binary_op(rhs, |a, b| a - b)
    }

    /// Element-wise multiplication with broadcasting.
    pub fn mul(&self, rhs: &Array) -> Result<Array> {
        self.binary_op(rhs, |a, b| a * b)
    }

    /// Element-wise division with broadcasting.
    pub fn div(&self, rhs: &Array) -> Result<Array> {
        self.binary_op(rhs, |a, b| a / b)
    }

    fn binary_op(&self, rhs: &Array, f: fn(f32, f32) -> f32) -> Result<Array> {
        let out_shape = reconcile(&self.shape, &rhs.shape).into_shape(&self.shape, &rhs.shape)?;
        debug!(lhs = %self.shape, rhs = %rhs.shape, out = %out_shape, "elementwise broadcast");
        let data = binary_elementwise(
            &self.data,
            &self.shape,
            &rhs.data,
            &rhs.shape,
            &out_shape,
            f,
        );
        Ok(Array {
            data,
            shape: out_shape,
        })
    }
}
