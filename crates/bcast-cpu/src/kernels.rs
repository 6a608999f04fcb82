//! Coordinate mapping between a broadcast output and its operands.

use bcast_core::Shape;

/// Map a flat index into the output back to the flat index in `src` that
/// supplies the value at that output coordinate.
///
/// Any axis where the operand's original size is 1, or which the operand
/// lacks entirely, is read at coordinate 0 regardless of the output
/// coordinate along that axis. This mapping is what lets a size-1 axis be
/// conceptually replicated without copying the data.
///
/// `out` must be a broadcast shape reconciled against `src`, so
/// `src.ndim() <= out.ndim()` and every axis of `src` is either 1 or
/// equal to the corresponding output axis.
pub fn source_offset(src: &Shape, out: &Shape, out_flat: usize) -> usize {
    let src_dims = &src.0;
    let out_dims = &out.0;
    let pad = out_dims.len() - src_dims.len();

    let mut remaining = out_flat;
    let mut src_flat = 0usize;
    let mut src_stride = 1usize;

    for d in (0..out_dims.len()).rev() {
        let out_dim = out_dims[d] as usize;
        let coord = remaining % out_dim;
        remaining /= out_dim;

        if d >= pad {
            let src_dim = src_dims[d - pad] as usize;
            let src_coord = if src_dim == 1 { 0 } else { coord };
            src_flat += src_coord * src_stride;
            src_stride *= src_dim;
        }
    }
    src_flat
}

/// Materialize `f(lhs, rhs)` for every coordinate of `out_shape`.
///
/// `out_shape` must be the reconciled broadcast shape of the two operand
/// shapes; each operand value is looked up through [`source_offset`].
pub fn binary_elementwise(
    lhs: &[f32],
    lhs_shape: &Shape,
    rhs: &[f32],
    rhs_shape: &Shape,
    out_shape: &Shape,
    f: fn(f32, f32) -> f32,
) -> Vec<f32> {
    let total = out_shape.numel() as usize;
    let mut result = Vec::with_capacity(total);
    for out_flat in 0..total {
        let a = lhs[source_offset(lhs_shape, out_shape, out_flat)];
        let b = rhs[source_offset(rhs_shape, out_shape, out_flat)];
        result.push(f(a, b));
    }
    result
}
