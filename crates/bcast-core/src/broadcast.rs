//! Broadcasting rules following the NumPy alignment convention.
//!
//! Two shapes are aligned from the trailing dimension. At each aligned
//! position the sizes must be equal, or one of them must be 1, in which
//! case that operand is conceptually replicated along the axis. A missing
//! leading dimension behaves as size 1.

use smallvec::SmallVec;

use crate::{BcastError, Result, Shape};

/// Effective size of `shape` at `axis` counted from the trailing end.
///
/// Axes beyond the shape's rank are the logical left-padding and report
/// size 1, never 0. The shape itself is not touched.
pub fn effective(shape: &Shape, axis_from_trailing: usize) -> i64 {
    let dims = &shape.0;
    if axis_from_trailing < dims.len() {
        dims[dims.len() - 1 - axis_from_trailing]
    } else {
        1
    }
}

/// Two shapes right-justified to a common rank.
///
/// Size pairs are stored leading-to-trailing. Ranks up to 4 stay inline;
/// padding is purely logical and the operands are never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedShapePair {
    dims: SmallVec<[(i64, i64); 4]>,
}

impl AlignedShapePair {
    /// Align `a` and `b` to `max(ndim(a), ndim(b))` positions.
    pub fn align(a: &Shape, b: &Shape) -> Self {
        let rank = a.ndim().max(b.ndim());
        let mut dims = SmallVec::with_capacity(rank);
        for i in 0..rank {
            let axis = rank - 1 - i;
            dims.push((effective(a, axis), effective(b, axis)));
        }
        Self { dims }
    }

    /// Common rank of the alignment.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Effective size pair at `axis` counted from the leading end.
    pub fn sizes(&self, axis: usize) -> (i64, i64) {
        self.dims[axis]
    }
}

/// Outcome of reconciling two shapes for elementwise arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BroadcastResult {
    /// The operands broadcast together to this shape.
    Compatible(Shape),
    /// Sizes at `axis` (counted from the trailing end) are unequal and
    /// neither is 1.
    Incompatible {
        axis: usize,
        lhs_size: i64,
        rhs_size: i64,
    },
}

impl BroadcastResult {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Self::Compatible(_))
    }

    /// The result shape, if compatible.
    pub fn shape(&self) -> Option<&Shape> {
        match self {
            Self::Compatible(s) => Some(s),
            Self::Incompatible { .. } => None,
        }
    }

    /// Translate into the applier-facing result.
    ///
    /// Layers that go on to perform the actual elementwise operation use
    /// this to turn an incompatibility into a diagnostic naming both
    /// operand shapes and the failing axis.
    pub fn into_shape(self, lhs: &Shape, rhs: &Shape) -> Result<Shape> {
        match self {
            Self::Compatible(shape) => Ok(shape),
            Self::Incompatible {
                axis,
                lhs_size,
                rhs_size,
            } => Err(BcastError::ShapeIncompatibility {
                lhs: lhs.clone(),
                rhs: rhs.clone(),
                axis,
                lhs_size,
                rhs_size,
            }),
        }
    }
}

/// Decide broadcast compatibility of two shapes.
///
/// Walks the aligned axes from the trailing dimension toward the leading
/// one. Per axis: equal sizes pass through, and a size of 1 stretches to
/// the other operand's size. The first mismatch found in that order is
/// reported and the scan stops.
///
/// Total over all shape pairs: incompatibility is a normal outcome, not
/// an error, and `reconcile` never panics.
pub fn reconcile(a: &Shape, b: &Shape) -> BroadcastResult {
    let aligned = AlignedShapePair::align(a, b);
    let rank = aligned.rank();

    // Collected trailing-to-leading, reversed into shape order at the end.
    let mut dims = Vec::with_capacity(rank);

    for axis in 0..rank {
        let (da, db) = aligned.sizes(rank - 1 - axis);

        if da == db {
            dims.push(da);
        } else if da == 1 {
            dims.push(db);
        } else if db == 1 {
            dims.push(da);
        } else {
            return BroadcastResult::Incompatible {
                axis,
                lhs_size: da,
                rhs_size: db,
            };
        }
    }

    dims.reverse();
    BroadcastResult::Compatible(Shape::new(dims))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(dims: &[i64]) -> Shape {
        Shape::new(dims.to_vec())
    }

    #[test]
    fn test_same_shapes() {
        assert_eq!(
            reconcile(&s(&[2, 3]), &s(&[2, 3])),
            BroadcastResult::Compatible(s(&[2, 3]))
        );
    }

    #[test]
    fn test_scalar_broadcast() {
        assert_eq!(
            reconcile(&s(&[5, 4]), &Shape::scalar()),
            BroadcastResult::Compatible(s(&[5, 4]))
        );
        assert_eq!(
            reconcile(&Shape::scalar(), &Shape::scalar()),
            BroadcastResult::Compatible(Shape::scalar())
        );
    }

    #[test]
    fn test_one_broadcast() {
        assert_eq!(
            reconcile(&s(&[2, 1]), &s(&[1, 3])),
            BroadcastResult::Compatible(s(&[2, 3]))
        );
    }

    #[test]
    fn test_rank_extension() {
        assert_eq!(
            reconcile(&s(&[2, 3]), &s(&[3])),
            BroadcastResult::Compatible(s(&[2, 3]))
        );
    }

    #[test]
    fn test_incompatible_trailing_axis() {
        // Trailing sizes 3 vs 2: mismatch at axis 0 from trailing.
        assert_eq!(
            reconcile(&s(&[2, 3]), &s(&[2])),
            BroadcastResult::Incompatible {
                axis: 0,
                lhs_size: 3,
                rhs_size: 2,
            }
        );
    }

    #[test]
    fn test_incompatible_reports_first_from_trailing() {
        // Both axes mismatch; the trailing one (4 vs 5) is reported.
        assert_eq!(
            reconcile(&s(&[2, 4]), &s(&[3, 5])),
            BroadcastResult::Incompatible {
                axis: 0,
                lhs_size: 4,
                rhs_size: 5,
            }
        );
    }

    #[test]
    fn test_multi_axis_stretch() {
        assert_eq!(
            reconcile(&s(&[8, 1, 6, 1]), &s(&[7, 1, 5])),
            BroadcastResult::Compatible(s(&[8, 7, 6, 5]))
        );
    }

    #[test]
    fn test_zero_size_axis() {
        // 0 stretches a size-1 axis; 0 against anything else fails.
        assert_eq!(
            reconcile(&s(&[1, 3]), &s(&[0, 3])),
            BroadcastResult::Compatible(s(&[0, 3]))
        );
        assert_eq!(
            reconcile(&s(&[0]), &s(&[0])),
            BroadcastResult::Compatible(s(&[0]))
        );
        assert_eq!(
            reconcile(&s(&[0]), &s(&[2])),
            BroadcastResult::Incompatible {
                axis: 0,
                lhs_size: 0,
                rhs_size: 2,
            }
        );
    }

    #[test]
    fn test_effective_padding() {
        let shape = s(&[2, 3]);
        assert_eq!(effective(&shape, 0), 3);
        assert_eq!(effective(&shape, 1), 2);
        assert_eq!(effective(&shape, 2), 1);
        assert_eq!(effective(&Shape::scalar(), 0), 1);
    }

    #[test]
    fn test_align_pairs() {
        let aligned = AlignedShapePair::align(&s(&[2, 3]), &s(&[3]));
        assert_eq!(aligned.rank(), 2);
        assert_eq!(aligned.sizes(0), (2, 1));
        assert_eq!(aligned.sizes(1), (3, 3));
    }

    #[test]
    fn test_align_does_not_mutate_operands() {
        let a = s(&[3]);
        let b = s(&[2, 3]);
        let _ = AlignedShapePair::align(&a, &b);
        assert_eq!(a, s(&[3]));
        assert_eq!(b, s(&[2, 3]));
    }

    #[test]
    fn test_into_shape_diagnostic() {
        let lhs = s(&[2, 3]);
        let rhs = s(&[2]);
        let err = reconcile(&lhs, &rhs)
            .into_shape(&lhs, &rhs)
            .expect_err("shapes are incompatible");
        let msg = err.to_string();
        assert!(msg.contains("[2, 3]"), "message: {msg}");
        assert!(msg.contains("could not be broadcast together"), "message: {msg}");
        assert!(msg.contains("axis 0"), "message: {msg}");
        assert!(msg.contains("3 vs 2"), "message: {msg}");
    }

    #[test]
    fn test_into_shape_compatible() {
        let lhs = s(&[2, 3]);
        let rhs = s(&[3]);
        let shape = reconcile(&lhs, &rhs)
            .into_shape(&lhs, &rhs)
            .expect("shapes are compatible");
        assert_eq!(shape, s(&[2, 3]));
    }
}
