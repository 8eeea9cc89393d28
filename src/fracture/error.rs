use crate::math::{Point, Real};
use crate::transformation::{ConvexHullError, MeshIntersectionError};

/// Errors raised while fracturing an object.
///
/// Only [`FractureError::EmptyInput`], [`FractureError::NoFragments`] and
/// [`FractureError::InvalidConfig`] ever reach the caller. The other variants describe failures
/// confined to a single cell: they are logged and the cell is skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FractureError {
    /// No usable seed point could be derived for the object.
    #[error("No seed point could be derived for the object `{object}`.")]
    EmptyInput {
        /// The name of the object.
        object: String,
    },

    /// The cell of a seed is empty.
    ///
    /// This happens when another seed coincides with it, or when the bisector planes leave no
    /// room inside of the bounding box.
    #[error("The cell of the seed {seed} is empty.")]
    DegenerateCell {
        /// The position of the seed.
        seed: Point<Real>,
    },

    /// The hull construction or the boolean intersection of a cell failed.
    #[error("Failed to clip a cell: {reason}")]
    ClipFailure {
        /// The error reported by the geometry kernel.
        reason: String,
    },

    /// Every cell of the object was discarded by the clipping stage.
    #[error("Fracturing the object `{object}` produced no fragment.")]
    NoFragments {
        /// The name of the object.
        object: String,
    },

    /// The fracture configuration is inconsistent.
    #[error("Invalid fracture configuration: {0}")]
    InvalidConfig(String),
}

impl From<ConvexHullError> for FractureError {
    fn from(err: ConvexHullError) -> Self {
        FractureError::ClipFailure {
            reason: err.to_string(),
        }
    }
}

impl From<MeshIntersectionError> for FractureError {
    fn from(err: MeshIntersectionError) -> Self {
        FractureError::ClipFailure {
            reason: err.to_string(),
        }
    }
}
