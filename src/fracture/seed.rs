use crate::math::{Point, Real};

/// The kind of source a seed point was derived from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum SeedOrigin {
    /// A vertex of the fractured object.
    OwnVertex,
    /// A vertex of a child of the fractured object.
    ChildVertex,
    /// A particle of the object or of one of its children.
    Particle,
    /// A point of a scene stroke.
    Stroke,
    /// A point scattered in the bounding box of the object.
    Random,
}

/// A world-space point around which a Voronoi cell is built.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SeedPoint {
    /// The world-space position of the seed.
    pub position: Point<Real>,
    /// Where this seed comes from.
    pub origin: SeedOrigin,
}

impl SeedPoint {
    /// Creates a new seed.
    #[inline]
    pub fn new(position: Point<Real>, origin: SeedOrigin) -> Self {
        Self { position, origin }
    }
}
