/*!
shatter3d
========

**shatter3d** is a Voronoi cell fracture library written with the rust
programming language. It breaks a closed mesh into convex fragments that,
reassembled, approximate the original shape.

The fracture runs in three stages:

1. seed points are gathered from the object (vertices, particles, strokes, random scatter),
2. one convex cell per seed is built by intersecting the half-spaces bisecting the seed and
   its neighbors,
3. every cell is intersected with the source mesh, optionally recursing on the resulting
   fragments.

```
use shatter3d::fracture::{FractureConfig, FracturePipeline, SceneContext, SourceObject, VecSink};
use shatter3d::math::{Isometry, Vector};
use shatter3d::shape::PolyMesh;

let cube = SourceObject::new(
    "Cube",
    PolyMesh::cuboid(Vector::new(1.0, 1.0, 1.0)),
    Isometry::identity(),
);
let config = FractureConfig {
    seed: Some(42),
    ..FractureConfig::default()
};

let mut pipeline = FracturePipeline::new(config).unwrap();
let mut sink = VecSink::default();
let report = pipeline.run(&[cube], &SceneContext::default(), &mut sink);

assert!(report.failures.is_empty());
assert_eq!(sink.fragments.len(), report.num_fragments);
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)] // Maybe revisit this one later.
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![allow(clippy::type_complexity)] // Complains about closures that are fairly simple.
#![deny(unused_qualifications)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod fracture;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    pub use f64 as Real;
}

/// Aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Isometry3, Matrix3, Point2, Point3, Translation3, UnitVector3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The matrix type.
    pub use Matrix3 as Matrix;

    /// The transformation matrix type.
    pub use Isometry3 as Isometry;

    /// The translation type.
    pub use Translation3 as Translation;
}
