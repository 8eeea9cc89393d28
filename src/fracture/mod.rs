//! Voronoi cell fracture.
//!
//! The entry point is the [`FracturePipeline`]. Its stages are also exposed individually:
//! [`gather`] derives the seed points of an object, [`CellBuilder`] computes one convex cell per
//! seed, [`clip`] intersects the cells with the object, and the [`InteriorPostProcessor`] and
//! [`MassAssigner`] finalize the fragments.

pub use self::cell_builder::{build_cells, Cell, CellBuilder};
pub use self::clip_engine::{clip, ClipOptions};
pub use self::config::{
    FractureConfig, MassConfig, MassMode, RecursionConfig, RecursionSelect, SourceLimits,
};
pub use self::error::FractureError;
pub use self::fragment::Fragment;
pub use self::interior::{InteriorPostProcessor, INTERIOR_GROUP};
pub use self::mass::MassAssigner;
pub use self::pipeline::{FracturePipeline, FractureReport};
pub use self::point_sampler::{gather, PointSource};
pub use self::seed::{SeedOrigin, SeedPoint};
pub use self::sink::{FractureSink, VecSink};
pub use self::source::{SceneContext, SourceObject};

mod cell_builder;
mod clip_engine;
mod config;
mod error;
mod fragment;
mod interior;
mod mass;
mod pipeline;
mod point_sampler;
mod seed;
mod sink;
mod source;
