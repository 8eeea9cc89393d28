use super::FractureError;
use crate::math::{Real, Vector};

/// How the fragments to re-fracture are picked at each recursion level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum RecursionSelect {
    /// Uniformly at random.
    Random,
    /// The fragments with the smallest bounding box diagonal first.
    #[default]
    SizeMin,
    /// The fragments with the largest bounding box diagonal first.
    SizeMax,
    /// The fragments closest to the scene cursor first.
    CursorMin,
    /// The fragments farthest from the scene cursor first.
    CursorMax,
}

/// How the total mass is distributed among the fragments.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum MassMode {
    /// Every fragment gets the full mass.
    Uniform,
    /// The mass is shared proportionally to the volume of each fragment's world-space AABB.
    #[default]
    Volume,
}

/// Number of seed points taken from each kind of source.
///
/// A limit of `0` disables the corresponding source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SourceLimits {
    /// Vertices of the object itself.
    pub own_vertices: usize,
    /// Vertices of each child object.
    pub child_vertices: usize,
    /// Particles of the object itself.
    pub own_particles: usize,
    /// Particles of each child object.
    pub child_particles: usize,
    /// Points of the scene strokes.
    pub strokes: usize,
    /// Points scattered uniformly in the bounding box of the object.
    pub random: usize,
}

impl Default for SourceLimits {
    fn default() -> Self {
        Self {
            own_vertices: 100,
            child_vertices: 0,
            own_particles: 0,
            child_particles: 0,
            strokes: 0,
            random: 0,
        }
    }
}

/// Parameters of the recursive re-fracture of the fragments.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RecursionConfig {
    /// Number of recursion levels. `0` disables the recursion.
    pub depth: usize,
    /// Global seed point limit used when re-fracturing a fragment.
    pub source_limit: usize,
    /// Recursion stops once the fragment count reaches this value. `0` means unlimited.
    pub clamp: usize,
    /// Fraction of the fragments re-fractured at each level, in `[0, 1]`.
    pub chance: Real,
    /// How the re-fractured fragments are picked when `chance < 1`.
    pub select: RecursionSelect,
}

impl Default for RecursionConfig {
    fn default() -> Self {
        Self {
            depth: 0,
            source_limit: 8,
            clamp: 250,
            chance: 0.25,
            select: RecursionSelect::SizeMin,
        }
    }
}

/// Mass assignment parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MassConfig {
    /// Whether masses are assigned at all.
    pub enabled: bool,
    /// How `total` is distributed.
    pub mode: MassMode,
    /// The mass to distribute.
    pub total: Real,
    /// The name of the fragment property the mass is written to.
    pub property_name: String,
}

impl Default for MassConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: MassMode::Volume,
            total: 1.0,
            property_name: "mass".to_string(),
        }
    }
}

/// The complete set of fracture parameters.
///
/// The defaults produce one fragment per vertex of the source mesh, with interior faces
/// separated by sharp edges.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FractureConfig {
    /// Per-source seed point limits.
    pub sources: SourceLimits,
    /// Global seed point limit at level 0. `0` means unlimited.
    pub source_limit: usize,
    /// Random displacement of the seeds, relative to the half diagonal of the object.
    pub noise: Real,
    /// Anisotropic scaling of the cells. `(1, 1, 1)` gives regular Voronoi cells.
    pub cell_scale: Vector<Real>,
    /// Gap left between two neighboring cells.
    pub margin: Real,
    /// Growth of the bounding box limiting the outermost cells.
    pub margin_bounds: Real,
    /// Recursive re-fracture parameters.
    pub recursion: RecursionConfig,
    /// Flags the faces of the cells as smooth-shaded.
    pub use_smooth_faces: bool,
    /// Marks the edges between the surface and the cut faces as sharp.
    pub use_sharp_edges: bool,
    /// Splits the mesh along the sharp edges.
    pub use_sharp_edges_apply: bool,
    /// Gives the cells the material names of the source object.
    pub use_data_match: bool,
    /// Emits one fragment per connected component of each clipped cell.
    pub use_island_split: bool,
    /// Adds the vertices of the cut faces to the `"Interior"` vertex group.
    pub use_interior_vgroup: bool,
    /// Moves the origin of each fragment to the mean of its vertices.
    pub use_recenter: bool,
    /// Drops the re-fractured fragments from the population.
    pub use_remove_original: bool,
    /// Material index given to the cut faces. `0` leaves them unchanged.
    pub material_index: u16,
    /// Mass assignment.
    pub mass: MassConfig,
    /// Notifies the sink after each fragment is produced.
    pub realtime_progress: bool,
    /// Records the seed points of the level-0 fracture in the report.
    pub use_debug_points: bool,
    /// The collection the fragments are registered into.
    pub collection_name: String,
    /// Seed of the random number generator. `None` seeds it from the OS entropy.
    pub seed: Option<u64>,
}

impl Default for FractureConfig {
    fn default() -> Self {
        Self {
            sources: SourceLimits::default(),
            source_limit: 100,
            noise: 0.0,
            cell_scale: Vector::repeat(1.0),
            margin: 0.001,
            margin_bounds: 0.05,
            recursion: RecursionConfig::default(),
            use_smooth_faces: false,
            use_sharp_edges: true,
            use_sharp_edges_apply: true,
            use_data_match: true,
            use_island_split: true,
            use_interior_vgroup: false,
            use_recenter: true,
            use_remove_original: true,
            material_index: 0,
            mass: MassConfig::default(),
            realtime_progress: false,
            use_debug_points: false,
            collection_name: "Fracture".to_string(),
            seed: None,
        }
    }
}

impl FractureConfig {
    /// Checks that every parameter lies in its valid range.
    pub fn validate(&self) -> Result<(), FractureError> {
        let invalid = |msg: &str| Err(FractureError::InvalidConfig(msg.to_string()));

        if !(self.noise >= 0.0) {
            return invalid("the noise must be non-negative");
        }
        if self.cell_scale.iter().any(|s| !(*s > 0.0) || !s.is_finite()) {
            return invalid("the cell scale must be positive and finite");
        }
        if !(self.margin >= 0.0) || !(self.margin_bounds >= 0.0) {
            return invalid("the margins must be non-negative");
        }
        if !(0.0..=1.0).contains(&self.recursion.chance) {
            return invalid("the recursion chance must lie in [0, 1]");
        }
        if self.mass.enabled && !(self.mass.total >= 0.0) {
            return invalid("the total mass must be non-negative");
        }
        if self.mass.enabled && self.mass.property_name.is_empty() {
            return invalid("the mass property name must not be empty");
        }

        Ok(())
    }

    /// Whether cut faces are flagged as hidden while clipping.
    #[inline]
    pub(crate) fn use_interior_hide(&self) -> bool {
        self.use_interior_vgroup || self.use_sharp_edges
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(FractureConfig::default().validate(), Ok(()));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut config = FractureConfig::default();
        config.recursion.chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(FractureError::InvalidConfig(_))
        ));

        let config = FractureConfig {
            cell_scale: Vector::new(1.0, 0.0, 1.0),
            ..FractureConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FractureConfig {
            noise: Real::NAN,
            ..FractureConfig::default()
        };
        assert!(config.validate().is_err());

        let mut config = FractureConfig::default();
        config.mass.enabled = true;
        config.mass.property_name.clear();
        assert!(config.validate().is_err());
    }
}
