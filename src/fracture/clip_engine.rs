//! Conversion of the raw cells into fragments of the source mesh.

use super::{Cell, FractureConfig, FractureError, Fragment};
use crate::math::{Isometry, Real};
use crate::shape::{FaceFlags, PolyMesh};
use crate::transformation::GeometryKernel;
use crate::utils::{
    self, FRAGMENT_DISSOLVE_ANGLE, FRAGMENT_WELD_DISTANCE, HULL_DISSOLVE_ANGLE, HULL_WELD_DISTANCE,
};
use std::borrow::Cow;

/// Parameters of [`clip`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClipOptions {
    /// The name given to every fragment.
    pub fragment_name: String,
    /// The recursion level of the produced fragments.
    pub level: usize,
    /// Flags every face of the cells as [`FaceFlags::HIDDEN`], to tell the cut faces apart from
    /// the surface of the source mesh.
    ///
    /// At level 0, the hidden flags of the source mesh are cleared first.
    pub use_interior_hide: bool,
    /// Flags every face of the cells as [`FaceFlags::SMOOTH`].
    pub use_smooth_faces: bool,
    /// The material index of the faces of the cells, unchanged if `0`.
    pub material_index: u16,
    /// Gives the source material names to the cells.
    pub use_data_match: bool,
    /// Emits one fragment per connected component.
    pub use_island_split: bool,
    /// Moves the origin of each fragment to the mean of its vertices.
    pub use_recenter: bool,
    /// Vertices of a clipped cell closer than this distance are merged.
    pub weld_distance: Real,
    /// Adjacent faces of a clipped cell whose normals differ by less than this angle (radians)
    /// are merged, when they stay flat and convex.
    pub dissolve_angle: Real,
}

impl ClipOptions {
    /// The clipping options of a fracture at the given recursion `level`.
    pub fn from_config(config: &FractureConfig, fragment_name: String, level: usize) -> Self {
        Self {
            fragment_name,
            level,
            use_interior_hide: config.use_interior_hide(),
            use_smooth_faces: config.use_smooth_faces,
            material_index: config.material_index,
            use_data_match: config.use_data_match,
            use_island_split: config.use_island_split,
            use_recenter: config.use_recenter,
            weld_distance: FRAGMENT_WELD_DISTANCE,
            dissolve_angle: FRAGMENT_DISSOLVE_ANGLE,
        }
    }
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self::from_config(&FractureConfig::default(), "cell".to_string(), 0)
    }
}

/// Intersects every cell with `source`, a world-space mesh.
///
/// Each cell is turned into a closed convex mesh, intersected with `source`, and welded. Cells
/// not overlapping `source` are discarded, and so are the cells whose hull or intersection
/// fails: such failures are logged and never abort the batch.
pub fn clip<K: ?Sized + GeometryKernel>(
    cells: &[Cell],
    source: &PolyMesh,
    options: &ClipOptions,
    kernel: &K,
) -> Vec<Fragment> {
    let source = if options.use_interior_hide && options.level == 0 {
        let mut source = source.clone();
        for face in source.faces_mut() {
            face.flags.remove(FaceFlags::HIDDEN);
        }
        Cow::Owned(source)
    } else {
        Cow::Borrowed(source)
    };

    let mut fragments = Vec::new();

    for cell in cells {
        match clip_cell(cell, &source, options, kernel) {
            Ok(pieces) => fragments.extend(pieces),
            Err(err) => log::warn!("Skipping the cell of seed {}: {}", cell.seed, err),
        }
    }

    log::debug!(
        "Clipped {} cells into {} fragments.",
        cells.len(),
        fragments.len()
    );
    fragments
}

fn clip_cell<K: ?Sized + GeometryKernel>(
    cell: &Cell,
    source: &PolyMesh,
    options: &ClipOptions,
    kernel: &K,
) -> Result<Vec<Fragment>, FractureError> {
    let mut hull =
        kernel.convex_hull_and_clean(&cell.vertices, HULL_WELD_DISTANCE, HULL_DISSOLVE_ANGLE)?;

    for face in hull.faces_mut() {
        if options.use_smooth_faces {
            face.flags.insert(FaceFlags::SMOOTH);
        }
        if options.material_index != 0 {
            face.material_index = options.material_index;
        }
        if options.use_interior_hide {
            face.flags.insert(FaceFlags::HIDDEN);
        }
    }

    if options.use_data_match {
        hull.set_materials(source.materials().to_vec());
    }

    // The intersection is computed in world-space, then brought back around the seed.
    hull.translate(&cell.seed.coords);
    let mut mesh = kernel.boolean_intersect(&hull, source)?;

    if mesh.vertices().is_empty() {
        return Ok(Vec::new());
    }

    mesh.translate(&-cell.seed.coords);
    mesh.set_materials(hull.materials().to_vec());
    mesh.weld_vertices(options.weld_distance);

    if mesh.is_empty() {
        return Ok(Vec::new());
    }

    let mesh = kernel.dissolve_coplanar_faces(&mesh, options.dissolve_angle);

    let pieces = if options.use_island_split {
        kernel.split_disconnected_islands(&mesh)
    } else {
        vec![mesh]
    };

    let fragments = pieces
        .into_iter()
        .map(|mut piece| {
            let mut origin = cell.seed;

            if options.use_recenter {
                let center = utils::center(piece.vertices());
                piece.translate(&-center.coords);
                origin += center.coords;
            }

            Fragment::new(
                options.fragment_name.clone(),
                piece,
                Isometry::translation(origin.x, origin.y, origin.z),
                options.level,
            )
        })
        .collect();

    Ok(fragments)
}
