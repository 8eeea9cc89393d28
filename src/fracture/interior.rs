use super::{FractureConfig, Fragment};
use crate::shape::{FaceFlags, PolyMesh};
use crate::transformation::GeometryKernel;
use crate::utils::hashset::HashSet;

/// The name of the vertex group collecting the vertices of the cut faces.
pub const INTERIOR_GROUP: &str = "Interior";

/// Turns the hidden flags left by the clipping stage into persistent mesh attributes.
///
/// The faces created by a cut are flagged [`FaceFlags::HIDDEN`] while fracturing. Once the
/// fragment population is final, this processor records them as an `"Interior"` vertex group
/// and as sharp edges along the boundary between cut faces and surface faces, then clears every
/// hidden flag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InteriorPostProcessor {
    /// Adds the vertices belonging only to cut faces to the [`INTERIOR_GROUP`] vertex group.
    pub use_interior_vgroup: bool,
    /// Marks the edges between a cut face and a surface face as sharp.
    pub use_sharp_edges: bool,
    /// Disconnects the faces along the sharp edges.
    pub use_sharp_edges_apply: bool,
}

impl InteriorPostProcessor {
    /// The interior post-processing requested by `config`.
    pub fn from_config(config: &FractureConfig) -> Self {
        Self {
            use_interior_vgroup: config.use_interior_vgroup,
            use_sharp_edges: config.use_sharp_edges,
            use_sharp_edges_apply: config.use_sharp_edges_apply,
        }
    }

    /// Does this processor have anything to do?
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.use_interior_vgroup || self.use_sharp_edges
    }

    /// Processes every fragment.
    pub fn run<K: ?Sized + GeometryKernel>(&self, fragments: &mut [Fragment], kernel: &K) {
        for fragment in fragments {
            self.process(&mut fragment.mesh, kernel);
        }
    }

    /// Processes a single mesh.
    pub fn process<K: ?Sized + GeometryKernel>(&self, mesh: &mut PolyMesh, kernel: &K) {
        if self.use_interior_vgroup {
            let mut interior = vec![true; mesh.vertices().len()];

            for face in mesh.faces().iter().filter(|f| !f.is_hidden()) {
                for id in &face.vertices {
                    interior[*id as usize] = false;
                }
            }

            let group = mesh.vertex_group_mut(INTERIOR_GROUP);
            for (id, _) in interior.iter().enumerate().filter(|(_, tag)| **tag) {
                let _ = group.weights.insert(id as u32, 1.0);
            }
        }

        if self.use_sharp_edges {
            let seams: Vec<_> = mesh
                .edge_faces()
                .into_iter()
                .filter(|(_, faces)| {
                    let hidden = |fid: &u32| mesh.faces()[*fid as usize].is_hidden();
                    faces.iter().any(hidden) && !faces.iter().all(hidden)
                })
                .map(|(edge, _)| edge)
                .collect();

            for edge in &seams {
                let (a, b) = **edge;
                mesh.mark_sharp(a, b);
            }

            if self.use_sharp_edges_apply {
                let edges: HashSet<_> = mesh
                    .edge_faces()
                    .into_keys()
                    .filter(|e| mesh.sharp_edges().contains(e))
                    .collect();

                if !edges.is_empty() {
                    *mesh = kernel.split_edges(mesh, &edges);
                }
            }
        }

        for face in mesh.faces_mut() {
            face.flags.remove(FaceFlags::HIDDEN);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Vector;
    use crate::transformation::DefaultKernel;

    /// A cube whose top face is flagged as a cut face.
    fn cube_with_hidden_top() -> PolyMesh {
        let mut cube = PolyMesh::cuboid(Vector::repeat(1.0));
        // The +Z face is [4, 5, 6, 7].
        cube.faces_mut()[4].flags = FaceFlags::HIDDEN;
        cube
    }

    #[test]
    fn seams_are_marked_sharp_and_flags_cleared() {
        let processor = InteriorPostProcessor {
            use_sharp_edges: true,
            ..InteriorPostProcessor::default()
        };
        let mut mesh = cube_with_hidden_top();
        processor.process(&mut mesh, &DefaultKernel);

        assert_eq!(mesh.sharp_edges().len(), 4);
        assert!(mesh.faces().iter().all(|f| !f.is_hidden()));
        assert_eq!(mesh.vertices().len(), 8);
    }

    #[test]
    fn applied_sharp_edges_split_the_mesh() {
        let processor = InteriorPostProcessor {
            use_sharp_edges: true,
            use_sharp_edges_apply: true,
            ..InteriorPostProcessor::default()
        };
        let mut mesh = cube_with_hidden_top();
        processor.process(&mut mesh, &DefaultKernel);

        assert_eq!(mesh.vertices().len(), 12);
        assert_eq!(mesh.faces().len(), 6);
        assert_relative_eq!(mesh.signed_volume(), 8.0, epsilon = 1.0e-9);
    }

    #[test]
    fn interior_group_holds_vertices_of_cut_faces_only() {
        let processor = InteriorPostProcessor {
            use_interior_vgroup: true,
            ..InteriorPostProcessor::default()
        };

        let mut mesh = cube_with_hidden_top();
        processor.process(&mut mesh, &DefaultKernel);
        // Every vertex of the top face also belongs to a visible side face.
        assert!(mesh.vertex_group(INTERIOR_GROUP).unwrap().weights.is_empty());

        let mut mesh = PolyMesh::cuboid(Vector::repeat(1.0));
        for face in mesh.faces_mut() {
            face.flags = FaceFlags::HIDDEN;
        }
        processor.process(&mut mesh, &DefaultKernel);
        let group = mesh.vertex_group(INTERIOR_GROUP).unwrap();
        assert_eq!(group.weights.len(), 8);
        assert!(group.weights.values().all(|w| *w == 1.0));
    }

    #[test]
    fn disabled_processor_only_clears_flags() {
        assert!(!InteriorPostProcessor::default().is_enabled());
        let mut mesh = cube_with_hidden_top();
        InteriorPostProcessor::default().process(&mut mesh, &DefaultKernel);
        assert!(mesh.sharp_edges().is_empty());
        assert!(mesh.vertex_groups().is_empty());
        assert!(mesh.faces().iter().all(|f| !f.is_hidden()));
    }
}
