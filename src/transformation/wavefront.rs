//! Wavefront (`.obj`) export of meshes.

use crate::math::{Isometry, Real};
use crate::shape::PolyMesh;
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::path::Path;

impl PolyMesh {
    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: &Path) -> Result<(), ObjError> {
        write_obj_file(path, [("mesh", self, Isometry::identity())])
    }
}

/// Writes several placed meshes into a single Wavefront (`.obj`) file, one object per mesh.
///
/// This function is enabled by the `wavefront` feature flag.
pub fn write_obj_file<'a>(
    path: &Path,
    meshes: impl IntoIterator<Item = (&'a str, &'a PolyMesh, Isometry<Real>)>,
) -> Result<(), ObjError> {
    let mut file = std::fs::File::create(path)?;
    let mut data = ObjData::default();

    for (name, mesh, pos) in meshes {
        let base = data.position.len();

        data.position.extend(mesh.vertices().iter().map(|v| {
            let v = pos * v;
            [v.x as f32, v.y as f32, v.z as f32]
        }));

        data.objects.push(Object {
            groups: vec![Group {
                polys: mesh
                    .faces()
                    .iter()
                    .map(|face| {
                        SimplePolygon(
                            face.vertices
                                .iter()
                                .map(|i| IndexTuple(base + *i as usize, None, None))
                                .collect(),
                        )
                    })
                    .collect(),
                name: name.to_string(),
                index: 0,
                material: None,
            }],
            name: name.to_string(),
        });
    }

    data.write_to_buf(&mut file)
}
