//! Shapes manipulated by the fracture.

pub use self::plane::Plane;
pub use self::poly_mesh::{Face, FaceFlags, FaceIndices, PolyMesh, VertexGroup};

mod plane;
mod poly_mesh;
