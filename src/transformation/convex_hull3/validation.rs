use super::ConvexHullError;
use crate::math::Real;
use crate::shape::PolyMesh;
use crate::utils::hashmap::HashMap;

/// Checks that `mesh` is a closed convex polyhedron.
///
/// Every edge must be shared by exactly two faces, traversed in opposite directions, and every
/// vertex must lie inside of every face plane up to `epsilon`.
pub fn check_convex_hull(mesh: &PolyMesh, epsilon: Real) -> Result<(), ConvexHullError> {
    let mut directed_edges = HashMap::default();

    for (fid, face) in mesh.faces().iter().enumerate() {
        let n = face.vertices.len();
        for k in 0..n {
            let (a, b) = (face.vertices[k], face.vertices[(k + 1) % n]);
            if directed_edges.insert((a, b), fid).is_some() {
                return Err(ConvexHullError::TJunction(fid, a, b));
            }
        }
    }

    for (&(a, b), &fid) in &directed_edges {
        if !directed_edges.contains_key(&(b, a)) {
            return Err(ConvexHullError::TJunction(fid, a, b));
        }
    }

    for fid in 0..mesh.faces().len() {
        let plane = mesh
            .face_plane(fid)
            .ok_or(ConvexHullError::InternalError("degenerate hull face"))?;

        if let Some(vid) = mesh
            .vertices()
            .iter()
            .position(|v| !plane.contains_point(v, epsilon))
        {
            return Err(ConvexHullError::NotConvex(vid, fid));
        }
    }

    Ok(())
}
