use crate::math::{Point, Real, Vector};
use crate::shape::{Face, PolyMesh};
use crate::utils::hashmap::HashMap;
use crate::utils::{SortedPair, UnionFind, PLANE_EPSILON};

/// Merges adjacent faces whose normals differ by less than `angle` (radians) into polygons.
///
/// Two faces are only merged if they share the same flags and material, and if the edge between
/// them is not sharp. A merged group is kept only if its boundary is a single simple loop forming
/// a convex polygon whose vertices all lie on a common plane, up to a tolerance relative to the
/// size of the mesh. Every other group is left as it was, so the result describes the same
/// surface with fewer faces.
pub fn dissolve_coplanar_faces(mesh: &PolyMesh, angle: Real) -> PolyMesh {
    let faces = mesh.faces();
    let normals: Vec<_> = (0..faces.len()).map(|fid| mesh.face_normal(fid)).collect();
    let scale = mesh.local_aabb().diagonal_length_squared().sqrt().max(1.0);
    let tolerance = PLANE_EPSILON * scale;

    let mut edge_to_face = HashMap::default();
    for (fid, face) in faces.iter().enumerate() {
        let n = face.vertices.len();
        for k in 0..n {
            let edge = (face.vertices[k], face.vertices[(k + 1) % n]);
            let _ = edge_to_face.insert(edge, fid as u32);
        }
    }

    let cos_angle = angle.cos();
    let mut ufind = UnionFind::new(faces.len());

    for (&(a, b), &fid) in &edge_to_face {
        if a > b || mesh.sharp_edges().contains(&SortedPair::new(a, b)) {
            continue;
        }

        let Some(&twin) = edge_to_face.get(&(b, a)) else {
            continue;
        };

        let (f1, f2) = (&faces[fid as usize], &faces[twin as usize]);
        if f1.flags != f2.flags || f1.material_index != f2.material_index {
            continue;
        }

        let mergeable = match (normals[fid as usize], normals[twin as usize]) {
            (Some(n1), Some(n2)) => n1.dot(&*n2) >= cos_angle,
            // Slivers are absorbed by their neighbors.
            _ => true,
        };

        if mergeable {
            ufind.union(fid, twin);
        }
    }

    let (labels, num_groups) = ufind.labels();
    let mut groups = vec![Vec::new(); num_groups];
    for (fid, label) in labels.iter().enumerate() {
        groups[*label as usize].push(fid);
    }

    let mut new_faces = Vec::with_capacity(num_groups);

    for group in &groups {
        if group.len() == 1 {
            new_faces.push(faces[group[0]].clone());
            continue;
        }

        match boundary_loop(group, faces, &labels, &edge_to_face)
            .filter(|polygon| is_flat_and_convex(mesh.vertices(), polygon, tolerance))
        {
            Some(polygon) => new_faces.push(faces[group[0]].with_vertices(polygon)),
            None => new_faces.extend(group.iter().map(|fid| faces[*fid].clone())),
        }
    }

    let mut result = mesh.clone();
    let (vertices, _) = result.take_geometry();
    result.replace_geometry(vertices, new_faces);
    result.remove_unused_vertices();
    result
}

fn boundary_loop(
    group: &[usize],
    faces: &[Face],
    labels: &[u32],
    edge_to_face: &HashMap<(u32, u32), u32>,
) -> Option<Vec<u32>> {
    let label = labels[group[0]];
    let mut next = HashMap::default();
    let mut first = None;

    for fid in group {
        let face = &faces[*fid];
        let n = face.vertices.len();

        for k in 0..n {
            let (a, b) = (face.vertices[k], face.vertices[(k + 1) % n]);
            let interior = edge_to_face
                .get(&(b, a))
                .is_some_and(|twin| labels[*twin as usize] == label);

            if !interior {
                if next.insert(a, b).is_some() {
                    // The boundary touches itself.
                    return None;
                }
                let _ = first.get_or_insert(a);
            }
        }
    }

    let start = first?;
    let mut polygon = vec![start];
    let mut curr = *next.get(&start)?;

    while curr != start {
        if polygon.len() > next.len() {
            return None;
        }
        polygon.push(curr);
        curr = *next.get(&curr)?;
    }

    (polygon.len() == next.len()).then_some(polygon)
}

/// Tests that `polygon` lies on a plane up to `tolerance`, and turns counter-clockwise around
/// its normal at every corner.
fn is_flat_and_convex(vertices: &[Point<Real>], polygon: &[u32], tolerance: Real) -> bool {
    let pts: Vec<_> = polygon.iter().map(|i| vertices[*i as usize]).collect();
    let n = pts.len();
    let center = pts.iter().fold(Vector::zeros(), |acc, pt| acc + pt.coords) / n as Real;

    // Newell's normal.
    let mut normal = Vector::zeros();
    for k in 0..n {
        let (a, b) = (pts[k].coords - center, pts[(k + 1) % n].coords - center);
        normal += a.cross(&b);
    }

    let Some(normal) = normal.try_normalize(Real::EPSILON) else {
        return false;
    };

    let flat = pts
        .iter()
        .all(|pt| normal.dot(&(pt.coords - center)).abs() <= tolerance);
    let convex = (0..n).all(|k| {
        let (a, b, c) = (pts[k], pts[(k + 1) % n], pts[(k + 2) % n]);
        (b - a).cross(&(c - b)).dot(&normal) >= -tolerance * tolerance
    });

    flat && convex
}
