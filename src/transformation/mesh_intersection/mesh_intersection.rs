use super::{cap, MeshIntersectionError, CONVEXITY_EPS, EPS};
use crate::math::Real;
use crate::shape::{Face, FaceIndices, Plane, PolyMesh};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::hashset::HashSet;
use crate::utils::{self, SortedPair};

/// Computes the intersection of the convex polyhedron `cutter` with `mesh`.
///
/// `mesh` is clipped successively by the supporting plane of every face of `cutter`, and each
/// cut is closed by new faces (caps). The faces and vertex attributes of `mesh` are preserved
/// (split edges keep their sharpness and interpolate the vertex group weights), while the caps
/// copy the flags and the material index of the `cutter` face they lie on.
///
/// The faces of `cutter` may deviate from a plane, or from convexity, by a small amount
/// relative to its size: each supporting plane is pushed outward until every vertex of `cutter`
/// lies inside of it. Larger deviations fail with
/// [`MeshIntersectionError::NonConvexOperand`].
///
/// Both meshes must be expressed in the same frame. The result is empty if they do not overlap.
pub fn intersect_meshes(
    cutter: &PolyMesh,
    mesh: &PolyMesh,
) -> Result<PolyMesh, MeshIntersectionError> {
    let scale = cutter
        .local_aabb()
        .diagonal_length_squared()
        .sqrt()
        .max(1.0);
    let planes = supporting_planes(cutter, CONVEXITY_EPS * scale)?;
    let mut result = mesh.clone();

    for (fid, (face, plane)) in cutter.faces().iter().zip(&planes).enumerate() {
        clip_by_plane(&mut result, plane, face, fid)?;

        if result.faces().is_empty() {
            break;
        }
    }

    result.remove_unused_vertices();
    Ok(result)
}

/// The plane of every face of `cutter`, shifted so that no vertex of `cutter` lies outside.
fn supporting_planes(
    cutter: &PolyMesh,
    tolerance: Real,
) -> Result<Vec<Plane>, MeshIntersectionError> {
    let mut planes = Vec::with_capacity(cutter.faces().len());

    for fid in 0..cutter.faces().len() {
        let plane = cutter
            .face_plane(fid)
            .ok_or(MeshIntersectionError::DegenerateFace(fid))?;
        let max_dist = cutter
            .vertices()
            .iter()
            .map(|v| plane.signed_distance(v))
            .fold(0.0, Real::max);

        if max_dist > tolerance {
            return Err(MeshIntersectionError::NonConvexOperand);
        }

        planes.push(Plane {
            offset: plane.offset - max_dist,
            ..plane
        });
    }

    Ok(planes)
}

/// Removes the part of `mesh` outside of `plane` and caps the section with copies of `template`.
fn clip_by_plane(
    mesh: &mut PolyMesh,
    plane: &Plane,
    template: &Face,
    fid: usize,
) -> Result<(), MeshIntersectionError> {
    let mut dists: Vec<Real> = mesh
        .vertices()
        .iter()
        .map(|v| plane.signed_distance(v))
        .collect();

    if dists.iter().all(|d| *d <= EPS) {
        return Ok(());
    }

    let (mut vertices, faces) = mesh.take_geometry();
    let mut new_vertices: HashMap<SortedPair<u32>, u32> = HashMap::default();
    // (inside vertex, outside vertex, new vertex, interpolation parameter)
    let mut splits = Vec::new();
    let mut kept = Vec::with_capacity(faces.len());

    for face in faces {
        let n = face.vertices.len();
        let num_inside = face
            .vertices
            .iter()
            .filter(|v| dists[**v as usize] <= EPS)
            .count();

        if num_inside == 0 {
            continue;
        }

        if num_inside == n {
            kept.push(face);
            continue;
        }

        let mut clipped = FaceIndices::new();

        for k in 0..n {
            let a = face.vertices[k];
            let b = face.vertices[(k + 1) % n];
            let (da, db) = (dists[a as usize], dists[b as usize]);

            if da <= EPS {
                clipped.push(a);
            }

            if (da <= EPS) != (db <= EPS) {
                let (inner, outer) = if da <= EPS { (a, b) } else { (b, a) };
                let d_inner = dists[inner as usize];

                // An inner vertex lying on the plane already closes the polygon.
                if d_inner.abs() > EPS {
                    let id = match new_vertices.entry(SortedPair::new(a, b)) {
                        Entry::Occupied(e) => *e.get(),
                        Entry::Vacant(e) => {
                            let t = d_inner / (d_inner - dists[outer as usize]);
                            let p_in = vertices[inner as usize];
                            let p_out = vertices[outer as usize];
                            vertices.push(p_in + (p_out - p_in) * t);
                            dists.push(0.0);

                            let id = vertices.len() as u32 - 1;
                            splits.push((inner, outer, id, t));
                            *e.insert(id)
                        }
                    };
                    clipped.push(id);
                }
            }
        }

        utils::dedup_polygon(&mut clipped);

        if clipped.len() >= 3 {
            kept.push(face.with_vertices(clipped));
        }
    }

    transfer_split_attributes(mesh, &splits);

    let mut directed_edges = HashSet::default();
    for face in &kept {
        let n = face.vertices.len();
        directed_edges.extend((0..n).map(|k| (face.vertices[k], face.vertices[(k + 1) % n])));
    }

    // The section is bounded by the edges lying on the plane that lost their twin. Faces already
    // lying on the plane are holes of the section.
    let on_plane = |v: u32| dists[v as usize].abs() <= EPS;
    let mut section = Vec::new();

    for face in &kept {
        let n = face.vertices.len();
        for k in 0..n {
            let (a, b) = (face.vertices[k], face.vertices[(k + 1) % n]);
            if on_plane(a) && on_plane(b) && !directed_edges.contains(&(b, a)) {
                section.push((b, a));
            }
        }
    }

    let caps = cap::build_caps(&vertices, &section, plane, template, fid)?;
    kept.extend(caps);
    mesh.replace_geometry(vertices, kept);

    Ok(())
}

/// Carries the sharpness of the split edges and the vertex group weights over to the new
/// vertices.
fn transfer_split_attributes(mesh: &mut PolyMesh, splits: &[(u32, u32, u32, Real)]) {
    for (inner, outer, id, _) in splits {
        if mesh
            .sharp_edges()
            .contains(&SortedPair::new(*inner, *outer))
        {
            mesh.mark_sharp(*inner, *id);
        }
    }

    for group in mesh.vertex_groups_mut() {
        for (inner, outer, id, t) in splits {
            let w_in = group.weights.get(inner).copied();
            let w_out = group.weights.get(outer).copied();

            if w_in.is_some() || w_out.is_some() {
                let w = w_in.unwrap_or(0.0) * (1.0 - t) + w_out.unwrap_or(0.0) * t;
                let _ = group.weights.insert(*id, w);
            }
        }
    }
}
