use crate::math::Point;
use crate::shape::PolyMesh;
use crate::utils::hashmap::HashMap;
use crate::utils::hashset::HashSet;
use crate::utils::{SortedPair, UnionFind};

/// Disconnects the faces of `mesh` along the given edges.
///
/// Each vertex is duplicated once per fan of faces that remain connected through the edges
/// not being split. Duplicates carry the vertex group weights of their original, and the split
/// edges stay marked as sharp on both sides.
pub fn split_edges(mesh: &PolyMesh, edges: &HashSet<SortedPair<u32>>) -> PolyMesh {
    // One corner per (face, vertex) occurrence.
    let mut corner_offsets = Vec::with_capacity(mesh.faces().len() + 1);
    corner_offsets.push(0u32);
    for face in mesh.faces() {
        let last = corner_offsets[corner_offsets.len() - 1];
        corner_offsets.push(last + face.vertices.len() as u32);
    }

    let num_corners = corner_offsets[corner_offsets.len() - 1] as usize;
    let mut ufind = UnionFind::new(num_corners);
    let corner = |fid: u32, k: usize| corner_offsets[fid as usize] + k as u32;

    // Corners of each vertex along each edge, per face.
    let mut edge_corners: HashMap<SortedPair<u32>, Vec<(u32, u32)>> = HashMap::default();

    for (fid, face) in mesh.faces().iter().enumerate() {
        let n = face.vertices.len();
        for k in 0..n {
            let (a, b) = (face.vertices[k], face.vertices[(k + 1) % n]);
            let (ca, cb) = (corner(fid as u32, k), corner(fid as u32, (k + 1) % n));
            let key = SortedPair::new(a, b);
            let (lo, hi) = if a < b { (ca, cb) } else { (cb, ca) };
            edge_corners.entry(key).or_default().push((lo, hi));
        }
    }

    for (edge, corners) in &edge_corners {
        if edges.contains(edge) {
            continue;
        }

        for pair in corners.windows(2) {
            ufind.union(pair[0].0, pair[1].0);
            ufind.union(pair[0].1, pair[1].1);
        }
    }

    let (labels, num_vertices) = ufind.labels();
    let mut vertices = vec![Point::origin(); num_vertices];
    let mut original = vec![0u32; num_vertices];
    let mut faces = Vec::with_capacity(mesh.faces().len());

    for (fid, face) in mesh.faces().iter().enumerate() {
        let ids = (0..face.vertices.len()).map(|k| {
            let label = labels[corner(fid as u32, k) as usize];
            vertices[label as usize] = mesh.vertices()[face.vertices[k] as usize];
            original[label as usize] = face.vertices[k];
            label
        });
        faces.push(face.with_vertices(ids));
    }

    let mut result = PolyMesh::new(vertices, faces);
    result.set_materials(mesh.materials().to_vec());

    for group in mesh.vertex_groups() {
        let target = result.vertex_group_mut(&group.name);
        for (new_id, old_id) in original.iter().enumerate() {
            if let Some(w) = group.weights.get(old_id) {
                let _ = target.weights.insert(new_id as u32, *w);
            }
        }
    }

    let split_or_sharp = |e: &SortedPair<u32>| edges.contains(e) || mesh.sharp_edges().contains(e);

    for (edge, corners) in &edge_corners {
        if split_or_sharp(edge) {
            for (lo, hi) in corners {
                result.mark_sharp(labels[*lo as usize], labels[*hi as usize]);
            }
        }
    }

    result
}

#[cfg(test)]
mod test {
    use super::split_edges;
    use crate::math::Vector;
    use crate::shape::PolyMesh;
    use crate::utils::hashset::HashSet;

    #[test]
    fn splitting_every_edge_of_a_cube() {
        let cube = PolyMesh::cuboid(Vector::repeat(1.0));
        let edges: HashSet<_> = cube.edge_faces().into_keys().collect();
        let split = split_edges(&cube, &edges);

        assert_eq!(split.vertices().len(), 24);
        assert_eq!(split.sharp_edges().len(), 24);
        assert_relative_eq!(split.signed_volume(), cube.signed_volume(), epsilon = 1.0e-9);
    }

    #[test]
    fn splitting_nothing_keeps_the_topology() {
        let mut cube = PolyMesh::cuboid(Vector::repeat(1.0));
        let _ = cube.vertex_group_mut("Interior").weights.insert(6, 1.0);
        let split = split_edges(&cube, &HashSet::default());

        assert_eq!(split.vertices().len(), 8);
        assert_eq!(split.edge_faces().len(), 12);
        let group = split.vertex_group("Interior").unwrap();
        assert_eq!(group.weights.len(), 1);
        let (id, _) = group.weights.iter().next().unwrap();
        assert_eq!(split.vertices()[*id as usize], cube.vertices()[6]);
    }

    #[test]
    fn splitting_the_top_ring_detaches_the_top_face() {
        let cube = PolyMesh::cuboid(Vector::repeat(1.0));
        let edges: HashSet<_> = cube
            .edge_faces()
            .into_keys()
            .filter(|e| {
                let (a, b) = **e;
                cube.vertices()[a as usize].z == 1.0 && cube.vertices()[b as usize].z == 1.0
            })
            .collect();
        assert_eq!(edges.len(), 4);

        let split = split_edges(&cube, &edges);
        // Each top corner is split between the top face and the side faces.
        assert_eq!(split.vertices().len(), 12);
        assert_eq!(split.sharp_edges().len(), 8);
    }
}
