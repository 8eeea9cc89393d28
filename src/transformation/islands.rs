use crate::shape::PolyMesh;
use crate::utils::UnionFind;

/// Splits a mesh into its connected components.
///
/// Two faces belong to the same component if they are linked by a chain of faces sharing
/// vertices. Components are ordered by their first face; each keeps the attributes (sharp edges,
/// vertex groups, materials) of the vertices it contains.
pub fn split_disconnected_islands(mesh: &PolyMesh) -> Vec<PolyMesh> {
    let mut ufind = UnionFind::new(mesh.vertices().len());

    for face in mesh.faces() {
        for pair in face.vertices.windows(2) {
            ufind.union(pair[0], pair[1]);
        }
    }

    let mut island_of_root = vec![u32::MAX; mesh.vertices().len()];
    let mut islands: Vec<Vec<_>> = Vec::new();

    for face in mesh.faces() {
        let Some(first) = face.vertices.first() else {
            continue;
        };
        let root = ufind.find(*first) as usize;

        if island_of_root[root] == u32::MAX {
            island_of_root[root] = islands.len() as u32;
            islands.push(Vec::new());
        }

        islands[island_of_root[root] as usize].push(face.clone());
    }

    if islands.len() <= 1 {
        return vec![mesh.clone()];
    }

    islands
        .into_iter()
        .map(|faces| {
            let mut island = mesh.clone();
            island.replace_geometry(mesh.vertices().to_vec(), faces);
            island.remove_unused_vertices();
            island
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::split_disconnected_islands;
    use crate::math::{Isometry, Vector};
    use crate::shape::PolyMesh;

    #[test]
    fn two_cubes_are_two_islands() {
        let a = PolyMesh::cuboid(Vector::repeat(1.0));
        let b = PolyMesh::cuboid(Vector::repeat(0.5))
            .transformed(&Isometry::translation(3.0, 0.0, 0.0));

        let mut vertices = a.vertices().to_vec();
        vertices.extend_from_slice(b.vertices());
        let mut faces = a.faces().to_vec();
        faces.extend(b.faces().iter().map(|f| f.with_vertices(f.vertices.iter().map(|i| i + 8))));
        let mut both = PolyMesh::new(vertices, faces);
        both.mark_sharp(8, 9);

        let islands = split_disconnected_islands(&both);
        assert_eq!(islands.len(), 2);
        assert_eq!(islands[0], a);
        assert_relative_eq!(islands[1].signed_volume(), 1.0, epsilon = 1.0e-9);
        assert!(islands[0].sharp_edges().is_empty());
        assert_eq!(islands[1].sharp_edges().len(), 1);
    }

    #[test]
    fn connected_mesh_is_returned_whole() {
        let cube = PolyMesh::cuboid(Vector::repeat(1.0));
        assert_eq!(split_disconnected_islands(&cube), vec![cube]);
    }
}
