use shatter3d::math::{Isometry, Point, Real, Vector};
use shatter3d::shape::PolyMesh;
use shatter3d::transformation::{intersect_meshes, split_disconnected_islands};

/// An L-shaped prism, made of two boxes sharing a face.
fn l_shape() -> PolyMesh {
    let vertices = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(2.0, 0.0, 0.0),
        Point::new(2.0, 1.0, 0.0),
        Point::new(1.0, 1.0, 0.0),
        Point::new(1.0, 2.0, 0.0),
        Point::new(0.0, 2.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
        Point::new(2.0, 0.0, 1.0),
        Point::new(2.0, 1.0, 1.0),
        Point::new(1.0, 1.0, 1.0),
        Point::new(1.0, 2.0, 1.0),
        Point::new(0.0, 2.0, 1.0),
    ];

    PolyMesh::from_polygons(
        vertices,
        &[
            // Bottom and top, split into convex quads.
            &[0, 3, 2, 1],
            &[0, 5, 4, 3],
            &[6, 7, 8, 9],
            &[6, 9, 10, 11],
            // Sides.
            &[0, 1, 7, 6],
            &[1, 2, 8, 7],
            &[2, 3, 9, 8],
            &[3, 4, 10, 9],
            &[4, 5, 11, 10],
            &[5, 0, 6, 11],
        ],
    )
}

#[test]
fn l_shape_is_a_closed_mesh() {
    let mesh = l_shape();
    assert_relative_eq!(mesh.signed_volume(), 3.0, epsilon = 1.0e-9);
    assert!(mesh.edge_faces().values().all(|faces| faces.len() == 2));
}

#[test]
fn clipping_a_concave_mesh() {
    // Keeps the part of the L shape with x >= 0.5 and y >= 0.5.
    let cutter = PolyMesh::cuboid(Vector::repeat(2.0))
        .transformed(&Isometry::translation(2.5, 2.5, 0.5));
    let result = intersect_meshes(&cutter, &l_shape()).unwrap();

    assert_relative_eq!(result.signed_volume(), 1.25, epsilon = 1.0e-9);
    assert!(result.edge_faces().values().all(|faces| faces.len() == 2));
}

#[test]
fn cutting_a_concave_mesh_in_two_islands() {
    // The slab x + y >= 2.5 keeps the tips of both arms of the L.
    let normal = Vector::new(1.0, 1.0, 0.0).normalize();
    let slab = PolyMesh::cuboid(Vector::new(5.0, 5.0, 5.0)).transformed(&Isometry::new(
        normal * (2.5 / Real::sqrt(2.0) + 5.0),
        Vector::z() * std::f64::consts::FRAC_PI_4,
    ));
    let result = intersect_meshes(&slab, &l_shape()).unwrap();
    let islands = split_disconnected_islands(&result);

    assert_eq!(islands.len(), 2);
    for island in &islands {
        assert_relative_eq!(island.signed_volume(), 0.125, epsilon = 1.0e-9);
    }
}

#[test]
fn clipping_a_clipped_mesh_is_idempotent() {
    let cutter = PolyMesh::cuboid(Vector::new(1.0, 1.5, 0.75))
        .transformed(&Isometry::translation(0.5, 0.25, 0.0));
    let mesh = PolyMesh::cuboid(Vector::repeat(1.0));

    let once = intersect_meshes(&cutter, &mesh).unwrap();
    let twice = intersect_meshes(&cutter, &once).unwrap();
    assert_eq!(once, twice);
}
