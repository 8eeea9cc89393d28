use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shatter3d::bounding_volume::Aabb;
use shatter3d::fracture::{clip, Cell, CellBuilder, ClipOptions};
use shatter3d::math::{Point, Real, Vector};
use shatter3d::shape::PolyMesh;
use shatter3d::transformation::{intersect_meshes, DefaultKernel, GeometryKernel};

fn random_seeds(rng: &mut StdRng, n: usize) -> Vec<Point<Real>> {
    (0..n)
        .map(|_| {
            Point::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            )
        })
        .collect()
}

fn cube_vertices() -> Vec<Point<Real>> {
    PolyMesh::cuboid(Vector::repeat(1.0)).vertices().to_vec()
}

fn same_vertices(a: &Cell, b: &Cell) -> bool {
    let close = |p: &Point<Real>, set: &[Point<Real>]| {
        set.iter().any(|q| shatter3d::na::distance(p, q) < 1.0e-6)
    };

    a.vertices.iter().all(|p| close(p, &b.vertices))
        && b.vertices.iter().all(|p| close(p, &a.vertices))
}

#[test]
fn cell_vertices_satisfy_every_active_plane() {
    let mut rng = StdRng::seed_from_u64(42);
    let builder = CellBuilder::new(Vector::repeat(1.0), 0.05, 0.001);

    for _ in 0..5 {
        let seeds = random_seeds(&mut rng, 30);
        let cells = builder.build_cells(&cube_vertices(), &seeds, &DefaultKernel);
        assert_eq!(cells.len(), seeds.len());

        for cell in &cells {
            assert!(cell.planes.len() >= 4);
            for plane in &cell.planes {
                for v in &cell.vertices {
                    assert!(plane.contains_point(v, 1.0e-6));
                }
            }
        }
    }
}

#[test]
fn cells_stay_in_the_grown_bounding_box() {
    let mut rng = StdRng::seed_from_u64(7);
    let margin_bounds = 0.2;
    let builder = CellBuilder::new(Vector::new(1.0, 2.0, 0.5), margin_bounds, 0.0);
    let bounds = Aabb::from_points_ref(&cube_vertices()).loosened(margin_bounds + 1.0e-6);

    let seeds = random_seeds(&mut rng, 25);
    let cells = builder.build_cells(&cube_vertices(), &seeds, &DefaultKernel);
    assert!(!cells.is_empty());

    for cell in &cells {
        assert!(cell
            .world_vertices()
            .all(|v| bounds.contains_local_point(&v)));
    }
}

#[test]
fn pruning_does_not_change_the_cells() {
    let mut rng = StdRng::seed_from_u64(1234);
    let pruned = CellBuilder::new(Vector::repeat(1.0), 0.05, 0.0);
    let exhaustive = CellBuilder {
        pruning: false,
        ..pruned
    };

    for _ in 0..3 {
        let seeds = random_seeds(&mut rng, 20);
        let a = pruned.build_cells(&cube_vertices(), &seeds, &DefaultKernel);
        let b = exhaustive.build_cells(&cube_vertices(), &seeds, &DefaultKernel);

        assert_eq!(a.len(), b.len());
        for (cell_a, cell_b) in a.iter().zip(&b) {
            assert_eq!(cell_a.seed, cell_b.seed);
            assert!(same_vertices(cell_a, cell_b));
        }
    }
}

#[test]
fn cells_tile_the_bounding_box() {
    let mut rng = StdRng::seed_from_u64(99);
    let builder = CellBuilder::new(Vector::repeat(1.0), 0.0, 0.0);
    let seeds = random_seeds(&mut rng, 15);
    let cells = builder.build_cells(&cube_vertices(), &seeds, &DefaultKernel);

    let volume: Real = cells
        .iter()
        .map(|cell| {
            DefaultKernel
                .convex_hull_and_clean(&cell.vertices, 0.0, 0.0)
                .unwrap()
                .signed_volume()
        })
        .sum();
    assert_relative_eq!(volume, 8.0, epsilon = 1.0e-6);
}

#[test]
fn clipped_fragments_are_stable_under_a_second_clip() {
    let mut rng = StdRng::seed_from_u64(5);
    let source = PolyMesh::cuboid(Vector::new(1.0, 0.5, 0.75));
    let seeds = random_seeds(&mut rng, 6)
        .into_iter()
        .map(|p| Point::from(p.coords.component_mul(&Vector::new(1.0, 0.5, 0.75))))
        .collect::<Vec<_>>();
    let cells = CellBuilder::default().build_cells(source.vertices(), &seeds, &DefaultKernel);
    let options = ClipOptions {
        use_recenter: false,
        use_island_split: false,
        weld_distance: 0.0,
        ..ClipOptions::default()
    };
    let fragments = clip(&cells, &source, &options, &DefaultKernel);
    assert_eq!(fragments.len(), cells.len());

    let total: Real = fragments.iter().map(|f| f.mesh.signed_volume()).sum();
    assert_relative_eq!(total, 3.0, epsilon = 1.0e-6);

    for (cell, fragment) in cells.iter().zip(&fragments) {
        let hull = DefaultKernel
            .convex_hull_and_clean(&cell.vertices, 0.005, 0.001)
            .unwrap();
        let again = intersect_meshes(&hull, &fragment.mesh).unwrap();
        assert_eq!(again, fragment.mesh);
    }
}
