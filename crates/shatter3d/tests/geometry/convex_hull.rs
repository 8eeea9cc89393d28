use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shatter3d::math::{Point, Real};
use shatter3d::transformation::{check_convex_hull, convex_hull_and_clean};

#[test]
fn random_point_clouds_give_valid_hulls() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..20 {
        let points: Vec<Point<Real>> = (0..60)
            .map(|_| {
                Point::new(
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                )
            })
            .collect();

        let hull = convex_hull_and_clean(&points, 0.0, 0.0).unwrap();
        assert_eq!(check_convex_hull(&hull, 1.0e-7), Ok(()));

        for pt in &points {
            for fid in 0..hull.faces().len() {
                let plane = hull.face_plane(fid).unwrap();
                assert!(plane.contains_point(pt, 1.0e-7));
            }
        }
    }
}

#[test]
fn sphere_samples_are_all_hull_vertices() {
    let n = 40;
    let points: Vec<_> = (0..n)
        .map(|i| {
            // Fibonacci sphere.
            let y = 1.0 - 2.0 * (i as Real + 0.5) / n as Real;
            let r = (1.0 - y * y).sqrt();
            let theta = i as Real * 2.399_963_229_728_653;
            Point::new(r * theta.cos(), y, r * theta.sin())
        })
        .collect();

    let hull = convex_hull_and_clean(&points, 0.005, 0.001).unwrap();
    assert_eq!(hull.vertices().len(), n);
    assert!(hull.signed_volume() > 0.0);
}
