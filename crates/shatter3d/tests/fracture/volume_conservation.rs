use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shatter3d::fracture::{
    clip, CellBuilder, ClipOptions, FractureConfig, FracturePipeline, RecursionConfig,
    SceneContext, SourceLimits, SourceObject, VecSink,
};
use shatter3d::math::{Isometry, Point, Real, Vector};
use shatter3d::shape::PolyMesh;
use shatter3d::transformation::DefaultKernel;

const HALF_EXTENTS: [Real; 3] = [1.0, 0.7, 0.4];
const BOX_VOLUME: Real = 2.24;

fn source() -> PolyMesh {
    PolyMesh::cuboid(Vector::from(HALF_EXTENTS))
}

fn seeds_in_box(rng: &mut StdRng, n: usize) -> Vec<Point<Real>> {
    (0..n)
        .map(|_| {
            Point::new(
                rng.random_range(-HALF_EXTENTS[0]..HALF_EXTENTS[0]),
                rng.random_range(-HALF_EXTENTS[1]..HALF_EXTENTS[1]),
                rng.random_range(-HALF_EXTENTS[2]..HALF_EXTENTS[2]),
            )
        })
        .collect()
}

fn clipped_volume(seeds: &[Point<Real>], weld_distance: Real) -> Real {
    let mesh = source();
    let builder = CellBuilder::new(Vector::repeat(1.0), 0.05, 0.0);
    let cells = builder.build_cells(mesh.vertices(), seeds, &DefaultKernel);
    assert_eq!(cells.len(), seeds.len());

    let options = ClipOptions {
        use_island_split: false,
        weld_distance,
        ..ClipOptions::default()
    };
    let fragments = clip(&cells, &mesh, &options, &DefaultKernel);
    // Every seed lies inside of the box, so no cell may be lost.
    assert_eq!(fragments.len(), cells.len());

    fragments.iter().map(|f| f.mesh.signed_volume()).sum()
}

#[test]
fn random_cells_partition_the_box_exactly() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let seeds = seeds_in_box(&mut rng, 60);
        let volume = clipped_volume(&seeds, 1.0e-9);
        assert_relative_eq!(volume, BOX_VOLUME, max_relative = 1.0e-6);
    }
}

#[test]
fn welding_keeps_the_volume_of_random_cells() {
    for seed in 100..120 {
        let mut rng = StdRng::seed_from_u64(seed);
        let seeds = seeds_in_box(&mut rng, 60);
        let volume = clipped_volume(&seeds, ClipOptions::default().weld_distance);
        assert_relative_eq!(volume, BOX_VOLUME, max_relative = 5.0e-3);
    }
}

#[test]
fn recursive_fracture_keeps_the_volume() {
    for (seed, depth) in [(1, 0), (2, 1), (3, 1), (4, 2), (5, 2)] {
        let config = FractureConfig {
            sources: SourceLimits {
                own_vertices: 0,
                random: 60,
                ..SourceLimits::default()
            },
            margin: 0.0,
            recursion: RecursionConfig {
                depth,
                chance: 0.5,
                clamp: 0,
                ..RecursionConfig::default()
            },
            seed: Some(seed),
            ..FractureConfig::default()
        };
        let object = SourceObject::new("Box", source(), Isometry::translation(3.0, -1.0, 2.0));

        let mut pipeline = FracturePipeline::new(config).unwrap();
        let mut sink = VecSink::default();
        let report = pipeline.run(&[object], &SceneContext::default(), &mut sink);

        assert!(report.failures.is_empty());
        assert!(sink.fragments.len() >= 8);
        let volume: Real = sink.fragments.iter().map(|f| f.mesh.signed_volume()).sum();
        assert_relative_eq!(volume, BOX_VOLUME, max_relative = 1.0e-2);
    }
}
