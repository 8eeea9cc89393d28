use shatter3d::bounding_volume::Aabb;
use shatter3d::fracture::{
    FractureConfig, FractureError, FracturePipeline, MassConfig, MassMode, RecursionConfig,
    RecursionSelect, SceneContext, SourceObject, VecSink, INTERIOR_GROUP,
};
use shatter3d::math::{Isometry, Point, Real, Vector};
use shatter3d::shape::PolyMesh;

fn cube(name: &str, half_extent: Real) -> SourceObject {
    SourceObject::new(
        name,
        PolyMesh::cuboid(Vector::repeat(half_extent)),
        Isometry::identity(),
    )
}

fn run(config: FractureConfig, objects: &[SourceObject]) -> (VecSink, usize, Vec<FractureError>) {
    let mut pipeline = FracturePipeline::new(config).unwrap();
    let mut sink = VecSink::default();
    let report = pipeline.run(objects, &SceneContext::default(), &mut sink);
    (sink, report.num_fragments, report.failures)
}

#[test]
fn cube_fractured_at_its_vertices_gives_eight_octants() {
    let config = FractureConfig {
        seed: Some(1),
        ..FractureConfig::default()
    };
    let (sink, num_fragments, failures) = run(config, &[cube("Cube", 1.0)]);

    assert!(failures.is_empty());
    assert_eq!(num_fragments, 8);
    assert_eq!(sink.fragments.len(), 8);

    let aabbs: Vec<Aabb> = sink.fragments.iter().map(|f| f.world_aabb()).collect();
    for (i, a) in aabbs.iter().enumerate() {
        for b in &aabbs[i + 1..] {
            assert!(a.intersection(b).is_none());
        }
    }

    let union = aabbs
        .iter()
        .fold(Aabb::new_invalid(), |acc, aabb| acc.merged(aabb));
    assert_relative_eq!(union.mins, Point::new(-1.0, -1.0, -1.0), epsilon = 1.0e-9);
    assert_relative_eq!(union.maxs, Point::new(1.0, 1.0, 1.0), epsilon = 1.0e-9);

    for fragment in &sink.fragments {
        assert_eq!(fragment.name, "Cube_cell");
        assert_eq!(fragment.level, 0);
        assert!(fragment.mesh.faces().iter().all(|f| !f.is_hidden()));
        // Each octant is shrunk by the cell margin along the three bisectors.
        assert_relative_eq!(fragment.mesh.signed_volume(), 0.997002999, epsilon = 1.0e-9);
    }
}

#[test]
fn clamp_of_one_prevents_any_recursion() {
    let config = FractureConfig {
        seed: Some(2),
        recursion: RecursionConfig {
            depth: 3,
            clamp: 1,
            chance: 1.0,
            ..RecursionConfig::default()
        },
        ..FractureConfig::default()
    };
    let mut pipeline = FracturePipeline::new(config).unwrap();
    let mut sink = VecSink::default();
    let report = pipeline.run(&[cube("Cube", 1.0)], &SceneContext::default(), &mut sink);

    assert_eq!(report.num_fragments, 8);
    assert!(report.recursion_clamped);
    assert!(sink.fragments.iter().all(|f| f.level == 0));
}

#[test]
fn recursion_clamp_bounds_the_fragment_count() {
    for clamp in [10, 20, 30] {
        let config = FractureConfig {
            seed: Some(clamp as u64),
            recursion: RecursionConfig {
                depth: 2,
                clamp,
                chance: 1.0,
                ..RecursionConfig::default()
            },
            ..FractureConfig::default()
        };
        let (_, num_fragments, failures) = run(config, &[cube("Cube", 1.0)]);

        assert!(failures.is_empty());
        // Each re-fractured octant has 8 vertices, hence at most 8 children.
        assert!(num_fragments > 8);
        assert!(num_fragments < clamp + 8);
    }
}

#[test]
fn partial_recursion_keeps_unselected_fragments() {
    let config = FractureConfig {
        seed: Some(3),
        recursion: RecursionConfig {
            depth: 1,
            clamp: 0,
            chance: 0.25,
            select: RecursionSelect::Random,
            ..RecursionConfig::default()
        },
        ..FractureConfig::default()
    };
    let (sink, num_fragments, _) = run(config, &[cube("Cube", 1.0)]);

    // 2 of the 8 octants are replaced by at most 8 children each.
    let num_children = sink.fragments.iter().filter(|f| f.level == 1).count();
    assert_eq!(sink.fragments.iter().filter(|f| f.level == 0).count(), 6);
    assert!(num_children >= 2 && num_children <= 16);
    assert_eq!(num_fragments, 6 + num_children);
}

#[test]
fn collapsed_seeds_give_no_fragment() {
    let config = FractureConfig {
        seed: Some(4),
        ..FractureConfig::default()
    };
    // Every vertex rounds to the origin.
    let (sink, num_fragments, failures) = run(config, &[cube("Speck", 1.0e-5)]);

    assert_eq!(num_fragments, 0);
    assert!(sink.fragments.is_empty());
    assert_eq!(
        failures,
        vec![FractureError::EmptyInput {
            object: "Speck".to_string()
        }]
    );
}

#[test]
fn failing_objects_do_not_affect_the_others() {
    let config = FractureConfig {
        seed: Some(5),
        ..FractureConfig::default()
    };
    let mut far_cube = cube("Far", 0.5);
    far_cube.position = Isometry::translation(10.0, 0.0, 0.0);
    let objects = [cube("Speck", 1.0e-5), far_cube];
    let (sink, num_fragments, failures) = run(config, &objects);

    assert_eq!(failures.len(), 1);
    assert_eq!(num_fragments, 8);
    assert!(sink.fragments.iter().all(|f| f.name == "Far_cell"));
    assert!(sink
        .fragments
        .iter()
        .all(|f| f.world_aabb().center().x > 9.0));
}

#[test]
fn volume_mass_is_conserved() {
    let config = FractureConfig {
        seed: Some(6),
        mass: MassConfig {
            enabled: true,
            mode: MassMode::Volume,
            total: 12.5,
            property_name: "density_mass".to_string(),
        },
        recursion: RecursionConfig {
            depth: 1,
            chance: 0.5,
            ..RecursionConfig::default()
        },
        ..FractureConfig::default()
    };
    let (sink, _, _) = run(config, &[cube("Cube", 2.0)]);

    assert!(sink.fragments.iter().all(|f| f.property("mass").is_none()));
    let total: Real = sink
        .fragments
        .iter()
        .map(|f| f.property("density_mass").unwrap())
        .sum();
    assert_relative_eq!(total, 12.5, epsilon = 1.0e-9);
}

#[test]
fn interior_vertex_group_and_no_split() {
    let config = FractureConfig {
        seed: Some(7),
        use_interior_vgroup: true,
        use_sharp_edges: false,
        ..FractureConfig::default()
    };
    let (sink, _, _) = run(config, &[cube("Cube", 1.0)]);

    for fragment in &sink.fragments {
        assert!(fragment.mesh.sharp_edges().is_empty());
        assert!(fragment.mesh.faces().iter().all(|f| !f.is_hidden()));
        // The corner at the center of the cube only belongs to cut faces.
        let group = fragment.mesh.vertex_group(INTERIOR_GROUP).unwrap();
        assert!(!group.weights.is_empty());
        assert!(group.weights.values().all(|w| *w == 1.0));
    }
}

#[test]
fn seeded_runs_are_deterministic() {
    let config = FractureConfig {
        seed: Some(8),
        noise: 0.2,
        recursion: RecursionConfig {
            depth: 1,
            select: RecursionSelect::Random,
            ..RecursionConfig::default()
        },
        ..FractureConfig::default()
    };
    let (a, _, _) = run(config.clone(), &[cube("Cube", 1.0)]);
    let (b, _, _) = run(config, &[cube("Cube", 1.0)]);
    assert_eq!(a.fragments, b.fragments);
}

#[test]
fn debug_points_are_the_level_zero_seeds() {
    let config = FractureConfig {
        seed: Some(9),
        use_debug_points: true,
        recursion: RecursionConfig {
            depth: 1,
            chance: 1.0,
            ..RecursionConfig::default()
        },
        ..FractureConfig::default()
    };
    let mut pipeline = FracturePipeline::new(config).unwrap();
    let mut sink = VecSink::default();
    let report = pipeline.run(&[cube("Cube", 1.0)], &SceneContext::default(), &mut sink);

    assert_eq!(report.debug_points.len(), 8);
    assert!(report
        .debug_points
        .iter()
        .all(|pt| pt.coords.iter().all(|x| x.abs() == 1.0)));
}
