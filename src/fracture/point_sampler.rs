//! Seed point gathering.

use super::{
    FractureConfig, FractureError, SceneContext, SeedOrigin, SeedPoint, SourceLimits, SourceObject,
};
use crate::math::{Point, Real, Vector};
use crate::utils::{self, SEED_DECIMALS};
use rand::seq::SliceRandom;
use rand::Rng;
use rstar::RTree;

/// A kind of source the seed points can be taken from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointSource {
    /// The world-space vertices of the object.
    OwnVertices,
    /// The world-space vertices of each child of the object.
    ChildVertices,
    /// The particles of the object.
    OwnParticles,
    /// The particles of each child of the object.
    ChildParticles,
    /// Points scattered uniformly in the world-space AABB of the object.
    Random,
    /// The points of the scene strokes, pulled toward the closest already gathered seed.
    Strokes,
}

impl PointSource {
    /// Every source, in the order they are sampled by [`gather`].
    ///
    /// Strokes come last since they are anchored to the points gathered from the other sources.
    pub const ALL: [PointSource; 6] = [
        PointSource::OwnVertices,
        PointSource::Random,
        PointSource::ChildVertices,
        PointSource::OwnParticles,
        PointSource::ChildParticles,
        PointSource::Strokes,
    ];

    /// The maximum number of points this source contributes, `0` if it is disabled.
    pub fn limit(self, limits: &SourceLimits) -> usize {
        match self {
            PointSource::OwnVertices => limits.own_vertices,
            PointSource::ChildVertices => limits.child_vertices,
            PointSource::OwnParticles => limits.own_particles,
            PointSource::ChildParticles => limits.child_particles,
            PointSource::Random => limits.random,
            PointSource::Strokes => limits.strokes,
        }
    }

    /// Samples at most `limit` points from this source.
    ///
    /// For the per-child sources, the limit applies to each child separately. `known` are the
    /// points gathered so far, only used to anchor the stroke points.
    pub fn sample<R: Rng>(
        self,
        source: &SourceObject,
        scene: &SceneContext,
        known: &[SeedPoint],
        limit: usize,
        rng: &mut R,
    ) -> Vec<SeedPoint> {
        if limit == 0 {
            return Vec::new();
        }

        match self {
            PointSource::OwnVertices => {
                let points = tagged(source.world_vertices(), SeedOrigin::OwnVertex);
                limit_source(points, limit, rng)
            }
            PointSource::ChildVertices => source
                .children
                .iter()
                .flat_map(|child| {
                    let points = tagged(child.world_vertices(), SeedOrigin::ChildVertex);
                    limit_source(points, limit, rng)
                })
                .collect(),
            PointSource::OwnParticles => {
                let points = tagged(source.particles.iter().copied(), SeedOrigin::Particle);
                limit_source(points, limit, rng)
            }
            PointSource::ChildParticles => source
                .children
                .iter()
                .flat_map(|child| {
                    let points = tagged(child.particles.iter().copied(), SeedOrigin::Particle);
                    limit_source(points, limit, rng)
                })
                .collect(),
            PointSource::Random => {
                let aabb = source.world_aabb();
                if !aabb.is_valid() {
                    return Vec::new();
                }

                (0..limit)
                    .map(|_| {
                        let pt = Point::from(Vector::from_fn(|i, _| {
                            rng.random_range(aabb.mins[i]..=aabb.maxs[i])
                        }));
                        SeedPoint::new(pt, SeedOrigin::Random)
                    })
                    .collect()
            }
            PointSource::Strokes => {
                let points = tagged(
                    scene.strokes.iter().flatten().copied(),
                    SeedOrigin::Stroke,
                );
                anchor_strokes(known, limit_source(points, limit, rng))
            }
        }
    }
}

/// Gathers the seed points of `source`.
///
/// Every enabled source of `config.sources` is sampled, then the whole set is capped to `limit`
/// points (`0` meaning unlimited). The coordinates are rounded to four decimals, so seeds closer
/// than that collapse onto the same position; such duplicates are kept. Finally, each seed is
/// displaced by a random noise if `config.noise > 0`.
///
/// Fails with [`FractureError::EmptyInput`] if no point could be gathered.
pub fn gather<R: Rng>(
    source: &SourceObject,
    scene: &SceneContext,
    config: &FractureConfig,
    limit: usize,
    rng: &mut R,
) -> Result<Vec<SeedPoint>, FractureError> {
    let mut points = Vec::new();

    for kind in PointSource::ALL {
        let new_points = kind.sample(source, scene, &points, kind.limit(&config.sources), rng);
        log::debug!("{:?} contributed {} seed points.", kind, new_points.len());
        points.extend(new_points);
    }

    if points.is_empty() {
        return Err(FractureError::EmptyInput {
            object: source.name.clone(),
        });
    }

    let mut points = limit_source(points, limit, rng);

    for pt in &mut points {
        pt.position = utils::round_point(&pt.position, SEED_DECIMALS);
    }

    if config.noise > 0.0 {
        let aabb = source.world_aabb();
        let scalar = config.noise * aabb.diagonal_length_squared().sqrt() / 2.0;

        for pt in &mut points {
            pt.position += random_unit_vector(rng) * (scalar * rng.random::<Real>());
        }
    }

    Ok(points)
}

/// Uniform subsample without replacement of at most `limit` points. `0` means unlimited.
fn limit_source<R: Rng>(
    mut points: Vec<SeedPoint>,
    limit: usize,
    rng: &mut R,
) -> Vec<SeedPoint> {
    if limit != 0 && limit < points.len() {
        points.shuffle(rng);
        points.truncate(limit);
    }

    points
}

fn tagged(points: impl IntoIterator<Item = Point<Real>>, origin: SeedOrigin) -> Vec<SeedPoint> {
    points
        .into_iter()
        .map(|pt| SeedPoint::new(pt, origin))
        .collect()
}

/// Moves each stroke point halfway toward the closest known point.
///
/// Anchored points become known points for the next stroke points. Without any known point, the
/// stroke points are used as-is.
fn anchor_strokes(known: &[SeedPoint], strokes: Vec<SeedPoint>) -> Vec<SeedPoint> {
    if known.is_empty() {
        return strokes;
    }

    let to_array = |pt: &Point<Real>| [pt.x, pt.y, pt.z];
    let mut tree: RTree<[Real; 3]> =
        RTree::bulk_load(known.iter().map(|p| to_array(&p.position)).collect());
    let mut anchored = Vec::with_capacity(strokes.len());

    for stroke_pt in strokes {
        let Some(closest) = tree.nearest_neighbor(&to_array(&stroke_pt.position)).copied() else {
            continue;
        };

        let closest = Point::from(closest);
        let position = na::center(&stroke_pt.position, &closest);
        tree.insert(to_array(&position));
        anchored.push(SeedPoint::new(position, SeedOrigin::Stroke));
    }

    anchored
}

/// A direction uniformly distributed on the unit sphere.
fn random_unit_vector<R: Rng>(rng: &mut R) -> Vector<Real> {
    loop {
        let v: Vector<Real> = Vector::from_fn(|_, _| rng.random_range(-1.0..=1.0));
        let sq_norm = v.norm_squared();

        if sq_norm > 1.0e-12 && sq_norm <= 1.0 {
            return v / sq_norm.sqrt();
        }
    }
}
