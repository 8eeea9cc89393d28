use super::clip_engine::{self, ClipOptions};
use super::point_sampler;
use super::{
    CellBuilder, FractureConfig, FractureError, FractureSink, Fragment, InteriorPostProcessor,
    MassAssigner, RecursionSelect, SceneContext, SourceObject,
};
use crate::math::{Point, Real};
use crate::transformation::{DefaultKernel, GeometryKernel};
use crate::utils;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// The outcome of a [`FracturePipeline::run`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FractureReport {
    /// The number of fragments handed to the sink.
    pub num_fragments: usize,
    /// The objects that could not be fractured. They produced no fragment.
    pub failures: Vec<FractureError>,
    /// The level-0 seed points of every object, if debug points were requested.
    pub debug_points: Vec<Point<Real>>,
    /// Whether the recursion stopped early because the fragment count reached the clamp.
    pub recursion_clamped: bool,
}

/// Fractures objects into Voronoi cell fragments.
///
/// Each object is fractured independently: its seed points are gathered, one cell per seed is
/// built and intersected with the object, then a share of the fragments is fractured again at
/// each recursion level. Once every object is processed, the interior faces are post-processed,
/// masses are assigned, and all the fragments are registered into the sink at once.
pub struct FracturePipeline<K = DefaultKernel> {
    config: FractureConfig,
    kernel: K,
    rng: StdRng,
    debug_points: Vec<Point<Real>>,
    recursion_clamped: bool,
}

impl FracturePipeline<DefaultKernel> {
    /// Creates a pipeline relying on the geometry kernel of this crate.
    pub fn new(config: FractureConfig) -> Result<Self, FractureError> {
        Self::with_kernel(config, DefaultKernel)
    }
}

impl<K: GeometryKernel> FracturePipeline<K> {
    /// Creates a pipeline relying on a custom geometry kernel.
    ///
    /// Fails with [`FractureError::InvalidConfig`] if `config` is invalid.
    pub fn with_kernel(config: FractureConfig, kernel: K) -> Result<Self, FractureError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            config,
            kernel,
            rng,
            debug_points: Vec::new(),
            recursion_clamped: false,
        })
    }

    /// The configuration of this pipeline.
    #[inline]
    pub fn config(&self) -> &FractureConfig {
        &self.config
    }

    /// The geometry kernel of this pipeline.
    #[inline]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Fractures every object of `objects` and registers the fragments into `sink`.
    ///
    /// An object that cannot be fractured is reported in [`FractureReport::failures`] and does
    /// not prevent the other objects from being fractured.
    pub fn run<S: ?Sized + FractureSink>(
        &mut self,
        objects: &[SourceObject],
        scene: &SceneContext,
        sink: &mut S,
    ) -> FractureReport {
        let mut report = FractureReport::default();
        let mut fragments = Vec::new();
        self.recursion_clamped = false;

        for object in objects {
            match self.fracture_object(object, scene, sink) {
                Ok(new_fragments) => {
                    log::info!(
                        "Fractured `{}` into {} fragments.",
                        object.name,
                        new_fragments.len()
                    );
                    fragments.extend(new_fragments);
                }
                Err(err) => {
                    log::warn!("{}", err);
                    report.failures.push(err);
                }
            }
        }

        let interior = InteriorPostProcessor::from_config(&self.config);
        if interior.is_enabled() {
            interior.run(&mut fragments, &self.kernel);
        }

        if let Some(assigner) = MassAssigner::from_config(&self.config.mass) {
            assigner.assign(&mut fragments);
        }

        report.num_fragments = fragments.len();
        report.debug_points = core::mem::take(&mut self.debug_points);
        report.recursion_clamped = self.recursion_clamped;
        sink.register(&self.config.collection_name, fragments);

        report
    }

    /// Fractures a single object, recursion included.
    ///
    /// The returned fragments still carry the hidden flags of their cut faces: the interior
    /// post-processing is left to the caller.
    pub fn fracture_object<S: ?Sized + FractureSink>(
        &mut self,
        object: &SourceObject,
        scene: &SceneContext,
        sink: &mut S,
    ) -> Result<Vec<Fragment>, FractureError> {
        let mut population = self.fracture_level(object, scene, 0, sink)?;
        let clamp = self.config.recursion.clamp;
        let clamp_reached = |len: usize| clamp != 0 && len >= clamp;

        for level in 1..=self.config.recursion.depth {
            if clamp_reached(population.len()) {
                log::info!("Recursion clamp reached before level {}.", level);
                self.recursion_clamped = true;
                break;
            }

            let selected = self.select_for_recursion(&population, scene);
            let mut removed = vec![false; population.len()];
            let mut num_removed = 0;
            let mut children = Vec::new();

            for i in selected {
                if clamp_reached(population.len() - num_removed + children.len()) {
                    log::info!("Recursion clamp reached at level {}.", level);
                    self.recursion_clamped = true;
                    break;
                }

                let parent = &population[i];
                let source =
                    SourceObject::new(parent.name.clone(), parent.mesh.clone(), parent.position);

                match self.fracture_level(&source, scene, level, sink) {
                    Ok(new_children) => {
                        children.extend(new_children);
                        if self.config.use_remove_original {
                            removed[i] = true;
                            num_removed += 1;
                        }
                    }
                    Err(err) => log::debug!("Keeping fragment {} unchanged: {}", i, err),
                }
            }

            log::debug!(
                "Recursion level {} produced {} fragments.",
                level,
                children.len()
            );

            population = population
                .into_iter()
                .zip(removed)
                .filter_map(|(fragment, removed)| (!removed).then_some(fragment))
                .chain(children)
                .collect();
        }

        Ok(population)
    }

    /// Fractures `object` once, without recursion.
    fn fracture_level<S: ?Sized + FractureSink>(
        &mut self,
        object: &SourceObject,
        scene: &SceneContext,
        level: usize,
        sink: &mut S,
    ) -> Result<Vec<Fragment>, FractureError> {
        let limit = if level == 0 {
            self.config.source_limit
        } else {
            self.config.recursion.source_limit
        };

        let seeds = point_sampler::gather(object, scene, &self.config, limit, &mut self.rng)?;
        let positions: Vec<_> = seeds.iter().map(|s| s.position).collect();

        if level == 0 && self.config.use_debug_points {
            self.debug_points.extend_from_slice(&positions);
        }

        let builder = CellBuilder::new(
            self.config.cell_scale,
            self.config.margin_bounds,
            self.config.margin,
        );
        let cells = builder.build_cells(&object.world_vertices(), &positions, &self.kernel);

        if cells.is_empty() {
            return Err(FractureError::EmptyInput {
                object: object.name.clone(),
            });
        }

        let name = format!("{}_cell", object.name);
        let options = ClipOptions::from_config(&self.config, name, level);
        let fragments = clip_engine::clip(&cells, &object.world_mesh(), &options, &self.kernel);

        if fragments.is_empty() {
            return Err(FractureError::NoFragments {
                object: object.name.clone(),
            });
        }

        if self.config.realtime_progress {
            for fragment in &fragments {
                sink.fragment_created(fragment);
            }
        }

        Ok(fragments)
    }

    /// The indices, in increasing order, of the fragments to re-fracture.
    fn select_for_recursion(
        &mut self,
        population: &[Fragment],
        scene: &SceneContext,
    ) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..population.len()).collect();
        let chance = self.config.recursion.chance;

        if chance >= 1.0 {
            return indices;
        }

        match self.config.recursion.select {
            RecursionSelect::Random => indices.shuffle(&mut self.rng),
            RecursionSelect::SizeMin | RecursionSelect::SizeMax => {
                utils::sort_by_key_real(&mut indices, |i| {
                    population[*i].world_aabb().diagonal_length_squared()
                });
            }
            RecursionSelect::CursorMin | RecursionSelect::CursorMax => {
                utils::sort_by_key_real(&mut indices, |i| {
                    (population[*i].position.translation.vector - scene.cursor.coords)
                        .norm_squared()
                });
            }
        }

        if matches!(
            self.config.recursion.select,
            RecursionSelect::SizeMax | RecursionSelect::CursorMax
        ) {
            indices.reverse();
        }

        indices.truncate((chance * population.len() as Real) as usize);
        indices.sort_unstable();
        indices
    }
}
