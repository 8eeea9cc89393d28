//! Voronoi cell construction by incremental half-space intersection.

use super::FractureError;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::Plane;
use crate::transformation::GeometryKernel;
use crate::utils::{self, COINCIDENT_SEED_SQ_EPSILON, UNBOUNDED_DISTANCE};

/// The convex polyhedron of all points closer to a seed than to any other seed.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// The world-space position of the seed.
    pub seed: Point<Real>,
    /// The vertices of the cell, relative to `seed`.
    pub vertices: Vec<Point<Real>>,
    /// The half-spaces bounding the cell, relative to `seed`.
    ///
    /// Every vertex lies inside of every one of these half-spaces.
    pub planes: Vec<Plane>,
}

impl Cell {
    /// The vertices of the cell in world-space.
    pub fn world_vertices(&self) -> impl Iterator<Item = Point<Real>> + '_ {
        self.vertices.iter().map(|v| v + self.seed.coords)
    }
}

/// Builds the Voronoi cells of a set of seeds, clipped by a bounding box.
///
/// Each cell starts as the bounding box and is cut by the bisector plane of its seed and each
/// neighbor seed, nearest neighbors first. Neighbors farther than twice the farthest vertex of
/// the current cell cannot cut it anymore, so they are skipped when `pruning` is enabled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellBuilder {
    /// Anisotropic scaling of the bisector normals. `(1, 1, 1)` gives regular Voronoi cells.
    pub scale: Vector<Real>,
    /// Growth of the bounding box of the source vertices.
    pub margin_bounds: Real,
    /// Shrinks each cell away from the bisector planes.
    pub margin_cell: Real,
    /// Stops examining neighbors once they cannot cut the cell anymore.
    pub pruning: bool,
}

impl Default for CellBuilder {
    fn default() -> Self {
        Self::new(Vector::repeat(1.0), 0.05, 0.0)
    }
}

impl CellBuilder {
    /// Creates a cell builder with pruning enabled.
    pub fn new(scale: Vector<Real>, margin_bounds: Real, margin_cell: Real) -> Self {
        Self {
            scale,
            margin_bounds,
            margin_cell,
            pruning: true,
        }
    }

    /// The six half-spaces of the bounding box of `all_vertices`, grown by `margin_bounds`.
    ///
    /// Returns `None` if `all_vertices` is empty.
    pub fn boundary_planes(&self, all_vertices: &[Point<Real>]) -> Option<Vec<Plane>> {
        let aabb = Aabb::from_points_ref(all_vertices);
        aabb.is_valid()
            .then(|| aabb.loosened(self.margin_bounds).bounding_planes().to_vec())
    }

    /// Builds the cell of every seed.
    ///
    /// Seeds with an empty cell, including every seed coinciding with another one, are dropped.
    pub fn build_cells<K: ?Sized + GeometryKernel>(
        &self,
        all_vertices: &[Point<Real>],
        seeds: &[Point<Real>],
        kernel: &K,
    ) -> Vec<Cell> {
        let Some(boundary) = self.boundary_planes(all_vertices) else {
            log::warn!("Cannot bound the cells of an object without vertices.");
            return Vec::new();
        };

        let mut cells = Vec::with_capacity(seeds.len());

        for i in 0..seeds.len() {
            match self.build_cell(i, seeds, &boundary, kernel) {
                Ok(cell) => cells.push(cell),
                Err(err) => log::debug!("Dropping seed {}: {}", i, err),
            }
        }

        log::debug!("Built {} cells out of {} seeds.", cells.len(), seeds.len());
        cells
    }

    /// Builds the cell of `seeds[index]`, bounded by the world-space half-spaces `boundary`.
    pub fn build_cell<K: ?Sized + GeometryKernel>(
        &self,
        index: usize,
        seeds: &[Point<Real>],
        boundary: &[Plane],
        kernel: &K,
    ) -> Result<Cell, FractureError> {
        let seed = seeds[index];
        let degenerate = || FractureError::DegenerateCell { seed };
        let anisotropic = self.scale != Vector::repeat(1.0);

        let mut planes: Vec<_> = boundary.iter().map(|p| p.relative_to(&seed)).collect();
        let mut neighbors: Vec<Vector<Real>> = seeds
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(_, pt)| pt - seed)
            .collect();
        utils::sort_by_key_real(&mut neighbors, |dir| dir.norm_squared());

        let mut max_vertex_distance = UNBOUNDED_DISTANCE;
        let mut vertices = None;

        for dir in neighbors {
            let sq_dist = dir.norm_squared();
            if sq_dist <= COINCIDENT_SEED_SQ_EPSILON {
                return Err(degenerate());
            }

            let mut normal = dir;
            let mut length = sq_dist.sqrt();

            if anisotropic {
                let scaled = dir.component_mul(&self.scale);
                length *= scaled.normalize().dot(&(dir / length));
                normal = scaled;
            }

            if self.pruning && length > max_vertex_distance {
                break;
            }

            let plane =
                Plane::try_new(normal, -length / 2.0 + self.margin_cell).ok_or_else(degenerate)?;
            planes.push(plane);

            let (new_vertices, used) = kernel.intersect_planes(&planes);
            if new_vertices.is_empty() {
                return Err(degenerate());
            }

            if used.len() != planes.len() {
                planes = used.iter().map(|i| planes[*i]).collect();
            }

            max_vertex_distance = 2.0
                * new_vertices
                    .iter()
                    .map(|v| v.coords.norm_squared())
                    .fold(0.0, Real::max)
                    .sqrt();
            vertices = Some(new_vertices);
        }

        let vertices = match vertices {
            Some(vertices) => vertices,
            None => kernel.intersect_planes(&planes).0,
        };

        if vertices.is_empty() {
            return Err(degenerate());
        }

        Ok(Cell {
            seed,
            vertices,
            planes,
        })
    }
}

/// Builds the Voronoi cell of every seed, bounded by the bounding box of `all_vertices` grown by
/// `margin_bounds`.
///
/// See [`CellBuilder`] for details.
pub fn build_cells<K: ?Sized + GeometryKernel>(
    all_vertices: &[Point<Real>],
    seeds: &[Point<Real>],
    scale: Vector<Real>,
    margin_bounds: Real,
    margin_cell: Real,
    kernel: &K,
) -> Vec<Cell> {
    CellBuilder::new(scale, margin_bounds, margin_cell).build_cells(all_vertices, seeds, kernel)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::transformation::DefaultKernel;

    fn cube_corners() -> Vec<Point<Real>> {
        Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0))
            .vertices()
            .to_vec()
    }

    #[test]
    fn lone_seed_gets_the_bounding_box() {
        let builder = CellBuilder::new(Vector::repeat(1.0), 0.5, 0.0);
        let seeds = [Point::new(0.5, 0.0, 0.0)];
        let cells = builder.build_cells(&cube_corners(), &seeds, &DefaultKernel);

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].vertices.len(), 8);
        let aabb = Aabb::from_points(cells[0].world_vertices());
        assert_relative_eq!(aabb.mins, Point::new(-1.5, -1.5, -1.5), epsilon = 1.0e-9);
        assert_relative_eq!(aabb.maxs, Point::new(1.5, 1.5, 1.5), epsilon = 1.0e-9);
    }

    #[test]
    fn two_seeds_split_the_box_in_halves() {
        let seeds = [Point::new(-0.5, 0.0, 0.0), Point::new(0.5, 0.0, 0.0)];
        let cells = build_cells(
            &cube_corners(),
            &seeds,
            Vector::repeat(1.0),
            0.0,
            0.1,
            &DefaultKernel,
        );

        assert_eq!(cells.len(), 2);
        let left = Aabb::from_points(cells[0].world_vertices());
        let right = Aabb::from_points(cells[1].world_vertices());
        assert_relative_eq!(left.maxs.x, -0.1, epsilon = 1.0e-9);
        assert_relative_eq!(right.mins.x, 0.1, epsilon = 1.0e-9);
        assert_relative_eq!(left.mins.x, -1.0, epsilon = 1.0e-9);
    }

    #[test]
    fn coincident_seeds_are_dropped() {
        let seeds = [
            Point::new(0.5, 0.0, 0.0),
            Point::new(0.5, 0.0, 0.0),
            Point::new(-0.5, 0.0, 0.0),
        ];
        let builder = CellBuilder::new(Vector::repeat(1.0), 0.05, 0.001);
        let boundary = builder.boundary_planes(&cube_corners()).unwrap();

        assert_eq!(
            builder.build_cell(0, &seeds, &boundary, &DefaultKernel),
            Err(FractureError::DegenerateCell { seed: seeds[0] })
        );

        let cells = builder.build_cells(&cube_corners(), &seeds, &DefaultKernel);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].seed, seeds[2]);
    }

    #[test]
    fn anisotropic_scale_tilts_the_bisector() {
        let seeds = [Point::new(0.0, 0.0, 0.0), Point::new(0.5, 0.5, 0.0)];
        let builder = CellBuilder::new(Vector::new(1.0, 0.5, 1.0), 0.0, 0.0);
        let cells = builder.build_cells(&cube_corners(), &seeds, &DefaultKernel);

        assert_eq!(cells.len(), 2);
        let bisector = cells[0].planes.last().unwrap();
        let expected = Vector::new(1.0, 0.5, 0.0).normalize();
        assert_relative_eq!(bisector.normal.into_inner(), expected, epsilon = 1.0e-9);
    }

    #[test]
    fn degenerate_bounds_give_no_cell() {
        let builder = CellBuilder::default();
        let cells = builder.build_cells(&[], &[Point::origin()], &DefaultKernel);
        assert!(cells.is_empty());
    }
}
