use crate::math::{Point, Real, Vector};

#[derive(Debug)]
pub struct TriangleFacet {
    pub valid: bool,
    pub affinely_dependent: bool,
    pub normal: Vector<Real>,
    pub pts: [usize; 3],
}

impl TriangleFacet {
    pub fn new(p1: usize, p2: usize, p3: usize, points: &[Point<Real>]) -> TriangleFacet {
        let p1p2 = points[p2] - points[p1];
        let p1p3 = points[p3] - points[p1];

        let (normal, affinely_dependent) = match p1p2.cross(&p1p3).try_normalize(Real::EPSILON) {
            Some(normal) => (normal, false),
            None => (Vector::zeros(), true),
        };

        TriangleFacet {
            valid: true,
            affinely_dependent,
            normal,
            pts: [p1, p2, p3],
        }
    }

    pub fn distance_to_point(&self, point: usize, points: &[Point<Real>]) -> Real {
        self.normal.dot(&(points[point] - points[self.pts[0]]))
    }

    pub fn can_see_point(&self, point: usize, points: &[Point<Real>], epsilon: Real) -> bool {
        !self.affinely_dependent && self.distance_to_point(point, points) > epsilon
    }

    /// The directed edges of this facet, counter-clockwise seen from outside.
    pub fn edges(&self) -> [(usize, usize); 3] {
        [
            (self.pts[0], self.pts[1]),
            (self.pts[1], self.pts[2]),
            (self.pts[2], self.pts[0]),
        ]
    }
}
