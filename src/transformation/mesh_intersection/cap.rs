use super::MeshIntersectionError;
use crate::math::{Point, Point2, Real, Vector};
use crate::shape::{Face, Plane};
use crate::transformation::ear_clipping::triangulate_ear_clipping;
use crate::utils::hashmap::HashMap;
use crate::utils::planar::{
    corner_direction, point_in_polygon, segments_cross, signed_area2, Orientation,
};
use smallvec::SmallVec;

/// A closed loop of vertex indices with its projection on the section plane.
struct SectionLoop {
    ids: Vec<u32>,
    points: Vec<Point2<Real>>,
    area2: Real,
}

/// Builds the faces closing a planar section.
///
/// `edges` are the directed boundary edges of the section, oriented counter-clockwise around
/// the section seen from the outside of `plane`. Outer loops and holes are told apart by their
/// winding; every hole is bridged into its enclosing loop before triangulation.
pub(super) fn build_caps(
    vertices: &[Point<Real>],
    edges: &[(u32, u32)],
    plane: &Plane,
    template: &Face,
    fid: usize,
) -> Result<Vec<Face>, MeshIntersectionError> {
    if edges.is_empty() {
        return Ok(Vec::new());
    }

    let (u, v) = plane_basis(&plane.normal);
    let project = |id: u32| {
        let pt = vertices[id as usize];
        Point2::new(pt.coords.dot(&u), pt.coords.dot(&v))
    };

    let mut outers = Vec::new();
    let mut holes = Vec::new();

    for ids in chain_loops(edges, fid)? {
        let points: Vec<_> = ids.iter().map(|id| project(*id)).collect();
        let area2 = signed_area2(&points);
        let section_loop = SectionLoop { ids, points, area2 };

        if area2 > 0.0 {
            outers.push(section_loop);
        } else if area2 < 0.0 {
            holes.push(section_loop);
        }
    }

    let mut holes_of_outer: Vec<Vec<SectionLoop>> = outers.iter().map(|_| Vec::new()).collect();

    for hole in holes {
        let enclosing = outers
            .iter()
            .enumerate()
            .filter(|(_, outer)| point_in_polygon(&hole.points[0], &outer.points))
            .min_by(|a, b| a.1.area2.total_cmp(&b.1.area2));

        match enclosing {
            Some((i, _)) => holes_of_outer[i].push(hole),
            None => log::debug!(
                "Dropping a section hole with no enclosing loop on face {}.",
                fid
            ),
        }
    }

    let mut faces = Vec::new();

    for (outer, holes) in outers.into_iter().zip(holes_of_outer) {
        let has_holes = !holes.is_empty();
        let polygon = bridge_holes(outer, holes);

        if !has_holes && is_convex(&polygon.points) {
            faces.push(template.with_vertices(polygon.ids));
            continue;
        }

        let triangles = triangulate_ear_clipping(&polygon.points)
            .ok_or(MeshIntersectionError::TriangulationError)?;

        for tri in triangles {
            let ids = tri.map(|i| polygon.ids[i as usize]);
            if ids[0] != ids[1] && ids[1] != ids[2] && ids[2] != ids[0] {
                faces.push(template.with_vertices(ids));
            }
        }
    }

    Ok(faces)
}

/// Two unit vectors `u, v` such that `(u, v, normal)` is a right-handed orthonormal basis.
fn plane_basis(normal: &Vector<Real>) -> (Vector<Real>, Vector<Real>) {
    let axis = if normal.x.abs() < 0.5 {
        Vector::x()
    } else if normal.y.abs() < 0.5 {
        Vector::y()
    } else {
        Vector::z()
    };

    let u = normal.cross(&axis).normalize();
    let v = normal.cross(&u);
    (u, v)
}

/// Links directed edges into closed loops.
fn chain_loops(
    edges: &[(u32, u32)],
    fid: usize,
) -> Result<Vec<Vec<u32>>, MeshIntersectionError> {
    let mut outgoing: HashMap<u32, SmallVec<[usize; 2]>> = HashMap::default();
    for (i, (a, _)) in edges.iter().enumerate() {
        outgoing.entry(*a).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();

    for start in 0..edges.len() {
        if used[start] {
            continue;
        }

        used[start] = true;
        let (first, mut curr) = edges[start];
        let mut ids = vec![first];

        while curr != first {
            let next = outgoing
                .get(&curr)
                .and_then(|candidates| candidates.iter().copied().find(|e| !used[*e]))
                .ok_or(MeshIntersectionError::UnclosedSection(fid))?;

            used[next] = true;
            ids.push(curr);
            curr = edges[next].1;
        }

        if ids.len() >= 3 {
            loops.push(ids);
        }
    }

    Ok(loops)
}

/// Splices every hole into `outer` along a bridge that crosses no other loop edge.
fn bridge_holes(mut outer: SectionLoop, mut holes: Vec<SectionLoop>) -> SectionLoop {
    // Rightmost holes first, so that bridges of later holes can go around the earlier ones.
    holes.sort_by(|a, b| {
        let max_a = a.points.iter().map(|p| p.x).fold(Real::MIN, Real::max);
        let max_b = b.points.iter().map(|p| p.x).fold(Real::MIN, Real::max);
        max_b.total_cmp(&max_a)
    });

    for k in 0..holes.len() {
        let hole = &holes[k];
        let others = &holes[k + 1..];
        let mut best: Option<(usize, usize, Real)> = None;
        let mut nearest: Option<(usize, usize, Real)> = None;

        for (oi, op) in outer.points.iter().enumerate() {
            for (hi, hp) in hole.points.iter().enumerate() {
                let dist = na::distance_squared(op, hp);

                if nearest.map_or(true, |n| dist < n.2) {
                    nearest = Some((oi, hi, dist));
                }

                if best.map_or(true, |b| dist < b.2)
                    && !bridge_crosses(op, hp, &outer.points)
                    && !bridge_crosses(op, hp, &hole.points)
                    && others.iter().all(|o| !bridge_crosses(op, hp, &o.points))
                {
                    best = Some((oi, hi, dist));
                }
            }
        }

        if let Some((oi, hi, _)) = best.or(nearest) {
            let n = hole.ids.len();
            let mut ids = Vec::with_capacity(outer.ids.len() + n + 2);
            let mut points = Vec::with_capacity(outer.ids.len() + n + 2);

            ids.extend_from_slice(&outer.ids[..=oi]);
            points.extend_from_slice(&outer.points[..=oi]);
            for j in 0..=n {
                ids.push(hole.ids[(hi + j) % n]);
                points.push(hole.points[(hi + j) % n]);
            }
            ids.extend_from_slice(&outer.ids[oi..]);
            points.extend_from_slice(&outer.points[oi..]);

            outer.area2 += hole.area2;
            outer.ids = ids;
            outer.points = points;
        }
    }

    outer
}

fn bridge_crosses(a: &Point2<Real>, b: &Point2<Real>, polygon: &[Point2<Real>]) -> bool {
    (0..polygon.len()).any(|i| {
        let (c, d) = (&polygon[i], &polygon[(i + 1) % polygon.len()]);
        segments_cross(a, b, c, d)
    })
}

fn is_convex(points: &[Point2<Real>]) -> bool {
    let n = points.len();
    (0..n).all(|i| {
        corner_direction(&points[(i + n - 1) % n], &points[i], &points[(i + 1) % n])
            != Some(Orientation::Cw)
    })
}
