use crate::math::{Point, Real};
use crate::utils::hashmap::HashMap;
use smallvec::SmallVec;

/// Merges every point closer than `distance` to an already kept point.
///
/// Returns the kept points and, for each input point, the index of the kept point it was merged
/// into. Points are kept in their first-seen order.
pub fn weld_points(points: &[Point<Real>], distance: Real) -> (Vec<Point<Real>>, Vec<u32>) {
    let mut welded = Vec::with_capacity(points.len());
    let mut remap = Vec::with_capacity(points.len());

    if distance <= 0.0 {
        welded.extend_from_slice(points);
        remap.extend(0..points.len() as u32);
        return (welded, remap);
    }

    let sq_distance = distance * distance;
    let mut grid: HashMap<[i64; 3], SmallVec<[u32; 4]>> = HashMap::default();
    let cell_of = |pt: &Point<Real>| pt.coords.map(|x| (x / distance).floor() as i64);

    for pt in points {
        let cell = cell_of(pt);
        let mut found = None;

        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = [cell.x + dx, cell.y + dy, cell.z + dz];
                    if let Some(candidates) = grid.get(&key) {
                        for id in candidates {
                            if na::distance_squared(&welded[*id as usize], pt) <= sq_distance {
                                found = Some(*id);
                                break 'search;
                            }
                        }
                    }
                }
            }
        }

        let id = match found {
            Some(id) => id,
            None => {
                welded.push(*pt);
                let id = welded.len() as u32 - 1;
                grid.entry([cell.x, cell.y, cell.z]).or_default().push(id);
                id
            }
        };

        remap.push(id);
    }

    (welded, remap)
}

/// Removes the consecutive duplicate indices of a closed polygon, including the wrap-around.
pub fn dedup_polygon(indices: &mut SmallVec<[u32; 8]>) {
    indices.dedup();
    while indices.len() > 1 && indices.first() == indices.last() {
        let _ = indices.pop();
    }
}
