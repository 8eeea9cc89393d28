//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::cleanup::{dedup_polygon, weld_points};
pub use self::round::{round_point, round_to_decimals};
pub use self::sorted_pair::SortedPair;

pub(crate) use self::consts::*;
pub(crate) use self::ordered::sort_by_key_real;
pub(crate) use self::union_find::UnionFind;

mod center;
mod cleanup;
mod consts;
pub mod hashmap;
pub mod hashset;
mod ordered;
pub(crate) mod planar;
mod round;
mod sorted_pair;
mod union_find;
