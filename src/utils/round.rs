use crate::math::{Point, Real};

/// Rounds `value` to the given number of decimal digits.
#[inline]
pub fn round_to_decimals(value: Real, decimals: i32) -> Real {
    let factor = (10.0 as Real).powi(decimals);
    (value * factor).round() / factor
}

/// Rounds each coordinate of `pt` to the given number of decimal digits.
///
/// Points that are closer than the rounding step collapse onto the same value.
#[inline]
pub fn round_point(pt: &Point<Real>, decimals: i32) -> Point<Real> {
    pt.map(|x| round_to_decimals(x, decimals))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_collapses_near_duplicates() {
        let a = round_point(&Point::new(0.123_44, 1.0, -2.000_01), 4);
        let b = round_point(&Point::new(0.123_41, 1.000_02, -2.0), 4);
        assert_eq!(a, b);
        assert_relative_eq!(a.x, 0.1234);
    }
}
