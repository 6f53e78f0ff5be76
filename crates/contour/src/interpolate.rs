//! Linear placement of a level crossing along one cell edge.

use crate::embedding::Position;

/// Fraction along the edge from `a` to `b` where the level is crossed.
///
/// Clamped to `[0, 1]`. A flat edge (`a == b`) yields `0.5`.
#[inline]
pub fn crossing_fraction(a: f32, b: f32, level: f32) -> f32 {
    if b == a {
        return 0.5;
    }
    ((level - a) / (b - a)).clamp(0.0, 1.0)
}

/// Position on the edge `a_pos -> b_pos` where the interpolated sample equals
/// `level`.
///
/// Works for any [`Position`]; in the elevation embedding the sample itself is
/// one of the interpolated coordinates.
#[inline]
pub fn interpolate_edge<P: Position>(a_pos: P, a: f32, b_pos: P, b: f32, level: f32) -> P {
    a_pos.lerp(b_pos, crossing_fraction(a, b, level))
}
