use std::f64::consts::{PI, TAU};

use super::types::Point;

/// Normalize an angle into the half-open interval `(-π, π]`.
///
/// Uses repeated `±2π` steps so that every caller takes the same
/// floating-point path; huge magnitudes are first reduced with `rem_euclid`.
/// Non-finite input maps to `0`.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle;
    if a.abs() > 64.0 * TAU {
        a = a.rem_euclid(TAU);
    }
    while a > PI {
        a -= TAU;
    }
    while a <= -PI {
        a += TAU;
    }
    a
}

#[inline]
pub fn to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

#[inline]
pub fn to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Rotate `p` counterclockwise about the origin by `angle` radians.
#[inline]
pub fn rotate_point(p: Point, angle: f64) -> Point {
    let (s, c) = angle.sin_cos();
    Point::new(p.x * c - p.y * s, p.x * s + p.y * c)
}

/// Polar angle `atan2(y, x)` of a point relative to the origin.
#[inline]
pub fn polar_angle(p: Point) -> f64 {
    p.y.atan2(p.x)
}
