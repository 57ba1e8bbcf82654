//! Basic planar types and tolerances.
//!
//! - `GeomCfg`: centralizes epsilons for tie-breaking and zero-length guards.
//! - `Point`, `Polyline`: plain value types, serializable at the persistence boundary.

use nalgebra::Vector2;

/// A 2D coordinate in local (unscaled) space.
pub type Point = Vector2<f64>;

/// Ordered points; insertion order is draw order.
pub type Polyline = Vec<Point>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Below this length a direction vector is treated as degenerate.
    pub eps_len: f64,
    /// Distances/angles closer than this compare as equal in ordering rules.
    pub eps_tie: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_len: 1e-12,
            eps_tie: 1e-6,
        }
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Unit vector along `v`, or the +x axis when `v` is (numerically) zero or non-finite.
///
/// Returns the unit vector and whether the fallback was used.
#[inline]
pub fn unit_or_axis(v: Point, cfg: GeomCfg) -> (Point, bool) {
    let len = v.norm();
    if !len.is_finite() || len <= cfg.eps_len {
        (Vector2::new(1.0, 0.0), true)
    } else {
        (v / len, false)
    }
}
