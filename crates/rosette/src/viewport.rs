//! Viewport math: screen ↔ world affine maps and zoom about a screen point.
//!
//! `screen = world · scale + offset`. All functions are pure; a `Viewport`
//! is a value the caller owns.

use serde::{Deserialize, Serialize};

use crate::geom::Point;

pub const MIN_VIEWPORT_SCALE: f64 = 0.2;
pub const MAX_VIEWPORT_SCALE: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::zeros(),
        }
    }
}

/// Clamp to `[MIN_VIEWPORT_SCALE, MAX_VIEWPORT_SCALE]`.
#[inline]
pub fn clamp_scale(scale: f64) -> f64 {
    clamp_scale_within(scale, MIN_VIEWPORT_SCALE, MAX_VIEWPORT_SCALE)
}

/// Clamp to `[min, max]`; NaN maps to `min`.
#[inline]
pub fn clamp_scale_within(scale: f64, min: f64, max: f64) -> f64 {
    max.min(min.max(scale))
}

pub fn screen_to_world(p: Point, viewport: &Viewport) -> Point {
    (p - viewport.offset) / viewport.scale
}

pub fn world_to_screen(p: Point, viewport: &Viewport) -> Point {
    p * viewport.scale + viewport.offset
}

/// New viewport at `next_scale` (clamped) that keeps the world point under
/// `screen_point` fixed on screen.
pub fn zoom_to_point(viewport: &Viewport, screen_point: Point, next_scale: f64) -> Viewport {
    let scale = clamp_scale(next_scale);
    let world = screen_to_world(screen_point, viewport);
    Viewport {
        scale,
        offset: screen_point - world * scale,
    }
}
