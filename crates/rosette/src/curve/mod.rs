//! Curve Sampler: control points → dense polyline.
//!
//! Purpose
//! - Turn the handful of user-authored control points of a sprite into the
//!   polyline that the replicator consumes.
//! - Three points sample a quadratic Bézier, four or more a cubic Bézier over
//!   the first four points; fewer than three are returned unchanged.
//!
//! Model
//! - `steps` samples at `t = i/(steps-1)`, so both endpoints are hit exactly.
//! - A nonzero `offset` moves each sample along the left-hand normal
//!   `(-dy, dx)/|d|` of the derivative. The side never flips along the curve:
//!   where the derivative vanishes (a handle on its endpoint) the limiting
//!   direction toward the next distinct control point is used, then the
//!   chord, then the +x axis.
//! - Non-finite output falls back to the raw control points.
//!
//! Code cross-refs: `sprite::renderable_points`, `replicate::build_rosette`.

mod bezier;

pub use bezier::{sample, sample_as, sample_as_with_diagnostics, sample_with_diagnostics, Bezier};

use serde::{Deserialize, Serialize};

/// Which Bézier degree a sprite asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BezierMode {
    Quadratic,
    #[default]
    Cubic,
}
