//! Planar primitives shared by every stage of the engine.
//!
//! Purpose
//! - One point type (`nalgebra::Vector2<f64>`) and one polyline type for the
//!   whole crate, so curves, rosettes and tessellation poses compose without
//!   conversions.
//! - Angle bookkeeping (`normalize_angle`, `rotate_point`) lives here because
//!   the replicator, the mechanism builder and the pipeline must all run the
//!   same floating-point operations in the same order.
//!
//! Conventions
//! - Angles are radians internally; degrees appear only at the parameter
//!   boundary (`to_rad`, `to_deg`).
//! - Coordinates are local and unscaled; see `viewport` for screen mapping.

mod angle;
mod types;

pub use angle::{normalize_angle, polar_angle, rotate_point, to_deg, to_rad};
pub use types::{distance, unit_or_axis, GeomCfg, Point, Polyline};
