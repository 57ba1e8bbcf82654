//! Geometry engine for a rosette and tessellation pattern editor.
//!
//! Stages, leaf first:
//! - `curve`: control points → sampled Bézier polyline (with offset curves).
//! - `replicate`: base polylines → n-fold rosette with optional mirror adjacency.
//! - `lattice`: hex or square tile positions with ring distances.
//! - `tessellation`: spanning tree of rosette poses over the lattice.
//! - `viewport`: screen ↔ world helpers for the input boundary.
//!
//! `sprite`, `project` and `pipeline` wrap the stages into the editor's
//! parameter record and derived-geometry pass. Everything is pure and
//! deterministic: identical inputs give bit-identical outputs. Recoverable
//! conditions surface through `diagnostics`, never as errors.

pub mod api;
pub mod curve;
pub mod diagnostics;
pub mod geom;
pub mod lattice;
pub mod pipeline;
pub mod project;
pub mod replicate;
pub mod sprite;
pub mod tessellation;
pub mod viewport;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{GeomCfg, Point, Polyline};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::curve::{sample, BezierMode};
    pub use crate::geom::{normalize_angle, rotate_point, to_rad, Point, Polyline};
    pub use crate::lattice::{build_lattice, LatticeCell, LatticeKind};
    pub use crate::pipeline::{derive_geometry, place_motif, DerivedGeometry};
    pub use crate::project::ProjectParams;
    pub use crate::replicate::{build_rosette, transform_to_center};
    pub use crate::tessellation::{
        build_mechanism, BranchOrder, MechanismCfg, Symmetry, TessellationMechanism,
    };
    pub use crate::viewport::{screen_to_world, world_to_screen, zoom_to_point, Viewport};
}
