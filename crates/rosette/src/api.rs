//! Flat surface for callers that want one import path per stage.
//!
//! Mirrors the module layout; prefer `prelude` for the common subset.

// Curve sampling
pub use crate::curve::{
    sample, sample_as, sample_as_with_diagnostics, sample_with_diagnostics, Bezier, BezierMode,
};
// Rosette replication
pub use crate::replicate::{build_rosette, replicate_polyline, transform_to_center};
// Lattice
pub use crate::lattice::{build_lattice, cell_count, cell_id, LatticeCell, LatticeKind};
// Tessellation mechanism
pub use crate::tessellation::{
    build_mechanism, build_mechanism_with_diagnostics, estimate_spacing, petal_index,
    traversal_order, BranchOrder, MechanismCfg, Symmetry, TessellationEdge,
    TessellationMechanism, TessellationNodePose,
};
// Viewport
pub use crate::viewport::{
    clamp_scale, clamp_scale_within, screen_to_world, world_to_screen, zoom_to_point, Viewport,
};
// Editor-level records and derived geometry
pub use crate::diagnostics::{report, Diagnostic};
pub use crate::pipeline::{
    derive_geometry, mechanism_cfg, motif_placement, place_motif, tile_curves, DerivedGeometry,
    MotifPlacement,
};
pub use crate::project::{allowed_orders, snap_order, ProjectParams};
pub use crate::sprite::{BezierRole, RemovePoint, Slice, Sprite, SpriteConstraints, SpriteTransform};
