//! Tessellation Mechanism: a spanning tree of rosette poses over a lattice.
//!
//! Purpose
//! - Assign every lattice cell a pose (orientation, mirror flag, glide offset,
//!   depth) reached from a root cell through parent → child links, so that a
//!   single inter-cell rotation "folds" the whole tiling under one of three
//!   symmetry modes.
//!
//! Algorithm (deterministic; visual output depends on every step)
//! 1. Root: the fixed cell if present, else `"0,0"`, else the first cell.
//! 2. Traversal order: non-root cells sorted by the `BranchOrder` policy.
//! 3. Parent: nearest already-visited cell, ties to the smaller ring. This is
//!    a greedy tree in traversal order, not a minimum spanning tree.
//! 4. Petals: the link angle picks a sector on the parent; the child uses the
//!    diametrically opposite one.
//! 5. Folding, mirroring and glide per `Symmetry`, alternating with depth parity.
//!
//! Layout
//! - `types.rs` (value records and symmetry rules), `order.rs` (traversal
//!   order), `build.rs` (tree construction).
//!
//! Code cross-refs: `lattice::build_lattice`, `pipeline::derive_geometry`.

mod build;
mod order;
mod types;

pub use build::{
    build_mechanism, build_mechanism_with_diagnostics, estimate_spacing, petal_index,
    GLIDE_FRACTION, MIN_GLIDE_OFFSET,
};
pub use order::traversal_order;
pub use types::{
    BranchOrder, MechanismCfg, Symmetry, TessellationEdge, TessellationMechanism,
    TessellationNodePose,
};
