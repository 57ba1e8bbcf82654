//! Value records for the mechanism and the per-symmetry folding rules.
//!
//! The symmetry rules are methods on `Symmetry` so that every mode is handled
//! by an exhaustive `match`.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::geom::normalize_angle;
use crate::lattice::LatticeCell;

/// How neighbouring rosettes relate to each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Symmetry {
    #[default]
    Translation,
    Reflection,
    Glide,
}

/// Order in which non-root cells join the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchOrder {
    /// Ring ascending, then polar angle.
    #[default]
    Ring,
    /// Polar angle ascending, then ring.
    Spiral,
    /// `|r|` ascending, then ring, then polar angle.
    AxisFirst,
}

impl Symmetry {
    /// Child orientation given the parent orientation `phi`, child depth and
    /// inter-cell rotation `delta`.
    pub fn fold(self, phi: f64, depth: u32, delta: f64) -> f64 {
        let even = depth % 2 == 0;
        match self {
            Symmetry::Translation => normalize_angle(phi + delta),
            Symmetry::Reflection if even => normalize_angle(phi + delta),
            Symmetry::Reflection => normalize_angle((PI - phi) - delta),
            Symmetry::Glide if even => normalize_angle(phi + delta),
            Symmetry::Glide => normalize_angle(-phi - delta),
        }
    }

    /// Child mirror flag; flips on odd depths except under translation.
    pub fn mirror(self, parent_mirrored: bool, depth: u32) -> bool {
        match self {
            Symmetry::Translation => false,
            Symmetry::Reflection | Symmetry::Glide => {
                if depth % 2 == 1 {
                    !parent_mirrored
                } else {
                    parent_mirrored
                }
            }
        }
    }

    /// Signed glide translation; zero unless gliding.
    pub fn glide_offset(self, magnitude: f64, depth: u32) -> f64 {
        match self {
            Symmetry::Translation | Symmetry::Reflection => 0.0,
            Symmetry::Glide if depth % 2 == 0 => magnitude,
            Symmetry::Glide => -magnitude,
        }
    }
}

/// Pose assigned to one lattice cell's rosette instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TessellationNodePose {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub ring: u32,
    /// Edge count from the root.
    pub depth: u32,
    /// Accumulated rotation in `(-π, π]`.
    pub orientation: f64,
    /// Direction of the link from the parent (root: base orientation).
    pub folded_axis: f64,
    /// Flip horizontally before rotating.
    pub mirrored: bool,
    /// Translation perpendicular to `folded_axis`; glide only.
    pub glide_offset: f64,
    pub is_root: bool,
    pub is_fixed: bool,
}

/// Parent → child link with the facing petals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TessellationEdge {
    pub parent_id: String,
    pub child_id: String,
    pub parent_petal: usize,
    pub child_petal: usize,
    /// Depth of the child pose.
    pub depth: u32,
}

/// Cells, tree edges (discovery order) and poses (sorted by depth, then ring).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TessellationMechanism {
    pub cells: Vec<LatticeCell>,
    pub edges: Vec<TessellationEdge>,
    pub poses: Vec<TessellationNodePose>,
}

impl TessellationMechanism {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn root(&self) -> Option<&TessellationNodePose> {
        self.poses.iter().find(|p| p.is_root)
    }

    pub fn pose(&self, id: &str) -> Option<&TessellationNodePose> {
        self.poses.iter().find(|p| p.id == id)
    }
}

/// Mechanism parameters (everything except the cells and the fixed cell).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MechanismCfg {
    /// Rosette order; sets the number of petals.
    pub order: usize,
    /// Root orientation, radians.
    pub base_orientation: f64,
    /// Per-link rotation, radians (already scaled by fold progress).
    pub inter_cell_rotation: f64,
    pub symmetry: Symmetry,
    pub branch_order: BranchOrder,
}

impl Default for MechanismCfg {
    fn default() -> Self {
        Self {
            order: 8,
            base_orientation: 0.0,
            inter_cell_rotation: 0.0,
            symmetry: Symmetry::Translation,
            branch_order: BranchOrder::Ring,
        }
    }
}
