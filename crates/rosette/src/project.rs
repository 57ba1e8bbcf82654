//! Project parameters: the full input tuple the engine is a function of.
//!
//! Purpose
//! - One serde record that a caller can persist and reload; derived curves,
//!   cells and poses are never stored because they are cheap to recompute.
//! - Every field has a default so partial parameter files load.
//! - `sanitized` clamps values into the ranges the editor allows and snaps the
//!   rosette order to the allowed set, reporting each adjustment.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{report_all, Diagnostic};
use crate::lattice::LatticeKind;
use crate::sprite::Slice;
use crate::tessellation::{BranchOrder, Symmetry};

const ORDER_BASES: std::ops::RangeInclusive<usize> = 4..=12;
const ORDER_LIMIT: usize = 128;

pub const DEFAULT_ORDER: usize = 8;
pub const BASE_ORIENTATION_DEG: f64 = 95.0;
pub const ORIENTATION_RANGE_DEG: (f64, f64) = (-180.0, 180.0);
pub const DEFAULT_TILING_SPACING: f64 = 220.0;
pub const TILING_SPACING_RANGE: (f64, f64) = (80.0, 460.0);
pub const DEFAULT_TILING_RINGS: u32 = 1;
pub const TILING_RINGS_RANGE: (u32, u32) = (1, 4);
pub const FOLD_PROGRESS_RANGE: (f64, f64) = (0.0, 1.0);
pub const ORIGIN_CELL_ID: &str = "0,0";

/// Rosette orders the editor offers: multiples `b·k ≤ 128` of every base `b ∈ 4..=12`.
pub fn allowed_orders() -> Vec<usize> {
    let mut out: Vec<usize> = ORDER_BASES
        .flat_map(|b| (1..=ORDER_LIMIT / b).map(move |k| b * k))
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Closest allowed order; ties keep the smaller one.
pub fn snap_order(value: f64) -> usize {
    let orders = allowed_orders();
    let mut best = orders[0];
    for &o in &orders[1..] {
        if (o as f64 - value).abs() < (best as f64 - value).abs() {
            best = o;
        }
    }
    best
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectParams {
    pub order: usize,
    pub base_orientation_deg: f64,
    pub mirror_adjacency: bool,
    pub slice: Slice,
    pub lattice: LatticeKind,
    pub tiling_spacing: f64,
    pub tiling_rings: u32,
    /// Target inter-cell rotation at full fold, degrees.
    pub inter_cell_rotation_deg: f64,
    pub symmetry: Symmetry,
    pub branch_order: BranchOrder,
    /// Scales the inter-cell rotation from 0 (aligned) to 1 (fully folded).
    pub fold_progress: f64,
    /// Pinned cell; blank means unset.
    pub fixed_cell_id: String,
}

impl Default for ProjectParams {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            base_orientation_deg: BASE_ORIENTATION_DEG,
            mirror_adjacency: true,
            slice: Slice::default(),
            lattice: LatticeKind::Hex,
            tiling_spacing: DEFAULT_TILING_SPACING,
            tiling_rings: DEFAULT_TILING_RINGS,
            inter_cell_rotation_deg: 0.0,
            symmetry: Symmetry::Translation,
            branch_order: BranchOrder::Ring,
            fold_progress: 0.0,
            fixed_cell_id: ORIGIN_CELL_ID.to_string(),
        }
    }
}

impl ProjectParams {
    /// The fixed cell id, trimmed; `None` when blank.
    pub fn fixed_cell(&self) -> Option<&str> {
        let id = self.fixed_cell_id.trim();
        (!id.is_empty()).then_some(id)
    }

    /// Copy with every field forced into its allowed range; diagnostics are logged.
    pub fn sanitized(&self) -> ProjectParams {
        let (p, diags) = self.sanitized_with_diagnostics();
        report_all(&diags);
        p
    }

    pub fn sanitized_with_diagnostics(&self) -> (ProjectParams, Vec<Diagnostic>) {
        let mut diags = Vec::new();
        let mut p = self.clone();

        let order = snap_order(p.order as f64);
        note("order", p.order as f64, order as f64, &mut diags);
        p.order = order;

        p.base_orientation_deg = clamp_field(
            "base_orientation_deg",
            p.base_orientation_deg,
            ORIENTATION_RANGE_DEG,
            BASE_ORIENTATION_DEG,
            &mut diags,
        );
        p.tiling_spacing = clamp_field(
            "tiling_spacing",
            p.tiling_spacing,
            TILING_SPACING_RANGE,
            DEFAULT_TILING_SPACING,
            &mut diags,
        );
        p.fold_progress = clamp_field(
            "fold_progress",
            p.fold_progress,
            FOLD_PROGRESS_RANGE,
            0.0,
            &mut diags,
        );
        if !p.inter_cell_rotation_deg.is_finite() {
            note("inter_cell_rotation_deg", p.inter_cell_rotation_deg, 0.0, &mut diags);
            p.inter_cell_rotation_deg = 0.0;
        }

        let rings = p.tiling_rings.clamp(TILING_RINGS_RANGE.0, TILING_RINGS_RANGE.1);
        note("tiling_rings", p.tiling_rings as f64, rings as f64, &mut diags);
        p.tiling_rings = rings;

        p.fixed_cell_id = p.fixed_cell_id.trim().to_string();
        (p, diags)
    }
}

/// Clamp into `range`; non-finite values take `fallback`.
fn clamp_field(
    field: &'static str,
    value: f64,
    range: (f64, f64),
    fallback: f64,
    diags: &mut Vec<Diagnostic>,
) -> f64 {
    let out = if value.is_finite() {
        value.clamp(range.0, range.1)
    } else {
        fallback
    };
    note(field, value, out, diags);
    out
}

fn note(field: &'static str, from: f64, to: f64, diags: &mut Vec<Diagnostic>) {
    if from.to_bits() != to.to_bits() {
        diags.push(Diagnostic::ParamAdjusted { field, from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_orders_shape() {
        let orders = allowed_orders();
        assert_eq!(orders[0], 4);
        assert_eq!(*orders.last().unwrap(), 128);
        assert!(orders.windows(2).all(|w| w[0] < w[1]));
        for o in [4, 5, 7, 11, 13 * 7, 120, 121, 128] {
            assert!(orders.contains(&o), "{o}");
        }
        // 13 and 17 are not multiples of any base in 4..=12.
        assert!(!orders.contains(&13));
        assert!(!orders.contains(&17));
    }

    #[test]
    fn snap_order_picks_closest() {
        assert_eq!(snap_order(1.0), 4);
        assert_eq!(snap_order(8.0), 8);
        assert_eq!(snap_order(13.0), 12); // 12 and 14 tie, smaller wins
        assert_eq!(snap_order(500.0), 128);
    }

    #[test]
    fn defaults_match_editor() {
        let p = ProjectParams::default();
        assert_eq!(p.order, 8);
        assert_eq!(p.base_orientation_deg, 95.0);
        assert_eq!(p.fixed_cell(), Some("0,0"));
        assert_eq!(p.slice.sprites.len(), 1);
        let (q, diags) = p.sanitized_with_diagnostics();
        assert_eq!(q, p);
        assert!(diags.is_empty());
    }

    #[test]
    fn sanitize_clamps_and_reports() {
        let p = ProjectParams {
            order: 13,
            base_orientation_deg: 400.0,
            tiling_spacing: f64::NAN,
            tiling_rings: 9,
            fold_progress: -0.5,
            fixed_cell_id: "  1,0 ".into(),
            ..ProjectParams::default()
        };
        let (q, diags) = p.sanitized_with_diagnostics();
        assert_eq!(q.order, 12);
        assert_eq!(q.base_orientation_deg, 180.0);
        assert_eq!(q.tiling_spacing, DEFAULT_TILING_SPACING);
        assert_eq!(q.tiling_rings, 4);
        assert_eq!(q.fold_progress, 0.0);
        assert_eq!(q.fixed_cell_id, "1,0");
        assert_eq!(diags.len(), 5);
        assert!(diags.iter().all(Diagnostic::recoverable));
    }

    #[test]
    fn blank_fixed_cell_is_unset() {
        let p = ProjectParams {
            fixed_cell_id: "   ".into(),
            ..ProjectParams::default()
        };
        assert_eq!(p.fixed_cell(), None);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: ProjectParams = serde_json::from_str(
            r#"{ "order": 12, "symmetry": "glide", "branch_order": "axis-first", "lattice": "square" }"#,
        )
        .unwrap();
        assert_eq!(p.order, 12);
        assert_eq!(p.symmetry, Symmetry::Glide);
        assert_eq!(p.branch_order, BranchOrder::AxisFirst);
        assert_eq!(p.lattice, LatticeKind::Square);
        assert_eq!(p.tiling_spacing, DEFAULT_TILING_SPACING);
        let text = serde_json::to_string(&p).unwrap();
        let back: ProjectParams = serde_json::from_str(&text).unwrap();
        assert_eq!(back, p);
    }
}
