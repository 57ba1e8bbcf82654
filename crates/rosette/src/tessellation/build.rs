//! Tree construction for the tessellation mechanism.

use std::collections::HashSet;
use std::f64::consts::TAU;

use crate::diagnostics::{report_all, Diagnostic};
use crate::geom::{distance, normalize_angle, GeomCfg};
use crate::lattice::LatticeCell;

use super::order::traversal_order;
use super::types::{MechanismCfg, TessellationEdge, TessellationMechanism, TessellationNodePose};

/// Glide magnitude as a fraction of the nearest-neighbour spacing.
pub const GLIDE_FRACTION: f64 = 0.22;
/// Lower bound of the glide magnitude.
pub const MIN_GLIDE_OFFSET: f64 = 10.0;

const ORIGIN_ID: &str = "0,0";

/// Build the mechanism; diagnostics are logged, not returned.
pub fn build_mechanism(
    cells: &[LatticeCell],
    cfg: &MechanismCfg,
    fixed_cell_id: Option<&str>,
) -> TessellationMechanism {
    let (mech, diags) = build_mechanism_with_diagnostics(cells, cfg, fixed_cell_id);
    report_all(&diags);
    mech
}

/// Build the mechanism and collect every recoverable condition encountered.
///
/// Empty `cells` yield an empty mechanism. Otherwise `edges.len() == poses.len() - 1`
/// and exactly one pose is the root.
pub fn build_mechanism_with_diagnostics(
    cells: &[LatticeCell],
    cfg: &MechanismCfg,
    fixed_cell_id: Option<&str>,
) -> (TessellationMechanism, Vec<Diagnostic>) {
    let mut diags = Vec::new();
    if cells.is_empty() {
        return (TessellationMechanism::default(), diags);
    }
    if cfg.order < 2 {
        diags.push(Diagnostic::DegenerateOrder { order: cfg.order });
    }
    let gcfg = GeomCfg::default();

    let root_idx = resolve_root(cells, fixed_cell_id, &mut diags);
    let root = &cells[root_idx];
    let base = normalize_angle(cfg.base_orientation);
    let mut poses = vec![TessellationNodePose {
        id: root.id.clone(),
        x: root.x,
        y: root.y,
        ring: root.ring,
        depth: 0,
        orientation: base,
        folded_axis: base,
        mirrored: false,
        glide_offset: 0.0,
        is_root: true,
        is_fixed: fixed_cell_id.map_or(true, |f| f == root.id),
    }];

    let glide_magnitude = (estimate_spacing(cells, gcfg) * GLIDE_FRACTION).max(MIN_GLIDE_OFFSET);
    let order = cfg.order.max(1);

    // (cell index, pose index) of every cell already in the tree.
    let mut visited: Vec<(usize, usize)> = vec![(root_idx, 0)];
    let mut seen: HashSet<&str> = HashSet::from([root.id.as_str()]);
    let mut edges = Vec::with_capacity(cells.len() - 1);

    for idx in traversal_order(cells, root_idx, cfg.branch_order, gcfg) {
        if idx == root_idx {
            continue;
        }
        let cell = &cells[idx];
        if !seen.insert(cell.id.as_str()) {
            diags.push(Diagnostic::DuplicateCellId {
                id: cell.id.clone(),
            });
            continue;
        }
        let (parent_idx, parent_pose_idx) = choose_parent(cell, &visited, cells, gcfg);
        let parent = &cells[parent_idx];
        let parent_pose = &poses[parent_pose_idx];

        let depth = parent_pose.depth + 1;
        let link = cell.center() - parent.center();
        let link_angle = link.y.atan2(link.x);
        let parent_petal = petal_index(link_angle, order);
        let child_petal = (parent_petal + (order + 1) / 2) % order;
        let orientation = cfg
            .symmetry
            .fold(parent_pose.orientation, depth, cfg.inter_cell_rotation);
        let mirrored = cfg.symmetry.mirror(parent_pose.mirrored, depth);
        let glide_offset = cfg.symmetry.glide_offset(glide_magnitude, depth);

        edges.push(TessellationEdge {
            parent_id: parent.id.clone(),
            child_id: cell.id.clone(),
            parent_petal,
            child_petal,
            depth,
        });
        poses.push(TessellationNodePose {
            id: cell.id.clone(),
            x: cell.x,
            y: cell.y,
            ring: cell.ring,
            depth,
            orientation,
            folded_axis: normalize_angle(link_angle),
            mirrored,
            glide_offset,
            is_root: false,
            is_fixed: fixed_cell_id == Some(cell.id.as_str()),
        });
        visited.push((idx, poses.len() - 1));
    }

    poses.sort_by(|a, b| a.depth.cmp(&b.depth).then(a.ring.cmp(&b.ring)));
    debug_assert_eq!(edges.len() + 1, poses.len());

    let mech = TessellationMechanism {
        cells: cells.to_vec(),
        edges,
        poses,
    };
    (mech, diags)
}

fn resolve_root(cells: &[LatticeCell], fixed: Option<&str>, diags: &mut Vec<Diagnostic>) -> usize {
    if let Some(f) = fixed {
        if let Some(i) = cells.iter().position(|c| c.id == f) {
            return i;
        }
    }
    let fallback = cells.iter().position(|c| c.id == ORIGIN_ID).unwrap_or(0);
    if let Some(f) = fixed {
        diags.push(Diagnostic::UnresolvedFixedCell {
            requested: f.to_string(),
            fallback: cells[fallback].id.clone(),
            cell_count: cells.len(),
        });
    }
    fallback
}

/// Nearest visited cell; distances within `eps_tie` prefer the smaller ring,
/// then the earlier visit.
fn choose_parent(
    target: &LatticeCell,
    visited: &[(usize, usize)],
    cells: &[LatticeCell],
    cfg: GeomCfg,
) -> (usize, usize) {
    let dist = |v: &(usize, usize)| distance(cells[v.0].center(), target.center());
    let nearest = visited.iter().map(dist).fold(f64::INFINITY, f64::min);
    // Ties are measured from the nearest distance, not the running best.
    let mut best = visited[0];
    let mut best_ring = u32::MAX;
    for &cand in visited {
        if dist(&cand) - nearest > cfg.eps_tie {
            continue;
        }
        let ring = cells[cand.0].ring;
        if ring < best_ring {
            best = cand;
            best_ring = ring;
        }
    }
    best
}

/// Rotational sector of `angle` for a rosette with `order` petals.
pub fn petal_index(angle: f64, order: usize) -> usize {
    let order = order.max(1);
    let wrapped = ((angle % TAU) + TAU) % TAU;
    ((wrapped / TAU) * order as f64).round() as usize % order
}

/// Minimum pairwise distance above `eps_tie`; `0` with fewer than two cells.
pub fn estimate_spacing(cells: &[LatticeCell], cfg: GeomCfg) -> f64 {
    let mut min = f64::INFINITY;
    for (i, a) in cells.iter().enumerate() {
        for b in &cells[i + 1..] {
            let d = distance(a.center(), b.center());
            if d > cfg.eps_tie && d < min {
                min = d;
            }
        }
    }
    if min.is_finite() {
        min
    } else {
        0.0
    }
}
