//! Traversal order of cells under a `BranchOrder` policy.

use std::cmp::Ordering;

use crate::geom::{polar_angle, GeomCfg};
use crate::lattice::LatticeCell;

use super::types::BranchOrder;

/// Indices of `cells` in traversal order; `root` always comes first.
///
/// Spiral ordering treats angles within `cfg.eps_tie` as equal by quantizing
/// them, which keeps the comparison a total order.
pub fn traversal_order(
    cells: &[LatticeCell],
    root: usize,
    policy: BranchOrder,
    cfg: GeomCfg,
) -> Vec<usize> {
    let angles: Vec<f64> = cells.iter().map(|c| polar_angle(c.center())).collect();
    let bucket = |i: usize| (angles[i] / cfg.eps_tie).round() as i64;
    let mut idx: Vec<usize> = (0..cells.len()).collect();
    idx.sort_by(|&a, &b| {
        let (ca, cb) = (&cells[a], &cells[b]);
        let by_angle = || angles[a].total_cmp(&angles[b]);
        let rest = match policy {
            BranchOrder::Ring => ca.ring.cmp(&cb.ring).then_with(by_angle),
            BranchOrder::Spiral => bucket(a).cmp(&bucket(b)).then(ca.ring.cmp(&cb.ring)),
            BranchOrder::AxisFirst => ca
                .r
                .unsigned_abs()
                .cmp(&cb.r.unsigned_abs())
                .then(ca.ring.cmp(&cb.ring))
                .then_with(by_angle),
        };
        root_first(a, b, root).then(rest)
    });
    idx
}

#[inline]
fn root_first(a: usize, b: usize, root: usize) -> Ordering {
    (a != root).cmp(&(b != root))
}
