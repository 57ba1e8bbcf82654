//! Symmetry Replicator: base polylines → rosette.
//!
//! Replica `i ∈ [0, order)` is rotated by `base_rotation + i·2π/order`; with
//! mirror adjacency, odd replicas are flipped about the local y-axis before
//! rotating. Output groups all replicas of one base polyline together, in
//! increasing `i`, then moves on to the next base polyline.
//!
//! Orders that do not divide the lattice symmetry give irregular but valid
//! output; callers snap orders with `project::snap_order`.

use std::f64::consts::TAU;

use crate::geom::{rotate_point, Point, Polyline};

/// Replicate one polyline `order` times around the origin.
pub fn replicate_polyline(
    base: &[Point],
    order: usize,
    base_rotation: f64,
    mirror_adjacency: bool,
) -> Vec<Polyline> {
    (0..order)
        .map(|i| {
            let rotation = base_rotation + (i as f64) * TAU / (order as f64);
            let mirrored = mirror_adjacency && i % 2 == 1;
            base.iter()
                .map(|p| {
                    let q = if mirrored { Point::new(-p.x, p.y) } else { *p };
                    rotate_point(q, rotation)
                })
                .collect()
        })
        .collect()
}

/// Replicate every base polyline; result length is `order × base_polylines.len()`.
pub fn build_rosette(
    base_polylines: &[Polyline],
    order: usize,
    base_rotation: f64,
    mirror_adjacency: bool,
) -> Vec<Polyline> {
    base_polylines
        .iter()
        .flat_map(|base| replicate_polyline(base, order, base_rotation, mirror_adjacency))
        .collect()
}

/// Translate every point of every curve by `center`.
pub fn transform_to_center(curves: &[Polyline], center: Point) -> Vec<Polyline> {
    curves
        .iter()
        .map(|c| c.iter().map(|p| p + center).collect())
        .collect()
}
