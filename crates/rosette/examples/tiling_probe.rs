//! Timing probe for one full derivation at the largest tiling.
//!
//! Prints the sizes of every derived product and how long the rosette and
//! mechanism stages take at four rings and the densest allowed order.

use std::time::Instant;

use rosette::geom::Point;
use rosette::pipeline::{derive_geometry, tile_curves};
use rosette::project::{ProjectParams, TILING_RINGS_RANGE};
use rosette::tessellation::{BranchOrder, Symmetry};

fn main() {
    let params = ProjectParams {
        order: 12,
        tiling_rings: TILING_RINGS_RANGE.1,
        symmetry: Symmetry::Glide,
        branch_order: BranchOrder::Spiral,
        ..ProjectParams::default()
    }
    .sanitized();

    let start = Instant::now();
    let derived = derive_geometry(&params, Point::zeros());
    let derive_ms = start.elapsed().as_secs_f64() * 1e3;

    let start = Instant::now();
    let tiles = tile_curves(&derived.rosette_curves, &derived.mechanism);
    let tile_ms = start.elapsed().as_secs_f64() * 1e3;

    let points: usize = tiles.iter().flatten().map(Vec::len).sum();
    println!(
        "cells={} edges={} curves={} tiles={} points={points}",
        derived.cells.len(),
        derived.mechanism.edges.len(),
        derived.rosette_curves.len(),
        tiles.len()
    );
    println!("derive_time_ms={derive_ms:.3}");
    println!("tile_time_ms={tile_ms:.3}");
}
