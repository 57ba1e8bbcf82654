//! Lattice Generator: discrete tile positions around an origin cell.
//!
//! - Square: every `(col, row)` with `max(|col|, |row|) ≤ rings`, spaced `spacing` apart.
//! - Hex: axial `(q, r)` with `s = -q - r` and `max(|q|, |r|, |s|) ≤ rings`;
//!   centers at `spacing·(q + r/2, (√3/2)·r)`.
//!
//! Output order is the nested-loop generation order (rows outer). Ids are `"q,r"`.

use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Packing of the lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LatticeKind {
    #[default]
    Hex,
    Square,
}

/// One tile position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticeCell {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Distance from the origin cell under the lattice metric.
    pub ring: u32,
    /// Axial q (hex) or column (square).
    pub q: i32,
    /// Axial r (hex) or row (square).
    pub r: i32,
}

impl LatticeCell {
    pub fn new(q: i32, r: i32, x: f64, y: f64, ring: u32) -> Self {
        Self {
            id: cell_id(q, r),
            x,
            y,
            ring,
            q,
            r,
        }
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Stable string key of a lattice coordinate.
pub fn cell_id(q: i32, r: i32) -> String {
    format!("{q},{r}")
}

/// Number of cells `build_lattice(kind, rings, _)` produces.
pub fn cell_count(kind: LatticeKind, rings: u32) -> usize {
    let r = rings as usize;
    match kind {
        LatticeKind::Hex => 3 * r * r + 3 * r + 1,
        LatticeKind::Square => (2 * r + 1) * (2 * r + 1),
    }
}

/// Generate all cells within `rings` of the origin.
pub fn build_lattice(kind: LatticeKind, rings: u32, spacing: f64) -> Vec<LatticeCell> {
    let n = rings as i32;
    let mut cells = Vec::with_capacity(cell_count(kind, rings));
    match kind {
        LatticeKind::Square => {
            for row in -n..=n {
                for col in -n..=n {
                    let ring = col.unsigned_abs().max(row.unsigned_abs());
                    cells.push(LatticeCell::new(
                        col,
                        row,
                        col as f64 * spacing,
                        row as f64 * spacing,
                        ring,
                    ));
                }
            }
        }
        LatticeKind::Hex => {
            let sin60 = 3.0f64.sqrt() / 2.0;
            for r in -n..=n {
                for q in -n..=n {
                    let s = -q - r;
                    let ring = q
                        .unsigned_abs()
                        .max(r.unsigned_abs())
                        .max(s.unsigned_abs());
                    if ring > rings {
                        continue;
                    }
                    cells.push(LatticeCell::new(
                        q,
                        r,
                        spacing * (q as f64 + r as f64 / 2.0),
                        spacing * sin60 * r as f64,
                        ring,
                    ));
                }
            }
        }
    }
    cells
}
