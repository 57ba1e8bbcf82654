//! Derived geometry: everything a renderer needs, computed from `ProjectParams`.
//!
//! Flow: sprites → slice polylines → rosette → centered curves, and
//! lattice → mechanism. Poses are applied to the rosette by `place_motif`,
//! which follows the renderer contract (glide offset perpendicular to the
//! folded axis, mirror before rotation).

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::geom::{rotate_point, to_rad, Point, Polyline};
use crate::lattice::{build_lattice, LatticeCell};
use crate::project::ProjectParams;
use crate::replicate::{build_rosette, transform_to_center};
use crate::tessellation::{build_mechanism, MechanismCfg, TessellationMechanism, TessellationNodePose};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedGeometry {
    pub base_rotation: f64,
    /// Rosette around the origin.
    pub rosette_curves: Vec<Polyline>,
    /// Rosette translated to the requested center.
    pub centered_curves: Vec<Polyline>,
    /// The active sprite's curve as drawn at the center (empty without sprites).
    pub active_sprite_curve: Polyline,
    pub cells: Vec<LatticeCell>,
    pub mechanism: TessellationMechanism,
}

/// Where and how one rosette instance is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotifPlacement {
    pub center: Point,
    pub rotation: f64,
    pub mirrored: bool,
}

/// Mechanism parameters implied by the project; the inter-cell rotation is
/// scaled by the fold progress.
pub fn mechanism_cfg(params: &ProjectParams) -> MechanismCfg {
    MechanismCfg {
        order: params.order,
        base_orientation: to_rad(params.base_orientation_deg),
        inter_cell_rotation: to_rad(params.inter_cell_rotation_deg) * params.fold_progress,
        symmetry: params.symmetry,
        branch_order: params.branch_order,
    }
}

/// Recompute all derived geometry. `params` is used as given; call
/// `ProjectParams::sanitized` first for untrusted input.
pub fn derive_geometry(params: &ProjectParams, center: Point) -> DerivedGeometry {
    let base_rotation = to_rad(params.base_orientation_deg);
    let polylines = params.slice.enabled_polylines();
    let rosette_curves = build_rosette(
        &polylines,
        params.order,
        base_rotation,
        params.mirror_adjacency,
    );
    let centered_curves = transform_to_center(&rosette_curves, center);

    let active_sprite_curve: Polyline = params
        .slice
        .active_sprite()
        .map(|s| {
            s.slice_points()
                .into_iter()
                .map(|p| rotate_point(p, base_rotation) + center)
                .collect()
        })
        .unwrap_or_default();

    let cells = build_lattice(params.lattice, params.tiling_rings, params.tiling_spacing);
    let mechanism = build_mechanism(&cells, &mechanism_cfg(params), params.fixed_cell());
    tracing::debug!(
        curves = rosette_curves.len(),
        cells = cells.len(),
        edges = mechanism.edges.len(),
        "derive_geometry"
    );

    DerivedGeometry {
        base_rotation,
        rosette_curves,
        centered_curves,
        active_sprite_curve,
        cells,
        mechanism,
    }
}

/// Placement of the motif for `pose`.
pub fn motif_placement(pose: &TessellationNodePose) -> MotifPlacement {
    let normal = pose.folded_axis + FRAC_PI_2;
    MotifPlacement {
        center: Point::new(
            pose.x + pose.glide_offset * normal.cos(),
            pose.y + pose.glide_offset * normal.sin(),
        ),
        rotation: pose.orientation,
        mirrored: pose.mirrored,
    }
}

/// Motif curves (local space) mirrored, rotated and moved into place for `pose`.
pub fn place_motif(curves: &[Polyline], pose: &TessellationNodePose) -> Vec<Polyline> {
    let at = motif_placement(pose);
    curves
        .iter()
        .map(|c| {
            c.iter()
                .map(|p| {
                    let q = if at.mirrored { Point::new(-p.x, p.y) } else { *p };
                    rotate_point(q, at.rotation) + at.center
                })
                .collect()
        })
        .collect()
}

/// Every rosette instance of the tiling, in pose order.
pub fn tile_curves(curves: &[Polyline], mechanism: &TessellationMechanism) -> Vec<Vec<Polyline>> {
    mechanism
        .poses
        .iter()
        .map(|pose| place_motif(curves, pose))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::LatticeKind;
    use crate::tessellation::Symmetry;
    use nalgebra::vector;

    #[test]
    fn default_project_derives_everything() {
        let params = ProjectParams::default();
        let center = vector![400.0, 300.0];
        let g = derive_geometry(&params, center);
        assert_eq!(g.rosette_curves.len(), 8);
        assert_eq!(g.centered_curves.len(), 8);
        assert_eq!(g.cells.len(), 7);
        assert_eq!(g.mechanism.edges.len(), 6);
        assert_eq!(g.active_sprite_curve.len(), 48);
        for (a, b) in g.rosette_curves[0].iter().zip(&g.centered_curves[0]) {
            assert!((a + center - b).norm() < 1e-12);
        }
        // Replica 0 of the rosette equals the active sprite curve.
        for (a, b) in g.centered_curves[0].iter().zip(&g.active_sprite_curve) {
            assert!((a - b).norm() < 1e-9);
        }
        let root = g.mechanism.root().unwrap();
        assert!((root.orientation - to_rad(95.0)).abs() < 1e-12);
    }

    #[test]
    fn fold_progress_scales_rotation() {
        let params = ProjectParams {
            inter_cell_rotation_deg: 30.0,
            fold_progress: 0.5,
            base_orientation_deg: 0.0,
            ..ProjectParams::default()
        };
        let cfg = mechanism_cfg(&params);
        assert!((cfg.inter_cell_rotation - to_rad(15.0)).abs() < 1e-12);
        let g = derive_geometry(&params, Point::zeros());
        for p in g.mechanism.poses.iter().filter(|p| p.depth == 1) {
            assert!((p.orientation - to_rad(15.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn disabled_sprites_leave_empty_rosette() {
        let mut params = ProjectParams::default();
        params.slice.sprites[0].enabled = false;
        let g = derive_geometry(&params, Point::zeros());
        assert!(g.rosette_curves.is_empty());
        // The active sprite is still shown for editing.
        assert!(!g.active_sprite_curve.is_empty());
    }

    #[test]
    fn glide_placement_is_perpendicular_to_axis() {
        let params = ProjectParams {
            lattice: LatticeKind::Square,
            tiling_spacing: 100.0,
            symmetry: Symmetry::Glide,
            base_orientation_deg: 0.0,
            ..ProjectParams::default()
        };
        let g = derive_geometry(&params, Point::zeros());
        let pose = g.mechanism.pose("1,0").unwrap();
        // Link from the root points along +x, so the glide moves along y.
        assert!(pose.folded_axis.abs() < 1e-12);
        let at = motif_placement(pose);
        assert!((at.center.x - 100.0).abs() < 1e-9);
        assert!((at.center.y - pose.glide_offset).abs() < 1e-9);
        assert!(at.mirrored);
    }

    #[test]
    fn place_motif_mirrors_then_rotates() {
        let pose = TessellationNodePose {
            id: "1,0".into(),
            x: 10.0,
            y: 0.0,
            ring: 1,
            depth: 1,
            orientation: FRAC_PI_2,
            folded_axis: 0.0,
            mirrored: true,
            glide_offset: 0.0,
            is_root: false,
            is_fixed: false,
        };
        let out = place_motif(&[vec![vector![1.0, 0.0]]], &pose);
        // (1,0) → mirror (-1,0) → rotate π/2 (0,-1) → translate (10,-1).
        assert!((out[0][0] - vector![10.0, -1.0]).norm() < 1e-12);
        let m = build_mechanism(
            &build_lattice(LatticeKind::Hex, 1, 50.0),
            &MechanismCfg::default(),
            None,
        );
        let tiles = tile_curves(&[vec![vector![1.0, 0.0]]], &m);
        assert_eq!(tiles.len(), 7);
    }
}
