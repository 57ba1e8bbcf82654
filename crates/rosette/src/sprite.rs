//! Sprites: the user-authored base curves a rosette is replicated from.
//!
//! A sprite holds raw control points plus how to turn them into a polyline
//! (Bézier degree, sample count, offset, scale) and where to put it in the
//! slice (translation, rotation, scale). Edits return new values; nothing
//! here owns editor state.

use serde::{Deserialize, Serialize};

use crate::curve::{sample_as, BezierMode};
use crate::diagnostics::{report, Diagnostic};
use crate::geom::{rotate_point, to_rad, Point, Polyline};

/// Distance added past the last point by `with_appended_point`.
pub const APPEND_STEP: f64 = 28.0;
/// Lower bound on the number of curve samples.
pub const MIN_LUT_STEPS: usize = 8;

pub fn default_base_line() -> Polyline {
    vec![
        Point::new(-10.0, 12.0),
        Point::new(42.0, -10.0),
        Point::new(58.0, -64.0),
        Point::new(-6.0, -112.0),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteTransform {
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    pub scale: f64,
}

impl Default for SpriteTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation_deg: 0.0,
            scale: 1.0,
        }
    }
}

impl SpriteTransform {
    /// Scale, then rotate, then translate.
    pub fn apply(&self, points: &[Point]) -> Polyline {
        let angle = to_rad(self.rotation_deg);
        let t = Point::new(self.x, self.y);
        points
            .iter()
            .map(|p| rotate_point(p * self.scale, angle) + t)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BezierContext {
    pub mode: BezierMode,
    /// Parameter of the handle shown in the editor; not used for sampling.
    pub t: f64,
    pub lut_steps: usize,
    pub offset: f64,
    pub scale: f64,
}

impl Default for BezierContext {
    fn default() -> Self {
        Self {
            mode: BezierMode::Cubic,
            t: 0.5,
            lut_steps: 48,
            offset: 0.0,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConstraints {
    /// Keep the first and last point on the local y-axis.
    pub endpoints_on_axis: bool,
    /// Points with `|x|` at most this snap onto the y-axis.
    pub snap_threshold: Option<f64>,
}

/// Named Bézier control roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BezierRole {
    P0,
    C0,
    C1,
    P1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovePoint {
    Last,
    Index(usize),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprite {
    pub id: String,
    pub points: Polyline,
    pub transform: SpriteTransform,
    pub bezier: BezierContext,
    pub enabled: bool,
    pub constraints: SpriteConstraints,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new("sprite-1")
    }
}

impl Sprite {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            points: default_base_line(),
            transform: SpriteTransform::default(),
            bezier: BezierContext::default(),
            enabled: true,
            constraints: SpriteConstraints::default(),
        }
    }

    /// Sampled curve in sprite-local space, scaled by `bezier.scale`.
    pub fn renderable_points(&self) -> Polyline {
        if self.points.len() <= 1 {
            return self.points.clone();
        }
        let steps = self.bezier.lut_steps.max(MIN_LUT_STEPS);
        sample_as(&self.points, self.bezier.mode, steps, self.bezier.offset)
            .into_iter()
            .map(|p| p * self.bezier.scale)
            .collect()
    }

    /// Renderable points placed in the slice by `transform`.
    pub fn slice_points(&self) -> Polyline {
        self.transform.apply(&self.renderable_points())
    }

    pub fn node_index(&self, role: BezierRole) -> Option<usize> {
        let n = self.points.len();
        if n == 0 {
            return None;
        }
        match role {
            BezierRole::P0 => Some(0),
            BezierRole::P1 => Some(n - 1),
            BezierRole::C0 => (n >= 3).then_some(1),
            BezierRole::C1 => (n >= 4).then_some(n - 2),
        }
    }

    pub fn node_point(&self, role: BezierRole) -> Option<Point> {
        self.node_index(role).map(|i| self.points[i])
    }

    pub fn available_roles(&self) -> Vec<BezierRole> {
        let mut roles = vec![BezierRole::P0];
        if self.points.len() >= 3 {
            roles.push(BezierRole::C0);
        }
        if self.points.len() >= 4 {
            roles.push(BezierRole::C1);
        }
        roles.push(BezierRole::P1);
        roles
    }

    /// Apply the sprite's constraints to a proposed point for handle `index`.
    pub fn constrain(&self, index: usize, p: Point) -> Point {
        if !self.constraints.endpoints_on_axis || self.points.is_empty() {
            return p;
        }
        let is_endpoint = index == 0 || index == self.points.len() - 1;
        let p = if is_endpoint { Point::new(0.0, p.y) } else { p };
        match self.constraints.snap_threshold {
            Some(th) if p.x.abs() <= th => Point::new(0.0, p.y),
            _ => p,
        }
    }

    /// Re-apply endpoint constraints to the stored points.
    pub fn normalized(&self) -> Sprite {
        let mut out = self.clone();
        if !self.constraints.endpoints_on_axis || out.points.is_empty() {
            return out;
        }
        let last = out.points.len() - 1;
        for i in [0, last] {
            out.points[i].x = 0.0;
        }
        out
    }

    /// Move handle `index` to `global` given the rosette `center` and base rotation.
    ///
    /// Out-of-range indices leave the sprite unchanged.
    pub fn with_handle_local(
        &self,
        index: usize,
        global: Point,
        center: Point,
        base_rotation: f64,
    ) -> Sprite {
        if index >= self.points.len() {
            report(&Diagnostic::HandleOutOfRange {
                index,
                len: self.points.len(),
            });
            return self.clone();
        }
        let local = rotate_point(global - center, -base_rotation);
        let mut out = self.clone();
        out.points[index] = self.constrain(index, local);
        out.normalized()
    }

    /// Move the control point that plays `role`; no-op if the role is absent.
    pub fn with_node_local(
        &self,
        role: BezierRole,
        global: Point,
        center: Point,
        base_rotation: f64,
    ) -> Sprite {
        match self.node_index(role) {
            Some(i) => self.with_handle_local(i, global, center, base_rotation),
            None => self.clone(),
        }
    }

    /// Extend the last segment by `APPEND_STEP`.
    pub fn with_appended_point(&self) -> Sprite {
        let Some(&last) = self.points.last() else {
            return self.clone();
        };
        let prev = if self.points.len() >= 2 {
            self.points[self.points.len() - 2]
        } else {
            Point::new(last.x - 30.0, last.y)
        };
        let dir = last - prev;
        let len = dir.norm();
        let len = if len > 0.0 { len } else { 1.0 };
        let mut out = self.clone();
        out.points.push(last + dir / len * APPEND_STEP);
        out.normalized()
    }

    /// Insert the midpoint of segment `index` (clamped to a valid segment).
    pub fn with_midpoint(&self, index: usize) -> Sprite {
        if self.points.len() < 2 {
            return self.clone();
        }
        let i = index.min(self.points.len() - 2);
        let mid = (self.points[i] + self.points[i + 1]) / 2.0;
        let mut out = self.clone();
        out.points.insert(i + 1, mid);
        out.normalized()
    }

    /// Remove a point; never goes below two points and never drops an endpoint by index.
    pub fn without_point(&self, which: RemovePoint) -> Sprite {
        let n = self.points.len();
        if n <= 2 {
            return self.clone();
        }
        let mut out = self.clone();
        match which {
            RemovePoint::Last => {
                out.points.pop();
            }
            RemovePoint::Index(i) if i > 0 && i < n - 1 => {
                out.points.remove(i);
            }
            RemovePoint::Index(_) => return out,
        }
        out.normalized()
    }
}

/// The set of sprites composed into one rosette slice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slice {
    pub active_sprite_id: String,
    pub sprites: Vec<Sprite>,
}

impl Default for Slice {
    fn default() -> Self {
        let sprite = Sprite::default();
        Self {
            active_sprite_id: sprite.id.clone(),
            sprites: vec![sprite],
        }
    }
}

impl Slice {
    /// The active sprite, else the first one.
    pub fn active_sprite(&self) -> Option<&Sprite> {
        self.sprites
            .iter()
            .find(|s| s.id == self.active_sprite_id)
            .or_else(|| self.sprites.first())
    }

    /// Slice-space polylines of every enabled sprite, in slice order.
    pub fn enabled_polylines(&self) -> Vec<Polyline> {
        self.sprites
            .iter()
            .filter(|s| s.enabled)
            .map(Sprite::slice_points)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use std::f64::consts::FRAC_PI_2;

    fn axis_sprite() -> Sprite {
        Sprite {
            constraints: SpriteConstraints {
                endpoints_on_axis: true,
                snap_threshold: Some(10.0),
            },
            ..Sprite::new("s")
        }
    }

    #[test]
    fn renderable_points_sample_and_scale() {
        let mut s = Sprite::new("s");
        s.bezier.lut_steps = 3; // raised to the minimum
        s.bezier.scale = 2.0;
        let pts = s.renderable_points();
        assert_eq!(pts.len(), MIN_LUT_STEPS);
        assert!((pts[0] - s.points[0] * 2.0).norm() < 1e-12);
        assert!((pts[MIN_LUT_STEPS - 1] - s.points[3] * 2.0).norm() < 1e-12);
        // Quadratic mode on three points.
        s.points.truncate(3);
        s.bezier.mode = BezierMode::Quadratic;
        assert_eq!(s.renderable_points().len(), MIN_LUT_STEPS);
        // Cubic mode with three points leaves them raw (still scaled).
        s.bezier.mode = BezierMode::Cubic;
        assert_eq!(s.renderable_points().len(), 3);
        // A single point is returned untouched.
        s.points.truncate(1);
        assert_eq!(s.renderable_points(), vec![vector![-10.0, 12.0]]);
    }

    #[test]
    fn transform_scales_rotates_translates() {
        let t = SpriteTransform {
            x: 5.0,
            y: -1.0,
            rotation_deg: 90.0,
            scale: 2.0,
        };
        let out = t.apply(&[vector![1.0, 0.0]]);
        assert!((out[0] - vector![5.0, 1.0]).norm() < 1e-12);
    }

    #[test]
    fn node_roles_by_point_count() {
        let mut s = Sprite::new("s");
        assert_eq!(s.node_index(BezierRole::C1), Some(2));
        assert_eq!(s.available_roles().len(), 4);
        s.points.truncate(3);
        assert_eq!(s.node_index(BezierRole::C1), None);
        assert_eq!(s.node_index(BezierRole::C0), Some(1));
        assert_eq!(s.node_index(BezierRole::P1), Some(2));
        assert_eq!(
            s.available_roles(),
            vec![BezierRole::P0, BezierRole::C0, BezierRole::P1]
        );
        s.points.clear();
        assert_eq!(s.node_index(BezierRole::P0), None);
    }

    #[test]
    fn handle_update_unrotates_and_constrains() {
        let s = axis_sprite().normalized();
        assert_eq!(s.points[0].x, 0.0);
        assert_eq!(s.points[3].x, 0.0);
        let center = vector![100.0, 100.0];
        // Global (100, 150) under a quarter-turn base rotation is local (50, 0).
        let moved = s.with_handle_local(1, vector![100.0, 150.0], center, FRAC_PI_2);
        assert!((moved.points[1] - vector![50.0, 0.0]).norm() < 1e-9);
        // Interior point near the axis snaps onto it.
        let snapped = s.with_handle_local(2, vector![105.0, 130.0], center, 0.0);
        assert_eq!(snapped.points[2], vector![0.0, 30.0]);
        // Endpoint always lands on the axis.
        let end = s.with_handle_local(0, vector![180.0, 90.0], center, 0.0);
        assert_eq!(end.points[0], vector![0.0, -10.0]);
        // Out of range is a no-op.
        assert_eq!(s.with_handle_local(9, center, center, 0.0), s);
    }

    #[test]
    fn node_update_targets_role() {
        let s = Sprite::new("s");
        let moved = s.with_node_local(BezierRole::C1, vector![1.0, 2.0], Point::zeros(), 0.0);
        assert_eq!(moved.points[2], vector![1.0, 2.0]);
        let mut two = Sprite::new("s");
        two.points.truncate(2);
        assert_eq!(
            two.with_node_local(BezierRole::C0, vector![1.0, 2.0], Point::zeros(), 0.0),
            two
        );
    }

    #[test]
    fn append_extends_last_direction() {
        let mut s = Sprite::new("s");
        s.points = vec![vector![0.0, 0.0], vector![0.0, 10.0]];
        let out = s.with_appended_point();
        assert_eq!(out.points.len(), 3);
        assert!((out.points[2] - vector![0.0, 10.0 + APPEND_STEP]).norm() < 1e-12);
        s.points = vec![vector![3.0, 3.0]];
        let single = s.with_appended_point();
        assert!((single.points[1] - vector![3.0 + APPEND_STEP, 3.0]).norm() < 1e-12);
    }

    #[test]
    fn midpoint_and_removal() {
        let s = Sprite::new("s");
        let m = s.with_midpoint(99);
        assert_eq!(m.points.len(), 5);
        assert_eq!(m.points[3], (s.points[2] + s.points[3]) / 2.0);
        assert_eq!(s.without_point(RemovePoint::Last).points.len(), 3);
        assert_eq!(s.without_point(RemovePoint::Index(0)), s);
        assert_eq!(s.without_point(RemovePoint::Index(3)), s);
        let removed = s.without_point(RemovePoint::Index(1));
        assert_eq!(removed.points[1], s.points[2]);
        let mut two = s.clone();
        two.points.truncate(2);
        assert_eq!(two.without_point(RemovePoint::Last), two);
    }

    #[test]
    fn slice_filters_disabled_and_falls_back_active() {
        let mut slice = Slice::default();
        let mut second = Sprite::new("sprite-2");
        second.enabled = false;
        slice.sprites.push(second);
        assert_eq!(slice.enabled_polylines().len(), 1);
        slice.active_sprite_id = "missing".into();
        assert_eq!(slice.active_sprite().unwrap().id, "sprite-1");
        assert!(Slice {
            active_sprite_id: String::new(),
            sprites: vec![]
        }
        .active_sprite()
        .is_none());
    }
}
