use crate::diagnostics::{report_all, Diagnostic};
use crate::geom::{unit_or_axis, GeomCfg, Point, Polyline};

use super::BezierMode;

/// Parametric Bézier segment of degree 2 or 3.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bezier {
    Quadratic([Point; 3]),
    Cubic([Point; 4]),
}

impl Bezier {
    /// Pick the degree from the number of control points (3 → quadratic, ≥4 → cubic).
    pub fn from_control_points(points: &[Point]) -> Option<Self> {
        match points.len() {
            0..=2 => None,
            3 => Some(Bezier::Quadratic([points[0], points[1], points[2]])),
            _ => Some(Bezier::Cubic([points[0], points[1], points[2], points[3]])),
        }
    }

    /// Build a segment of an explicit degree; `None` if there are too few points.
    pub fn with_mode(points: &[Point], mode: BezierMode) -> Option<Self> {
        match mode {
            BezierMode::Quadratic if points.len() >= 3 => {
                Some(Bezier::Quadratic([points[0], points[1], points[2]]))
            }
            BezierMode::Cubic if points.len() >= 4 => {
                Some(Bezier::Cubic([points[0], points[1], points[2], points[3]]))
            }
            _ => None,
        }
    }

    pub fn start(&self) -> Point {
        match self {
            Bezier::Quadratic(p) => p[0],
            Bezier::Cubic(p) => p[0],
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Bezier::Quadratic(p) => p[2],
            Bezier::Cubic(p) => p[3],
        }
    }

    /// Point on the curve at parameter `t ∈ [0, 1]` (Bernstein form).
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        match self {
            Bezier::Quadratic([p0, p1, p2]) => {
                let (a, b, c) = (mt * mt, 2.0 * mt * t, t * t);
                p0 * a + p1 * b + p2 * c
            }
            Bezier::Cubic([p0, p1, p2, p3]) => {
                let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
                p0 * a + p1 * b + p2 * c + p3 * d
            }
        }
    }

    /// First derivative with respect to `t`.
    pub fn derivative(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        match self {
            Bezier::Quadratic([p0, p1, p2]) => (p1 - p0) * (2.0 * mt) + (p2 - p1) * (2.0 * t),
            Bezier::Cubic([p0, p1, p2, p3]) => {
                (p1 - p0) * (3.0 * mt * mt) + (p2 - p1) * (6.0 * mt * t) + (p3 - p2) * (3.0 * t * t)
            }
        }
    }

    pub fn control_points(&self) -> &[Point] {
        match self {
            Bezier::Quadratic(p) => p,
            Bezier::Cubic(p) => p,
        }
    }

    /// Left-hand unit normal at `t`. The bool reports that no control point
    /// gave a direction and the axis fallback was used.
    pub fn normal(&self, t: f64, cfg: GeomCfg) -> (Point, bool) {
        let (tangent, degenerate) = unit_or_axis(self.derivative(t), cfg);
        let (tangent, fallback) = if degenerate {
            self.limit_direction(t, cfg)
        } else {
            (tangent, false)
        };
        (Point::new(-tangent.y, tangent.x), fallback)
    }

    /// Direction the curve takes leaving a stationary point: toward the first
    /// control point distinct from the nearer endpoint, then the chord, then +x.
    fn limit_direction(&self, t: f64, cfg: GeomCfg) -> (Point, bool) {
        let pts = self.control_points();
        let Some((&first, rest)) = pts.split_first() else {
            return unit_or_axis(Point::zeros(), cfg);
        };
        let Some((&last, init)) = pts.split_last() else {
            return unit_or_axis(Point::zeros(), cfg);
        };
        let leaving = if t <= 0.5 {
            rest.iter().map(|p| p - first).find(|d| d.norm() > cfg.eps_len)
        } else {
            init.iter().rev().map(|p| last - p).find(|d| d.norm() > cfg.eps_len)
        };
        unit_or_axis(leaving.unwrap_or(self.end() - self.start()), cfg)
    }

    /// `steps` uniformly spaced samples, each shifted by `offset` along the normal.
    fn sample_offset(&self, steps: usize, offset: f64, cfg: GeomCfg) -> (Polyline, bool) {
        let steps = steps.max(2);
        let last = (steps - 1) as f64;
        let mut used_fallback = false;
        let pts: Polyline = (0..steps)
            .map(|i| {
                let t = i as f64 / last;
                let p = self.eval(t);
                if offset == 0.0 {
                    return p;
                }
                let (n, fallback) = self.normal(t, cfg);
                used_fallback |= fallback;
                p + n * offset
            })
            .collect();
        (pts, used_fallback)
    }
}

/// Sample a curve through `control_points`, choosing the degree from the point count.
///
/// Reports diagnostics through `tracing`; see `sample_with_diagnostics`.
pub fn sample(control_points: &[Point], steps: usize, offset: f64) -> Polyline {
    let (pts, diags) = sample_with_diagnostics(control_points, steps, offset);
    report_all(&diags);
    pts
}

pub fn sample_with_diagnostics(
    control_points: &[Point],
    steps: usize,
    offset: f64,
) -> (Polyline, Vec<Diagnostic>) {
    sample_segment(
        Bezier::from_control_points(control_points),
        control_points,
        steps,
        offset,
    )
}

/// Sample with an explicit degree; too few points for `mode` returns them unchanged.
pub fn sample_as(control_points: &[Point], mode: BezierMode, steps: usize, offset: f64) -> Polyline {
    let (pts, diags) = sample_as_with_diagnostics(control_points, mode, steps, offset);
    report_all(&diags);
    pts
}

pub fn sample_as_with_diagnostics(
    control_points: &[Point],
    mode: BezierMode,
    steps: usize,
    offset: f64,
) -> (Polyline, Vec<Diagnostic>) {
    sample_segment(
        Bezier::with_mode(control_points, mode),
        control_points,
        steps,
        offset,
    )
}

fn sample_segment(
    segment: Option<Bezier>,
    control_points: &[Point],
    steps: usize,
    offset: f64,
) -> (Polyline, Vec<Diagnostic>) {
    let Some(segment) = segment else {
        return (control_points.to_vec(), Vec::new());
    };
    let mut diags = Vec::new();
    let (pts, used_fallback) = segment.sample_offset(steps, offset, GeomCfg::default());
    if used_fallback {
        diags.push(Diagnostic::DegenerateDirection {
            what: "curve tangent",
        });
    }
    if pts.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        diags.push(Diagnostic::DegenerateSampling {
            control_points: control_points.len(),
        });
        return (control_points.to_vec(), diags);
    }
    (pts, diags)
}
