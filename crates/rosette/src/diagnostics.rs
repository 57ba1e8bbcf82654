//! Diagnostics channel for recoverable and developer-facing inconsistencies.
//!
//! Purpose
//! - The engine never returns errors for well-typed input. Conditions that
//!   need a fallback are described by a `Diagnostic`, logged through
//!   `tracing`, and optionally collected by `*_with_diagnostics` builders.
//! - A developer build can opt into halting on non-recoverable conditions by
//!   setting `ROSETTE_STRICT`; release builds only log.

use thiserror::Error;

/// A condition the engine detected and worked around.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Diagnostic {
    #[error("fixed cell {requested:?} not found among {cell_count} cells; using {fallback:?} as root")]
    UnresolvedFixedCell {
        requested: String,
        fallback: String,
        cell_count: usize,
    },
    #[error("duplicate lattice cell id {id:?} skipped")]
    DuplicateCellId { id: String },
    #[error("rosette order {order} is below 2; petal indices collapse")]
    DegenerateOrder { order: usize },
    #[error("curve sampling produced non-finite points ({control_points} control points); returning control points")]
    DegenerateSampling { control_points: usize },
    #[error("zero-length {what} direction; substituting the +x axis")]
    DegenerateDirection { what: &'static str },
    #[error("handle index {index} out of range for {len} points")]
    HandleOutOfRange { index: usize, len: usize },
    #[error("parameter {field} adjusted from {from} to {to}")]
    ParamAdjusted {
        field: &'static str,
        from: f64,
        to: f64,
    },
}

impl Diagnostic {
    /// Whether computation can safely continue with the documented fallback.
    ///
    /// Only a duplicate cell id signals a caller bug worth halting on in
    /// developer mode; everything else is routine input clamping.
    pub fn recoverable(&self) -> bool {
        !matches!(self, Diagnostic::DuplicateCellId { .. })
    }
}

/// Log a diagnostic. In debug builds with `ROSETTE_STRICT` set, a
/// non-recoverable diagnostic panics.
pub fn report(diag: &Diagnostic) {
    if diag.recoverable() {
        tracing::warn!(recoverable = true, "{diag}");
        return;
    }
    tracing::error!(recoverable = false, "{diag}");
    #[cfg(debug_assertions)]
    if std::env::var_os("ROSETTE_STRICT").is_some() {
        panic!("{diag}");
    }
}

/// Report every diagnostic in order.
pub fn report_all(diags: &[Diagnostic]) {
    for d in diags {
        report(d);
    }
}
