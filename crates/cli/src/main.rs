use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rosette::geom::Point;
use rosette::lattice::{build_lattice, LatticeKind};
use rosette::pipeline::{derive_geometry, mechanism_cfg};
use rosette::project::ProjectParams;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod provenance;

use provenance::{write_json, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "rosette")]
#[command(about = "Rosette and tessellation geometry from the command line")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate lattice cells and write them as JSON
    Lattice {
        #[arg(long, value_enum, default_value_t = KindArg::Hex)]
        kind: KindArg,
        #[arg(long, default_value_t = 1)]
        rings: u32,
        #[arg(long, default_value_t = 220.0)]
        spacing: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Build the tessellation mechanism (cells, edges, poses) for a parameter file
    Mechanism {
        /// Project parameters (JSON); defaults when omitted
        #[arg(long)]
        params: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Build the rosette curves for a parameter file, translated to a center
    Rosette {
        #[arg(long)]
        params: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0.0)]
        center_x: f64,
        #[arg(long, default_value_t = 0.0)]
        center_y: f64,
    },
    /// Sample a curve through control points and print the polyline
    Sample {
        /// Control points as "x,y;x,y;..."
        #[arg(long)]
        points: String,
        #[arg(long, default_value_t = 48)]
        steps: usize,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        offset: f64,
    },
    /// Print the default parameters and engine version
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Hex,
    Square,
}

impl From<KindArg> for LatticeKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Hex => LatticeKind::Hex,
            KindArg::Square => LatticeKind::Square,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Lattice {
            kind,
            rings,
            spacing,
            out,
        } => lattice(kind.into(), rings, spacing, &out),
        Action::Mechanism { params, out } => mechanism(params.as_deref(), &out),
        Action::Rosette {
            params,
            out,
            center_x,
            center_y,
        } => rosette_curves(params.as_deref(), &out, Point::new(center_x, center_y)),
        Action::Sample {
            points,
            steps,
            offset,
        } => sample(&points, steps, offset),
        Action::Report => report(),
    }
}

fn lattice(kind: LatticeKind, rings: u32, spacing: f64, out: &Path) -> Result<()> {
    if !(spacing.is_finite() && spacing > 0.0) {
        bail!("spacing must be positive, got {spacing}");
    }
    tracing::info!(?kind, rings, spacing, out = %out.display(), "lattice");
    let cells = build_lattice(kind, rings, spacing);
    write_json(out, &json!({ "cells": cells }))?;
    write_sidecar(
        out,
        Payload::new(
            "lattice",
            json!({ "kind": kind, "rings": rings, "spacing": spacing }),
        ),
    )?;
    Ok(())
}

fn mechanism(params_path: Option<&Path>, out: &Path) -> Result<()> {
    let params = load_params(params_path)?;
    tracing::info!(out = %out.display(), "mechanism");
    let derived = derive_geometry(&params, Point::zeros());
    let cfg = mechanism_cfg(&params);
    tracing::info!(
        cells = derived.mechanism.cells.len(),
        edges = derived.mechanism.edges.len(),
        inter_cell_rotation = cfg.inter_cell_rotation,
        "mechanism_built"
    );
    write_json(out, &serde_json::to_value(&derived.mechanism)?)?;
    write_sidecar(out, Payload::new("mechanism", serde_json::to_value(&params)?))?;
    Ok(())
}

fn rosette_curves(params_path: Option<&Path>, out: &Path, center: Point) -> Result<()> {
    let params = load_params(params_path)?;
    tracing::info!(out = %out.display(), cx = center.x, cy = center.y, "rosette");
    let derived = derive_geometry(&params, center);
    tracing::info!(curves = derived.centered_curves.len(), "rosette_built");
    write_json(out, &json!({ "curves": derived.centered_curves }))?;
    write_sidecar(out, Payload::new("rosette", serde_json::to_value(&params)?))?;
    Ok(())
}

fn sample(points: &str, steps: usize, offset: f64) -> Result<()> {
    let controls = parse_points(points)?;
    let polyline = rosette::curve::sample(&controls, steps, offset);
    println!("{}", serde_json::to_string_pretty(&polyline)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "engine_version": rosette::VERSION,
        "allowed_orders": rosette::project::allowed_orders(),
        "defaults": ProjectParams::default(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Read and sanitize a parameter file; `None` gives the defaults.
fn load_params(path: Option<&Path>) -> Result<ProjectParams> {
    let Some(path) = path else {
        return Ok(ProjectParams::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading params {}", path.display()))?;
    let params: ProjectParams = serde_json::from_str(&text)
        .with_context(|| format!("parsing params {}", path.display()))?;
    Ok(params.sanitized())
}

/// Parse `"x,y;x,y;..."`; blank entries are skipped.
fn parse_points(text: &str) -> Result<Vec<Point>> {
    text.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| -> Result<Point> {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("point {pair:?} is not x,y"))?;
            let x: f64 = x.trim().parse().with_context(|| format!("bad x in {pair:?}"))?;
            let y: f64 = y.trim().parse().with_context(|| format!("bad y in {pair:?}"))?;
            Ok(Point::new(x, y))
        })
        .collect()
}
