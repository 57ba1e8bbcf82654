use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

const SIDECAR_EXT: &str = "provenance.json";
const SIDECAR_FALLBACK: &str = "artifact.provenance.json";
const UNKNOWN_REV: &str = "unknown";

/// What produced an output file: the subcommand and its effective parameters.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self { command, params }
    }
}

/// Write `value` as pretty JSON to `out`, creating parent directories.
pub fn write_json<P: AsRef<Path>>(out: P, value: &Value) -> Result<()> {
    let out = out.as_ref();
    ensure_parent(out)?;
    fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

/// Write `<artifact>.provenance.json` with the git revision, engine version,
/// callsite, command, parameters and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    ensure_parent(&provenance_path)?;

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "engine_version": rosette::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "command": payload.command,
        "params": payload.params,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    tracing::debug!(path = %provenance_path.display(), "provenance");
    Ok(provenance_path)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

/// `out/mech.json` → `out/mech.provenance.json`; extensionless names get the
/// suffix appended.
fn provenance_path(artifact: &Path) -> PathBuf {
    if artifact.file_name().is_none() {
        return artifact.join(SIDECAR_FALLBACK);
    }
    artifact.with_extension(SIDECAR_EXT)
}

/// Revision stamped into sidecars: `GIT_COMMIT` baked in at build time, then
/// set at run time, then `git rev-parse HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .into_iter()
        .chain(std::env::var("GIT_COMMIT").ok())
        .chain(std::iter::once_with(git_head).flatten())
        .find(|rev| !rev.is_empty())
        .unwrap_or_else(|| UNKNOWN_REV.to_owned())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout).ok().map(|s| s.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_replaces_extension() {
        let base = Path::new("/tmp/output/mechanism.json");
        let derived = provenance_path(base);
        assert_eq!(derived, Path::new("/tmp/output/mechanism.provenance.json"));
        assert_eq!(provenance_path(Path::new("out/curves")), Path::new("out/curves.provenance.json"));
        assert_eq!(
            provenance_path(Path::new("a.b.json")),
            Path::new("a.b.provenance.json")
        );
    }

    #[test]
    fn git_rev_is_never_empty() {
        assert!(!current_git_rev().is_empty());
    }

    #[test]
    fn sidecar_records_command_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested").join("lattice.json");
        write_json(&artifact, &json!({"cells": []})).unwrap();
        let payload = Payload::new("lattice", json!({"rings": 2}));
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        assert!(prov_path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().to_string());
        assert_eq!(parsed["command"], "lattice");
        assert_eq!(parsed["params"]["rings"], 2);
        assert_eq!(parsed["engine_version"], rosette::VERSION);
    }
}
