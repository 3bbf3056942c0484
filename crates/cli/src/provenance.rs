use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;
use symtile::Engine;

/// Metadata recorded next to a CLI output.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
    pub engine: Value,
}

impl Payload {
    pub fn new(command: &'static str, params: Value, engine: &Engine) -> Self {
        Self {
            command,
            params,
            engine: engine_constants(engine),
        }
    }
}

/// Board and tolerance values in force.
pub fn engine_constants(engine: &Engine) -> Value {
    let (a, t) = (&engine.area, &engine.tol);
    json!({
        "version": symtile::VERSION,
        "area": {
            "width": a.width,
            "height": a.height,
            "mirror_line_x": a.mirror_line_x,
            "tile_size": a.tile_size
        },
        "tolerances": {
            "mirror_contact": t.mirror_contact,
            "separation_gap": t.separation_gap,
            "significant_overlap": t.significant_overlap,
            "contact_penetration": t.contact_penetration,
            "contact_gap": t.contact_gap,
            "snap_inset": t.snap_inset,
            "snap_min_score": t.snap_min_score,
            "antiparallel_cos": t.antiparallel_cos
        }
    })
}

/// Write `<artifact>.provenance.json` with the git commit, callsite, command, params and engine constants.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "command": payload.command,
        "params": payload.params,
        "engine": payload.engine,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    tracing::debug!(path = %provenance_path.display(), "provenance written");
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
