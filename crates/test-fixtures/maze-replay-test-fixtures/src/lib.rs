//! Recorded maze-run trajectories shared by the replay crates' tests.
//!
//! `fixtures/manifest.json` maps a short run name to a `{"keyframes": [...]}`
//! document under `fixtures/`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Manifest {
    trajectories: BTreeMap<String, String>,
}

static RUNS: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    let manifest: Manifest =
        serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
            .expect("fixtures manifest should parse");
    manifest.trajectories
});

pub mod trajectories {
    use super::*;

    /// Run names in sorted order.
    pub fn keys() -> Vec<String> {
        RUNS.keys().cloned().collect()
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = RUNS
            .get(name)
            .with_context(|| format!("unknown trajectory fixture '{name}'"))?;
        Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    /// Raw JSON text of a run.
    pub fn json(name: &str) -> Result<String> {
        let path = path(name)?;
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read trajectory {}", path.display()))
    }

    /// Decode a run; the replay crates pass `TrajectoryProfile`.
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        serde_json::from_str(&json(name)?)
            .with_context(|| format!("trajectory '{name}' is not valid for the requested type"))
    }
}
