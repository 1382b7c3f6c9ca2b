use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bevy::prelude::Resource;
use serde::Deserialize;
use tracing::info;

use trailcore::TrailSpec;

/// Top-level config file schema. Everything defaults, so an empty or missing
/// file yields the stock white trail.
#[derive(Debug, Clone, Default, Deserialize, Resource)]
#[serde(default)]
pub struct ViewerConfig {
    pub trail: TrailSpec,
}

pub fn load_config(path: &str) -> Result<ViewerConfig> {
    if !Path::new(path).exists() {
        info!(path, "no config file, using built-in trail defaults");
        return Ok(ViewerConfig::default());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config = toml::from_str(&raw).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}
