//! World list configuration (`data/config/worlds.toml`).
//!
//! The terrain service is seeded from this at boot; the spawn subsystem
//! itself never reads it directly.

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorldsCfg {
    #[serde(default)]
    pub planets: Vec<PlanetCfg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanetCfg {
    pub id: u32,
    pub name: String,
}

/// Load `data/config/worlds.toml`; a missing file yields an empty world
/// list so a bare checkout still boots.
pub fn load_default() -> Result<WorldsCfg> {
    let path = crate::data_root().join("config/worlds.toml");
    if !path.is_file() {
        return Ok(WorldsCfg::default());
    }
    let txt =
        std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&txt).context("parse worlds TOML")
}
