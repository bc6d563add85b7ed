//! Definition-file parsing. One TOML file per template or spawn area, laid
//! out under `data/mobiles/{mobiles,lairs,lairgroups,spawnareas}/`.
//!
//! Template files deserialize straight into the `templates` types; spawn
//! area files carry a placement instruction resolved by the server at load
//! time (group and planet are looked up by name, in whatever order the
//! directories were walked).

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::templates::{LairGroupTemplate, LairTemplate, MobileTemplate};

/// Load-time instruction to create a lair spawn area.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpawnAreaDef {
    pub lair_group: String,
    pub planet: String,
    pub x: f32,
    pub z: f32,
    pub radius: f32,
}

fn parse_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("read definition {}", path.display()))?;
    toml::from_str(&txt).with_context(|| format!("parse definition {}", path.display()))
}

pub fn load_mobile(path: &Path) -> Result<MobileTemplate> {
    parse_toml(path)
}

pub fn load_lair(path: &Path) -> Result<LairTemplate> {
    parse_toml(path)
}

pub fn load_lair_group(path: &Path) -> Result<LairGroupTemplate> {
    parse_toml(path)
}

pub fn load_spawn_area(path: &Path) -> Result<SpawnAreaDef> {
    parse_toml(path)
}
