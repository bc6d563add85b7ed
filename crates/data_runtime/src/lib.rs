//! data_runtime: template schemas and loaders for the spawn subsystem.
//!
//! Holds the immutable-after-load template catalog (mobiles, lairs, lair
//! groups), the concurrent registry that serves it to simulation threads,
//! and the TOML definition/config loaders. Keep this crate free of world
//! state; runtime services convert templates into live entities in
//! `server_core`.

use std::path::PathBuf;

pub mod defs;
pub mod registry;
pub mod templates;
pub mod configs {
    pub mod telemetry;
    pub mod worlds;
}

/// Resolve the workspace `data/` directory so loaders work from any crate.
pub fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}
