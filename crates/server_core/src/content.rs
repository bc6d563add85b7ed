//! Loader adapter: feeds the registries and the area index from definition
//! files, one category at a time.
//!
//! Category directories live under `data/mobiles/`. A file that fails to
//! parse or register is logged and skipped; a category whose directory
//! cannot be enumerated is logged and skipped; the remaining categories
//! still load. Re-running a load is harmless for keyed content (last writer
//! wins in the registry).

use std::path::Path;

use data_runtime::defs;

use crate::SpawnService;
use crate::collab::DefinitionSource;

pub const CREATURES_DIR: &str = "mobiles/creatures";
pub const LAIRS_DIR: &str = "mobiles/lairs";
pub const LAIR_GROUPS_DIR: &str = "mobiles/lairgroups";
pub const SPAWN_AREAS_DIR: &str = "mobiles/spawnareas";

/// Per-category counts of successfully registered definitions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContentCounts {
    pub mobiles: usize,
    pub lairs: usize,
    pub lair_groups: usize,
    pub spawn_areas: usize,
}

fn walk(source: &dyn DefinitionSource, dir: &Path, per_file: &mut dyn FnMut(&Path) -> bool) -> usize {
    let mut loaded = 0usize;
    if let Err(e) = source.for_each_definition_file(dir, &mut |path| {
        if per_file(path) {
            loaded += 1;
        }
    }) {
        log::warn!("content: skipping category {}: {e:#}", dir.display());
    }
    loaded
}

pub fn load_mobile_templates(
    svc: &SpawnService,
    source: &dyn DefinitionSource,
    root: &Path,
) -> usize {
    walk(source, &root.join(CREATURES_DIR), &mut |path| {
        match defs::load_mobile(path) {
            Ok(t) => match svc.templates().register_mobile(t) {
                Ok(()) => {
                    metrics::counter!("content.files_total", "category" => "creatures")
                        .increment(1);
                    true
                }
                Err(e) => {
                    log::warn!("content: rejected {}: {e}", path.display());
                    false
                }
            },
            Err(e) => {
                log::warn!("content: skipping {}: {e:#}", path.display());
                false
            }
        }
    })
}

pub fn load_lair_templates(
    svc: &SpawnService,
    source: &dyn DefinitionSource,
    root: &Path,
) -> usize {
    walk(source, &root.join(LAIRS_DIR), &mut |path| {
        match defs::load_lair(path) {
            Ok(t) => {
                match svc
                    .templates()
                    .register_lair(&t.name, &t.mobile, t.mobile_limit, t.lair_crc)
                {
                    Ok(()) => {
                        metrics::counter!("content.files_total", "category" => "lairs")
                            .increment(1);
                        true
                    }
                    Err(e) => {
                        log::warn!("content: rejected {}: {e}", path.display());
                        false
                    }
                }
            }
            Err(e) => {
                log::warn!("content: skipping {}: {e:#}", path.display());
                false
            }
        }
    })
}

pub fn load_lair_groups(svc: &SpawnService, source: &dyn DefinitionSource, root: &Path) -> usize {
    walk(source, &root.join(LAIR_GROUPS_DIR), &mut |path| {
        match defs::load_lair_group(path) {
            Ok(g) => match svc.templates().register_lair_group(&g.name, g.lairs) {
                Ok(()) => {
                    metrics::counter!("content.files_total", "category" => "lairgroups")
                        .increment(1);
                    true
                }
                Err(e) => {
                    log::warn!("content: rejected {}: {e}", path.display());
                    false
                }
            },
            Err(e) => {
                log::warn!("content: skipping {}: {e:#}", path.display());
                false
            }
        }
    })
}

pub fn load_spawn_areas(svc: &SpawnService, source: &dyn DefinitionSource, root: &Path) -> usize {
    walk(source, &root.join(SPAWN_AREAS_DIR), &mut |path| {
        match defs::load_spawn_area(path) {
            Ok(a) => {
                let ok = svc.add_lair_spawn_area(&a.lair_group, a.x, a.z, a.radius, &a.planet);
                if ok {
                    metrics::counter!("content.files_total", "category" => "spawnareas")
                        .increment(1);
                }
                ok
            }
            Err(e) => {
                log::warn!("content: skipping {}: {e:#}", path.display());
                false
            }
        }
    })
}

/// Load every category. Lair groups load before spawn areas so areas can
/// resolve their group; the template categories tolerate any order.
pub fn load_all(svc: &SpawnService, source: &dyn DefinitionSource, root: &Path) -> ContentCounts {
    let counts = ContentCounts {
        mobiles: load_mobile_templates(svc, source, root),
        lairs: load_lair_templates(svc, source, root),
        lair_groups: load_lair_groups(svc, source, root),
        spawn_areas: load_spawn_areas(svc, source, root),
    };
    log::info!(
        "content: loaded {} creatures, {} lairs, {} lair groups, {} spawn areas",
        counts.mobiles,
        counts.lairs,
        counts.lair_groups,
        counts.spawn_areas
    );
    counts
}
