//! Duskfall server host: boots telemetry, wires the in-process
//! collaborators, loads spawn content, and seeds one lair per spawn area.

use std::sync::Arc;

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng, rngs::StdRng};

use duskfall::data;
use duskfall::server;
use duskfall::server::SpawnService;
use duskfall::server::areas::SpawnArea;
use duskfall::server::collab::{
    CollisionFactory, FsDefinitionSource, ObjectAllocator, Simulation, StaticTerrain,
    TerrainService,
};

fn main() -> Result<()> {
    let telemetry_cfg = data::configs::telemetry::load_default().unwrap_or_default();
    let _guard = server::telemetry::init_telemetry(&telemetry_cfg)?;

    let worlds = data::configs::worlds::load_default().context("load worlds config")?;
    let terrain = Arc::new(StaticTerrain::from_worlds(&worlds));
    let objects = Arc::new(ObjectAllocator::default());
    let simulation = Arc::new(Simulation::default());
    let templates = Arc::new(data::registry::TemplateRegistry::new());
    let svc = SpawnService::new(
        templates,
        terrain.clone(),
        objects,
        simulation.clone(),
        Arc::new(CollisionFactory),
    );

    let counts =
        server::content::load_all(&svc, &FsDefinitionSource, &data::data_root());
    if counts.spawn_areas == 0 {
        log::warn!("no spawn areas loaded; the world will be empty");
    }

    // Deterministic initial seeding, one lair per area.
    let mut rng = StdRng::seed_from_u64(0xD05A);
    let mut seeded = 0usize;
    for planet in terrain.planets() {
        for area in svc.areas_for(planet.id) {
            let SpawnArea::Lair(lair_area) = &*area;
            let level = rng.gen_range(1..=5);
            if svc.spawn_from_area(lair_area, &mut rng, level).is_some() {
                seeded += 1;
            }
        }
    }
    log::info!(
        "spawn: seeded {seeded} lairs across {} planets; simulation holds {} entities, {} collidables",
        terrain.planets().len(),
        simulation.len(),
        simulation.collidable_count()
    );
    Ok(())
}
