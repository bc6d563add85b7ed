//! Server-authoritative spawn subsystem.
//!
//! `SpawnService` owns the per-planet spawn-area index and the orchestration
//! that turns templates into live entities: resolve template, materialize
//! through the object collaborator, configure combat flags and the AI
//! attachment, then hand the entity to the simulation. Missing content is
//! always a logged no-op, never a fault.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use glam::{Quat, Vec3};
use rand::Rng;

use data_runtime::registry::TemplateRegistry;

pub mod ai;
pub mod areas;
pub mod collab;
pub mod content;
pub mod object;
pub mod telemetry;

use ai::LairActor;
use areas::{LairSpawnArea, SpawnArea};
use collab::{
    CollisionService, ObjectService, PlanetId, SimulationService, TerrainService,
};
use object::{ObjectId, options, pvp};

/// Damage ceiling per lair level.
pub const DAMAGE_PER_LEVEL: i32 = 1000;

/// Attachment key lair AI actors live under.
pub const AI_ATTACHMENT: &str = "AI";

pub struct SpawnService {
    templates: Arc<TemplateRegistry>,
    terrain: Arc<dyn TerrainService>,
    objects: Arc<dyn ObjectService>,
    simulation: Arc<dyn SimulationService>,
    collision: Arc<dyn CollisionService>,
    areas: RwLock<HashMap<PlanetId, Vec<Arc<SpawnArea>>>>,
}

impl SpawnService {
    /// Build the service and seed one (empty) area list per terrain planet,
    /// so `areas_for` never reports absence for a known planet.
    pub fn new(
        templates: Arc<TemplateRegistry>,
        terrain: Arc<dyn TerrainService>,
        objects: Arc<dyn ObjectService>,
        simulation: Arc<dyn SimulationService>,
        collision: Arc<dyn CollisionService>,
    ) -> Self {
        let mut areas = HashMap::new();
        for planet in terrain.planets() {
            areas.insert(planet.id, Vec::new());
        }
        Self {
            templates,
            terrain,
            objects,
            simulation,
            collision,
            areas: RwLock::new(areas),
        }
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Insertion-ordered snapshot of a planet's spawn areas. Planets without
    /// registered areas yield an empty list.
    pub fn areas_for(&self, planet: PlanetId) -> Vec<Arc<SpawnArea>> {
        self.areas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&planet)
            .cloned()
            .unwrap_or_default()
    }

    pub fn add_area(&self, planet: PlanetId, area: SpawnArea) {
        self.areas
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(planet)
            .or_default()
            .push(Arc::new(area));
    }

    /// Create a lair spawn area bound to `group` on `planet_name`. Unknown
    /// group or planet makes the whole call a logged no-op: the index and
    /// the collision registration only ever change together.
    pub fn add_lair_spawn_area(
        &self,
        group: &str,
        x: f32,
        z: f32,
        radius: f32,
        planet_name: &str,
    ) -> bool {
        let Some(lair_group) = self.templates.lookup_lair_group(group) else {
            log::warn!("spawn: area references unknown lair group '{group}'");
            metrics::counter!("spawn.area_rejected_total", "reason" => "group").increment(1);
            return false;
        };
        let Some(planet) = self.terrain.planet_by_name(planet_name) else {
            log::warn!("spawn: area references unknown planet '{planet_name}'");
            metrics::counter!("spawn.area_rejected_total", "reason" => "planet").increment(1);
            return false;
        };
        let circle = self
            .collision
            .make_circle(Vec3::new(x, 0.0, z), radius, planet.id);
        let area = SpawnArea::Lair(LairSpawnArea {
            planet: planet.id,
            circle: circle.clone(),
            lair_group,
        });
        self.add_area(planet.id, area);
        self.simulation.add_collidable(circle, x, z);
        true
    }

    /// Ambient creature spawn: resolve the mobile template, materialize, and
    /// register with the simulation. No combat flags or ceiling; lairs drive
    /// those for their own spawns.
    pub fn spawn_creature(
        &self,
        template: &str,
        planet: PlanetId,
        position: Vec3,
    ) -> Option<ObjectId> {
        let Some(mobile) = self.templates.lookup_mobile(template) else {
            log::warn!("spawn: unknown mobile template '{template}'");
            metrics::counter!("spawn.unknown_template_total", "kind" => "mobile").increment(1);
            return None;
        };
        let Some(object) =
            self.objects
                .create_object(mobile.creature_crc, 0, planet, position, Quat::IDENTITY)
        else {
            log::warn!("spawn: failed to materialize mobile '{}'", mobile.name);
            metrics::counter!("spawn.materialize_failed_total").increment(1);
            return None;
        };
        let id = object.id();
        self.simulation.add(object, position.x, position.z, true);
        metrics::counter!("spawn.creatures_total").increment(1);
        Some(id)
    }

    /// Spawn a lair entity from a lair template. Unknown template or failed
    /// materialization is a no-op; on success the entity is made attackable
    /// in both flag domains, capped at `1000 * level` damage, given its AI
    /// actor, and only then registered with the simulation.
    pub fn spawn_lair(
        &self,
        template: &str,
        planet: PlanetId,
        position: Vec3,
        level: i32,
    ) -> Option<ObjectId> {
        let Some(lair) = self.templates.lookup_lair(template) else {
            log::warn!("spawn: unknown lair template '{template}'");
            metrics::counter!("spawn.unknown_template_total", "kind" => "lair").increment(1);
            return None;
        };
        let Some(mut object) =
            self.objects
                .create_object(lair.lair_crc, 0, planet, position, Quat::IDENTITY)
        else {
            log::warn!("spawn: failed to materialize lair '{}'", lair.name);
            metrics::counter!("spawn.materialize_failed_total").increment(1);
            return None;
        };
        object.set_option(options::ATTACKABLE);
        object.set_pvp_bitmask(pvp::ATTACKABLE);
        object.set_max_damage(DAMAGE_PER_LEVEL * level);
        let actor = LairActor::new(object.id(), &lair.mobile, lair.mobile_limit);
        object.attach(AI_ATTACHMENT, Box::new(actor));
        let id = object.id();
        self.simulation.add(object, position.x, position.z, true);
        log::debug!(
            "spawn: lair '{}' up at ({:.1}, {:.1}) level {level}",
            lair.name,
            position.x,
            position.z
        );
        metrics::counter!("spawn.lairs_total").increment(1);
        Some(id)
    }

    /// Weighted pick from the area's group, uniform placement inside its
    /// circle, then a regular lair spawn.
    pub fn spawn_from_area<R: Rng + ?Sized>(
        &self,
        area: &LairSpawnArea,
        rng: &mut R,
        level: i32,
    ) -> Option<ObjectId> {
        let pick = area.lair_group.pick(rng)?;
        let position = area.circle.sample_point(rng);
        self.spawn_lair(&pick.lair, area.planet, position, level)
    }
}
