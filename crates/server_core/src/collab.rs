//! Collaborator seams the spawn core calls through, plus the in-process
//! implementations the host wires up.
//!
//! The traits are deliberately narrow: the core never holds a lock while
//! calling through them, and every failure is surfaced as an `Option` or a
//! logged skip rather than a fault.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use glam::{Quat, Vec3};

use data_runtime::configs::worlds::WorldsCfg;

use crate::areas::CollidableCircle;
use crate::object::{ObjectId, TangibleObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanetId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
}

/// Region lookup. Owns the planet list; the core stores only ids.
pub trait TerrainService: Send + Sync {
    fn planets(&self) -> Vec<Planet>;
    fn planet_by_name(&self, name: &str) -> Option<Planet>;
}

/// Allocates and tracks world objects by template CRC.
pub trait ObjectService: Send + Sync {
    fn create_object(
        &self,
        crc: u32,
        variant: u32,
        planet: PlanetId,
        position: Vec3,
        rotation: Quat,
    ) -> Option<TangibleObject>;
}

/// Simulation registration. `add` takes ownership of a fully configured
/// entity; `add_collidable` registers shapes for spatial queries.
pub trait SimulationService: Send + Sync {
    fn add(&self, object: TangibleObject, x: f32, z: f32, track_aoi: bool);
    fn add_collidable(&self, circle: CollidableCircle, x: f32, z: f32);
}

/// Spatial shape construction.
pub trait CollisionService: Send + Sync {
    fn make_circle(&self, center: Vec3, radius: f32, planet: PlanetId) -> CollidableCircle;
}

/// Definition-file enumeration. Directory order is whatever the source
/// yields; callers must not rely on it.
pub trait DefinitionSource: Send + Sync {
    fn for_each_definition_file(
        &self,
        dir: &Path,
        on_file: &mut dyn FnMut(&Path),
    ) -> Result<()>;
}

/// Terrain service over a fixed planet list from `worlds.toml`.
#[derive(Debug, Default)]
pub struct StaticTerrain {
    planets: Vec<Planet>,
}

impl StaticTerrain {
    pub fn new(planets: Vec<Planet>) -> Self {
        Self { planets }
    }

    pub fn from_worlds(cfg: &WorldsCfg) -> Self {
        Self {
            planets: cfg
                .planets
                .iter()
                .map(|p| Planet {
                    id: PlanetId(p.id),
                    name: p.name.clone(),
                })
                .collect(),
        }
    }
}

impl TerrainService for StaticTerrain {
    fn planets(&self) -> Vec<Planet> {
        self.planets.clone()
    }

    fn planet_by_name(&self, name: &str) -> Option<Planet> {
        self.planets.iter().find(|p| p.name == name).cloned()
    }
}

/// Object service handing out monotonically increasing ids. A zero CRC has
/// no backing object template and fails materialization.
#[derive(Debug, Default)]
pub struct ObjectAllocator {
    next_id: AtomicU64,
}

impl ObjectService for ObjectAllocator {
    fn create_object(
        &self,
        crc: u32,
        variant: u32,
        planet: PlanetId,
        position: Vec3,
        rotation: Quat,
    ) -> Option<TangibleObject> {
        if crc == 0 {
            return None;
        }
        let id = ObjectId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        Some(TangibleObject::new(id, crc, variant, planet, position, rotation))
    }
}

/// Registered entity plus its simulation placement.
#[derive(Debug)]
pub struct SimEntry {
    pub object: TangibleObject,
    pub x: f32,
    pub z: f32,
    pub track_aoi: bool,
}

#[derive(Debug, Default)]
struct SimulationState {
    objects: HashMap<ObjectId, SimEntry>,
    collidables: Vec<CollidableCircle>,
}

/// In-process simulation registry: entities keyed by id, collidables in
/// registration order.
#[derive(Debug, Default)]
pub struct Simulation {
    state: Mutex<SimulationState>,
}

impl Simulation {
    fn lock(&self) -> MutexGuard<'_, SimulationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn collidable_count(&self) -> usize {
        self.lock().collidables.len()
    }

    /// Count of registered shapes on `planet` containing the XZ point.
    pub fn collidables_containing(&self, planet: PlanetId, x: f32, z: f32) -> usize {
        self.lock()
            .collidables
            .iter()
            .filter(|c| c.planet == planet && c.contains_xz(x, z))
            .count()
    }

    /// Run `f` against a registered entity, if present.
    pub fn with_object<R>(&self, id: ObjectId, f: impl FnOnce(&SimEntry) -> R) -> Option<R> {
        self.lock().objects.get(&id).map(f)
    }
}

impl SimulationService for Simulation {
    fn add(&self, object: TangibleObject, x: f32, z: f32, track_aoi: bool) {
        let id = object.id();
        self.lock().objects.insert(
            id,
            SimEntry {
                object,
                x,
                z,
                track_aoi,
            },
        );
    }

    fn add_collidable(&self, circle: CollidableCircle, x: f32, z: f32) {
        let _ = (x, z);
        self.lock().collidables.push(circle);
    }
}

/// Trivial collision factory; shapes carry their own geometry.
#[derive(Debug, Default)]
pub struct CollisionFactory;

impl CollisionService for CollisionFactory {
    fn make_circle(&self, center: Vec3, radius: f32, planet: PlanetId) -> CollidableCircle {
        CollidableCircle {
            center,
            radius,
            planet,
        }
    }
}

/// Filesystem definition source: every `*.toml` directly under the directory.
#[derive(Debug, Default)]
pub struct FsDefinitionSource;

impl DefinitionSource for FsDefinitionSource {
    fn for_each_definition_file(
        &self,
        dir: &Path,
        on_file: &mut dyn FnMut(&Path),
    ) -> Result<()> {
        let entries =
            std::fs::read_dir(dir).with_context(|| format!("enumerate {}", dir.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("walk {}", dir.display()))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("toml") {
                on_file(&path);
            }
        }
        Ok(())
    }
}
