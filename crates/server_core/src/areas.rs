//! Spawn areas: spatial regions bound to a lair group.
//!
//! Areas are created at load time and never mutated afterward; the service
//! keeps them per planet in insertion order so spawning iterates
//! deterministically.

use std::sync::Arc;

use glam::Vec3;
use rand::Rng;

use data_runtime::templates::LairGroupTemplate;

use crate::collab::PlanetId;

/// XZ-plane circle registered with the simulation for spatial queries.
#[derive(Debug, Clone, PartialEq)]
pub struct CollidableCircle {
    pub center: Vec3,
    pub radius: f32,
    pub planet: PlanetId,
}

impl CollidableCircle {
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        let dx = x - self.center.x;
        let dz = z - self.center.z;
        dx * dx + dz * dz <= self.radius * self.radius
    }

    /// Uniform point inside the circle (sqrt-radius sampling), at y = center.y.
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let r = self.radius * rng.r#gen::<f32>().sqrt();
        Vec3::new(
            self.center.x + r * angle.cos(),
            self.center.y,
            self.center.z + r * angle.sin(),
        )
    }
}

/// Concrete lair spawn area: circle plus the group it draws lairs from.
#[derive(Debug, Clone)]
pub struct LairSpawnArea {
    pub planet: PlanetId,
    pub circle: CollidableCircle,
    pub lair_group: Arc<LairGroupTemplate>,
}

/// Spawn area variants. Only lair areas exist today; ambient creature areas
/// hang off the same index once `spawn_creature` grows a caller.
#[derive(Debug, Clone)]
pub enum SpawnArea {
    Lair(LairSpawnArea),
}

impl SpawnArea {
    pub fn planet(&self) -> PlanetId {
        match self {
            SpawnArea::Lair(a) => a.planet,
        }
    }

    pub fn circle(&self) -> &CollidableCircle {
        match self {
            SpawnArea::Lair(a) => &a.circle,
        }
    }

    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        self.circle().contains_xz(x, z)
    }
}
