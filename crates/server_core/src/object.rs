//! Tangible world objects materialized by the object collaborator.
//!
//! A `TangibleObject` is handed to the spawn orchestrator fully built, gets
//! its combat flags/ceiling and attachments configured, and is then passed
//! by value to the simulation. Ownership transfer makes "configure before
//! register" structural: the simulation never sees a half-configured entity.

use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::ai::Actor;
use crate::collab::PlanetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

/// Generic entity option flags. Independent from the PvP flag domain; both
/// must be set for an entity to be engageable.
pub mod options {
    pub const ATTACKABLE: u32 = 1 << 7;
}

/// PvP status flags.
pub mod pvp {
    pub const ATTACKABLE: u32 = 1 << 1;
}

#[derive(Debug)]
pub struct TangibleObject {
    id: ObjectId,
    crc: u32,
    variant: u32,
    planet: PlanetId,
    position: Vec3,
    rotation: Quat,
    options: u32,
    pvp_status: u32,
    max_damage: i32,
    attachments: HashMap<String, Box<dyn Actor>>,
}

impl TangibleObject {
    pub fn new(
        id: ObjectId,
        crc: u32,
        variant: u32,
        planet: PlanetId,
        position: Vec3,
        rotation: Quat,
    ) -> Self {
        Self {
            id,
            crc,
            variant,
            planet,
            position,
            rotation,
            options: 0,
            pvp_status: 0,
            max_damage: 0,
            attachments: HashMap::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn crc(&self) -> u32 {
        self.crc
    }

    pub fn variant(&self) -> u32 {
        self.variant
    }

    pub fn planet(&self) -> PlanetId {
        self.planet
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_option(&mut self, mask: u32) {
        self.options |= mask;
    }

    pub fn has_option(&self, mask: u32) -> bool {
        self.options & mask == mask
    }

    pub fn set_pvp_bitmask(&mut self, mask: u32) {
        self.pvp_status |= mask;
    }

    pub fn has_pvp_status(&self, mask: u32) -> bool {
        self.pvp_status & mask == mask
    }

    pub fn set_max_damage(&mut self, value: i32) {
        self.max_damage = value;
    }

    pub fn max_damage(&self) -> i32 {
        self.max_damage
    }

    pub fn attach(&mut self, key: &str, actor: Box<dyn Actor>) {
        self.attachments.insert(key.to_string(), actor);
    }

    pub fn attachment(&self, key: &str) -> Option<&dyn Actor> {
        self.attachments.get(key).map(|a| a.as_ref())
    }

    pub fn attachment_mut(&mut self, key: &str) -> Option<&mut dyn Actor> {
        match self.attachments.get_mut(key) {
            Some(a) => Some(a.as_mut()),
            None => None,
        }
    }
}
