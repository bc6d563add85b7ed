//! AI attachment seam.
//!
//! Actors are capability objects attached to entities under a string key
//! (lairs carry theirs under `"AI"`). The spawn core constructs and attaches
//! them; behavior execution belongs to the AI service.

use std::any::Any;

use crate::object::ObjectId;

/// Single-capability behavior interface. `as_any` exists so callers at the
/// attachment seam can downcast to a concrete actor.
pub trait Actor: Send + std::fmt::Debug {
    fn tick(&mut self, dt: f32);
    fn as_any(&self) -> &dyn Any;
}

/// Actor bound to a lair entity and the mobile template it generates.
#[derive(Debug, Clone, PartialEq)]
pub struct LairActor {
    lair: ObjectId,
    mobile: String,
    mobile_limit: u32,
}

impl LairActor {
    pub fn new(lair: ObjectId, mobile: &str, mobile_limit: u32) -> Self {
        Self {
            lair,
            mobile: mobile.to_string(),
            mobile_limit,
        }
    }

    pub fn lair(&self) -> ObjectId {
        self.lair
    }

    pub fn mobile_name(&self) -> &str {
        &self.mobile
    }

    pub fn mobile_limit(&self) -> u32 {
        self.mobile_limit
    }
}

impl Actor for LairActor {
    fn tick(&mut self, _dt: f32) {
        // Behavior is driven by the AI service after attach; the spawn core
        // only carries the lair-to-mobile binding.
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
