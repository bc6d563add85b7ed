//! Spawn template types: mobiles, lairs, and weighted lair groups.
//!
//! Templates are plain serde structs; definition files deserialize straight
//! into them. Once handed to the registry they are never mutated (readers
//! hold `Arc` snapshots).

use rand::Rng;
use serde::Deserialize;

/// Creature descriptor keyed by its unique string id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MobileTemplate {
    pub name: String,
    /// Object template CRC used to materialize the creature.
    pub creature_crc: u32,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default = "default_health")]
    pub health: i32,
    #[serde(default = "default_speed")]
    pub speed_mps: f32,
}

fn default_level() -> i32 {
    1
}
fn default_health() -> i32 {
    100
}
fn default_speed() -> f32 {
    2.0
}

/// Stationary structure that generates creatures of one mobile template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LairTemplate {
    pub name: String,
    /// Name of the mobile template this lair spawns.
    pub mobile: String,
    /// Max concurrent creatures alive from this lair.
    pub mobile_limit: u32,
    /// Object template CRC used to materialize the physical lair.
    pub lair_crc: u32,
}

/// Weighted reference to one lair template within a group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LairSpawnTemplate {
    pub lair: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

/// Named, ordered collection of weighted lair spawn templates. Spawn areas
/// bind to a group and pick from it when placing lairs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LairGroupTemplate {
    pub name: String,
    #[serde(default)]
    pub lairs: Vec<LairSpawnTemplate>,
}

impl LairGroupTemplate {
    /// Weighted pick over the group's entries. Zero-weight entries are never
    /// selected; returns `None` when the group is empty or all-zero.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&LairSpawnTemplate> {
        let total: u64 = self.lairs.iter().map(|s| u64::from(s.weight)).sum();
        if total == 0 {
            return None;
        }
        let mut roll = rng.gen_range(0..total);
        for s in &self.lairs {
            let w = u64::from(s.weight);
            if roll < w {
                return Some(s);
            }
            roll -= w;
        }
        None
    }
}
