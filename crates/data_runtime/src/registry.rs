//! Concurrent template registry shared by load-time registration and
//! simulation-thread lookups.
//!
//! Each category is an `RwLock<HashMap<_, Arc<T>>>`: readers share the lock
//! and only ever see fully built `Arc` snapshots; re-registering a key is an
//! atomic map insert (last writer wins). Lookups hold no lock after they
//! return, so callers never pin the registry across collaborator calls.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::templates::{LairGroupTemplate, LairSpawnTemplate, LairTemplate, MobileTemplate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("template key must not be empty")]
    EmptyKey,
}

type Shelf<T> = RwLock<HashMap<String, Arc<T>>>;

fn read<T>(shelf: &Shelf<T>) -> RwLockReadGuard<'_, HashMap<String, Arc<T>>> {
    // A poisoned shelf still holds valid Arc snapshots; recover and serve.
    shelf.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(shelf: &Shelf<T>) -> RwLockWriteGuard<'_, HashMap<String, Arc<T>>> {
    shelf.write().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
pub struct TemplateRegistry {
    mobiles: Shelf<MobileTemplate>,
    lairs: Shelf<LairTemplate>,
    lair_groups: Shelf<LairGroupTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_mobile(&self, template: MobileTemplate) -> Result<(), RegistryError> {
        if template.name.is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        let key = template.name.clone();
        write(&self.mobiles).insert(key, Arc::new(template));
        Ok(())
    }

    pub fn register_lair(
        &self,
        name: &str,
        mobile: &str,
        mobile_limit: u32,
        lair_crc: u32,
    ) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        let template = LairTemplate {
            name: name.to_string(),
            mobile: mobile.to_string(),
            mobile_limit,
            lair_crc,
        };
        write(&self.lairs).insert(name.to_string(), Arc::new(template));
        Ok(())
    }

    pub fn register_lair_group(
        &self,
        name: &str,
        lairs: Vec<LairSpawnTemplate>,
    ) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        let template = LairGroupTemplate {
            name: name.to_string(),
            lairs,
        };
        write(&self.lair_groups).insert(name.to_string(), Arc::new(template));
        Ok(())
    }

    pub fn lookup_mobile(&self, name: &str) -> Option<Arc<MobileTemplate>> {
        read(&self.mobiles).get(name).cloned()
    }

    pub fn lookup_lair(&self, name: &str) -> Option<Arc<LairTemplate>> {
        read(&self.lairs).get(name).cloned()
    }

    pub fn lookup_lair_group(&self, name: &str) -> Option<Arc<LairGroupTemplate>> {
        read(&self.lair_groups).get(name).cloned()
    }

    /// Entry counts per category: (mobiles, lairs, lair groups).
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            read(&self.mobiles).len(),
            read(&self.lairs).len(),
            read(&self.lair_groups).len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_registered_lair_unchanged() {
        let reg = TemplateRegistry::new();
        reg.register_lair("womprat_lair", "womprat", 6, 0x1A2B).unwrap();
        let t = reg.lookup_lair("womprat_lair").expect("registered");
        assert_eq!(t.name, "womprat_lair");
        assert_eq!(t.mobile, "womprat");
        assert_eq!(t.mobile_limit, 6);
        assert_eq!(t.lair_crc, 0x1A2B);
    }

    #[test]
    fn re_register_replaces_last_writer_wins() {
        let reg = TemplateRegistry::new();
        reg.register_lair("den", "rat", 4, 1).unwrap();
        reg.register_lair("den", "wolf", 8, 2).unwrap();
        let t = reg.lookup_lair("den").unwrap();
        assert_eq!(t.mobile, "wolf");
        assert_eq!(t.mobile_limit, 8);
        assert_eq!(t.lair_crc, 2);
        assert_eq!(reg.counts().1, 1);
    }

    #[test]
    fn unknown_key_is_absent_not_an_error() {
        let reg = TemplateRegistry::new();
        assert!(reg.lookup_mobile("nope").is_none());
        assert!(reg.lookup_lair("nope").is_none());
        assert!(reg.lookup_lair_group("nope").is_none());
    }

    #[test]
    fn empty_keys_are_rejected() {
        let reg = TemplateRegistry::new();
        assert_eq!(
            reg.register_lair("", "rat", 1, 1),
            Err(RegistryError::EmptyKey)
        );
        assert_eq!(
            reg.register_lair_group("", Vec::new()),
            Err(RegistryError::EmptyKey)
        );
        let m = MobileTemplate {
            name: String::new(),
            creature_crc: 1,
            level: 1,
            health: 10,
            speed_mps: 1.0,
        };
        assert_eq!(reg.register_mobile(m), Err(RegistryError::EmptyKey));
        assert_eq!(reg.counts(), (0, 0, 0));
    }

    #[test]
    fn lookups_race_registration_safely() {
        let reg = Arc::new(TemplateRegistry::new());
        reg.register_lair("den", "rat", 1, 1).unwrap();
        let mut handles = Vec::new();
        for i in 0..4u32 {
            let r = reg.clone();
            handles.push(std::thread::spawn(move || {
                for j in 0..500u32 {
                    if i % 2 == 0 {
                        r.register_lair("den", "wolf", j, j).unwrap();
                    } else if let Some(t) = r.lookup_lair("den") {
                        // Readers only ever see a complete template.
                        assert!(t.mobile == "rat" || t.mobile == "wolf");
                    }
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert!(reg.lookup_lair("den").is_some());
    }

    #[test]
    fn old_snapshots_survive_replacement() {
        let reg = TemplateRegistry::new();
        reg.register_lair("den", "rat", 4, 1).unwrap();
        let before = reg.lookup_lair("den").unwrap();
        reg.register_lair("den", "wolf", 8, 2).unwrap();
        // A reader that resolved before the replacement keeps a valid template.
        assert_eq!(before.mobile, "rat");
        assert_eq!(reg.lookup_lair("den").unwrap().mobile, "wolf");
    }
}
