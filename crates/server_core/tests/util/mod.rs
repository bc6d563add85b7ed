//! Shared stand-in collaborators for spawn subsystem tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use glam::{Quat, Vec3};

use data_runtime::registry::TemplateRegistry;
use server_core::SpawnService;
use server_core::ai::LairActor;
use server_core::areas::CollidableCircle;
use server_core::collab::{
    CollisionFactory, ObjectService, Planet, PlanetId, SimulationService, StaticTerrain,
};
use server_core::object::{ObjectId, TangibleObject, options, pvp};

pub const ASHFALL: PlanetId = PlanetId(1);
pub const VELDMERE: PlanetId = PlanetId(2);

pub fn planets() -> Vec<Planet> {
    vec![
        Planet {
            id: ASHFALL,
            name: "ashfall".into(),
        },
        Planet {
            id: VELDMERE,
            name: "veldmere".into(),
        },
    ]
}

/// Object collaborator counting materialization attempts; optionally fails
/// every call.
pub struct CountingObjects {
    next: AtomicU64,
    pub created: AtomicUsize,
    pub fail: bool,
}

impl CountingObjects {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
            created: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ObjectService for CountingObjects {
    fn create_object(
        &self,
        crc: u32,
        variant: u32,
        planet: PlanetId,
        position: Vec3,
        rotation: Quat,
    ) -> Option<TangibleObject> {
        self.created.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return None;
        }
        let id = ObjectId(self.next.fetch_add(1, Ordering::SeqCst) + 1);
        Some(TangibleObject::new(id, crc, variant, planet, position, rotation))
    }
}

/// Entity state as observed by the simulation at registration time.
#[derive(Debug, Clone)]
pub struct AddRecord {
    pub id: ObjectId,
    pub planet: PlanetId,
    pub position: Vec3,
    pub x: f32,
    pub z: f32,
    pub track_aoi: bool,
    pub attackable: bool,
    pub pvp_attackable: bool,
    pub max_damage: i32,
    pub ai_mobile: Option<String>,
}

#[derive(Default)]
pub struct RecordingSim {
    pub added: Mutex<Vec<AddRecord>>,
    pub collidables: Mutex<Vec<CollidableCircle>>,
}

impl RecordingSim {
    pub fn add_count(&self) -> usize {
        self.added.lock().unwrap().len()
    }

    pub fn collidable_count(&self) -> usize {
        self.collidables.lock().unwrap().len()
    }

    pub fn records(&self) -> Vec<AddRecord> {
        self.added.lock().unwrap().clone()
    }
}

impl SimulationService for RecordingSim {
    fn add(&self, object: TangibleObject, x: f32, z: f32, track_aoi: bool) {
        let ai_mobile = object
            .attachment(server_core::AI_ATTACHMENT)
            .and_then(|a| a.as_any().downcast_ref::<LairActor>())
            .map(|l| l.mobile_name().to_string());
        self.added.lock().unwrap().push(AddRecord {
            id: object.id(),
            planet: object.planet(),
            position: object.position(),
            x,
            z,
            track_aoi,
            attackable: object.has_option(options::ATTACKABLE),
            pvp_attackable: object.has_pvp_status(pvp::ATTACKABLE),
            max_damage: object.max_damage(),
            ai_mobile,
        });
    }

    fn add_collidable(&self, circle: CollidableCircle, _x: f32, _z: f32) {
        self.collidables.lock().unwrap().push(circle);
    }
}

pub struct Harness {
    pub svc: SpawnService,
    pub objects: Arc<CountingObjects>,
    pub sim: Arc<RecordingSim>,
    pub terrain: Arc<StaticTerrain>,
}

pub fn harness() -> Harness {
    harness_with(CountingObjects::new())
}

pub fn harness_with(objects: CountingObjects) -> Harness {
    let objects = Arc::new(objects);
    let sim = Arc::new(RecordingSim::default());
    let terrain = Arc::new(StaticTerrain::new(planets()));
    let svc = SpawnService::new(
        Arc::new(TemplateRegistry::new()),
        terrain.clone(),
        objects.clone(),
        sim.clone(),
        Arc::new(CollisionFactory),
    );
    Harness {
        svc,
        objects,
        sim,
        terrain,
    }
}
