//! # Demonstration Systems
//!
//! Two small systems exercising the store's tick and notification
//! protocol: poison drain over health records, and velocity integration
//! over transforms.

use tracing::debug;

use packrat_core::{Component, Entity, Ident, Kind, System, World};

use crate::components::{Health, Physics, Transform};

/// Drains poisoned entities and queues the drained ones for removal.
pub struct HealthSystem {
    drain_per_second: f32,
}

impl HealthSystem {
    /// Creates a health system with the given poison drain rate, in hit
    /// points per second.
    #[must_use]
    pub fn new(drain_per_second: f32) -> Self {
        Self { drain_per_second }
    }
}

impl Default for HealthSystem {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl System for HealthSystem {
    fn name(&self) -> &'static str {
        "health"
    }

    fn interested_in(&self, kind: Kind) -> bool {
        kind == Health::KIND
    }

    fn cleanup(&mut self, _world: &World, entity: &Entity) {
        debug!(entity = %entity.id(), "health record going away");
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        for health in world.components_mut::<Health>() {
            if health.poisoned {
                health.health -= self.drain_per_second * dt;
            }
        }

        // Removal is a request; the drained entities stay visible until
        // the caller's next sync.
        let drained: Vec<Ident> = world
            .components::<Health>()
            .filter(|health| health.health <= 0.0)
            .map(Component::owner)
            .collect();
        for entity in drained {
            debug!(entity = %entity, "poison drained an entity");
            world.remove(entity);
        }
    }
}

/// Integrates transforms by their physics velocity.
#[derive(Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn interested_in(&self, kind: Kind) -> bool {
        kind == Physics::KIND
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        let movers: Vec<Ident> = world.components::<Physics>().map(Component::owner).collect();
        for entity in movers {
            if !world.has_component::<Transform>(entity) {
                continue;
            }
            let (x, y) = {
                let transform = world.component::<Transform>(entity);
                (transform.x, transform.y)
            };
            let (vx, vy) = {
                let physics = world.component_mut::<Physics>(entity);
                physics.oldx = x;
                physics.oldy = y;
                (physics.vx, physics.vy)
            };
            let transform = world.component_mut::<Transform>(entity);
            transform.x = x + vx * dt;
            transform.y = y + vy * dt;
        }
    }
}
