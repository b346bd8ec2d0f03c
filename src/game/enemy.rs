//! Enemy entity
//!
//! A bouncing square that roams the field. Spawns at a random spot inside
//! the field bounds with a small random velocity, reflects off the walls,
//! and records a collision event per wall hit for the level to drain
//! (the level manager turns those into sounds).

use rand::Rng;

use crate::render::{DrawTarget, ENEMY_DRAW_DEPTH};

use super::event::{CollisionEvent, EventQueue};
use super::object::{self, GameObject, LifetimeObserver, ObjectCore, ObjectKind};
use super::types::{Bounds2D, Vec2};

/// Side length of the enemy square, in pixels.
pub const ENEMY_SIZE: f32 = 16.0;
const ENEMY_COLOR: u32 = 0xffe04848;
/// Per-axis speed range for freshly spawned enemies, pixels per step.
const SPAWN_SPEED: std::ops::Range<f32> = 1.0..4.0;

/// One random spawn coordinate. An axis too narrow to fit the enemy has an
/// empty range; collapse it to its midpoint instead of panicking.
fn spawn_coord<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        (lo + hi) * 0.5
    }
}

pub struct Enemy {
    core: ObjectCore,
    bounds: Bounds2D,
    wall_hits: Vec<CollisionEvent>,
}

impl Enemy {
    /// Spawn at a random position inside `bounds`, moving in a random
    /// diagonal. The rng is injected so placement can be made deterministic.
    pub fn spawn_within<R: Rng>(
        bounds: Bounds2D,
        rng: &mut R,
        observer: Option<&mut dyn LifetimeObserver>,
    ) -> Self {
        let half = ENEMY_SIZE * 0.5;
        let position = Vec2::new(
            spawn_coord(rng, bounds.min.x + half, bounds.max.x - half),
            spawn_coord(rng, bounds.min.y + half, bounds.max.y - half),
        );
        let velocity = Vec2::new(
            rng.gen_range(SPAWN_SPEED) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            rng.gen_range(SPAWN_SPEED) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
        );
        Self::at(bounds, position, velocity, observer)
    }

    /// Spawn at an exact position and velocity.
    pub fn at(
        bounds: Bounds2D,
        position: Vec2,
        velocity: Vec2,
        observer: Option<&mut dyn LifetimeObserver>,
    ) -> Self {
        let enemy = Self {
            core: ObjectCore::new(ObjectKind::Enemy, position, velocity),
            bounds,
            wall_hits: Vec::new(),
        };
        object::register(&enemy.core, observer);
        enemy
    }

    /// Move this frame's wall hits into the shared event queue.
    pub fn drain_collisions(&mut self, out: &mut EventQueue<CollisionEvent>) {
        for hit in self.wall_hits.drain(..) {
            out.send(hit);
        }
    }

    /// Tear down, firing the deregistration hook before the drop.
    pub fn deinit(self, observer: Option<&mut dyn LifetimeObserver>) {
        object::deregister(&self.core, observer);
    }
}

impl GameObject for Enemy {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        let half = ENEMY_SIZE * 0.5;
        let p = self.core.position;
        target.fill_rect(
            Bounds2D::new(
                Vec2::new(p.x - half, p.y - half),
                Vec2::new(p.x + half, p.y + half),
            ),
            ENEMY_COLOR,
            ENEMY_DRAW_DEPTH,
        );
    }

    fn update(&mut self, _elapsed_ms: u32) {
        object::default_update(&mut self.core);

        // Reflect off each wall independently; a corner hit counts twice
        let half = ENEMY_SIZE * 0.5;
        let pos = &mut self.core.position;
        let vel = &mut self.core.velocity;

        if pos.x - half < self.bounds.min.x {
            pos.x = self.bounds.min.x + half;
            vel.x = -vel.x;
            self.wall_hits.push(CollisionEvent { position: *pos });
        } else if pos.x + half > self.bounds.max.x {
            pos.x = self.bounds.max.x - half;
            vel.x = -vel.x;
            self.wall_hits.push(CollisionEvent { position: *pos });
        }

        if pos.y - half < self.bounds.min.y {
            pos.y = self.bounds.min.y + half;
            vel.y = -vel.y;
            self.wall_hits.push(CollisionEvent { position: *pos });
        } else if pos.y + half > self.bounds.max.y {
            pos.y = self.bounds.max.y - half;
            vel.y = -vel.y;
            self.wall_hits.push(CollisionEvent { position: *pos });
        }
    }
}
