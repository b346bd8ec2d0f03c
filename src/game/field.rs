//! Field entity
//!
//! The playfield: a flat colored rectangle that bounds the scene and
//! encloses the player and enemies. It never moves, so the default update
//! (zero velocity) and default fixed_update suffice.

use crate::render::{DrawTarget, FIELD_DRAW_DEPTH};

use super::object::{self, GameObject, LifetimeObserver, ObjectCore, ObjectKind};
use super::types::{Bounds2D, Vec2};

pub struct Field {
    core: ObjectCore,
    bounds: Bounds2D,
    color: u32,
}

impl Field {
    pub fn new(
        bounds: Bounds2D,
        color: u32,
        observer: Option<&mut dyn LifetimeObserver>,
    ) -> Self {
        let field = Self {
            core: ObjectCore::new(ObjectKind::Field, bounds.center(), Vec2::ZERO),
            bounds,
            color,
        };
        object::register(&field.core, observer);
        field
    }

    pub fn bounds(&self) -> Bounds2D {
        self.bounds
    }

    /// Tear down, firing the deregistration hook before the drop.
    pub fn deinit(self, observer: Option<&mut dyn LifetimeObserver>) {
        object::deregister(&self.core, observer);
    }
}

impl GameObject for Field {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        target.fill_rect(self.bounds, self.color, FIELD_DRAW_DEPTH);
    }
}
