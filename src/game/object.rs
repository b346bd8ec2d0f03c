//! Game Object Dispatch
//!
//! Every concrete entity (field, player, enemy, the battle message queue)
//! embeds an [`ObjectCore`] by value and implements [`GameObject`]. The trait
//! gives runtime polymorphism over draw / update / fixed_update with explicit
//! defaults, so a partially-fleshed-out entity degrades to a no-op (draw,
//! fixed_update) or to plain translation by velocity (update) instead of
//! faulting.
//!
//! Object lifetime is observable without entities knowing who is watching:
//! constructors fire `object_registered` on an injected [`LifetimeObserver`],
//! teardown fires `object_deregistered`. The observer handle is passed in
//! explicitly by whoever constructs the entity; there is no process-wide
//! registration slot to clobber.

use std::collections::HashMap;

use crate::render::DrawTarget;

use super::types::Vec2;

/// Nominal frame period at 60 Hz, in milliseconds.
pub const FRAME_TIME_MS: f32 = 1000.0 / 60.0;

/// Tag identifying which concrete entity an [`ObjectCore`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Field,
    Player,
    Enemy,
    MessageQueue,
}

/// The state every game object carries: where it is, where it is going,
/// and when it next wants a fixed-rate update.
#[derive(Debug, Clone, Copy)]
pub struct ObjectCore {
    pub kind: ObjectKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Countdown to the next fixed update. Preset at construction; no caller
    /// consumes it yet, but it is part of the object contract.
    pub next_update: u32,
}

impl ObjectCore {
    pub fn new(kind: ObjectKind, position: Vec2, velocity: Vec2) -> Self {
        Self {
            kind,
            position,
            velocity,
            next_update: FRAME_TIME_MS as u32,
        }
    }
}

/// Observer for object lifetime. Whoever owns a tracking collection
/// implements this and hands a `&mut` to the code that constructs entities.
pub trait LifetimeObserver {
    /// Called at the end of an entity's construction.
    fn object_registered(&mut self, obj: &ObjectCore);
    /// Called at the start of an entity's teardown.
    fn object_deregistered(&mut self, obj: &ObjectCore);
}

/// Fire the registration hook, if an observer was supplied.
pub fn register(core: &ObjectCore, observer: Option<&mut dyn LifetimeObserver>) {
    if let Some(observer) = observer {
        observer.object_registered(core);
    }
}

/// Fire the deregistration hook, if an observer was supplied.
pub fn deregister(core: &ObjectCore, observer: Option<&mut dyn LifetimeObserver>) {
    if let Some(observer) = observer {
        observer.object_deregistered(core);
    }
}

/// Behavior slots for a game object. All three have defaults; an entity
/// overrides only what it needs.
pub trait GameObject {
    fn core(&self) -> &ObjectCore;
    fn core_mut(&mut self) -> &mut ObjectCore;

    /// Draw this object. Default: draw nothing.
    fn draw(&self, _target: &mut dyn DrawTarget) {}

    /// Per-frame update. Default: translate by velocity, one step per call.
    fn update(&mut self, _elapsed_ms: u32) {
        default_update(self.core_mut());
    }

    /// Fixed-rate update. Default: do nothing.
    fn fixed_update(&mut self, _elapsed_ms: u32) {}
}

/// The fallback update: move by the current velocity. One step per call;
/// elapsed time is deliberately not factored in.
pub fn default_update(core: &mut ObjectCore) {
    core.position.x += core.velocity.x;
    core.position.y += core.velocity.y;
}

/// A concrete [`LifetimeObserver`] that counts registrations and
/// deregistrations per object kind. The frame driver owns one and threads it
/// through level load/unload so leaks show up as a nonzero live count.
#[derive(Debug, Default)]
pub struct ObjectTracker {
    counts: HashMap<ObjectKind, KindCounts>,
}

#[derive(Debug, Default, Clone, Copy)]
struct KindCounts {
    registered: u32,
    deregistered: u32,
}

impl ObjectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects registered and not yet deregistered, across all kinds.
    pub fn live(&self) -> u32 {
        self.counts
            .values()
            .map(|c| c.registered - c.deregistered)
            .sum()
    }

    pub fn registered(&self, kind: ObjectKind) -> u32 {
        self.counts.get(&kind).map_or(0, |c| c.registered)
    }

    pub fn deregistered(&self, kind: ObjectKind) -> u32 {
        self.counts.get(&kind).map_or(0, |c| c.deregistered)
    }
}

impl LifetimeObserver for ObjectTracker {
    fn object_registered(&mut self, obj: &ObjectCore) {
        self.counts.entry(obj.kind).or_default().registered += 1;
    }

    fn object_deregistered(&mut self, obj: &ObjectCore) {
        self.counts.entry(obj.kind).or_default().deregistered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Drifter {
        core: ObjectCore,
    }

    impl GameObject for Drifter {
        fn core(&self) -> &ObjectCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut ObjectCore {
            &mut self.core
        }
    }

    #[test]
    fn test_default_update_moves_by_velocity_once() {
        let mut d = Drifter {
            core: ObjectCore::new(
                ObjectKind::Enemy,
                Vec2::new(10.0, 20.0),
                Vec2::new(3.0, -2.0),
            ),
        };

        // Elapsed time must not scale the default step
        d.update(5000);
        assert!((d.core().position.x - 13.0).abs() < 0.001);
        assert!((d.core().position.y - 18.0).abs() < 0.001);

        d.update(1);
        assert!((d.core().position.x - 16.0).abs() < 0.001);
    }

    #[test]
    fn test_default_fixed_update_is_noop() {
        let mut d = Drifter {
            core: ObjectCore::new(ObjectKind::Enemy, Vec2::ZERO, Vec2::new(1.0, 1.0)),
        };
        d.fixed_update(16);
        assert_eq!(d.core().position, Vec2::ZERO);
    }

    #[test]
    fn test_tracker_counts_per_kind() {
        let mut tracker = ObjectTracker::new();
        let enemy = ObjectCore::new(ObjectKind::Enemy, Vec2::ZERO, Vec2::ZERO);
        let player = ObjectCore::new(ObjectKind::Player, Vec2::ZERO, Vec2::ZERO);

        register(&enemy, Some(&mut tracker));
        register(&enemy, Some(&mut tracker));
        register(&player, Some(&mut tracker));
        assert_eq!(tracker.live(), 3);
        assert_eq!(tracker.registered(ObjectKind::Enemy), 2);

        deregister(&enemy, Some(&mut tracker));
        assert_eq!(tracker.live(), 2);
        assert_eq!(tracker.deregistered(ObjectKind::Enemy), 1);
    }

    #[test]
    fn test_hooks_without_observer_are_noops() {
        let core = ObjectCore::new(ObjectKind::Field, Vec2::ZERO, Vec2::ZERO);
        register(&core, None);
        deregister(&core, None);
    }

    #[test]
    fn test_core_presets_next_update() {
        let core = ObjectCore::new(ObjectKind::Player, Vec2::ZERO, Vec2::ZERO);
        assert_eq!(core.next_update, FRAME_TIME_MS as u32);
    }
}
