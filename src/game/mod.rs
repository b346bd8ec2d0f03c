//! Game Runtime Core
//!
//! The part of the game with real architecture: polymorphic object dispatch,
//! level ownership, and the battle message state machine.
//!
//! Key concepts:
//! - ObjectCore + GameObject: position/velocity record plus draw / update /
//!   fixed_update behavior slots with safe defaults
//! - LifetimeObserver: injected hook pair firing on object construction and
//!   teardown, so a tracker can watch lifetimes without entities knowing it
//! - BattleMessageQueue: bounded ring of timed or input-gated text messages
//! - LevelManager: atomic construction and symmetric teardown of one level's
//!   field, player, and enemies, plus the collision -> sound policy
//!
//! Everything in here is pure single-threaded state driven by the frame
//! loop; rendering, input, and audio stay behind the traits in `render` and
//! `audio`.

// Allow unused code - parts of the object API are exercised only by tests
// and by entities still to come
#![allow(dead_code)]

pub mod enemy;
pub mod event;
pub mod field;
pub mod level;
pub mod message;
pub mod object;
pub mod player;
pub mod sprite;
pub mod types;

// Re-export main types
pub use event::Events;
pub use level::{Level, LevelDef, LevelManager};
pub use message::BattleMessageQueue;
pub use object::{GameObject, ObjectTracker};
