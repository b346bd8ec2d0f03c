//! Level lifecycle
//!
//! A [`Level`] owns one field, one player, and a roster of enemies, built
//! from an immutable [`LevelDef`] and torn down symmetrically on unload.
//! [`LevelManager`] brackets any number of load/unload cycles with one-time
//! init/shutdown of level-independent resources (the shared beep sound) and
//! applies the one cross-cutting policy: enemy wall collisions make noise.

use std::path::{Path, PathBuf};

use rand::thread_rng;

use crate::audio::{AudioDevice, SoundHandle};
use crate::render::{DrawTarget, TextureLoader};

use super::enemy::Enemy;
use super::event::Events;
use super::field::Field;
use super::object::{GameObject, LifetimeObserver};
use super::player::Player;
use super::types::Bounds2D;

/// Descriptor file the player is built from.
pub const PLAYER_DESCRIPTOR_PATH: &str = "assets/player.json";
/// Shared collision beep, loaded once at manager init.
pub const BEEP_SOUND_PATH: &str = "assets/beep.wav";

/// Immutable level configuration. The level keeps its own copy, so mutating
/// the definition after load cannot skew teardown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelDef {
    pub field_bounds: Bounds2D,
    /// Packed 0xAARRGGBB background color.
    pub field_color: u32,
    pub num_enemies: u32,
    pub num_players: u32,
}

/// Why a level failed to load.
#[derive(Debug)]
pub enum LevelError {
    Io(String),
    Descriptor(String),
    Texture(String),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::Io(msg) => write!(f, "I/O error: {}", msg),
            LevelError::Descriptor(msg) => write!(f, "Descriptor error: {}", msg),
            LevelError::Texture(path) => write!(f, "Failed to load texture: {}", path),
        }
    }
}

impl std::error::Error for LevelError {}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Descriptor(e.to_string())
    }
}

/// One loaded play session's worth of owned entities.
pub struct Level {
    def: LevelDef,
    field: Field,
    player: Player,
    enemies: Vec<Enemy>,
}

impl Level {
    pub fn def(&self) -> &LevelDef {
        &self.def
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Fixed-rate pass over every owned object, field first.
    pub fn fixed_update(&mut self, elapsed_ms: u32) {
        self.field.fixed_update(elapsed_ms);
        self.player.fixed_update(elapsed_ms);
        for enemy in &mut self.enemies {
            enemy.fixed_update(elapsed_ms);
        }
    }

    /// Per-frame pass; enemy wall hits end up in `events`.
    pub fn update(&mut self, elapsed_ms: u32, events: &mut Events) {
        self.field.update(elapsed_ms);
        self.player.update(elapsed_ms);
        for enemy in &mut self.enemies {
            enemy.update(elapsed_ms);
            enemy.drain_collisions(&mut events.collisions);
        }
    }

    /// Draw pass, back to front: field, enemies, player.
    pub fn draw(&self, target: &mut dyn DrawTarget) {
        self.field.draw(target);
        for enemy in &self.enemies {
            enemy.draw(target);
        }
        self.player.draw(target);
    }
}

/// Owns level-independent resources and the load/unload protocol.
pub struct LevelManager {
    beep: SoundHandle,
    player_descriptor: PathBuf,
}

impl LevelManager {
    /// One-time setup. Loads the shared collision beep; a missing sound file
    /// degrades to silent collisions rather than failing.
    pub fn new(audio: &mut dyn AudioDevice) -> Self {
        let beep = audio.load_sound(BEEP_SOUND_PATH);
        if beep == SoundHandle::NONE {
            eprintln!("Collision sound unavailable ({})", BEEP_SOUND_PATH);
        }
        Self {
            beep,
            player_descriptor: PathBuf::from(PLAYER_DESCRIPTOR_PATH),
        }
    }

    /// Override the player descriptor path (tests, modding).
    pub fn with_player_descriptor(mut self, path: impl Into<PathBuf>) -> Self {
        self.player_descriptor = path.into();
        self
    }

    pub fn player_descriptor(&self) -> &Path {
        &self.player_descriptor
    }

    /// One-time teardown, after the last unload.
    pub fn shutdown(self, audio: &mut dyn AudioDevice) {
        audio.unload(self.beep);
    }

    /// Build a level from its definition: one field, one player,
    /// `def.num_enemies` enemies scattered inside the field bounds.
    /// Player construction failure fails the whole load.
    pub fn load(
        &self,
        def: &LevelDef,
        textures: &mut dyn TextureLoader,
        observer: &mut dyn LifetimeObserver,
    ) -> Result<Level, LevelError> {
        let field = Field::new(def.field_bounds, def.field_color, Some(&mut *observer));

        let player = match Player::from_file(
            def.field_bounds,
            &self.player_descriptor,
            textures,
            Some(&mut *observer),
        ) {
            Ok(player) => player,
            Err(e) => {
                // Undo the partial construction before propagating
                field.deinit(Some(&mut *observer));
                return Err(e);
            }
        };

        let mut rng = thread_rng();
        let mut enemies = Vec::with_capacity(def.num_enemies as usize);
        for _ in 0..def.num_enemies {
            enemies.push(Enemy::spawn_within(
                def.field_bounds,
                &mut rng,
                Some(&mut *observer),
            ));
        }

        println!(
            "Level loaded: {} enemies in {}x{} field",
            enemies.len(),
            def.field_bounds.width(),
            def.field_bounds.height()
        );

        Ok(Level {
            def: *def,
            field,
            player,
            enemies,
        })
    }

    /// Tear down everything the matching load created: player, enemies,
    /// field, in that order. `None` is a safe no-op.
    pub fn unload(&self, level: Option<Level>, observer: &mut dyn LifetimeObserver) {
        let Some(level) = level else {
            return;
        };
        let Level {
            def,
            field,
            player,
            enemies,
        } = level;

        // Teardown counts come from the def the level retained at load time
        debug_assert_eq!(enemies.len(), def.num_enemies as usize);

        player.deinit(Some(&mut *observer));
        for enemy in enemies {
            enemy.deinit(Some(&mut *observer));
        }
        field.deinit(Some(&mut *observer));

        println!("Level unloaded");
    }

    /// Drain this frame's collision events into beeps.
    pub fn play_collisions(&self, events: &mut Events, audio: &mut dyn AudioDevice) {
        for _hit in events.collisions.drain() {
            audio.play(self.beep);
        }
    }
}
