//! Player entity
//!
//! Built from a JSON descriptor (stats + sprite sheets). Construction is
//! all-or-nothing: a malformed descriptor or a failed texture load aborts
//! the player, and with it the level load. At runtime the player animates
//! the sheet for its current state, one directional row at a time, and
//! draws exactly one sprite frame per call.

use std::path::Path;

use crate::render::{DrawTarget, SpriteQuad, TextureLoader, PLAYER_DRAW_DEPTH};

use super::level::LevelError;
use super::object::{self, GameObject, LifetimeObserver, ObjectCore, ObjectKind};
use super::sprite::{AnimationState, Direction, PlayerDef, PlayerState, SpriteSheet, StatBlock};
use super::types::{Bounds2D, Vec2};

pub struct Player {
    core: ObjectCore,
    stats: StatBlock,
    sheets: Vec<SpriteSheet>,
    anim: AnimationState,
    direction: Direction,
    state: PlayerState,
}

impl Player {
    /// Read and parse the descriptor file, then construct.
    pub fn from_file(
        spawn: Bounds2D,
        descriptor_path: &Path,
        textures: &mut dyn TextureLoader,
        observer: Option<&mut dyn LifetimeObserver>,
    ) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(descriptor_path)?;
        let def = PlayerDef::parse(&json)?;
        Self::from_descriptor(spawn, def, textures, observer)
    }

    /// Construct from a parsed descriptor, loading every sheet's texture.
    pub fn from_descriptor(
        spawn: Bounds2D,
        def: PlayerDef,
        textures: &mut dyn TextureLoader,
        observer: Option<&mut dyn LifetimeObserver>,
    ) -> Result<Self, LevelError> {
        if def.spritesheets.is_empty() {
            return Err(LevelError::Descriptor(
                "descriptor has no spritesheets".to_string(),
            ));
        }

        let mut sheets = Vec::with_capacity(def.spritesheets.len());
        for sheet_def in def.spritesheets {
            sheet_def.validate().map_err(LevelError::Descriptor)?;
            let texture = textures
                .load(&sheet_def.sprite_sheet_path)
                .ok_or_else(|| LevelError::Texture(sheet_def.sprite_sheet_path.clone()))?;
            sheets.push(SpriteSheet {
                def: sheet_def,
                texture,
            });
        }

        let player = Self {
            core: ObjectCore::new(ObjectKind::Player, spawn.center(), Vec2::ZERO),
            stats: def.stats,
            sheets,
            anim: AnimationState::default(),
            direction: Direction::South,
            state: PlayerState::Idle,
        };
        object::register(&player.core, observer);
        Ok(player)
    }

    pub fn stats(&self) -> StatBlock {
        self.stats
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn set_state(&mut self, state: PlayerState) {
        self.state = state;
    }

    /// Debug helper: step to the next facing direction. The frame driver
    /// calls this on a key press; input never gets polled in here.
    pub fn cycle_direction(&mut self) {
        self.direction = self.direction.next();
    }

    /// Sheet for the current state; falls back to the first sheet when the
    /// descriptor supplies fewer sheets than there are states.
    fn active_sheet(&self) -> &SpriteSheet {
        self.sheets
            .get(self.state.sheet_index())
            .unwrap_or(&self.sheets[0])
    }

    /// Tear down, firing the deregistration hook before the drop.
    pub fn deinit(self, observer: Option<&mut dyn LifetimeObserver>) {
        object::deregister(&self.core, observer);
    }
}

impl GameObject for Player {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        let sheet = self.active_sheet();
        let d = &sheet.def;

        let half_w = d.frame_width as f32 * 0.5;
        let half_h = d.frame_height as f32 * 0.5;
        let p = self.core.position;

        // UV rect for the current frame in this direction's row
        let u_per_frame = d.frame_width as f32 / d.texture_width as f32;
        let v_per_row = d.frame_height as f32 / d.texture_height as f32;
        let u = self.anim.current_frame as f32 * u_per_frame;
        let v = d.row_for(self.direction) as f32 * v_per_row;

        target.sprite(SpriteQuad {
            texture: sheet.texture,
            min: Vec2::new(p.x - half_w, p.y - half_h),
            max: Vec2::new(p.x + half_w, p.y + half_h),
            uv_min: Vec2::new(u, v),
            uv_max: Vec2::new(u + u_per_frame, v + v_per_row),
            depth: PLAYER_DRAW_DEPTH,
        });
    }

    fn update(&mut self, elapsed_ms: u32) {
        let (duration, frames) = {
            let d = &self.active_sheet().def;
            (d.frame_duration, d.frames_per_row())
        };
        self.anim.advance(duration, frames, elapsed_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::object::ObjectTracker;
    use crate::render::TextureKey;
    use std::io::Write;

    /// Hands out sequential keys, or nothing at all.
    struct FakeTextures {
        fail: bool,
        loaded: Vec<String>,
    }

    impl FakeTextures {
        fn ok() -> Self {
            Self {
                fail: false,
                loaded: Vec::new(),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                loaded: Vec::new(),
            }
        }
    }

    impl TextureLoader for FakeTextures {
        fn load(&mut self, path: &str) -> Option<TextureKey> {
            if self.fail {
                return None;
            }
            self.loaded.push(path.to_string());
            Some(TextureKey(self.loaded.len() as u32 - 1))
        }
    }

    #[derive(Default)]
    struct Recorder {
        quads: Vec<SpriteQuad>,
    }

    impl DrawTarget for Recorder {
        fn sprite(&mut self, quad: SpriteQuad) {
            self.quads.push(quad);
        }

        fn fill_rect(&mut self, _bounds: Bounds2D, _color: u32, _depth: f32) {}

        fn text(&mut self, _text: &str, _pos: Vec2, _depth: f32) {}
    }

    const DESCRIPTOR: &str = r#"{
        "stats": { "health": 30, "attack": 7, "defense": 4, "speed": 9 },
        "spritesheets": [
            {
                "name": "idle",
                "spriteSheetPath": "assets/player.png",
                "frameWidth": 32,
                "frameHeight": 32,
                "textureWidth": 256,
                "textureHeight": 256,
                "frameDuration": 120.0,
                "directions": [
                    { "name": "south", "yOffset": 0 },
                    { "name": "east", "yOffset": 2 }
                ]
            }
        ]
    }"#;

    fn spawn_bounds() -> Bounds2D {
        Bounds2D::new(Vec2::new(50.0, 50.0), Vec2::new(150.0, 150.0))
    }

    fn make_player(textures: &mut FakeTextures) -> Player {
        let def = PlayerDef::parse(DESCRIPTOR).unwrap();
        Player::from_descriptor(spawn_bounds(), def, textures, None).unwrap()
    }

    #[test]
    fn test_spawns_centered_with_zero_velocity() {
        let mut textures = FakeTextures::ok();
        let player = make_player(&mut textures);

        assert_eq!(player.core().position, Vec2::new(100.0, 100.0));
        assert_eq!(player.core().velocity, Vec2::ZERO);
        assert_eq!(player.direction(), Direction::South);
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(textures.loaded, vec!["assets/player.png".to_string()]);
    }

    #[test]
    fn test_texture_failure_aborts_construction() {
        let def = PlayerDef::parse(DESCRIPTOR).unwrap();
        let mut textures = FakeTextures::failing();
        let result = Player::from_descriptor(spawn_bounds(), def, &mut textures, None);
        assert!(matches!(result, Err(LevelError::Texture(_))));
    }

    #[test]
    fn test_zero_frame_width_aborts_construction() {
        let zeroed = DESCRIPTOR.replace(r#""frameWidth": 32,"#, r#""frameWidth": 0,"#);
        let def = PlayerDef::parse(&zeroed).unwrap();

        let mut textures = FakeTextures::ok();
        let result = Player::from_descriptor(spawn_bounds(), def, &mut textures, None);
        assert!(matches!(result, Err(LevelError::Descriptor(_))));
        // Construction must fail before any texture is touched
        assert!(textures.loaded.is_empty());
    }

    #[test]
    fn test_malformed_descriptor_file_aborts_construction() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "stats": {{ "health": 1 }} }}"#).unwrap();

        let mut textures = FakeTextures::ok();
        let result = Player::from_file(spawn_bounds(), file.path(), &mut textures, None);
        assert!(matches!(result, Err(LevelError::Descriptor(_))));
    }

    #[test]
    fn test_descriptor_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", DESCRIPTOR).unwrap();

        let mut textures = FakeTextures::ok();
        let mut tracker = ObjectTracker::new();
        let player =
            Player::from_file(spawn_bounds(), file.path(), &mut textures, Some(&mut tracker))
                .unwrap();

        assert_eq!(player.stats().health, 30);
        assert_eq!(tracker.registered(ObjectKind::Player), 1);

        player.deinit(Some(&mut tracker));
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn test_draw_emits_one_frame_quad() {
        let mut textures = FakeTextures::ok();
        let mut player = make_player(&mut textures);

        // Advance exactly one animation frame (120 ms per frame)
        player.update(120);

        let mut rec = Recorder::default();
        player.draw(&mut rec);
        assert_eq!(rec.quads.len(), 1);

        let quad = rec.quads[0];
        // 32 px frame centered on (100, 100)
        assert_eq!(quad.min, Vec2::new(84.0, 84.0));
        assert_eq!(quad.max, Vec2::new(116.0, 116.0));
        // Frame 1 of 8 columns, south row 0
        assert!((quad.uv_min.x - 0.125).abs() < 0.0001);
        assert!((quad.uv_min.y - 0.0).abs() < 0.0001);
        assert!((quad.uv_max.x - 0.25).abs() < 0.0001);
    }

    #[test]
    fn test_direction_selects_row() {
        let mut textures = FakeTextures::ok();
        let mut player = make_player(&mut textures);

        player.cycle_direction(); // south -> south_east, no row: falls back to index 1
        player.cycle_direction(); // -> east, descriptor row 2

        let mut rec = Recorder::default();
        player.draw(&mut rec);
        let quad = rec.quads[0];
        assert!((quad.uv_min.y - 2.0 * 0.125).abs() < 0.0001);
    }

    #[test]
    fn test_animation_wraps_at_row_end() {
        let mut textures = FakeTextures::ok();
        let mut player = make_player(&mut textures);

        // 8 frames per row at 120 ms each; one full cycle returns to frame 0
        for _ in 0..8 {
            player.update(120);
        }
        let mut rec = Recorder::default();
        player.draw(&mut rec);
        assert!((rec.quads[0].uv_min.x - 0.0).abs() < 0.0001);
    }
}
