//! Sprite descriptors and animation
//!
//! The player's stats and sprite sheets come from a JSON descriptor file.
//! Every sheet must supply its frame and texture dimensions plus a frame
//! duration; a missing field fails the whole parse, and a zero dimension
//! fails validation, either of which in turn fails player construction.
//! Schema validation beyond that is out of scope.

use serde::Deserialize;

use crate::render::TextureKey;

/// Named integer stats for a battle entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatBlock {
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

/// One named row of a sprite sheet, e.g. {"name": "north", "yOffset": 4}.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionRow {
    pub name: String,
    pub y_offset: u32,
}

/// One sprite sheet: a texture holding a grid of frames, one row per facing
/// direction. All dimension fields are required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetDef {
    pub name: String,
    pub sprite_sheet_path: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub texture_width: u32,
    pub texture_height: u32,
    /// Time per animation frame, in milliseconds.
    pub frame_duration: f32,
    #[serde(default)]
    pub directions: Vec<DirectionRow>,
}

impl SheetDef {
    /// Every dimension must be positive; a zero frame or texture size would
    /// poison the frames-per-row and UV math.
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("frameWidth", self.frame_width),
            ("frameHeight", self.frame_height),
            ("textureWidth", self.texture_width),
            ("textureHeight", self.texture_height),
        ] {
            if value == 0 {
                return Err(format!("sheet {:?}: {} must be positive", self.name, field));
            }
        }
        Ok(())
    }

    /// How many animation frames fit across the texture.
    pub fn frames_per_row(&self) -> u32 {
        self.texture_width / self.frame_width
    }

    /// Which texture row holds the given direction: the descriptor's
    /// yOffset when a matching row is named, else the direction index.
    pub fn row_for(&self, dir: Direction) -> u32 {
        self.directions
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(dir.name()))
            .map(|d| d.y_offset)
            .unwrap_or(dir as u32)
    }
}

/// The whole player descriptor document.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerDef {
    pub stats: StatBlock,
    pub spritesheets: Vec<SheetDef>,
}

impl PlayerDef {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A sheet definition paired with its loaded texture.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub def: SheetDef,
    pub texture: TextureKey,
}

/// Eight-way facing, ordered to match descriptor row layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    South,
    SouthEast,
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
}

impl Direction {
    pub const COUNT: u32 = 8;

    pub fn name(self) -> &'static str {
        match self {
            Direction::South => "south",
            Direction::SouthEast => "south_east",
            Direction::East => "east",
            Direction::NorthEast => "north_east",
            Direction::North => "north",
            Direction::NorthWest => "north_west",
            Direction::West => "west",
            Direction::SouthWest => "south_west",
        }
    }

    /// Next direction clockwise; used by the debug direction cycle.
    pub fn next(self) -> Direction {
        match self {
            Direction::South => Direction::SouthEast,
            Direction::SouthEast => Direction::East,
            Direction::East => Direction::NorthEast,
            Direction::NorthEast => Direction::North,
            Direction::North => Direction::NorthWest,
            Direction::NorthWest => Direction::West,
            Direction::West => Direction::SouthWest,
            Direction::SouthWest => Direction::South,
        }
    }
}

/// Which sheet the player is animating from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Walk,
    Alive,
    Faint,
}

impl PlayerState {
    /// Index of this state's sheet in the descriptor's spritesheets array.
    pub fn sheet_index(self) -> usize {
        self as usize
    }
}

/// Frame timer for one looping animation row.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationState {
    pub current_frame: u32,
    frame_timer: f32,
}

impl AnimationState {
    /// Advance the timer; steps to the next frame each time it crosses the
    /// frame duration, looping at `max_frames`.
    pub fn advance(&mut self, frame_duration_ms: f32, max_frames: u32, elapsed_ms: u32) {
        self.frame_timer += elapsed_ms as f32;

        if self.frame_timer >= frame_duration_ms {
            self.current_frame += 1;
            self.frame_timer -= frame_duration_ms;

            if self.current_frame >= max_frames {
                self.current_frame = 0;
            }
        }
    }
}
