//! Draw submission boundary
//!
//! The core computes positions and UV rects; everything that actually talks
//! to the GPU sits behind [`DrawTarget`] and [`TextureLoader`]. The macroquad
//! implementations live here; tests substitute recording doubles.
//!
//! Draw depth ranges from -0.99 to 1.0, 1.0 being the highest z-height.

use macroquad::prelude as mq;

use crate::game::types::{Bounds2D, Vec2};

pub const PLAYER_DRAW_DEPTH: f32 = 0.9;
pub const ENEMY_DRAW_DEPTH: f32 = PLAYER_DRAW_DEPTH;
pub const FIELD_DRAW_DEPTH: f32 = -0.9;
pub const UI_DRAW_DEPTH: f32 = -0.99;

/// Handle to a loaded texture. `NONE` is the "no texture" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureKey(pub u32);

impl TextureKey {
    pub const NONE: TextureKey = TextureKey(u32::MAX);
}

/// Loads sheet textures for entities during construction. Returns `None` on
/// failure; the caller decides whether that aborts construction.
pub trait TextureLoader {
    fn load(&mut self, path: &str) -> Option<TextureKey>;
}

/// One textured quad: a single sprite frame.
#[derive(Debug, Clone, Copy)]
pub struct SpriteQuad {
    pub texture: TextureKey,
    /// Screen-space corner box.
    pub min: Vec2,
    pub max: Vec2,
    /// Normalized UV rect into the texture.
    pub uv_min: Vec2,
    pub uv_max: Vec2,
    pub depth: f32,
}

/// Where draw calls go. One sprite frame, solid rect, or text line per call;
/// submission itself is the implementor's problem.
pub trait DrawTarget {
    fn sprite(&mut self, quad: SpriteQuad);
    fn fill_rect(&mut self, bounds: Bounds2D, color: u32, depth: f32);
    fn text(&mut self, text: &str, pos: Vec2, depth: f32);
}

/// Split a packed 0xAARRGGBB word. A zero alpha byte is promoted to opaque so
/// legacy 0x00RRGGBB colors stay visible.
pub fn unpack_color(color: u32) -> mq::Color {
    let a = ((color >> 24) & 0xff) as u8;
    let r = ((color >> 16) & 0xff) as u8;
    let g = ((color >> 8) & 0xff) as u8;
    let b = (color & 0xff) as u8;
    mq::Color::from_rgba(r, g, b, if a == 0 { 0xff } else { a })
}

/// Macroquad-backed canvas. Owns the loaded textures; depth is ignored
/// because submission order already matches the frame's draw order.
pub struct MacroquadCanvas {
    textures: Vec<mq::Texture2D>,
}

impl MacroquadCanvas {
    pub fn new() -> Self {
        Self { textures: Vec::new() }
    }
}

impl Default for MacroquadCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureLoader for MacroquadCanvas {
    fn load(&mut self, path: &str) -> Option<TextureKey> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Failed to read texture {}: {}", path, e);
                return None;
            }
        };
        let decoded = match image::load_from_memory(&bytes) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                eprintln!("Failed to decode texture {}: {}", path, e);
                return None;
            }
        };

        let (w, h) = decoded.dimensions();
        let texture = mq::Texture2D::from_rgba8(w as u16, h as u16, decoded.as_raw());
        texture.set_filter(mq::FilterMode::Nearest);

        let key = TextureKey(self.textures.len() as u32);
        self.textures.push(texture);
        Some(key)
    }
}

impl DrawTarget for MacroquadCanvas {
    fn sprite(&mut self, quad: SpriteQuad) {
        let Some(texture) = self.textures.get(quad.texture.0 as usize) else {
            return;
        };

        let size = texture.size();
        let source = mq::Rect::new(
            quad.uv_min.x * size.x,
            quad.uv_min.y * size.y,
            (quad.uv_max.x - quad.uv_min.x) * size.x,
            (quad.uv_max.y - quad.uv_min.y) * size.y,
        );
        mq::draw_texture_ex(
            texture,
            quad.min.x,
            quad.min.y,
            mq::WHITE,
            mq::DrawTextureParams {
                dest_size: Some(mq::vec2(quad.max.x - quad.min.x, quad.max.y - quad.min.y)),
                source: Some(source),
                ..Default::default()
            },
        );
    }

    fn fill_rect(&mut self, bounds: Bounds2D, color: u32, _depth: f32) {
        mq::draw_rectangle(
            bounds.min.x,
            bounds.min.y,
            bounds.width(),
            bounds.height(),
            unpack_color(color),
        );
    }

    fn text(&mut self, text: &str, pos: Vec2, _depth: f32) {
        mq::draw_text(text, pos.x, pos.y, 24.0, mq::WHITE);
    }
}
