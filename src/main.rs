//! RUMBLE-32: a tiny sprite-arcade runtime
//!
//! One field, one player, a pile of bouncing enemies, and a battle message
//! box. The loop here is the frame driver: it samples elapsed time, polls
//! input, and walks every live object through fixed_update, update, and
//! draw, once per frame, in that order.

mod audio;
mod game;
mod render;

use macroquad::prelude::*;

use audio::MacroquadAudio;
use game::level::{BEEP_SOUND_PATH, PLAYER_DESCRIPTOR_PATH};
use game::types::{Bounds2D, Vec2};
use game::{BattleMessageQueue, Events, GameObject, LevelDef, LevelManager, ObjectTracker};
use render::MacroquadCanvas;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Level roster, supplied in source.
const LEVEL_DEFS: [LevelDef; 1] = [LevelDef {
    field_bounds: Bounds2D::new(Vec2::new(50.0, 50.0), Vec2::new(974.0, 600.0)),
    field_color: 0x00ff0000,
    num_enemies: 20,
    num_players: 1,
}];

fn window_conf() -> Conf {
    Conf {
        window_title: format!("RUMBLE-32 v{}", VERSION),
        window_width: 1024,
        window_height: 640,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut audio = MacroquadAudio::new();
    audio.preload(BEEP_SOUND_PATH).await;

    let mut canvas = MacroquadCanvas::new();
    let mut tracker = ObjectTracker::new();
    let mut events = Events::new();

    let manager = LevelManager::new(&mut audio);
    let mut level = match manager.load(&LEVEL_DEFS[0], &mut canvas, &mut tracker) {
        Ok(level) => Some(level),
        Err(e) => {
            eprintln!("Failed to load level ({}): {}", PLAYER_DESCRIPTOR_PATH, e);
            None
        }
    };

    let mut messages = BattleMessageQueue::new();
    messages.enqueue("A wild RUMBLE begins!", 2.0, false);
    messages.enqueue("Press SPACE to continue.", 0.0, true);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let elapsed_ms = (get_frame_time() * 1000.0) as u32;

        // Input signals feed the core; the core never polls
        if is_key_pressed(KeyCode::Space) {
            messages.signal_advance();
        }
        #[cfg(debug_assertions)]
        if is_key_pressed(KeyCode::D) {
            if let Some(level) = level.as_mut() {
                level.player_mut().cycle_direction();
            }
        }

        if let Some(level) = level.as_mut() {
            level.fixed_update(elapsed_ms);
            level.update(elapsed_ms, &mut events);
        }
        messages.fixed_update(elapsed_ms);
        messages.update(elapsed_ms);

        manager.play_collisions(&mut events, &mut audio);
        events.clear_all();

        clear_background(BLACK);
        if let Some(level) = level.as_ref() {
            level.draw(&mut canvas);
        }
        messages.draw(&mut canvas);

        next_frame().await;
    }

    manager.unload(level.take(), &mut tracker);
    manager.shutdown(&mut audio);

    if tracker.live() != 0 {
        eprintln!("Shutdown with {} objects still live", tracker.live());
    }
}
