//! Audio boundary
//!
//! Fire-and-forget sound playback behind [`AudioDevice`]. Loading reports
//! failure only through the `SoundHandle::NONE` sentinel; a missing sound
//! degrades to silence, never to an error.

use std::collections::HashMap;

use macroquad::audio as mq_audio;

/// Handle to a loaded sound. `NONE` means "no sound"; playing it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundHandle(pub u32);

impl SoundHandle {
    pub const NONE: SoundHandle = SoundHandle(u32::MAX);
}

pub trait AudioDevice {
    /// Resolve a sound by path. Returns `SoundHandle::NONE` on failure.
    fn load_sound(&mut self, path: &str) -> SoundHandle;
    fn play(&mut self, handle: SoundHandle);
    fn unload(&mut self, handle: SoundHandle);
}

/// Macroquad-backed device. Decoding is async in macroquad, so the frame
/// driver preloads each sound file up front; `load_sound` then only resolves
/// the path against the preloaded set.
pub struct MacroquadAudio {
    preloaded: HashMap<String, u32>,
    sounds: Vec<Option<mq_audio::Sound>>,
}

impl MacroquadAudio {
    pub fn new() -> Self {
        Self {
            preloaded: HashMap::new(),
            sounds: Vec::new(),
        }
    }

    /// Decode a sound file and make it resolvable by path.
    pub async fn preload(&mut self, path: &str) {
        match mq_audio::load_sound(path).await {
            Ok(sound) => {
                let id = self.sounds.len() as u32;
                self.sounds.push(Some(sound));
                self.preloaded.insert(path.to_string(), id);
            }
            Err(e) => eprintln!("Failed to load sound {}: {}", path, e),
        }
    }
}

impl Default for MacroquadAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDevice for MacroquadAudio {
    fn load_sound(&mut self, path: &str) -> SoundHandle {
        self.preloaded
            .get(path)
            .map_or(SoundHandle::NONE, |&id| SoundHandle(id))
    }

    fn play(&mut self, handle: SoundHandle) {
        if let Some(Some(sound)) = self.sounds.get(handle.0 as usize) {
            mq_audio::play_sound_once(sound);
        }
    }

    fn unload(&mut self, handle: SoundHandle) {
        if let Some(slot) = self.sounds.get_mut(handle.0 as usize) {
            *slot = None;
        }
        self.preloaded.retain(|_, id| *id != handle.0);
    }
}
