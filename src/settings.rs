use crate::CONFY_APP_NAME;
use crate::playback::{DEFAULT_FPS, LoopMode};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub background: [f32; 3],
    pub show_annotations: bool,
    pub show_axes: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0],
            show_annotations: true,
            show_axes: true,
        }
    }
}

impl DisplaySettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "display").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "display", self);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSettings {
    pub fps: f32,
    pub loop_mode: LoopMode,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            loop_mode: LoopMode::default(),
        }
    }
}

impl PlaybackSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "playback").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "playback", self);
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub display: DisplaySettings,
    pub playback: PlaybackSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            display: DisplaySettings::load(),
            playback: PlaybackSettings::load(),
        }
    }
}
