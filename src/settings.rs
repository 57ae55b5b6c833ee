//! Game settings and preferences
//!
//! Persisted separately from game saves, under their own storage key.

use serde::{Deserialize, Serialize};

use crate::storage;
use crate::theme::Theme;

const STORAGE_KEY: &str = "hebi_settings";

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Colour theme name (see `Theme::by_name`)
    pub theme: String,

    // === Visuals ===
    /// Spawn/destroy and pickup animations
    pub animations: bool,
    /// Interpolate snakes between grid steps
    pub smooth_movement: bool,
    /// Draw the grid lattice
    pub grid_lines: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no pulsing, no interpolation)
    pub reduced_motion: bool,
    /// Force the high contrast theme
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default().name.to_string(),

            animations: true,
            smooth_movement: true,
            grid_lines: true,

            show_fps: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Theme in effect, falling back to the default for unknown names
    pub fn theme(&self) -> Theme {
        if self.high_contrast {
            return Theme::by_name("high_contrast").unwrap_or_default();
        }
        Theme::by_name(&self.theme).unwrap_or_else(|| {
            log::warn!("Unknown theme '{}', using default", self.theme);
            Theme::default()
        })
    }

    /// Switch to the next built-in theme
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme().next().name.to_string();
    }

    /// Effective animations (respects reduced_motion)
    pub fn effective_animations(&self) -> bool {
        self.animations && !self.reduced_motion
    }

    /// Effective interpolation (respects reduced_motion)
    pub fn effective_smooth_movement(&self) -> bool {
        self.smooth_movement && !self.reduced_motion
    }

    /// Final sound effect gain
    pub fn sfx_gain(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Stored settings, or defaults when none are stored
    pub fn load() -> Self {
        match storage::load_json::<Settings>(STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings (theme {})", settings.theme);
                settings
            }
            None => Self::default(),
        }
    }

    pub fn save(&self) {
        if storage::save_json(STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}
