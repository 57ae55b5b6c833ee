//! Hebi - a grid arena snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, maps, snakes, food, power-ups)
//! - `renderer`: WebGPU rendering pipeline and a plain-text board dump
//! - `theme` / `colors`: Named colour palettes
//! - `config`: Data-driven game rules loaded from JSON
//! - `persistence`: Versioned save/continue envelope
//! - `settings` / `highscores` / `storage`: Preferences and per-map leaderboards
//! - `input` / `audio`: Keyboard mapping and event sounds for the browser app

pub mod audio;
pub mod colors;
pub mod config;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod storage;
pub mod theme;

pub use config::{ConfigError, GameConfig};
pub use highscores::HighScores;
pub use settings::Settings;
pub use theme::Theme;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz so timers have fine resolution)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default world width in grid cells
    pub const GRID_WIDTH: u32 = 29;
    /// Default world height in grid cells
    pub const GRID_HEIGHT: u32 = 29;
    /// Pixel dimension of a grid cell
    pub const GRID_SCALE: f32 = 24.0;
    /// Pixel padding outside of the grid
    pub const GRID_PADDING: f32 = 24.0;

    /// Ticks between snake moves (0.125 s)
    pub const STEP_TICKS: u32 = 15;
    /// Fastest a snake may get from eating
    pub const MIN_STEP_TICKS: u32 = 6;

    /// Cells in a freshly spawned snake (head included)
    pub const SNAKE_LENGTH: u32 = 7;
    /// Shrink never takes a snake below this
    pub const MIN_SNAKE_LENGTH: usize = 2;
    /// Turns a snake may have buffered ahead of its next step
    pub const TURN_BUFFER: usize = 2;

    /// Local players supported by input mapping
    pub const MAX_PLAYERS: usize = 4;
    /// Human + bot snakes
    pub const MAX_SNAKES: usize = 8;

    /// Head and body cell fill (fraction of a cell)
    pub const HEAD_SIZE: f32 = 0.875;
    pub const SEGMENT_SIZE: f32 = 0.75;
}
