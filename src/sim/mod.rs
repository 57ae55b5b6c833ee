//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by snake id, row-major cells)
//! - No rendering or platform dependencies

pub mod ai;
pub mod board;
pub mod grid;
pub mod maps;
pub mod snake;
pub mod spawn;
pub mod state;
pub mod tick;

pub use board::{Board, PortalPair, SpawnPoint, Step, Tile};
pub use grid::{Direction, GridPos, grid_to_world};
pub use maps::{AsciiMap, CorridorsMap, MapConfig, MapError, OpenMap};
pub use snake::{Controller, Effects, Snake, SnakeState};
pub use state::{
    DeathCause, Food, FoodKind, GameEvent, GamePhase, GameState, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
