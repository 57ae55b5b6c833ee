//! Game state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::grid::GridPos;
use super::snake::{Controller, Snake, SnakeState};
use super::spawn;
use crate::config::{ConfigError, GameConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board shown, waiting for the first input
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Every player is out of lives
    GameOver,
}

/// Food types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Apple,
    /// Worth more, grows more, expires
    Golden,
}

impl FoodKind {
    pub fn growth(&self) -> u32 {
        match self {
            FoodKind::Apple => 1,
            FoodKind::Golden => 3,
        }
    }

    pub fn points(&self) -> u64 {
        match self {
            FoodKind::Apple => 10,
            FoodKind::Golden => 50,
        }
    }
}

/// A food item on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub pos: GridPos,
    pub kind: FoodKind,
    /// Ticks since spawning (drives the pop-in animation)
    pub age_ticks: u32,
    /// Ticks until it disappears (`None` = stays)
    pub ttl_ticks: Option<u32>,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Move twice as often
    Speed,
    /// Move at two thirds the pace
    Slow,
    /// Pass through snake bodies
    Ghost,
    /// Lose three tail cells
    Shrink,
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Speed,
        PowerUpKind::Slow,
        PowerUpKind::Ghost,
        PowerUpKind::Shrink,
        PowerUpKind::ExtraLife,
    ];

    pub const POINTS: u64 = 5;
}

/// A power-up pickup on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: GridPos,
    pub kind: PowerUpKind,
    pub age_ticks: u32,
    pub ttl_ticks: u32,
}

/// Why a snake died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Ran off a board without wraparound
    Edge,
    Wall,
    SelfCollision,
    /// Ran into another snake's body
    Snake { other: u32 },
    /// Two heads reached the same cell
    HeadOn { other: u32 },
}

/// Things that happened during one tick (for audio, HUD and logging)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { snake: u32, kind: FoodKind },
    FoodExpired { pos: GridPos },
    PowerUpCollected { snake: u32, kind: PowerUpKind },
    PortalUsed { snake: u32 },
    SnakeDied { snake: u32, cause: DeathCause },
    SnakeSpawned { snake: u32 },
    SnakeOut { snake: u32 },
    GameOver,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG stream (serialized so a continued game rolls the same dice)
    pub rng: Pcg64,
    /// Rules this game was started with
    pub config: GameConfig,
    pub board: Board,
    pub phase: GamePhase,
    /// Simulation tick counter (only advances while playing)
    pub time_ticks: u64,
    /// Snakes indexed by id
    pub snakes: Vec<Snake>,
    pub food: Vec<Food>,
    pub powerups: Vec<PowerUp>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given rules and seed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg64::seed_from_u64(seed);
        let board = config.map.build(&mut rng)?;

        let lives = (config.lives > 0).then_some(config.lives);
        let mut snakes = Vec::with_capacity(config.snake_count());
        for slot in 0..config.players {
            snakes.push(Snake::new(
                snakes.len() as u32,
                Controller::Human(slot),
                lives,
            ));
        }
        for _ in 0..config.bots {
            snakes.push(Snake::new(snakes.len() as u32, Controller::Bot, lives));
        }

        let mut state = Self {
            seed,
            rng,
            config,
            board,
            phase: GamePhase::Ready,
            time_ticks: 0,
            snakes,
            food: Vec::new(),
            powerups: Vec::new(),
            events: Vec::new(),
        };

        // Snakes without a free spawn wait out a respawn delay and retry
        for idx in 0..state.snakes.len() {
            if !spawn::respawn(&mut state, idx) {
                log::warn!("No free spawn for snake {} at start", idx);
                state.snakes[idx].state = SnakeState::Dead {
                    respawn_ticks: state.config.respawn_delay_ticks,
                };
            }
        }
        state.events.clear();
        spawn::top_up_food(&mut state);

        log::info!(
            "New game: seed {}, map '{}' {}x{}, {} players, {} bots",
            seed,
            state.board.name,
            state.board.width,
            state.board.height,
            state.config.players,
            state.config.bots
        );

        Ok(state)
    }

    /// Base step interval for a snake, after the eat-to-speed-up ramp
    pub fn base_interval(&self, snake: &Snake) -> u32 {
        let ramp = match self.config.speedup_every {
            0 => 0,
            every => snake.foods_eaten / every,
        };
        self.config
            .step_ticks
            .saturating_sub(ramp)
            .max(self.config.min_step_ticks)
    }

    /// Effective step interval for snake `idx`
    pub fn step_interval(&self, idx: usize) -> u32 {
        let snake = &self.snakes[idx];
        snake.step_interval(self.base_interval(snake))
    }

    /// Cells occupied by solid snake bodies
    pub fn solid_cells(&self) -> HashSet<GridPos> {
        self.snakes
            .iter()
            .filter(|s| s.is_solid())
            .flat_map(|s| s.body.iter().copied())
            .collect()
    }

    /// Cells a new item must not be placed on
    pub fn occupied_cells(&self) -> HashSet<GridPos> {
        let mut cells = self.solid_cells();
        cells.extend(self.food.iter().map(|f| f.pos));
        cells.extend(self.powerups.iter().map(|p| p.pos));
        cells
    }

    pub fn food_at(&self, pos: GridPos) -> Option<usize> {
        self.food.iter().position(|f| f.pos == pos)
    }

    pub fn powerup_at(&self, pos: GridPos) -> Option<usize> {
        self.powerups.iter().position(|p| p.pos == pos)
    }

    /// Highest score among all snakes
    pub fn best_score(&self) -> u64 {
        self.snakes.iter().map(|s| s.score).max().unwrap_or(0)
    }

    /// Combined score of the human players
    pub fn human_score(&self) -> u64 {
        self.snakes
            .iter()
            .filter(|s| s.is_human())
            .map(|s| s.score)
            .sum()
    }
}
