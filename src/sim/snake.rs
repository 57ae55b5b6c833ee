//! Snake entity: body, steering buffer, lifecycle and timed effects

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::board::{Board, SpawnPoint};
use super::grid::{Direction, GridPos};
use crate::consts::{MIN_SNAKE_LENGTH, TURN_BUFFER};

/// Who steers a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    /// Local player slot (index into `TickInput::directions`)
    Human(u8),
    Bot,
}

/// Lifecycle of a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeState {
    /// Spawn animation playing; solid but not moving yet
    Spawning { ticks_left: u32 },
    Alive,
    /// Destroy animation playing; body is no longer solid
    Dying { ticks_left: u32 },
    /// Waiting to respawn
    Dead { respawn_ticks: u32 },
    /// No lives left
    Out,
}

/// Timed power-up effects (ticks remaining)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    pub speed_ticks: u32,
    pub slow_ticks: u32,
    pub ghost_ticks: u32,
}

impl Effects {
    pub fn tick(&mut self) {
        self.speed_ticks = self.speed_ticks.saturating_sub(1);
        self.slow_ticks = self.slow_ticks.saturating_sub(1);
        self.ghost_ticks = self.ghost_ticks.saturating_sub(1);
    }

    pub fn ghost(&self) -> bool {
        self.ghost_ticks > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    pub id: u32,
    pub controller: Controller,
    /// Cells from head to tail
    pub body: VecDeque<GridPos>,
    /// Body before the most recent step (for interpolation)
    pub prev_body: Vec<GridPos>,
    pub direction: Direction,
    /// Turns queued for upcoming steps
    turns: VecDeque<Direction>,
    pub grow_pending: u32,
    pub state: SnakeState,
    /// Remaining lives (`None` = unlimited)
    pub lives: Option<u8>,
    pub score: u64,
    pub foods_eaten: u32,
    pub deaths: u32,
    pub longest: usize,
    pub effects: Effects,
    /// Ticks since the last step
    pub step_counter: u32,
}

impl Snake {
    pub fn new(id: u32, controller: Controller, lives: Option<u8>) -> Self {
        Self {
            id,
            controller,
            body: VecDeque::new(),
            prev_body: Vec::new(),
            direction: Direction::Up,
            turns: VecDeque::with_capacity(TURN_BUFFER),
            grow_pending: 0,
            state: SnakeState::Dead { respawn_ticks: 0 },
            lives,
            score: 0,
            foods_eaten: 0,
            deaths: 0,
            longest: 0,
            effects: Effects::default(),
            step_counter: 0,
        }
    }

    /// Put the snake on the board at `spawn`.
    ///
    /// Trailing cells are laid out behind the head while they are free
    /// floor; whatever does not fit uncoils from the spawn as it moves.
    pub fn place(
        &mut self,
        spawn: SpawnPoint,
        length: u32,
        board: &Board,
        blocked: impl Fn(GridPos) -> bool,
        spawn_ticks: u32,
    ) {
        self.body.clear();
        self.body.push_back(spawn.pos);

        let trail = spawn.direction.opposite();
        let mut cursor = spawn.pos;
        while (self.body.len() as u32) < length.max(1) {
            match cursor.offset(trail, board.width, board.height, false) {
                Some(next) if board.is_floor(next) && !blocked(next) && !self.body.contains(&next) => {
                    self.body.push_back(next);
                    cursor = next;
                }
                _ => break,
            }
        }

        self.grow_pending = length.max(1) - self.body.len() as u32;
        self.prev_body = self.body.iter().copied().collect();
        self.direction = spawn.direction;
        self.turns.clear();
        self.effects = Effects::default();
        self.step_counter = 0;
        self.longest = self.longest.max(self.body.len());
        self.state = if spawn_ticks > 0 {
            SnakeState::Spawning {
                ticks_left: spawn_ticks,
            }
        } else {
            SnakeState::Alive
        };
    }

    pub fn head(&self) -> Option<GridPos> {
        self.body.front().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Direction the snake will take on its next step
    pub fn planned_direction(&self) -> Direction {
        self.turns.front().copied().unwrap_or(self.direction)
    }

    /// Queue a turn. Ignored when it repeats or reverses the last queued
    /// heading, or when the buffer is full.
    pub fn steer(&mut self, dir: Direction) -> bool {
        let last = self.turns.back().copied().unwrap_or(self.direction);
        if dir == last || dir == last.opposite() || self.turns.len() >= TURN_BUFFER {
            return false;
        }
        self.turns.push_back(dir);
        true
    }

    /// Replace any queued turns with a single decision
    pub fn set_course(&mut self, dir: Direction) {
        self.turns.clear();
        self.steer(dir);
    }

    /// Consume the next queued turn
    pub fn take_turn(&mut self) -> Direction {
        if let Some(dir) = self.turns.pop_front() {
            self.direction = dir;
        }
        self.direction
    }

    /// Will the tail cell be vacated on the next step?
    pub fn tail_vacates(&self) -> bool {
        self.grow_pending == 0
    }

    /// Body cells as they will be after moving the head to `new_head`
    pub fn body_after_step(&self, new_head: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        let keep = if self.tail_vacates() {
            self.body.len().saturating_sub(1)
        } else {
            self.body.len()
        };
        std::iter::once(new_head).chain(self.body.iter().copied().take(keep))
    }

    /// Move the head to `new_head`
    pub fn advance(&mut self, new_head: GridPos) {
        self.prev_body.clear();
        self.prev_body.extend(self.body.iter().copied());
        self.body.push_front(new_head);
        if self.grow_pending > 0 {
            self.grow_pending -= 1;
        } else {
            self.body.pop_back();
        }
        self.longest = self.longest.max(self.body.len());
    }

    /// Drop up to `cells` from the tail, never below the minimum length
    pub fn shrink(&mut self, cells: usize) {
        self.grow_pending = 0;
        for _ in 0..cells {
            if self.body.len() <= MIN_SNAKE_LENGTH {
                break;
            }
            self.body.pop_back();
        }
        self.prev_body.truncate(self.body.len());
    }

    /// Ticks between steps given the current base interval
    pub fn step_interval(&self, base: u32) -> u32 {
        let mut interval = base;
        if self.effects.speed_ticks > 0 {
            interval /= 2;
        }
        if self.effects.slow_ticks > 0 {
            interval = interval * 3 / 2;
        }
        interval.max(1)
    }

    /// Fraction of the way to the next step (0..1)
    pub fn step_progress(&self, interval: u32) -> f32 {
        (self.step_counter as f32 / interval.max(1) as f32).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.state == SnakeState::Alive
    }

    /// Body blocks other snakes
    pub fn is_solid(&self) -> bool {
        matches!(
            self.state,
            SnakeState::Alive | SnakeState::Spawning { .. }
        )
    }

    pub fn is_out(&self) -> bool {
        self.state == SnakeState::Out
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human(_))
    }

    pub fn has_lives_left(&self) -> bool {
        self.lives.is_none_or(|l| l > 0)
    }

    /// Start the destroy animation and spend a life
    pub fn kill(&mut self, destroy_ticks: u32) {
        self.state = SnakeState::Dying {
            ticks_left: destroy_ticks,
        };
        self.lives = self.lives.map(|l| l.saturating_sub(1));
        self.deaths += 1;
        self.effects = Effects::default();
        self.turns.clear();
        self.prev_body.clear();
        self.prev_body.extend(self.body.iter().copied());
    }

    /// Remove the body once the destroy animation is over
    pub fn clear_body(&mut self) {
        self.body.clear();
        self.prev_body.clear();
        self.grow_pending = 0;
    }
}
