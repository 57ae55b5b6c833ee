//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Structural validation of restored state
//! - Single storage slot (empty on native builds)

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_SNAKES;
use crate::sim::maps::check_size;
use crate::sim::{GamePhase, GameState, GridPos};
use crate::storage;

/// Current save format
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("save is corrupt: {0}")]
    Corrupt(String),
    #[error("saved game is already over")]
    Finished,
}

/// What is written to storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    /// Unix timestamp (ms)
    pub saved_at: f64,
    pub state: GameState,
}

/// Only the version is read first so old formats fail cleanly
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

pub fn encode(state: &GameState, saved_at: f64) -> Result<String, PersistError> {
    let envelope = SaveEnvelope {
        version: SAVE_VERSION,
        saved_at,
        state: state.clone(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode and validate a save. A game saved mid-play comes back paused.
pub fn decode(json: &str) -> Result<SaveEnvelope, PersistError> {
    let probe: VersionProbe = serde_json::from_str(json)?;
    if probe.version != SAVE_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: probe.version,
            expected: SAVE_VERSION,
        });
    }
    let mut envelope: SaveEnvelope = serde_json::from_str(json)?;
    validate(&envelope.state)?;
    if envelope.state.phase == GamePhase::Playing {
        envelope.state.phase = GamePhase::Paused;
    }
    Ok(envelope)
}

fn validate(state: &GameState) -> Result<(), PersistError> {
    if state.phase == GamePhase::GameOver {
        return Err(PersistError::Finished);
    }
    state
        .config
        .validate()
        .map_err(|e| PersistError::Corrupt(e.to_string()))?;
    let board = &state.board;
    check_size(board.width, board.height).map_err(|e| PersistError::Corrupt(e.to_string()))?;
    if board.cell_count() != board.width as usize * board.height as usize {
        return Err(PersistError::Corrupt(format!(
            "board has {} tiles for {}x{}",
            board.cell_count(),
            board.width,
            board.height
        )));
    }
    if state.snakes.is_empty() || state.snakes.len() > MAX_SNAKES {
        return Err(PersistError::Corrupt(format!(
            "{} snakes",
            state.snakes.len()
        )));
    }

    let in_bounds = |p: &GridPos| p.in_bounds(board.width, board.height);
    for (idx, snake) in state.snakes.iter().enumerate() {
        if snake.id as usize != idx {
            return Err(PersistError::Corrupt(format!(
                "snake {} stored at index {}",
                snake.id, idx
            )));
        }
        if !snake.body.iter().all(in_bounds) {
            return Err(PersistError::Corrupt(format!(
                "snake {} is off the board",
                snake.id
            )));
        }
        if snake.body.iter().any(|&p| board.is_wall(p)) {
            return Err(PersistError::Corrupt(format!(
                "snake {} is inside a wall",
                snake.id
            )));
        }
    }
    let items_ok = state.food.iter().all(|f| board.is_floor(f.pos))
        && state.powerups.iter().all(|p| board.is_floor(p.pos));
    if !items_ok {
        return Err(PersistError::Corrupt("item outside the floor".into()));
    }
    Ok(())
}

const STORAGE_KEY: &str = "hebi_save";

/// A game paused before its first tick has nothing to continue, and a
/// finished one cannot be continued
pub fn worth_saving(state: &GameState) -> bool {
    state.time_ticks > 0 && state.phase != GamePhase::GameOver
}

/// Write the game to the save slot
pub fn save_game(state: &GameState, now: f64) {
    match encode(state, now) {
        Ok(json) => {
            if storage::write(STORAGE_KEY, &json) {
                log::info!("Game saved (tick {})", state.time_ticks);
            }
        }
        Err(e) => log::warn!("Could not save game: {}", e),
    }
}

/// Read the saved game, discarding it if unusable
pub fn load_game() -> Option<SaveEnvelope> {
    let json = storage::read(STORAGE_KEY)?;
    match decode(&json) {
        Ok(envelope) => Some(envelope),
        Err(e) => {
            log::warn!("Discarding saved game: {}", e);
            storage::remove(STORAGE_KEY);
            None
        }
    }
}

pub fn clear_game() {
    storage::remove(STORAGE_KEY);
    log::debug!("Saved game cleared");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{TickInput, tick};

    fn played_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 31).unwrap();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..500 {
            tick(&mut state, &input);
        }
        state
    }

    #[test]
    fn test_save_and_continue() {
        let state = played_state();
        let json = encode(&state, 1234.0).unwrap();
        let envelope = decode(&json).unwrap();
        assert_eq!(envelope.version, SAVE_VERSION);
        assert_eq!(envelope.saved_at, 1234.0);
        assert_eq!(envelope.state.phase, GamePhase::Paused);
        assert_eq!(envelope.state.time_ticks, state.time_ticks);
        assert_eq!(envelope.state.snakes[0].body, state.snakes[0].body);
    }

    #[test]
    fn test_continued_game_matches_original() {
        let mut original = played_state();
        let mut restored = decode(&encode(&original, 0.0).unwrap()).unwrap().state;
        restored.phase = original.phase;

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..500 {
            tick(&mut original, &input);
            tick(&mut restored, &input);
        }
        assert_eq!(
            serde_json::to_string(&original).unwrap(),
            serde_json::to_string(&restored).unwrap()
        );
    }

    #[test]
    fn test_rejects_other_versions() {
        let state = played_state();
        let json = encode(&state, 0.0).unwrap().replacen(
            &format!("\"version\":{}", SAVE_VERSION),
            "\"version\":99",
            1,
        );
        assert!(matches!(
            decode(&json),
            Err(PersistError::UnsupportedVersion {
                found: 99,
                expected: SAVE_VERSION
            })
        ));
    }

    #[test]
    fn test_rejects_corrupt_json() {
        assert!(matches!(decode("{\"version\":1,"), Err(PersistError::Json(_))));
        assert!(matches!(
            decode("{\"version\":1,\"saved_at\":0}"),
            Err(PersistError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_finished_game() {
        let mut state = played_state();
        state.phase = GamePhase::GameOver;
        let json = encode(&state, 0.0).unwrap();
        assert!(matches!(decode(&json), Err(PersistError::Finished)));
    }

    #[test]
    fn test_rejects_out_of_bounds_body() {
        let mut state = played_state();
        state.snakes[0].body.push_back(GridPos::new(500, 500));
        let json = encode(&state, 0.0).unwrap();
        assert!(matches!(decode(&json), Err(PersistError::Corrupt(_))));
    }

    #[test]
    fn test_rejects_body_inside_wall() {
        let mut state = played_state();
        assert!(state.board.is_wall(GridPos::new(0, 0)));
        state.snakes[0].body.push_back(GridPos::new(0, 0));
        let json = encode(&state, 0.0).unwrap();
        assert!(matches!(decode(&json), Err(PersistError::Corrupt(_))));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut state = played_state();
        state.config.step_ticks = 0;
        let json = encode(&state, 0.0).unwrap();
        match decode(&json) {
            Err(PersistError::Corrupt(reason)) => assert!(reason.contains("step_ticks")),
            other => panic!("expected a corrupt save, got {:?}", other.map(|e| e.version)),
        }
    }

    #[test]
    fn test_unstarted_game_not_worth_saving() {
        let mut state = GameState::new(GameConfig::default(), 31).unwrap();
        state.phase = GamePhase::Paused;
        assert!(!worth_saving(&state));

        let mut state = played_state();
        assert!(worth_saving(&state));
        state.phase = GamePhase::GameOver;
        assert!(!worth_saving(&state));
    }
}
