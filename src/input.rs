//! Keyboard mapping
//!
//! Four players share one keyboard: arrows, WASD, IJKL and the numpad.

use crate::sim::Direction;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer { slot: usize, direction: Direction },
    /// Start, or restart after game over
    Start,
    Pause,
    CycleTheme,
    ToggleIdle,
    /// Choose the number of local players for the next game
    Players(u8),
}

/// Map a `KeyboardEvent` (`key`, `code`) pair to an action.
///
/// Steering uses `code` so it follows physical positions on any layout;
/// the other commands use the typed `key`.
pub fn map_key(key: &str, code: &str) -> Option<KeyAction> {
    let steer = |slot, direction| Some(KeyAction::Steer { slot, direction });
    match code {
        "ArrowUp" => return steer(0, Direction::Up),
        "ArrowDown" => return steer(0, Direction::Down),
        "ArrowLeft" => return steer(0, Direction::Left),
        "ArrowRight" => return steer(0, Direction::Right),
        "KeyW" => return steer(1, Direction::Up),
        "KeyS" => return steer(1, Direction::Down),
        "KeyA" => return steer(1, Direction::Left),
        "KeyD" => return steer(1, Direction::Right),
        "KeyI" => return steer(2, Direction::Up),
        "KeyK" => return steer(2, Direction::Down),
        "KeyJ" => return steer(2, Direction::Left),
        "KeyL" => return steer(2, Direction::Right),
        "Numpad8" => return steer(3, Direction::Up),
        "Numpad5" => return steer(3, Direction::Down),
        "Numpad4" => return steer(3, Direction::Left),
        "Numpad6" => return steer(3, Direction::Right),
        _ => {}
    }
    match key {
        " " | "Enter" => Some(KeyAction::Start),
        "Escape" | "p" | "P" => Some(KeyAction::Pause),
        "t" | "T" => Some(KeyAction::CycleTheme),
        "b" | "B" => Some(KeyAction::ToggleIdle),
        "1" | "2" | "3" | "4" => key.parse().ok().map(KeyAction::Players),
        _ => None,
    }
}
