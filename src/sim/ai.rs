//! Bot steering
//!
//! Breadth-first search to the nearest pickup, falling back to the move
//! that keeps the most room. Only reads state, so it never touches the RNG.

use std::collections::{HashSet, VecDeque};

use super::grid::{Direction, GridPos};
use super::state::GameState;

/// Cap on flood-fill work per candidate move
const FLOOD_LIMIT: usize = 512;

/// Cells the snake at `idx` must not enter on its next step
fn blocked_cells(state: &GameState, idx: usize) -> HashSet<GridPos> {
    let me = &state.snakes[idx];
    if me.effects.ghost() {
        return HashSet::new();
    }
    let mut blocked = HashSet::new();
    for snake in state.snakes.iter().filter(|s| s.is_solid()) {
        // A tail that is about to move out of the way is fair game
        let keep = if snake.tail_vacates() && snake.is_alive() {
            snake.len().saturating_sub(1)
        } else {
            snake.len()
        };
        blocked.extend(snake.body.iter().copied().take(keep));
    }
    blocked
}

/// Cells reachable from `start` without crossing `blocked`, up to `limit`
fn flood_area(state: &GameState, start: GridPos, blocked: &HashSet<GridPos>, limit: usize) -> usize {
    let wrap = state.config.wraparound;
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        if seen.len() >= limit {
            break;
        }
        for dir in Direction::ALL {
            let Some(step) = state.board.next_cell(pos, dir, wrap) else {
                continue;
            };
            if state.board.is_floor(step.pos)
                && !blocked.contains(&step.pos)
                && seen.insert(step.pos)
            {
                queue.push_back(step.pos);
            }
        }
    }
    seen.len()
}

/// Pick a heading for snake `idx`, or `None` to keep going straight
pub fn choose_direction(state: &GameState, idx: usize) -> Option<Direction> {
    let snake = state.snakes.get(idx)?;
    let head = snake.head()?;
    let wrap = state.config.wraparound;
    let heading = snake.direction;
    let blocked = blocked_cells(state, idx);

    let safe: Vec<(Direction, GridPos)> = Direction::ALL
        .into_iter()
        .filter(|d| *d != heading.opposite())
        .filter_map(|d| {
            let step = state.board.next_cell(head, d, wrap)?;
            (state.board.is_floor(step.pos) && !blocked.contains(&step.pos)).then_some((d, step.pos))
        })
        .collect();
    if safe.is_empty() {
        return None;
    }

    let targets: HashSet<GridPos> = state
        .food
        .iter()
        .map(|f| f.pos)
        .chain(state.powerups.iter().map(|p| p.pos))
        .collect();

    // BFS outward, remembering which first move led to each cell
    let mut seen: HashSet<GridPos> = safe.iter().map(|(_, p)| *p).collect();
    seen.insert(head);
    let mut queue: VecDeque<(GridPos, Direction)> = safe.iter().map(|(d, p)| (*p, *d)).collect();
    let room_needed = snake.len() + snake.grow_pending as usize;
    while let Some((pos, first)) = queue.pop_front() {
        if targets.contains(&pos) {
            let entry = safe.iter().find(|(d, _)| *d == first).map(|(_, p)| *p)?;
            if flood_area(state, entry, &blocked, FLOOD_LIMIT) > room_needed {
                return Some(first);
            }
            // Food in a dead end; look for a roomier option instead
            break;
        }
        for dir in Direction::ALL {
            let Some(step) = state.board.next_cell(pos, dir, wrap) else {
                continue;
            };
            if state.board.is_floor(step.pos)
                && !blocked.contains(&step.pos)
                && seen.insert(step.pos)
            {
                queue.push_back((step.pos, first));
            }
        }
    }

    // Most room wins; ties keep the current heading
    safe.iter()
        .map(|(d, p)| {
            let area = flood_area(state, *p, &blocked, FLOOD_LIMIT);
            (area, *d == heading, *d)
        })
        .max_by_key(|(area, straight, _)| (*area, *straight))
        .map(|(_, _, d)| d)
}
