//! Placement of food, power-ups and respawning snakes
//!
//! Everything here draws from the game's RNG, so call order matters for
//! determinism: food top-up happens once per tick after movement.

use std::collections::HashSet;

use rand::Rng;

use super::board::SpawnPoint;
use super::grid::GridPos;
use super::state::{Food, FoodKind, GameEvent, GameState, PowerUp, PowerUpKind};

/// Cells directly in front of alive heads (never spawn into a snake's mouth)
fn cells_ahead(state: &GameState) -> HashSet<GridPos> {
    let wrap = state.config.wraparound;
    state
        .snakes
        .iter()
        .filter(|s| s.is_alive())
        .filter_map(|s| {
            let head = s.head()?;
            state
                .board
                .next_cell(head, s.planned_direction(), wrap)
                .map(|step| step.pos)
        })
        .collect()
}

/// A uniformly random unoccupied floor cell
pub fn pick_free_cell(state: &mut GameState) -> Option<GridPos> {
    let occupied = state.occupied_cells();
    let ahead = cells_ahead(state);
    let free: Vec<GridPos> = state
        .board
        .floor_cells()
        .filter(|p| !occupied.contains(p) && !ahead.contains(p))
        .collect();
    if free.is_empty() {
        return None;
    }
    let idx = state.rng.random_range(0..free.len());
    Some(free[idx])
}

/// Fill the board back up to the configured food count
pub fn top_up_food(state: &mut GameState) {
    while state.food.len() < state.config.food_count as usize {
        let Some(pos) = pick_free_cell(state) else {
            log::debug!("Board full, cannot place food");
            break;
        };
        let chance = state.config.golden_food_chance as f64;
        let golden = chance > 0.0 && state.rng.random_bool(chance.min(1.0));
        let food = if golden {
            Food {
                pos,
                kind: FoodKind::Golden,
                age_ticks: 0,
                ttl_ticks: Some(state.config.golden_food_ttl_ticks),
            }
        } else {
            Food {
                pos,
                kind: FoodKind::Apple,
                age_ticks: 0,
                ttl_ticks: None,
            }
        };
        state.food.push(food);
    }
}

/// Roll for a power-up (called whenever food is eaten)
pub fn maybe_spawn_powerup(state: &mut GameState) {
    let config = &state.config;
    if !config.powerups || state.powerups.len() >= config.max_powerups as usize {
        return;
    }
    let chance = config.powerup_chance as f64;
    let ttl_ticks = config.powerup_ttl_ticks;
    if chance <= 0.0 || !state.rng.random_bool(chance.min(1.0)) {
        return;
    }
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    if let Some(pos) = pick_free_cell(state) {
        log::debug!("Power-up {:?} at ({}, {})", kind, pos.x, pos.y);
        state.powerups.push(PowerUp {
            pos,
            kind,
            age_ticks: 0,
            ttl_ticks,
        });
    }
}

/// First usable spawn point for snake `idx`, rotating the starting point
/// by id and death count so snakes do not always reappear in one place
pub fn find_spawn_point(state: &GameState, idx: usize) -> Option<SpawnPoint> {
    let spawns = &state.board.spawns;
    if spawns.is_empty() {
        return None;
    }
    let solid = state.solid_cells();
    let snake = &state.snakes[idx];
    let start = (snake.id + snake.deaths) as usize % spawns.len();
    let wrap = state.config.wraparound;

    (0..spawns.len())
        .map(|i| spawns[(start + i) % spawns.len()])
        .find(|sp| {
            !solid.contains(&sp.pos)
                && state
                    .board
                    .next_cell(sp.pos, sp.direction, wrap)
                    .is_some_and(|step| {
                        state.board.is_floor(step.pos) && !solid.contains(&step.pos)
                    })
        })
}

/// Put snake `idx` back on the board. Returns false if no spawn is free.
pub fn respawn(state: &mut GameState, idx: usize) -> bool {
    let Some(spawn) = find_spawn_point(state, idx) else {
        return false;
    };
    let solid = state.solid_cells();
    let length = state.config.snake_length;
    let spawn_ticks = state.config.spawn_anim_ticks;

    state.snakes[idx].place(
        spawn,
        length,
        &state.board,
        |p| solid.contains(&p),
        spawn_ticks,
    );

    // Items underneath the new body would be unreachable
    let body: HashSet<GridPos> = state.snakes[idx].body.iter().copied().collect();
    state.food.retain(|f| !body.contains(&f.pos));
    state.powerups.retain(|p| !body.contains(&p.pos));

    let id = state.snakes[idx].id;
    state.events.push(GameEvent::SnakeSpawned { snake: id });
    log::debug!(
        "Snake {} spawned at ({}, {}) facing {:?}",
        id,
        spawn.pos.x,
        spawn.pos.y,
        spawn.direction
    );
    true
}
