//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use std::collections::{BTreeMap, HashMap};

use super::ai;
use super::board::Step;
use super::grid::{Direction, GridPos};
use super::snake::{Controller, SnakeState};
use super::spawn;
use super::state::{DeathCause, GameEvent, GamePhase, GameState, PowerUpKind};
use crate::consts::MAX_PLAYERS;

/// Cells removed by a Shrink power-up
const SHRINK_CELLS: usize = 3;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Turn requested by each local player slot
    pub directions: [Option<Direction>; MAX_PLAYERS],
    /// Start from the Ready screen
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI plays for player 0
    pub idle_mode: bool,
}

/// Where a moving snake ends up this step
#[derive(Debug, Clone, Copy)]
enum Outcome {
    Move(Step),
    Die(DeathCause),
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Ready | GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                state.phase = if state.time_ticks == 0 {
                    GamePhase::Ready
                } else {
                    GamePhase::Playing
                };
            }
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        _ => {}
    }

    steer_players(state, input);

    if state.phase == GamePhase::Ready {
        let steered = input.directions.iter().any(Option::is_some);
        if input.start || steered || input.idle_mode {
            state.phase = GamePhase::Playing;
            log::info!("Game started (seed {})", state.seed);
        } else {
            return;
        }
    }

    state.time_ticks += 1;

    update_lifecycles(state);
    age_items(state);
    for snake in &mut state.snakes {
        snake.effects.tick();
    }
    steer_bots(state, input.idle_mode);

    let movers = advance_counters(state);
    if !movers.is_empty() {
        move_snakes(state, &movers);
    }

    spawn::top_up_food(state);
    check_game_over(state);
}

fn ai_controlled(controller: Controller, idle_mode: bool) -> bool {
    match controller {
        Controller::Bot => true,
        Controller::Human(slot) => idle_mode && slot == 0,
    }
}

/// Queue keyboard turns for human snakes
fn steer_players(state: &mut GameState, input: &TickInput) {
    for snake in &mut state.snakes {
        let Controller::Human(slot) = snake.controller else {
            continue;
        };
        if ai_controlled(snake.controller, input.idle_mode) || !snake.is_solid() {
            continue;
        }
        if let Some(dir) = input.directions.get(slot as usize).copied().flatten() {
            snake.steer(dir);
        }
    }
}

/// Let the AI pick a heading for snakes about to step
fn steer_bots(state: &mut GameState, idle_mode: bool) {
    for idx in 0..state.snakes.len() {
        let snake = &state.snakes[idx];
        if !ai_controlled(snake.controller, idle_mode) || !snake.is_alive() {
            continue;
        }
        if snake.step_counter + 1 < state.step_interval(idx) {
            continue;
        }
        if let Some(dir) = ai::choose_direction(state, idx) {
            state.snakes[idx].set_course(dir);
        }
    }
}

/// Spawn/destroy animations, respawn countdowns
fn update_lifecycles(state: &mut GameState) {
    let respawn_delay = state.config.respawn_delay_ticks;
    for idx in 0..state.snakes.len() {
        let current = state.snakes[idx].state;
        let snake = &mut state.snakes[idx];
        match current {
            SnakeState::Spawning { ticks_left } => {
                snake.state = if ticks_left <= 1 {
                    SnakeState::Alive
                } else {
                    SnakeState::Spawning {
                        ticks_left: ticks_left - 1,
                    }
                };
            }
            SnakeState::Dying { ticks_left } if ticks_left > 1 => {
                snake.state = SnakeState::Dying {
                    ticks_left: ticks_left - 1,
                };
            }
            SnakeState::Dying { .. } => {
                snake.clear_body();
                if snake.has_lives_left() {
                    snake.state = SnakeState::Dead {
                        respawn_ticks: respawn_delay,
                    };
                } else {
                    snake.state = SnakeState::Out;
                    let id = snake.id;
                    state.events.push(GameEvent::SnakeOut { snake: id });
                    log::info!("Snake {} is out of lives", id);
                }
            }
            SnakeState::Dead { respawn_ticks } if respawn_ticks > 0 => {
                snake.state = SnakeState::Dead {
                    respawn_ticks: respawn_ticks - 1,
                };
            }
            SnakeState::Dead { .. } => {
                // Stays dead and retries next tick while every spawn is blocked
                if !spawn::respawn(state, idx) {
                    log::debug!("Snake {} waiting for a free spawn", idx);
                }
            }
            SnakeState::Alive | SnakeState::Out => {}
        }
    }
}

/// Age food and power-ups, dropping the expired ones
fn age_items(state: &mut GameState) {
    let mut expired = Vec::new();
    for food in &mut state.food {
        food.age_ticks = food.age_ticks.saturating_add(1);
    }
    state.food.retain(|f| {
        let keep = f.ttl_ticks.is_none_or(|ttl| f.age_ticks < ttl);
        if !keep {
            expired.push(f.pos);
        }
        keep
    });
    for pos in expired {
        state.events.push(GameEvent::FoodExpired { pos });
    }

    for powerup in &mut state.powerups {
        powerup.age_ticks = powerup.age_ticks.saturating_add(1);
    }
    state.powerups.retain(|p| p.age_ticks < p.ttl_ticks);
}

/// Bump step counters; returns the snakes that step this tick
fn advance_counters(state: &mut GameState) -> Vec<usize> {
    let mut movers = Vec::new();
    for idx in 0..state.snakes.len() {
        let interval = state.step_interval(idx);
        let snake = &mut state.snakes[idx];
        if !snake.is_alive() {
            continue;
        }
        snake.step_counter += 1;
        if snake.step_counter >= interval {
            snake.step_counter = 0;
            movers.push(idx);
        }
    }
    movers
}

/// Move all `movers` at once and resolve collisions
fn move_snakes(state: &mut GameState, movers: &[usize]) {
    let wrap = state.config.wraparound;

    // Board collisions first
    let mut outcomes: Vec<(usize, Outcome)> = Vec::with_capacity(movers.len());
    for &idx in movers {
        let dir = state.snakes[idx].take_turn();
        let Some(head) = state.snakes[idx].head() else {
            continue;
        };
        let outcome = match state.board.next_cell(head, dir, wrap) {
            None => Outcome::Die(DeathCause::Edge),
            Some(step) if !state.board.is_floor(step.pos) => Outcome::Die(DeathCause::Wall),
            Some(step) => Outcome::Move(step),
        };
        outcomes.push((idx, outcome));
    }

    // Two or more heads on one cell
    let mut heads: BTreeMap<GridPos, Vec<usize>> = BTreeMap::new();
    for (i, (_, outcome)) in outcomes.iter().enumerate() {
        if let Outcome::Move(step) = outcome {
            heads.entry(step.pos).or_default().push(i);
        }
    }
    for group in heads.values().filter(|g| g.len() > 1) {
        for &i in group {
            let idx = outcomes[i].0;
            if state.snakes[idx].effects.ghost() {
                continue;
            }
            let other = group
                .iter()
                .map(|&j| state.snakes[outcomes[j].0].id)
                .find(|&id| id != state.snakes[idx].id)
                .unwrap_or(state.snakes[idx].id);
            outcomes[i].1 = Outcome::Die(DeathCause::HeadOn { other });
        }
    }

    // Bodies as they will be once everyone has moved (tails vacate)
    let mut occupied: HashMap<GridPos, u32> = HashMap::new();
    for snake in state.snakes.iter().filter(|s| s.is_solid()) {
        let moved = outcomes.iter().find_map(|(idx, outcome)| match outcome {
            Outcome::Move(step) if state.snakes[*idx].id == snake.id => Some(step.pos),
            _ => None,
        });
        match moved {
            Some(new_head) => {
                for cell in snake.body_after_step(new_head).skip(1) {
                    occupied.entry(cell).or_insert(snake.id);
                }
            }
            None => {
                for &cell in &snake.body {
                    occupied.entry(cell).or_insert(snake.id);
                }
            }
        }
    }
    for (idx, outcome) in outcomes.iter_mut() {
        let Outcome::Move(step) = *outcome else {
            continue;
        };
        let snake = &state.snakes[*idx];
        if snake.effects.ghost() {
            continue;
        }
        if let Some(&owner) = occupied.get(&step.pos) {
            *outcome = Outcome::Die(if owner == snake.id {
                DeathCause::SelfCollision
            } else {
                DeathCause::Snake { other: owner }
            });
        }
    }

    for (idx, outcome) in outcomes {
        match outcome {
            Outcome::Die(cause) => {
                let destroy_ticks = state.config.destroy_anim_ticks;
                let snake = &mut state.snakes[idx];
                snake.kill(destroy_ticks);
                let id = snake.id;
                state.events.push(GameEvent::SnakeDied { snake: id, cause });
                log::info!(
                    "Snake {} died ({:?}) at length {}, lives {:?}",
                    id,
                    cause,
                    state.snakes[idx].len(),
                    state.snakes[idx].lives
                );
            }
            Outcome::Move(step) => {
                let snake = &mut state.snakes[idx];
                snake.advance(step.pos);
                let id = snake.id;
                if step.via_portal {
                    state.events.push(GameEvent::PortalUsed { snake: id });
                }
                eat(state, idx, step.pos);
            }
        }
    }
}

/// Consume whatever item sits under the head
fn eat(state: &mut GameState, idx: usize, pos: GridPos) {
    if let Some(i) = state.food_at(pos) {
        let food = state.food.remove(i);
        let snake = &mut state.snakes[idx];
        snake.grow_pending += food.kind.growth();
        snake.score += food.kind.points();
        snake.foods_eaten += 1;
        let id = snake.id;
        state.events.push(GameEvent::FoodEaten {
            snake: id,
            kind: food.kind,
        });
        log::debug!("Snake {} ate {:?}", id, food.kind);
        spawn::maybe_spawn_powerup(state);
    }

    if let Some(i) = state.powerup_at(pos) {
        let powerup = state.powerups.remove(i);
        let effect_ticks = state.config.effect_ticks;
        let snake = &mut state.snakes[idx];
        match powerup.kind {
            PowerUpKind::Speed => {
                snake.effects.speed_ticks = effect_ticks;
                snake.effects.slow_ticks = 0;
            }
            PowerUpKind::Slow => {
                snake.effects.slow_ticks = effect_ticks;
                snake.effects.speed_ticks = 0;
            }
            PowerUpKind::Ghost => snake.effects.ghost_ticks = effect_ticks,
            PowerUpKind::Shrink => snake.shrink(SHRINK_CELLS),
            PowerUpKind::ExtraLife => snake.lives = snake.lives.map(|l| l.saturating_add(1)),
        }
        snake.score += PowerUpKind::POINTS;
        let id = snake.id;
        state.events.push(GameEvent::PowerUpCollected {
            snake: id,
            kind: powerup.kind,
        });
        log::debug!("Snake {} collected {:?}", id, powerup.kind);
    }
}

fn check_game_over(state: &mut GameState) {
    let any_human = state.snakes.iter().any(|s| s.is_human());
    let over = state
        .snakes
        .iter()
        .filter(|s| s.is_human() || !any_human)
        .all(|s| s.is_out());
    if over {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over after {} ticks, best score {}",
            state.time_ticks,
            state.best_score()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::board::SpawnPoint;
    use crate::sim::maps::{AsciiMap, MapConfig, OpenMap};
    use crate::sim::state::{Food, FoodKind, PowerUp};

    /// One step per tick, no animations, no random power-ups
    fn fast_config() -> GameConfig {
        GameConfig {
            step_ticks: 1,
            min_step_ticks: 1,
            spawn_anim_ticks: 0,
            powerups: false,
            ..Default::default()
        }
    }

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    fn run(state: &mut GameState, ticks: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            tick(state, &start());
            events.extend(state.events.iter().cloned());
        }
        events
    }

    fn place(state: &mut GameState, idx: usize, x: u32, y: u32, direction: Direction, length: u32) {
        state.snakes[idx].place(
            SpawnPoint {
                pos: GridPos::new(x, y),
                direction,
            },
            length,
            &state.board,
            |_| false,
            0,
        );
    }

    #[test]
    fn test_tick_ready_to_playing() {
        let mut state = GameState::new(GameConfig::default(), 12345).unwrap();
        assert_eq!(state.phase, GamePhase::Ready);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_steering_starts_the_game() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        let mut input = TickInput::default();
        input.directions[0] = Some(Direction::Left);
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snakes[0].planned_direction(), Direction::Left);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::new(GameConfig::default(), 12345).unwrap();
        tick(&mut state, &start());

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let ticks = state.time_ticks;

        tick(&mut state, &start());
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_moves_on_step_interval() {
        let config = GameConfig {
            spawn_anim_ticks: 0,
            ..Default::default()
        };
        let mut state = GameState::new(config, 4).unwrap();
        run(&mut state, 14);
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(14, 14)));
        run(&mut state, 1);
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(14, 13)));
    }

    #[test]
    fn test_spawn_animation_holds_still() {
        let config = GameConfig {
            step_ticks: 1,
            min_step_ticks: 1,
            spawn_anim_ticks: 10,
            ..Default::default()
        };
        let mut state = GameState::new(config, 4).unwrap();
        run(&mut state, 9);
        assert!(matches!(state.snakes[0].state, SnakeState::Spawning { .. }));
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(14, 14)));
        run(&mut state, 2);
        assert!(state.snakes[0].is_alive());
        assert_ne!(state.snakes[0].head(), Some(GridPos::new(14, 14)));
    }

    #[test]
    fn test_reverse_ignored() {
        let mut state = GameState::new(fast_config(), 2).unwrap();
        let mut input = start();
        input.directions[0] = Some(Direction::Down);
        tick(&mut state, &input);
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(14, 13)));
        assert!(state.snakes[0].is_alive());
    }

    #[test]
    fn test_wall_kills() {
        let mut state = GameState::new(fast_config(), 2).unwrap();
        let events = run(&mut state, 14);
        assert!(events.contains(&GameEvent::SnakeDied {
            snake: 0,
            cause: DeathCause::Wall
        }));
        assert_eq!(state.snakes[0].lives, Some(2));
    }

    #[test]
    fn test_edge_kills_without_wraparound() {
        let config = GameConfig {
            map: MapConfig::Open(OpenMap {
                border_walls: false,
                ..Default::default()
            }),
            ..fast_config()
        };
        let mut state = GameState::new(config, 2).unwrap();
        let events = run(&mut state, 14);
        assert!(state.snakes[0].is_alive());
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(14, 0)));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::SnakeDied { .. }))
        );

        let events = run(&mut state, 1);
        assert!(events.contains(&GameEvent::SnakeDied {
            snake: 0,
            cause: DeathCause::Edge
        }));
    }

    #[test]
    fn test_wraparound() {
        let config = GameConfig {
            wraparound: true,
            map: MapConfig::Open(OpenMap {
                border_walls: false,
                ..Default::default()
            }),
            ..fast_config()
        };
        let mut state = GameState::new(config, 2).unwrap();
        run(&mut state, 15);
        assert!(state.snakes[0].is_alive());
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(14, 28)));
    }

    #[test]
    fn test_portal_travel() {
        let config = GameConfig {
            map: MapConfig::Open(OpenMap {
                portals: true,
                ..Default::default()
            }),
            ..fast_config()
        };
        let mut state = GameState::new(config, 2).unwrap();
        place(&mut state, 0, 7, 10, Direction::Up, 3);
        state.food.clear();

        run(&mut state, 2);
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(7, 8)));
        let events = run(&mut state, 1);
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(21, 20)));
        assert!(events.contains(&GameEvent::PortalUsed { snake: 0 }));
    }

    #[test]
    fn test_head_on_kills_both() {
        let config = GameConfig {
            players: 2,
            ..fast_config()
        };
        let mut state = GameState::new(config, 2).unwrap();
        place(&mut state, 0, 10, 14, Direction::Right, 3);
        place(&mut state, 1, 12, 14, Direction::Left, 3);
        state.food.clear();

        let events = run(&mut state, 1);
        assert!(events.contains(&GameEvent::SnakeDied {
            snake: 0,
            cause: DeathCause::HeadOn { other: 1 }
        }));
        assert!(events.contains(&GameEvent::SnakeDied {
            snake: 1,
            cause: DeathCause::HeadOn { other: 0 }
        }));
    }

    fn crossing_setup() -> GameState {
        let config = GameConfig {
            players: 2,
            ..fast_config()
        };
        let mut state = GameState::new(config, 2).unwrap();
        place(&mut state, 0, 10, 14, Direction::Right, 3);
        // Vertical snake whose body covers (11, 14) after it steps up
        place(&mut state, 1, 11, 12, Direction::Up, 5);
        state.food.clear();
        state
    }

    #[test]
    fn test_body_collision() {
        let mut state = crossing_setup();
        let events = run(&mut state, 1);
        assert!(events.contains(&GameEvent::SnakeDied {
            snake: 0,
            cause: DeathCause::Snake { other: 1 }
        }));
        assert!(state.snakes[1].is_alive());
    }

    #[test]
    fn test_ghost_passes_through_bodies() {
        let mut state = crossing_setup();
        state.snakes[0].effects.ghost_ticks = 10;
        run(&mut state, 1);
        assert!(state.snakes[0].is_alive());
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(11, 14)));
    }

    #[test]
    fn test_chasing_own_tail_is_safe() {
        let mut state = GameState::new(fast_config(), 2).unwrap();
        // 2x2 loop: head (10,10), body (10,11), (11,11), (11,10)
        let snake = &mut state.snakes[0];
        snake.body = [(10, 10), (10, 11), (11, 11), (11, 10)]
            .into_iter()
            .map(|(x, y)| GridPos::new(x, y))
            .collect();
        snake.direction = Direction::Up;
        snake.grow_pending = 0;
        state.food.clear();

        let mut input = start();
        input.directions[0] = Some(Direction::Right);
        tick(&mut state, &input);
        assert!(state.snakes[0].is_alive());
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(11, 10)));
    }

    #[test]
    fn test_growth_and_score() {
        let mut state = GameState::new(fast_config(), 2).unwrap();
        state.food = vec![Food {
            pos: GridPos::new(14, 13),
            kind: FoodKind::Golden,
            age_ticks: 0,
            ttl_ticks: Some(1000),
        }];
        let events = run(&mut state, 1);
        assert!(events.contains(&GameEvent::FoodEaten {
            snake: 0,
            kind: FoodKind::Golden
        }));
        let snake = &state.snakes[0];
        assert_eq!(snake.score, 50);
        assert_eq!(snake.len(), 7);

        run(&mut state, 3);
        assert_eq!(state.snakes[0].len(), 10);
        // Eaten food is replaced
        assert_eq!(state.food.len(), 1);
    }

    #[test]
    fn test_golden_food_expires() {
        let mut state = GameState::new(fast_config(), 2).unwrap();
        state.food = vec![Food {
            pos: GridPos::new(3, 3),
            kind: FoodKind::Golden,
            age_ticks: 0,
            ttl_ticks: Some(2),
        }];
        let events = run(&mut state, 2);
        assert!(events.contains(&GameEvent::FoodExpired {
            pos: GridPos::new(3, 3)
        }));
    }

    #[test]
    fn test_powerups_apply() {
        let mut state = GameState::new(fast_config(), 2).unwrap();
        state.food.clear();
        let kinds = [
            PowerUpKind::Ghost,
            PowerUpKind::Speed,
            PowerUpKind::ExtraLife,
            PowerUpKind::Shrink,
        ];
        for (i, kind) in kinds.into_iter().enumerate() {
            state.powerups.push(PowerUp {
                pos: GridPos::new(14, 13 - i as u32),
                kind,
                age_ticks: 0,
                ttl_ticks: 1000,
            });
        }
        run(&mut state, 4);
        let snake = &state.snakes[0];
        assert!(snake.effects.ghost());
        assert!(snake.effects.speed_ticks > 0);
        assert_eq!(snake.lives, Some(4));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.score, 4 * PowerUpKind::POINTS);
    }

    #[test]
    fn test_death_respawn_cycle() {
        let config = GameConfig {
            destroy_anim_ticks: 2,
            respawn_delay_ticks: 3,
            ..fast_config()
        };
        let mut state = GameState::new(config, 2).unwrap();
        run(&mut state, 14);
        assert!(matches!(state.snakes[0].state, SnakeState::Dying { .. }));
        assert!(!state.snakes[0].is_empty());

        run(&mut state, 2);
        assert_eq!(state.snakes[0].state, SnakeState::Dead { respawn_ticks: 3 });
        assert!(state.snakes[0].is_empty());

        let events = run(&mut state, 4);
        assert!(events.contains(&GameEvent::SnakeSpawned { snake: 0 }));
        assert_eq!(state.snakes[0].deaths, 1);
        assert_eq!(state.snakes[0].len(), 7);
    }

    #[test]
    fn test_waits_dead_until_spawn_frees() {
        let rows = ["#######", "#.....#", "#.....#", "#..^..#", "#.....#", "#.....#", "#######"];
        let config = GameConfig {
            players: 2,
            step_ticks: 1000,
            min_step_ticks: 1000,
            respawn_delay_ticks: 2,
            map: MapConfig::Ascii(AsciiMap {
                rows: rows.iter().map(|r| r.to_string()).collect(),
            }),
            ..fast_config()
        };
        let mut state = GameState::new(config, 4).unwrap();
        assert_eq!(state.snakes[0].head(), Some(GridPos::new(3, 3)));
        assert_eq!(state.snakes[1].state, SnakeState::Dead { respawn_ticks: 2 });

        // Delay runs out, then every tick retries and fails
        for _ in 0..6 {
            let events = run(&mut state, 1);
            assert!(!events.contains(&GameEvent::SnakeSpawned { snake: 1 }));
            assert!(matches!(state.snakes[1].state, SnakeState::Dead { .. }));
            assert!(state.snakes[1].is_empty());
        }
        assert_eq!(state.snakes[1].state, SnakeState::Dead { respawn_ticks: 0 });

        state.snakes[0].clear_body();
        state.snakes[0].state = SnakeState::Dead {
            respawn_ticks: 1000,
        };
        let events = run(&mut state, 1);
        assert!(events.contains(&GameEvent::SnakeSpawned { snake: 1 }));
        assert_eq!(state.snakes[1].head(), Some(GridPos::new(3, 3)));
        assert!(state.snakes[1].is_alive());
    }

    #[test]
    fn test_game_over_when_lives_run_out() {
        let config = GameConfig {
            lives: 1,
            destroy_anim_ticks: 1,
            ..fast_config()
        };
        let mut state = GameState::new(config, 2).unwrap();
        let events = run(&mut state, 15);
        assert!(events.contains(&GameEvent::SnakeOut { snake: 0 }));
        assert!(events.contains(&GameEvent::GameOver));
        assert_eq!(state.phase, GamePhase::GameOver);

        let ticks = state.time_ticks;
        run(&mut state, 5);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_bots_do_not_end_the_game() {
        let config = GameConfig {
            bots: 2,
            lives: 1,
            destroy_anim_ticks: 1,
            ..fast_config()
        };
        let mut state = GameState::new(config, 8).unwrap();
        state.snakes[1].kill(1);
        state.snakes[2].kill(1);
        run(&mut state, 2);
        assert!(state.snakes[1].is_out());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_idle_mode_survives() {
        let mut state = GameState::new(fast_config(), 77).unwrap();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..150 {
            tick(&mut state, &input);
        }
        assert_eq!(state.snakes[0].deaths, 0);
        assert!(state.snakes[0].score > 0);
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig {
            players: 1,
            bots: 3,
            ..Default::default()
        };
        let mut a = GameState::new(config.clone(), 4242).unwrap();
        let mut b = GameState::new(config, 4242).unwrap();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..3000 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
