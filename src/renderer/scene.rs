//! Scene assembly
//!
//! Turns a `GameState` into a flat list of world-space triangles. World
//! units are pixels at `GRID_SCALE` per cell, origin at the board centre,
//! y up.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use crate::colors::{Rgba, mix, with_alpha};
use crate::consts::{GRID_SCALE, HEAD_SIZE, SEGMENT_SIZE, SIM_DT};
use crate::settings::Settings;
use crate::sim::grid::is_adjacent_step;
use crate::sim::{Direction, FoodKind, GameState, GridPos, PowerUpKind, Snake, SnakeState, Tile, grid_to_world};
use crate::theme::Palette;

/// Ticks a new item takes to pop in
const POP_IN_TICKS: f32 = 24.0;
/// Golden food starts blinking this many ticks before it expires
const BLINK_TICKS: u32 = 240;
/// Half-period of the expiry blink
const BLINK_PERIOD: u32 = 15;
const GRID_LINE_WIDTH: f32 = 1.0;

fn dir_vec(dir: Direction) -> Vec2 {
    let (dx, dy) = dir.delta();
    Vec2::new(dx as f32, -dy as f32)
}

/// Ease-out-back for pop-in animations
fn pop(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let c = 1.70158;
    1.0 + (c + 1.0) * (t - 1.0).powi(3) + c * (t - 1.0).powi(2)
}

struct Layout {
    width: u32,
    height: u32,
}

impl Layout {
    fn cell(&self, pos: GridPos) -> Vec2 {
        grid_to_world(pos, self.width, self.height, GRID_SCALE)
    }

    fn half_extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * GRID_SCALE * 0.5
    }
}

/// Build every vertex for one frame.
///
/// `progress` is how far the accumulator is towards the next tick (0..1).
pub fn build_scene(
    state: &GameState,
    palette: &Palette,
    settings: &Settings,
    progress: f32,
) -> Vec<Vertex> {
    let layout = Layout {
        width: state.board.width,
        height: state.board.height,
    };
    let animate = settings.effective_animations();
    let time = (state.time_ticks as f32 + progress.clamp(0.0, 1.0)) * SIM_DT;

    let mut out = Vec::with_capacity(state.board.cell_count() * 6);

    let half = layout.half_extent();
    shapes::rect(&mut out, -half, half, palette.grid_background);
    if settings.grid_lines {
        grid_lines(&mut out, &layout, palette.grid_line);
    }

    board_tiles(&mut out, state, &layout, palette, animate, time);
    items(&mut out, state, &layout, palette, animate);

    for (idx, snake) in state.snakes.iter().enumerate() {
        if snake.is_empty() {
            continue;
        }
        let interval = state.step_interval(idx);
        let t = if settings.effective_smooth_movement() && snake.is_alive() {
            ((snake.step_counter as f32 + progress) / interval.max(1) as f32).clamp(0.0, 1.0)
        } else {
            1.0
        };
        draw_snake(&mut out, state, snake, &layout, palette, t, animate);
    }

    out
}

fn grid_lines(out: &mut Vec<Vertex>, layout: &Layout, color: Rgba) {
    let half = layout.half_extent();
    for x in 1..layout.width {
        let wx = -half.x + x as f32 * GRID_SCALE;
        shapes::bar(out, Vec2::new(wx, -half.y), Vec2::new(wx, half.y), GRID_LINE_WIDTH, color);
    }
    for y in 1..layout.height {
        let wy = -half.y + y as f32 * GRID_SCALE;
        shapes::bar(out, Vec2::new(-half.x, wy), Vec2::new(half.x, wy), GRID_LINE_WIDTH, color);
    }
}

fn board_tiles(
    out: &mut Vec<Vertex>,
    state: &GameState,
    layout: &Layout,
    palette: &Palette,
    animate: bool,
    time: f32,
) {
    let cell = Vec2::splat(GRID_SCALE * 0.5);
    for y in 0..layout.height {
        for x in 0..layout.width {
            let pos = GridPos::new(x, y);
            let center = layout.cell(pos);
            match state.board.tile(pos) {
                Tile::Floor => {}
                Tile::Wall => shapes::quad(out, center, cell, palette.wall, 0.2),
                Tile::Portal(id) => {
                    let pulse = if animate {
                        0.08 * (time * 4.0 + id as f32 * 1.3).sin()
                    } else {
                        0.0
                    };
                    let ring = mix(palette.portal, palette.grid_background, id as f32 * 0.25);
                    shapes::circle(out, center, GRID_SCALE * (0.45 + pulse), ring);
                    shapes::circle(out, center, GRID_SCALE * 0.25, palette.grid_background);
                }
            }
        }
    }
}

fn items(out: &mut Vec<Vertex>, state: &GameState, layout: &Layout, palette: &Palette, animate: bool) {
    for food in &state.food {
        let grow = if animate {
            pop(food.age_ticks as f32 / POP_IN_TICKS)
        } else {
            1.0
        };
        let (color, size) = match food.kind {
            FoodKind::Apple => (palette.food, 0.3),
            FoodKind::Golden => (palette.golden_food, 0.36),
        };
        // Blink off and on while running out
        if let Some(ttl) = food.ttl_ticks {
            let left = ttl.saturating_sub(food.age_ticks);
            if left < BLINK_TICKS && (left / BLINK_PERIOD) % 2 == 1 {
                continue;
            }
        }
        shapes::circle(out, layout.cell(food.pos), GRID_SCALE * size * grow, color);
    }

    for powerup in &state.powerups {
        let grow = if animate {
            pop(powerup.age_ticks as f32 / POP_IN_TICKS)
        } else {
            1.0
        };
        let shade = match powerup.kind {
            PowerUpKind::Speed => 0.0,
            PowerUpKind::Slow => 0.15,
            PowerUpKind::Ghost => 0.3,
            PowerUpKind::Shrink => 0.45,
            PowerUpKind::ExtraLife => 0.6,
        };
        let color = mix(palette.powerup, [1.0, 1.0, 1.0, 1.0], shade);
        let left = powerup.ttl_ticks.saturating_sub(powerup.age_ticks);
        if left < BLINK_TICKS && (left / BLINK_PERIOD) % 2 == 1 {
            continue;
        }
        shapes::quad(
            out,
            layout.cell(powerup.pos),
            Vec2::splat(GRID_SCALE * 0.32 * grow),
            color,
            0.4,
        );
    }
}

/// Per-segment scale for the spawn and destroy animations
fn segment_scales(snake: &Snake, state: &GameState, animate: bool) -> (Vec<f32>, f32) {
    let len = snake.len();
    match snake.state {
        SnakeState::Spawning { ticks_left } if animate => {
            // Grow in from the head
            let total = state.config.spawn_anim_ticks.max(1) as f32;
            let p = 1.0 - ticks_left as f32 / total;
            let front = p * (len as f32 + 1.0);
            let scales = (0..len).map(|i| (front - i as f32).clamp(0.0, 1.0)).collect();
            (scales, 1.0)
        }
        SnakeState::Dying { ticks_left } => {
            if !animate {
                return (vec![1.0; len], 0.4);
            }
            // Shrink away from the tail
            let total = state.config.destroy_anim_ticks.max(1) as f32;
            let p = 1.0 - ticks_left as f32 / total;
            let gone = p * (len as f32 + 1.0);
            let scales = (0..len)
                .map(|i| 1.0 - (gone - (len - 1 - i) as f32).clamp(0.0, 1.0))
                .collect();
            (scales, 1.0 - 0.6 * p)
        }
        _ => (vec![1.0; len], 1.0),
    }
}

fn draw_snake(
    out: &mut Vec<Vertex>,
    state: &GameState,
    snake: &Snake,
    layout: &Layout,
    palette: &Palette,
    t: f32,
    animate: bool,
) {
    let mut color = palette.snake(snake.id);
    if snake.effects.ghost() {
        color = with_alpha(color, 0.5);
    }
    let (scales, fade) = segment_scales(snake, state, animate);
    if matches!(snake.state, SnakeState::Dying { .. }) {
        color = with_alpha(mix(color, palette.background, 0.35), fade);
    }

    // Interpolated centres; wrap and portal jumps snap
    let centers: Vec<Vec2> = snake
        .body
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let to = layout.cell(pos);
            match snake.prev_body.get(i) {
                Some(&from) if is_adjacent_step(from, pos) => layout.cell(from).lerp(to, t),
                _ => to,
            }
        })
        .collect();

    let body_half = GRID_SCALE * SEGMENT_SIZE * 0.5;

    // Tail first so the head ends up on top
    for i in (0..centers.len()).rev() {
        let scale = scales[i];
        if scale <= 0.0 {
            continue;
        }
        if let Some(&next) = centers.get(i + 1) {
            let gap = centers[i].distance(next);
            if scales[i + 1] > 0.0 && gap <= GRID_SCALE * 1.01 {
                shapes::bar(out, centers[i], next, body_half * 2.0 * scale.min(scales[i + 1]), color);
            }
        }
        let size = if i == 0 { HEAD_SIZE } else { SEGMENT_SIZE };
        let roundness = if i == 0 { 0.6 } else { 0.4 };
        shapes::quad(
            out,
            centers[i],
            Vec2::splat(GRID_SCALE * size * 0.5 * scale),
            color,
            roundness,
        );
    }

    // Eyes
    if snake.is_solid() && scales.first().is_some_and(|s| *s >= 1.0) {
        let forward = dir_vec(snake.direction);
        let side = forward.perp();
        let head = centers[0];
        for sign in [-1.0, 1.0] {
            let eye = head + forward * GRID_SCALE * 0.15 + side * sign * GRID_SCALE * 0.2;
            shapes::circle(out, eye, GRID_SCALE * 0.08, palette.background);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{Food, TickInput, tick};
    use crate::theme::Theme;

    fn scene_for(state: &GameState, settings: &Settings) -> Vec<Vertex> {
        let palette = Theme::default().palette().unwrap();
        build_scene(state, &palette, settings, 0.5)
    }

    #[test]
    fn test_scene_is_whole_triangles() {
        let state = GameState::new(GameConfig::default(), 1).unwrap();
        let vertices = scene_for(&state, &Settings::default());
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 6, 0);
    }

    #[test]
    fn test_scene_stays_inside_board() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut state, &input);
        }
        let half = Vec2::new(state.board.width as f32, state.board.height as f32) * GRID_SCALE * 0.5;
        for v in scene_for(&state, &Settings::default()) {
            assert!(v.position[0].abs() <= half.x + GRID_SCALE);
            assert!(v.position[1].abs() <= half.y + GRID_SCALE);
        }
    }

    #[test]
    fn test_grid_lines_toggle() {
        let state = GameState::new(GameConfig::default(), 1).unwrap();
        let with = scene_for(&state, &Settings::default());
        let without = scene_for(
            &state,
            &Settings {
                grid_lines: false,
                ..Default::default()
            },
        );
        let lines = (state.board.width - 1 + state.board.height - 1) as usize * 6;
        assert_eq!(with.len() - without.len(), lines);
    }

    #[test]
    fn test_spawning_snake_grows_from_head() {
        let state = GameState::new(GameConfig::default(), 1).unwrap();
        let snake = &state.snakes[0];
        assert!(matches!(snake.state, SnakeState::Spawning { .. }));
        let (scales, _) = segment_scales(snake, &state, true);
        assert_eq!(scales[scales.len() - 1], 0.0);
        let (scales, _) = segment_scales(snake, &state, false);
        assert!(scales.iter().all(|s| *s == 1.0));
    }

    #[test]
    fn test_dying_snake_shrinks_from_tail() {
        let config = GameConfig {
            spawn_anim_ticks: 0,
            destroy_anim_ticks: 10,
            ..Default::default()
        };
        let mut state = GameState::new(config, 1).unwrap();
        state.snakes[0].kill(5);
        let (scales, fade) = segment_scales(&state.snakes[0], &state, true);
        assert!(scales[0] > 0.0);
        assert_eq!(scales[scales.len() - 1], 0.0);
        assert!(fade < 1.0);
    }

    #[test]
    fn test_golden_food_blinks() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        state.food = vec![Food {
            pos: GridPos::new(3, 3),
            kind: FoodKind::Golden,
            age_ticks: 100,
            ttl_ticks: Some(100 + 2 * BLINK_PERIOD),
        }];
        let settings = Settings::default();
        let shown = scene_for(&state, &settings).len();
        state.food[0].age_ticks += BLINK_PERIOD;
        assert_eq!(scene_for(&state, &settings).len(), shown - 6);
    }
}
