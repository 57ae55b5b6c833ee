//! Plain-text board dump for the terminal runner and debugging

use std::fmt::Write;

use crate::sim::{FoodKind, GameState, GridPos, PowerUpKind, SnakeState, Tile};

fn snake_glyph(id: u32, head: bool) -> char {
    let letter = (b'a' + (id % 26) as u8) as char;
    if head { letter.to_ascii_uppercase() } else { letter }
}

fn powerup_glyph(kind: PowerUpKind) -> char {
    match kind {
        PowerUpKind::Speed => '>',
        PowerUpKind::Slow => '<',
        PowerUpKind::Ghost => '?',
        PowerUpKind::Shrink => '-',
        PowerUpKind::ExtraLife => '+',
    }
}

/// Render the board, one character per cell, followed by a line per snake.
///
/// `#` wall, `.` floor, digits portals, `*` apple, `$` golden food,
/// `> < ? - +` power-ups, upper-case letter head, lower-case body.
pub fn render_text(state: &GameState) -> String {
    let board = &state.board;
    let (w, h) = (board.width as usize, board.height as usize);
    let mut grid: Vec<Vec<char>> = (0..h)
        .map(|y| {
            (0..w)
                .map(|x| match board.tile(GridPos::new(x as u32, y as u32)) {
                    Tile::Floor => '.',
                    Tile::Wall => '#',
                    Tile::Portal(id) => char::from_digit(id as u32 % 10, 10).unwrap_or('@'),
                })
                .collect()
        })
        .collect();

    let mut put = |pos: GridPos, c: char| {
        if let Some(cell) = grid
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
        {
            *cell = c;
        }
    };
    for food in &state.food {
        let c = match food.kind {
            FoodKind::Apple => '*',
            FoodKind::Golden => '$',
        };
        put(food.pos, c);
    }
    for powerup in &state.powerups {
        put(powerup.pos, powerup_glyph(powerup.kind));
    }
    for snake in &state.snakes {
        // Tail first so the head wins on overlap
        for (i, &pos) in snake.body.iter().enumerate().rev() {
            put(pos, snake_glyph(snake.id, i == 0));
        }
    }

    let mut out = String::with_capacity((w + 1) * (h + state.snakes.len() + 1));
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    let _ = writeln!(out, "tick {}  {:?}", state.time_ticks, state.phase);
    for snake in &state.snakes {
        let status = match snake.state {
            SnakeState::Spawning { .. } => "spawning",
            SnakeState::Alive => "alive",
            SnakeState::Dying { .. } => "dying",
            SnakeState::Dead { .. } => "dead",
            SnakeState::Out => "out",
        };
        let lives = snake
            .lives
            .map_or_else(|| "inf".to_string(), |l| l.to_string());
        let _ = writeln!(
            out,
            "{} score {:>5}  length {:>3}  longest {:>3}  lives {:>3}  {}",
            snake_glyph(snake.id, true),
            snake.score,
            snake.len(),
            snake.longest,
            lives,
            status
        );
    }
    out
}
