//! Grid coordinates and directions
//!
//! Rows grow downward: row 0 is the top of the board. World space (for
//! rendering) is centred on the board with y pointing up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    /// Unit step in grid space (x right, y down)
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Up => (0, -1),
        }
    }

    /// Map glyph used by ASCII maps and the text renderer
    pub fn glyph(&self) -> char {
        match self {
            Self::Left => '<',
            Self::Right => '>',
            Self::Down => 'v',
            Self::Up => '^',
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            'v' | 'V' => Some(Self::Down),
            '^' => Some(Self::Up),
            _ => None,
        }
    }
}

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn center(width: u32, height: u32) -> Self {
        Self::new(width / 2, height / 2)
    }

    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }

    /// Neighbour in `dir`. Without `wrap`, stepping off the board yields
    /// `None`; with it the coordinate wraps to the opposite edge.
    pub fn offset(&self, dir: Direction, width: u32, height: u32, wrap: bool) -> Option<Self> {
        let (dx, dy) = dir.delta();
        let x = self.x as i64 + dx;
        let y = self.y as i64 + dy;
        if wrap {
            Some(Self::new(
                x.rem_euclid(width as i64) as u32,
                y.rem_euclid(height as i64) as u32,
            ))
        } else if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            None
        } else {
            Some(Self::new(x as u32, y as u32))
        }
    }

    /// Row-major index
    #[inline]
    pub fn index(&self, width: u32) -> usize {
        (self.y * width + self.x) as usize
    }
}

/// True when `b` is one orthogonal step from `a` (no wrap)
pub fn is_adjacent_step(a: GridPos, b: GridPos) -> bool {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y) == 1
}

/// Cell centre in world pixels (origin at board centre, y up)
pub fn grid_to_world(pos: GridPos, width: u32, height: u32, scale: f32) -> Vec2 {
    Vec2::new(
        (pos.x as f32 - width as f32 / 2.0) * scale + scale / 2.0,
        (height as f32 / 2.0 - pos.y as f32) * scale - scale / 2.0,
    )
}
