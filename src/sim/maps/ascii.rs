use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use super::{Cell, MapData, MapError, MapType};
use crate::sim::grid::Direction;

/// Hand-drawn map.
///
/// Glyphs: `#` wall, `.` or space floor, `^ v < >` spawn facing that way,
/// `0`-`9` portal ends (each digit exactly twice). Short rows are padded
/// with floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AsciiMap {
    pub rows: Vec<String>,
}

impl Default for AsciiMap {
    fn default() -> Self {
        let rows = [
            "#####################",
            "#...................#",
            "#.>.......#.......v.#",
            "#.........#.........#",
            "#...0.....#.....1...#",
            "#...................#",
            "#....###.....###....#",
            "#...................#",
            "#...1.....#.....0...#",
            "#.........#.........#",
            "#.^.......#.......<.#",
            "#...................#",
            "#####################",
        ];
        Self {
            rows: rows.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl AsciiMap {
    /// Width of the longest row, and the row count
    pub fn dimensions(&self) -> (u32, u32) {
        let width = self
            .rows
            .iter()
            .map(|r| r.chars().count())
            .max()
            .unwrap_or(0);
        let clamp = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        (clamp(width), clamp(self.rows.len()))
    }
}

impl MapType for AsciiMap {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn map_data(&self, _generator: &mut Pcg64) -> Result<MapData, MapError> {
        if self.rows.is_empty() {
            return Err(MapError::Empty);
        }
        let (width, height) = self.dimensions();
        let mut data = MapData::new(width, height);

        for (row, line) in self.rows.iter().enumerate() {
            for (col, glyph) in line.chars().enumerate() {
                let cell = match glyph {
                    '#' => Cell::Wall,
                    '.' | ' ' => continue,
                    '0'..='9' => Cell::Portal(glyph as u8 - b'0'),
                    _ => match Direction::from_glyph(glyph) {
                        Some(dir) => Cell::Spawn(dir),
                        None => return Err(MapError::UnknownGlyph { glyph, row, col }),
                    },
                };
                data.set(col as u32, row as u32, cell);
            }
        }
        Ok(data)
    }
}
