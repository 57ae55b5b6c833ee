use std::collections::BTreeMap;

use rand::Rng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use super::{Cell, MapData, MapError, MapType, check_size};
use crate::sim::grid::Direction;

/// Columns of walls hanging from the top and rising from the bottom,
/// leaving winding corridors between them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorsMap {
    pub width: u32,
    pub height: u32,
    pub corridor_width: u32,
    pub corridor_height: u32,
    pub top_corridor_offset: i32,
    pub bottom_corridor_offset: i32,
    /// 0 = every wall is `corridor_height` tall, 1 = heights fully random
    pub wall_variance: f32,
}

impl Default for CorridorsMap {
    fn default() -> Self {
        Self {
            width: 34,
            height: 17,
            corridor_width: 3,
            corridor_height: 10,
            top_corridor_offset: 3,
            bottom_corridor_offset: 0,
            wall_variance: 0.5,
        }
    }
}

impl CorridorsMap {
    /// Does column `x` carry a wall anchored at `offset`?
    fn is_wall_column(&self, x: u32, offset: i32) -> bool {
        let period = self.corridor_width as i64 + 1;
        let last = self.width as i64 - self.corridor_width as i64 - 1;
        (x as i64 - offset as i64).rem_euclid(period) == 0 && x > 2 && (x as i64) < last
    }

    /// Wall height for a column, rolled once and remembered
    fn wall_height(
        &self,
        heights: &mut BTreeMap<u32, u32>,
        generator: &mut Pcg64,
        x: u32,
    ) -> u32 {
        let variance = self.wall_variance.clamp(0.0, 1.0);
        let corridor_height = self.corridor_height as f32;
        *heights.entry(x).or_insert_with(|| {
            (corridor_height * (1.0 - variance)
                + corridor_height * variance * generator.random::<f32>()) as u32
        })
    }
}

impl MapType for CorridorsMap {
    fn name(&self) -> &'static str {
        "corridors"
    }

    fn map_data(&self, generator: &mut Pcg64) -> Result<MapData, MapError> {
        let (width, height) = (self.width, self.height);
        check_size(width, height)?;
        if self.corridor_width == 0 {
            return Err(MapError::ZeroCorridor { field: "width" });
        }
        if self.corridor_height == 0 {
            return Err(MapError::ZeroCorridor { field: "height" });
        }

        let mut data = MapData::new(width, height);
        let mut top_heights = BTreeMap::new();
        let mut bottom_heights = BTreeMap::new();

        let mut gap = 1;
        let mut blocked = false;
        for x in 0..width {
            let previously_blocked = blocked;
            let top = if self.is_wall_column(x, self.top_corridor_offset) {
                Some(self.wall_height(&mut top_heights, generator, x))
            } else {
                None
            };
            let bottom = if self.is_wall_column(x, self.bottom_corridor_offset) {
                Some(self.wall_height(&mut bottom_heights, generator, x))
            } else {
                None
            };

            blocked = true;
            for y in 0..height {
                let border = x == 0 || x == width - 1 || y == 0 || y == height - 1;
                let top_wall = top.is_some_and(|h| y <= h);
                let bottom_wall =
                    bottom.is_some_and(|h| (y as i64) > height as i64 - h as i64 - 2);
                if border || top_wall || bottom_wall {
                    data.set(x, y, Cell::Wall);
                } else {
                    blocked = false;
                    data.set(x, y, Cell::Empty);
                }
            }

            // A fully walled interior column gets a doorway
            if blocked && x > 0 && x < width - 1 {
                if !previously_blocked {
                    gap = generator.random_range(1..height - 1);
                }
                data.set(x, gap, Cell::Empty);
            }
        }

        // Open up the cells around each wall tip and drop a spawn beside it
        for (&x, &wall_height) in &bottom_heights {
            let y = height as i64 - wall_height as i64 - 2;
            if y <= 0 || y >= height as i64 - 1 {
                continue;
            }
            let y = y as u32;
            data.set(x - 1, y, Cell::Empty);
            data.set(x, y, Cell::Empty);
            data.set(x + 1, y, Cell::Empty);
            data.set(x + 1, height - 3, Cell::Spawn(Direction::Up));
        }
        for (&x, &wall_height) in &top_heights {
            let y = wall_height + 1;
            if y >= height - 1 {
                continue;
            }
            data.set(x - 1, y, Cell::Empty);
            data.set(x, y, Cell::Empty);
            data.set(x + 1, y, Cell::Empty);
            data.set(x + 1, 2, Cell::Spawn(Direction::Down));
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::GridPos;
    use rand::SeedableRng;

    fn build(seed: u64) -> crate::sim::board::Board {
        let mut rng = Pcg64::seed_from_u64(seed);
        CorridorsMap::default()
            .map_data(&mut rng)
            .unwrap()
            .into_board("corridors")
            .unwrap()
    }

    #[test]
    fn test_border_is_wall() {
        let board = build(7);
        for x in 0..board.width {
            assert!(board.is_wall(GridPos::new(x, 0)));
            assert!(board.is_wall(GridPos::new(x, board.height - 1)));
        }
        for y in 0..board.height {
            assert!(board.is_wall(GridPos::new(0, y)));
            assert!(board.is_wall(GridPos::new(board.width - 1, y)));
        }
    }

    #[test]
    fn test_every_interior_column_has_floor() {
        for seed in 0..20 {
            let board = build(seed);
            for x in 1..board.width - 1 {
                let open = (1..board.height - 1).any(|y| board.is_floor(GridPos::new(x, y)));
                assert!(open, "seed {} column {} fully blocked", seed, x);
            }
        }
    }

    #[test]
    fn test_spawns_on_floor() {
        let board = build(3);
        assert!(!board.spawns.is_empty());
        for spawn in &board.spawns {
            assert!(board.is_floor(spawn.pos));
        }
    }

    #[test]
    fn test_same_seed_same_map() {
        let a = build(42);
        let b = build(42);
        let cells = |board: &crate::sim::board::Board| {
            (0..board.height)
                .flat_map(|y| (0..board.width).map(move |x| GridPos::new(x, y)))
                .map(|p| board.is_wall(p))
                .collect::<Vec<_>>()
        };
        assert_eq!(cells(&a), cells(&b));
        assert_eq!(a.spawns, b.spawns);
    }

    #[test]
    fn test_zero_corridor_size_rejected() {
        let mut rng = Pcg64::seed_from_u64(7);
        let narrow = CorridorsMap {
            corridor_width: 0,
            ..Default::default()
        };
        assert_eq!(
            narrow.map_data(&mut rng).unwrap_err(),
            MapError::ZeroCorridor { field: "width" }
        );
        let flat = CorridorsMap {
            corridor_height: 0,
            ..Default::default()
        };
        assert_eq!(
            flat.map_data(&mut rng).unwrap_err(),
            MapError::ZeroCorridor { field: "height" }
        );
    }

    #[test]
    fn test_narrowest_corridors_keep_border_and_spawns_inside() {
        let map = CorridorsMap {
            corridor_width: 1,
            ..Default::default()
        };
        for seed in 0..20 {
            let mut rng = Pcg64::seed_from_u64(seed);
            let board = map.map_data(&mut rng).unwrap().into_board("corridors").unwrap();
            for y in 0..board.height {
                assert!(board.is_wall(GridPos::new(0, y)), "seed {}", seed);
                assert!(board.is_wall(GridPos::new(board.width - 1, y)), "seed {}", seed);
            }
            for spawn in &board.spawns {
                assert!(spawn.pos.x > 0 && spawn.pos.x < board.width - 1);
                assert!(board.is_floor(spawn.pos));
            }
        }
    }

    #[test]
    fn test_zero_variance_walls_are_full_height() {
        let map = CorridorsMap {
            wall_variance: 0.0,
            bottom_corridor_offset: 1,
            ..Default::default()
        };
        let mut rng = Pcg64::seed_from_u64(0);
        let data = map.map_data(&mut rng).unwrap();
        // Column 3 hangs from the top; no bottom wall tip is beside it
        for y in 0..=10 {
            assert_eq!(data.get(3, y), Cell::Wall, "y = {}", y);
        }
    }
}
