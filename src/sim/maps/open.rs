use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use super::{Cell, MapData, MapError, MapType, check_size};
use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
use crate::sim::grid::Direction;

/// A plain rectangular arena
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenMap {
    pub width: u32,
    pub height: u32,
    /// Surround the arena with walls (turn off for pure wraparound play)
    pub border_walls: bool,
    /// Place two portal pairs on the quarter points
    pub portals: bool,
}

impl Default for OpenMap {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            border_walls: true,
            portals: false,
        }
    }
}

impl MapType for OpenMap {
    fn name(&self) -> &'static str {
        "open"
    }

    fn map_data(&self, _generator: &mut Pcg64) -> Result<MapData, MapError> {
        let (width, height) = (self.width, self.height);
        check_size(width, height)?;

        let mut data = MapData::new(width, height);
        if self.border_walls {
            data.wall_border();
        }

        let (qx, qy) = (width / 4, height / 4);
        let (tx, ty) = (width - 1 - qx, height - 1 - qy);

        if self.portals {
            data.set(qx, qy, Cell::Portal(0));
            data.set(tx, ty, Cell::Portal(0));
            data.set(tx, qy, Cell::Portal(1));
            data.set(qx, ty, Cell::Portal(1));
        }

        // First spawn is the centre facing up; extra players fan out where
        // nothing else was placed (on small maps they collapse onto the centre)
        data.set(width / 2, height / 2, Cell::Spawn(Direction::Up));
        for (x, y, direction) in [
            (qx.max(2), height / 2, Direction::Down),
            (tx.min(width - 3), height / 2, Direction::Up),
            (width / 2, qy.max(2), Direction::Right),
        ] {
            if data.get(x, y) == Cell::Empty {
                data.set(x, y, Cell::Spawn(direction));
            }
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::Tile;
    use crate::sim::grid::GridPos;
    use rand::SeedableRng;

    #[test]
    fn test_default_open_map() {
        let mut rng = Pcg64::seed_from_u64(0);
        let board = OpenMap::default()
            .map_data(&mut rng)
            .unwrap()
            .into_board("open")
            .unwrap();
        assert_eq!((board.width, board.height), (29, 29));
        assert!(board.is_wall(GridPos::new(0, 0)));
        assert!(board.is_wall(GridPos::new(28, 14)));
        assert!(board.portals.is_empty());
        assert!(board.spawns.iter().all(|s| board.is_floor(s.pos)));
        assert!(
            board
                .spawns
                .iter()
                .any(|s| s.pos == GridPos::new(14, 14) && s.direction == Direction::Up)
        );
    }

    #[test]
    fn test_smallest_map_keeps_centre_spawn() {
        let map = OpenMap {
            width: 5,
            height: 5,
            ..Default::default()
        };
        let mut rng = Pcg64::seed_from_u64(0);
        let board = map.map_data(&mut rng).unwrap().into_board("open").unwrap();
        assert_eq!(board.spawns.len(), 1);
        assert_eq!(board.spawns[0].pos, GridPos::new(2, 2));
        assert_eq!(board.spawns[0].direction, Direction::Up);
    }

    #[test]
    fn test_fan_out_spawns_are_distinct() {
        let mut rng = Pcg64::seed_from_u64(0);
        let board = OpenMap::default()
            .map_data(&mut rng)
            .unwrap()
            .into_board("open")
            .unwrap();
        assert_eq!(board.spawns.len(), 4);
        assert_eq!(board.spawns[0].pos, GridPos::new(14, 14));
        assert_eq!(board.spawns[0].direction, Direction::Up);
    }

    #[test]
    fn test_portals_and_no_walls() {
        let map = OpenMap {
            border_walls: false,
            portals: true,
            ..Default::default()
        };
        let mut rng = Pcg64::seed_from_u64(0);
        let board = map.map_data(&mut rng).unwrap().into_board("open").unwrap();
        assert_eq!(board.portals.len(), 2);
        assert_eq!(board.tile(GridPos::new(7, 7)), Tile::Portal(0));
        assert!(board.is_floor(GridPos::new(0, 0)));
    }
}
