//! Realised playfield
//!
//! A `Board` is what the simulation plays on: built once from `MapData`,
//! then only queried.

use serde::{Deserialize, Serialize};

use super::grid::{Direction, GridPos};

/// What occupies a board cell permanently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
    /// One end of a portal pair
    Portal(u8),
}

/// Where and facing which way a snake may (re)spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub pos: GridPos,
    pub direction: Direction,
}

/// Two linked portal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalPair {
    pub id: u8,
    pub a: GridPos,
    pub b: GridPos,
}

/// Result of moving one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub pos: GridPos,
    /// The move went through a portal
    pub via_portal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    pub width: u32,
    pub height: u32,
    tiles: Vec<Tile>,
    pub spawns: Vec<SpawnPoint>,
    pub portals: Vec<PortalPair>,
}

impl Board {
    pub(crate) fn new(
        name: String,
        width: u32,
        height: u32,
        tiles: Vec<Tile>,
        spawns: Vec<SpawnPoint>,
        portals: Vec<PortalPair>,
    ) -> Self {
        debug_assert_eq!(tiles.len(), (width * height) as usize);
        Self {
            name,
            width,
            height,
            tiles,
            spawns,
            portals,
        }
    }

    /// Tile at `pos`; off-board reads as wall
    pub fn tile(&self, pos: GridPos) -> Tile {
        if !pos.in_bounds(self.width, self.height) {
            return Tile::Wall;
        }
        self.tiles[pos.index(self.width)]
    }

    pub fn is_floor(&self, pos: GridPos) -> bool {
        self.tile(pos) == Tile::Floor
    }

    pub fn is_wall(&self, pos: GridPos) -> bool {
        self.tile(pos) == Tile::Wall
    }

    /// The other end of the portal at `pos`
    pub fn portal_partner(&self, pos: GridPos) -> Option<GridPos> {
        self.portals.iter().find_map(|p| {
            if p.a == pos {
                Some(p.b)
            } else if p.b == pos {
                Some(p.a)
            } else {
                None
            }
        })
    }

    /// Move one cell from `pos`. Landing on a portal continues from its
    /// partner in the same direction. `None` means the move leaves a
    /// board without wraparound.
    pub fn next_cell(&self, pos: GridPos, dir: Direction, wrap: bool) -> Option<Step> {
        let next = pos.offset(dir, self.width, self.height, wrap)?;
        if let Tile::Portal(_) = self.tile(next) {
            if let Some(partner) = self.portal_partner(next) {
                let exit = partner.offset(dir, self.width, self.height, wrap)?;
                return Some(Step {
                    pos: exit,
                    via_portal: true,
                });
            }
        }
        Some(Step {
            pos: next,
            via_portal: false,
        })
    }

    /// All floor cells in row-major order
    pub fn floor_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Tile::Floor)
            .map(move |(i, _)| GridPos::new(i as u32 % width, i as u32 / width))
    }

    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }
}
