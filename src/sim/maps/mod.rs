//! Map authoring and generation
//!
//! A map type produces `MapData` (sparse authoring cells). `MapData`
//! is validated and realised into a `Board`.

mod ascii;
mod corridors;
mod open;

pub use ascii::AsciiMap;
pub use corridors::CorridorsMap;
pub use open::OpenMap;

use std::collections::BTreeMap;

use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::{Board, PortalPair, SpawnPoint, Tile};
use super::grid::{Direction, GridPos};

/// Smallest playable board edge
pub const MIN_MAP_SIZE: u32 = 5;

/// Largest board edge
pub const MAX_MAP_SIZE: u32 = 256;

/// Reject boards with an edge outside `MIN_MAP_SIZE..=MAX_MAP_SIZE`
pub fn check_size(width: u32, height: u32) -> Result<(), MapError> {
    if width < MIN_MAP_SIZE || height < MIN_MAP_SIZE {
        return Err(MapError::TooSmall { width, height });
    }
    if width > MAX_MAP_SIZE || height > MAX_MAP_SIZE {
        return Err(MapError::TooLarge { width, height });
    }
    Ok(())
}

/// Authoring cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Wall,
    Spawn(Direction),
    Portal(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map is {width}x{height}, minimum is 5x5")]
    TooSmall { width: u32, height: u32 },
    #[error("map is {width}x{height}, maximum is 256x256")]
    TooLarge { width: u32, height: u32 },
    #[error("cell ({x}, {y}) lies outside the map")]
    OutOfBounds { x: u32, y: u32 },
    #[error("portal {id} has {count} ends, expected 2")]
    UnpairedPortal { id: u8, count: usize },
    #[error("map has no spawn point and its centre is not floor")]
    NoSpawn,
    #[error("unknown map glyph `{glyph}` at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("corridor {field} must be at least 1")]
    ZeroCorridor { field: &'static str },
    #[error("ascii map has no rows")]
    Empty,
}

/// Sparse map description; missing cells are empty floor
#[derive(Debug, Clone, Default)]
pub struct MapData {
    pub width: u32,
    pub height: u32,
    pub cells: BTreeMap<(u32, u32), Cell>,
}

impl MapData {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: BTreeMap::new(),
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Cell {
        self.cells.get(&(x, y)).copied().unwrap_or(Cell::Empty)
    }

    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        self.cells.insert((x, y), cell);
    }

    /// Surround the map with walls
    pub fn wall_border(&mut self) {
        for x in 0..self.width {
            self.set(x, 0, Cell::Wall);
            self.set(x, self.height - 1, Cell::Wall);
        }
        for y in 0..self.height {
            self.set(0, y, Cell::Wall);
            self.set(self.width - 1, y, Cell::Wall);
        }
    }

    /// Validate and realise into a board
    pub fn into_board(self, name: &str) -> Result<Board, MapError> {
        let (width, height) = (self.width, self.height);
        check_size(width, height)?;

        let mut tiles = vec![Tile::Floor; width as usize * height as usize];
        let mut spawns = Vec::new();
        let mut portal_ends: BTreeMap<u8, Vec<GridPos>> = BTreeMap::new();

        for (&(x, y), &cell) in &self.cells {
            let pos = GridPos::new(x, y);
            if !pos.in_bounds(width, height) {
                return Err(MapError::OutOfBounds { x, y });
            }
            let idx = pos.index(width);
            match cell {
                Cell::Empty => {}
                Cell::Wall => tiles[idx] = Tile::Wall,
                Cell::Spawn(direction) => spawns.push(SpawnPoint { pos, direction }),
                Cell::Portal(id) => {
                    tiles[idx] = Tile::Portal(id);
                    portal_ends.entry(id).or_default().push(pos);
                }
            }
        }

        let mut portals = Vec::with_capacity(portal_ends.len());
        for (id, ends) in portal_ends {
            match ends.as_slice() {
                [a, b] => portals.push(PortalPair { id, a: *a, b: *b }),
                _ => {
                    return Err(MapError::UnpairedPortal {
                        id,
                        count: ends.len(),
                    });
                }
            }
        }

        // Player one gets the spawn nearest the centre, then outward row by row
        let centre = GridPos::center(width, height);
        spawns.sort_by_key(|s: &SpawnPoint| {
            let dx = s.pos.x.abs_diff(centre.x) as u64;
            let dy = s.pos.y.abs_diff(centre.y) as u64;
            (dx * dx + dy * dy, s.pos.y, s.pos.x)
        });

        if spawns.is_empty() {
            if tiles[centre.index(width)] != Tile::Floor {
                return Err(MapError::NoSpawn);
            }
            spawns.push(SpawnPoint {
                pos: centre,
                direction: Direction::Up,
            });
        }

        log::debug!(
            "Built board '{}' {}x{} with {} spawns, {} portal pairs",
            name,
            width,
            height,
            spawns.len(),
            portals.len()
        );

        Ok(Board::new(
            name.to_string(),
            width,
            height,
            tiles,
            spawns,
            portals,
        ))
    }
}

/// A map generator
pub trait MapType {
    fn name(&self) -> &'static str;
    fn map_data(&self, generator: &mut Pcg64) -> Result<MapData, MapError>;
}

/// Map selection as it appears in config files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapConfig {
    Open(OpenMap),
    Corridors(CorridorsMap),
    Ascii(AsciiMap),
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig::Open(OpenMap::default())
    }
}

impl MapConfig {
    pub fn map_type(&self) -> &dyn MapType {
        match self {
            MapConfig::Open(map) => map,
            MapConfig::Corridors(map) => map,
            MapConfig::Ascii(map) => map,
        }
    }

    pub fn name(&self) -> &'static str {
        self.map_type().name()
    }

    /// Board dimensions, known without generating
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            MapConfig::Open(map) => (map.width, map.height),
            MapConfig::Corridors(map) => (map.width, map.height),
            MapConfig::Ascii(map) => map.dimensions(),
        }
    }

    /// Generate and realise the board
    pub fn build(&self, generator: &mut Pcg64) -> Result<Board, MapError> {
        let map = self.map_type();
        map.map_data(generator)?.into_board(map.name())
    }
}
