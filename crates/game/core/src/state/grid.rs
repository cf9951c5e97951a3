use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::Position;

bitflags! {
    /// Per-tile terrain and visibility flags.
    ///
    /// WALKABLE/TRANSPARENT are written by the world-generation collaborator,
    /// VISIBLE/EXPLORED by the field-of-view collaborator. The resolver and
    /// AI only ever read them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TileFlags: u8 {
        const WALKABLE = 1 << 0;
        const TRANSPARENT = 1 << 1;
        const EXPLORED = 1 << 2;
        const VISIBLE = 1 << 3;
    }
}

/// Rectangular tile grid for a single floor.
///
/// Invariant: a VISIBLE tile is always EXPLORED; [`TileGrid::set_visible`]
/// maintains this when the FOV collaborator writes visibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<TileFlags>,
    downstairs: Position,
}

impl TileGrid {
    /// Creates a grid of the given dimensions with every tile solid and
    /// unexplored.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileFlags::empty(); (width * height) as usize],
            downstairs: Position::ORIGIN,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.in_bounds(position)
            .then(|| (position.y as u32 * self.width + position.x as u32) as usize)
    }

    /// Flags at the given position; empty for out-of-bounds tiles.
    pub fn flags(&self, position: Position) -> TileFlags {
        self.index(position)
            .map(|i| self.tiles[i])
            .unwrap_or(TileFlags::empty())
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        self.flags(position).contains(TileFlags::WALKABLE)
    }

    pub fn is_transparent(&self, position: Position) -> bool {
        self.flags(position).contains(TileFlags::TRANSPARENT)
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.flags(position).contains(TileFlags::VISIBLE)
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.flags(position).contains(TileFlags::EXPLORED)
    }

    /// Sets terrain flags; used by the world-generation collaborator.
    pub fn set_terrain(&mut self, position: Position, walkable: bool, transparent: bool) {
        if let Some(i) = self.index(position) {
            self.tiles[i].set(TileFlags::WALKABLE, walkable);
            self.tiles[i].set(TileFlags::TRANSPARENT, transparent);
        }
    }

    /// Marks a tile visible or hidden; marking visible also marks explored.
    /// Used by the FOV collaborator.
    pub fn set_visible(&mut self, position: Position, visible: bool) {
        if let Some(i) = self.index(position) {
            self.tiles[i].set(TileFlags::VISIBLE, visible);
            if visible {
                self.tiles[i].insert(TileFlags::EXPLORED);
            }
        }
    }

    /// Clears visibility on every tile ahead of an FOV recompute.
    pub fn clear_visible(&mut self) {
        for tile in &mut self.tiles {
            tile.remove(TileFlags::VISIBLE);
        }
    }

    /// The single staircase leading down from this floor.
    pub fn downstairs(&self) -> Position {
        self.downstairs
    }

    pub fn set_downstairs(&mut self, position: Position) {
        self.downstairs = position;
    }
}
