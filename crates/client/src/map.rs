//! Minimal rectangular arena map.
use std::collections::HashSet;

use game_core::{Position, TileOracle};

/// Bounded grid with optional walls. Tiles outside the grid are never free.
#[derive(Clone, Debug, Default)]
pub struct ArenaMap {
    width: i32,
    height: i32,
    walls: HashSet<Position>,
}

impl ArenaMap {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walls: HashSet::new(),
        }
    }

    pub fn with_wall(mut self, pos: Position) -> Self {
        self.walls.insert(pos);
        self
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }
}

impl TileOracle for ArenaMap {
    fn is_free(&self, pos: Position) -> bool {
        self.contains(pos) && !self.walls.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::env::adjacent_free_tile;

    #[test]
    fn edges_and_walls_are_not_free() {
        let map = ArenaMap::new(3, 3).with_wall(Position::new(1, 0));
        assert!(!map.is_free(Position::new(-1, 0)));
        assert!(!map.is_free(Position::new(3, 1)));
        assert!(!map.is_free(Position::new(1, 0)));
        assert!(map.is_free(Position::new(1, 1)));

        // up is off-grid, down is free
        assert_eq!(
            adjacent_free_tile(&map, Position::new(0, 0)),
            Some(Position::new(0, 1))
        );
    }
}
