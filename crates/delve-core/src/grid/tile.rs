//! Symbolic map tiles

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A symbolic tile value
///
/// Tiles carry meaning only; colors and glyphs are chosen by the display layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Nothing = 0,
    Floor = 1,
    Room = 2,
    Room2 = 3, // doorways and streets
    Wall = 4,
    Wall2 = 5, // structural walls
    Door = 6,
    DoorLocked = 7,
    StairsUp = 8,
    StairsDown = 9,
    Player = 10,
    Mob = 11,
    Merchant = 12,
    Blacksmith = 13,
}

impl Tile {
    /// Check if this is the empty marker
    pub const fn is_empty(&self) -> bool {
        matches!(self, Tile::Nothing)
    }

    /// Check if this is a wall type
    pub const fn is_wall(&self) -> bool {
        matches!(self, Tile::Wall | Tile::Wall2)
    }

    /// Check if this is a door type
    pub const fn is_door(&self) -> bool {
        matches!(self, Tile::Door | Tile::DoorLocked)
    }

    /// Check if this is a staircase
    pub const fn is_stairs(&self) -> bool {
        matches!(self, Tile::StairsUp | Tile::StairsDown)
    }

    /// Check if this is something that can be walked on
    pub const fn is_floor(&self) -> bool {
        matches!(self, Tile::Floor | Tile::Room | Tile::Room2)
    }

    /// Check if this marks an entity (placed by spawners, never by the generator)
    pub const fn is_entity(&self) -> bool {
        matches!(
            self,
            Tile::Player | Tile::Mob | Tile::Merchant | Tile::Blacksmith
        )
    }

    /// Get the symbolic character for this tile
    ///
    /// This is the raw map symbol used for dumps and debugging, not a display glyph.
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Nothing => ' ',
            Tile::Floor => 'f',
            Tile::Room => '.',
            Tile::Room2 => '#',
            Tile::Wall => 'w',
            Tile::Wall2 => 'W',
            Tile::Door => '+',
            Tile::DoorLocked => 'x',
            Tile::StairsUp => '<',
            Tile::StairsDown => '>',
            Tile::Player => '@',
            Tile::Mob => 'M',
            Tile::Merchant => '$',
            Tile::Blacksmith => 'B',
        }
    }

    /// Parse a symbolic character back into a tile
    pub const fn from_symbol(c: char) -> Option<Tile> {
        Some(match c {
            ' ' => Tile::Nothing,
            'f' => Tile::Floor,
            '.' => Tile::Room,
            '#' => Tile::Room2,
            'w' => Tile::Wall,
            'W' => Tile::Wall2,
            '+' => Tile::Door,
            'x' => Tile::DoorLocked,
            '<' => Tile::StairsUp,
            '>' => Tile::StairsDown,
            '@' => Tile::Player,
            'M' => Tile::Mob,
            '$' => Tile::Merchant,
            'B' => Tile::Blacksmith,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_predicates_are_disjoint() {
        for tile in Tile::iter() {
            let kinds = [
                tile.is_empty(),
                tile.is_wall(),
                tile.is_door(),
                tile.is_stairs(),
                tile.is_floor(),
                tile.is_entity(),
            ];
            assert_eq!(
                kinds.iter().filter(|k| **k).count(),
                1,
                "{} should belong to exactly one category",
                tile
            );
        }
    }

    #[test]
    fn test_symbols_round_trip() {
        for tile in Tile::iter() {
            assert_eq!(Tile::from_symbol(tile.symbol()), Some(tile));
        }
        assert_eq!(Tile::from_symbol('?'), None);
    }

    #[test]
    fn test_default_is_nothing() {
        assert_eq!(Tile::default(), Tile::Nothing);
        assert!(Tile::default().is_empty());
    }
}
