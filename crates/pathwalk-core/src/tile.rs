//! The [`Tile`] type: the contents of a carved grid cell.

use std::fmt;

/// What a carved cell is made of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    Floor,
    Wall,
}

/// A reward that can sit on a floor tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Collectible {
    /// Dropped whenever a walker turns back on itself.
    WeaponChest,
    /// Dropped by every walker when it terminates.
    AmmoChest,
}

impl Collectible {
    pub const ALL: [Collectible; 2] = [Collectible::WeaponChest, Collectible::AmmoChest];
}

impl fmt::Display for Collectible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collectible::WeaponChest => f.write_str("weapon chest"),
            Collectible::AmmoChest => f.write_str("ammo chest"),
        }
    }
}

/// A non-empty grid cell. Only floors carry collectibles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileKind,
    pub collectible: Option<Collectible>,
}

impl Tile {
    pub const FLOOR: Self = Self {
        kind: TileKind::Floor,
        collectible: None,
    };

    pub const WALL: Self = Self {
        kind: TileKind::Wall,
        collectible: None,
    };

    #[inline]
    pub const fn is_floor(self) -> bool {
        matches!(self.kind, TileKind::Floor)
    }

    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self.kind, TileKind::Wall)
    }

    /// ASCII glyph used by [`Grid::render_ascii`](crate::Grid::render_ascii).
    pub const fn glyph(self) -> char {
        match (self.kind, self.collectible) {
            (TileKind::Wall, _) => '#',
            (TileKind::Floor, None) => '.',
            (TileKind::Floor, Some(Collectible::WeaponChest)) => 'w',
            (TileKind::Floor, Some(Collectible::AmmoChest)) => 'a',
        }
    }
}
