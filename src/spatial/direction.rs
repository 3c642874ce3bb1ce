//! Cardinal directions shared by socket sequences and grid adjacency
//!
//! Socket sequences are always ordered North, East, South, West, so a
//! direction doubles as an index into a tile's sockets.

use std::fmt;

/// One of the four sides of a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards row `y - 1`
    North = 0,
    /// Towards column `x + 1`
    East = 1,
    /// Towards row `y + 1`
    South = 2,
    /// Towards column `x - 1`
    West = 3,
}

impl Direction {
    /// All directions in socket order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Position of this side within a socket sequence
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The side a neighbor uses to face back, `(index + 2) mod 4`
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Column and row offset of the neighbor in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}
