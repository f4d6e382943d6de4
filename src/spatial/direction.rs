//! The four grid directions shared by every component
//!
//! Descriptor components, neighbor lookups and compatibility checks all index
//! through this table, so the opposite mapping is defined exactly once.

use std::fmt;

/// Direction from a cell towards one of its four orthogonal neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards the previous row
    Up,
    /// Towards the next column
    Right,
    /// Towards the next row
    Down,
    /// Towards the previous column
    Left,
}

impl Direction {
    /// All directions in descriptor order (Up, Right, Down, Left)
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// The direction pointing back the way this one came
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Position of this side within a tile descriptor
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Row and column deltas for one step in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }

    /// Step from `(y, x)` inside a `rows` x `cols` grid
    ///
    /// Returns `None` when the step would leave the grid.
    pub const fn step(self, y: usize, x: usize, rows: usize, cols: usize) -> Option<(usize, usize)> {
        let (dy, dx) = self.offset();
        let Some(ny) = y.checked_add_signed(dy) else {
            return None;
        };
        let Some(nx) = x.checked_add_signed(dx) else {
            return None;
        };
        if ny < rows && nx < cols {
            Some((ny, nx))
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}
