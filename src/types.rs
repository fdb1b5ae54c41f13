//! Type definitions shared by the grid, the corridor graph and the command line.

use std::fmt;

use clap::ValueEnum;

/// Position of a cell on a grid or a board.
///
/// This structure is the single coordinate type used as a key everywhere in the crate. The `x`
/// component grows eastwards and the `y` component grows southwards, so `(0, 0)` is the north-west
/// corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column of the position.
    pub x: usize,
    /// Row of the position.
    pub y: usize,
}

impl Position {
    /// Builds a position from its column and row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by the given signed delta.
    ///
    /// This function returns [`None`] when the shift would move the position past the north or west
    /// edge of the coordinate space. Upper bounds are left to the owner of the positions.
    pub const fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };

        Some(Self { x, y })
    }

    /// Returns the adjacent position in the given direction.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        self.offset(dx, dy)
    }

    /// Returns the direction leading from this position to an adjacent one.
    ///
    /// This function yields [`None`] when the two positions are identical, diagonal or further apart
    /// than a single step.
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        let dx = axis_delta(self.x, other.x)?;
        let dy = axis_delta(self.y, other.y)?;

        Direction::from_delta(dx, dy)
    }

    /// Returns the Manhattan distance between two positions.
    pub const fn distance(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns every position on the straight segment from this position to `other`, both ends
    /// included.
    ///
    /// This function yields [`None`] when the positions share neither a row nor a column.
    pub fn line_to(self, other: Self) -> Option<Vec<Self>> {
        if self == other {
            return Some(vec![self]);
        }
        if self.x != other.x && self.y != other.y {
            return None;
        }

        let direction = if other.x > self.x {
            Direction::East
        } else if other.x < self.x {
            Direction::West
        } else if other.y > self.y {
            Direction::South
        } else {
            Direction::North
        };

        let mut line = Vec::with_capacity(self.distance(other) + 1);
        let mut current = self;
        line.push(current);
        while current != other {
            current = current.step(direction)?;
            line.push(current);
        }

        Some(line)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Signed single-step difference between two coordinates on one axis.
///
/// Returns [`None`] when the coordinates are more than one step apart.
fn axis_delta(from: usize, to: usize) -> Option<isize> {
    if from == to {
        Some(0)
    } else if from.checked_add(1) == Some(to) {
        Some(1)
    } else if to.checked_add(1) == Some(from) {
        Some(-1)
    } else {
        None
    }
}

/// Cardinal direction of a wall or a step.
///
/// The discriminant order is fixed: the four wall flags of a cell are stored in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards decreasing `y`.
    North,
    /// Towards increasing `y`.
    South,
    /// Towards increasing `x`.
    East,
    /// Towards decreasing `x`.
    West,
}

impl Direction {
    /// All directions in wall-flag order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// All directions in the row-major order of a 3×3 neighbourhood scan.
    pub const SCAN: [Self; 4] = [Self::North, Self::West, Self::East, Self::South];

    /// Returns the wall-flag index of the direction.
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }

    /// Returns the `(dx, dy)` unit offset of the direction.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Converts a unit offset into a direction.
    ///
    /// Anything other than one of the four unit vectors has no direction.
    pub const fn from_delta(dx: isize, dy: isize) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::North),
            (0, 1) => Some(Self::South),
            (1, 0) => Some(Self::East),
            (-1, 0) => Some(Self::West),
            _ => None,
        }
    }
}

/// Spanning-tree algorithm used to carve a maze.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Randomized depth-first carve with an explicit stack.
    ///
    /// Produces long winding corridors with few branches.
    #[default]
    #[value(alias = "dfs")]
    Backtrack,
    /// Random-walk cover, every spanning tree equally likely.
    #[value(alias = "ab")]
    AldousBroder,
}

/// Traversal order used to search the corridor graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// FIFO frontier; finds the path with the fewest corridor edges.
    #[default]
    #[value(alias = "bfs")]
    BreadthFirst,
    /// LIFO frontier; finds a path.
    #[value(alias = "dfs")]
    DepthFirst,
}
