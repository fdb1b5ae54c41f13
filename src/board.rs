//! Passability board data and conversion module.
//!
//! This module contains the `Board` struct, the doubled-resolution open/blocked view of a maze that
//! the corridor builder walks over, together with its conversion from a [`Grid`] and its text form.

use std::fmt;

use crate::{
    error::MazeError,
    grid::Grid,
    types::{Direction, Position},
};

/// Character of a blocked board cell in the text form.
pub(crate) const WALL: char = '#';
/// Character of an open board cell in the text form.
pub(crate) const OPEN: char = '.';
/// Character of the start anchor in the text form.
pub(crate) const START: char = 'S';
/// Character of the exit anchor in the text form.
pub(crate) const EXIT: char = 'E';

/// Open/blocked grid at twice the resolution of a maze.
///
/// A maze of `length × width` cells becomes a board of `(2·length + 1) × (2·width + 1)` squares: cell
/// `(x, y)` sits at `(2x + 1, 2y + 1)`, the squares between two cell centres are open exactly when
/// the wall between those cells is carved, and the border and the corner posts are always blocked.
/// The board also carries the start and exit anchors in its own coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Number of board rows.
    rows: usize,
    /// Number of board columns.
    columns: usize,
    /// Open flags in row-major order.
    open: Vec<bool>,
    /// Start anchor.
    start: Position,
    /// Exit anchor.
    exit: Position,
}

impl Board {
    /// Builds a board from rows of open flags and the two anchors.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::MalformedInput`] if the rows are ragged, if either
    /// dimension is even or smaller than three, or if an anchor is outside the board or blocked.
    pub fn new(rows: Vec<Vec<bool>>, start: Position, exit: Position) -> Result<Self, MazeError> {
        let height = rows.len();
        let columns = rows.first().map_or(0, Vec::len);

        if height < 3 || columns < 3 {
            return Err(MazeError::MalformedInput(format!(
                "board must be at least 3x3, got {height}x{columns}"
            )));
        }
        if height % 2 == 0 || columns % 2 == 0 {
            return Err(MazeError::MalformedInput(format!(
                "board dimensions must be odd, got {height}x{columns}"
            )));
        }
        if let Some(row) = rows.iter().position(|row| row.len() != columns) {
            return Err(MazeError::MalformedInput(format!(
                "row {row} does not have {columns} columns"
            )));
        }

        let board = Self {
            rows: height,
            columns,
            open: rows.into_iter().flatten().collect(),
            start,
            exit,
        };

        board.with_anchors(start, exit)
    }

    /// Builds the board of a grid, anchored on the grid's start and exit cells.
    pub fn from_grid(grid: &Grid) -> Self {
        let rows = 2 * grid.length() + 1;
        let columns = 2 * grid.width() + 1;
        let mut board = Self {
            rows,
            columns,
            open: vec![false; rows * columns],
            start: Self::centre(grid.start()),
            exit: Self::centre(grid.exit()),
        };

        for cell in grid.cells() {
            let centre = Self::centre(cell.position());
            board.set_open(centre);

            for direction in [Direction::East, Direction::South] {
                if !cell.has_wall(direction) {
                    if let Some(between) = centre.step(direction) {
                        board.set_open(between);
                    }
                }
            }
        }

        board
    }

    /// Returns the board position of the centre of grid cell `cell`.
    pub const fn centre(cell: Position) -> Position {
        Position::new(2 * cell.x + 1, 2 * cell.y + 1)
    }

    /// Returns the same board re-anchored on new start and exit positions.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::MalformedInput`] if an anchor is outside the board or
    /// blocked.
    pub fn with_anchors(self, start: Position, exit: Position) -> Result<Self, MazeError> {
        for (name, anchor) in [("start", start), ("exit", exit)] {
            if !self.is_open(anchor) {
                return Err(MazeError::MalformedInput(format!(
                    "{name} anchor {anchor} is blocked or outside the board"
                )));
            }
        }

        Ok(Self {
            start,
            exit,
            ..self
        })
    }

    /// Returns the number of board rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of board columns.
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the start anchor.
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the exit anchor.
    pub const fn exit(&self) -> Position {
        self.exit
    }

    /// Returns the number of maze cells per column and row, `(length, width)`.
    pub const fn cell_dimensions(&self) -> (usize, usize) {
        ((self.rows - 1) / 2, (self.columns - 1) / 2)
    }

    /// Returns whether the position lies on the board.
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.columns && position.y < self.rows
    }

    /// Returns whether the position is on the board and open.
    pub fn is_open(&self, position: Position) -> bool {
        self.index(position)
            .and_then(|index| self.open.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// Returns the open neighbour of `position` in the given direction, if there is one.
    pub fn step(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .step(direction)
            .filter(|next| self.is_open(*next))
    }

    /// Returns every position on the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| Position::new(x, y)))
    }

    /// Returns every blocked position in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|position| !self.is_open(*position))
    }

    /// Row-major index of an on-board position.
    pub(crate) const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.y * self.columns + position.x)
        } else {
            None
        }
    }

    /// Marks an on-board position as open.
    fn set_open(&mut self, position: Position) {
        if let Some(flag) = self
            .index(position)
            .and_then(|index| self.open.get_mut(index))
        {
            *flag = true;
        }
    }

    /// Returns the text character for a position.
    pub(crate) fn symbol(&self, position: Position) -> char {
        if position == self.start {
            START
        } else if position == self.exit {
            EXIT
        } else if self.is_open(position) {
            OPEN
        } else {
            WALL
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.columns {
                write!(f, "{}", self.symbol(Position::new(x, y)))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
