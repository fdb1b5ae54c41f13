//! Grid and cell data model.
//!
//! This module contains the `Grid` struct, which owns a rectangular array of walled cells, and the
//! wall-toggling operations that keep the two sides of every internal wall in agreement.

use crate::{
    error::MazeError,
    types::{Direction, Position},
};

/// Row-major offsets of the 3×3 neighbourhood, centre excluded.
const NEIGHBOURHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Single cell of a maze grid.
///
/// A cell knows its own position and carries one wall flag per [`Direction`], stored in the
/// direction's index order (north, south, east, west). `true` means the wall stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Position of the cell in its grid.
    position: Position,
    /// Wall flags indexed by [`Direction::index`].
    walls: [bool; 4],
}

impl Cell {
    /// Creates a fully walled cell at the given position.
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            walls: [true; 4],
        }
    }

    /// Returns the position of the cell.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the wall flags in north, south, east, west order.
    pub const fn walls(&self) -> [bool; 4] {
        self.walls
    }

    /// Returns whether the wall on the given side stands.
    #[expect(
        clippy::indexing_slicing,
        reason = "Direction indices are always within the four wall slots."
    )]
    pub const fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }

    /// Returns whether the cell is still walled on every side.
    pub fn is_sealed(&self) -> bool {
        self.walls.iter().all(|wall| *wall)
    }

    /// Resets the cell to fully walled.
    pub const fn clear(&mut self) {
        self.walls = [true; 4];
    }

    /// Flips the wall on the given side of this cell only.
    #[expect(
        clippy::indexing_slicing,
        reason = "Direction indices are always within the four wall slots."
    )]
    const fn flip(&mut self, direction: Direction) {
        self.walls[direction.index()] = !self.walls[direction.index()];
    }

    /// Knocks down the wall on the given side of this cell only.
    #[expect(
        clippy::indexing_slicing,
        reason = "Direction indices are always within the four wall slots."
    )]
    const fn open(&mut self, direction: Direction) {
        self.walls[direction.index()] = false;
    }
}

/// Rectangular grid of cells.
///
/// The grid is `length` rows tall and `width` columns wide. Every internal wall is stored twice,
/// once on each side, and every mutation goes through methods that update both copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    length: usize,
    /// Number of columns.
    width: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
    /// Designated start cell.
    start: Position,
}

impl Grid {
    /// Creates a fully walled grid of `length` rows and `width` columns.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidGeometry`] if either dimension is zero.
    pub fn new(length: usize, width: usize) -> Result<Self, MazeError> {
        if length == 0 || width == 0 {
            return Err(MazeError::InvalidGeometry(format!(
                "grid must be at least 1x1, got {length}x{width}"
            )));
        }

        let cells = (0..length)
            .flat_map(|y| (0..width).map(move |x| Cell::new(Position::new(x, y))))
            .collect();

        Ok(Self {
            length,
            width,
            cells,
            start: Position::new(0, 0),
        })
    }

    /// Returns the number of rows.
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Returns the number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of cells.
    pub const fn area(&self) -> usize {
        self.length * self.width
    }

    /// Returns the designated start cell.
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the designated exit cell, the corner opposite to the start.
    pub const fn exit(&self) -> Position {
        Position::new(self.width - 1, self.length - 1)
    }

    /// Returns whether the position lies inside the grid.
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.length
    }

    /// Returns the cell at `(x, y)`, if it lies inside the grid.
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index(Position::new(x, y))
            .and_then(|index| self.cells.get(index))
    }

    /// Returns the cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Row-major index of an in-bounds position.
    const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.y * self.width + position.x)
        } else {
            None
        }
    }

    /// Mutable access to the cell at a position.
    fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.index(position)
            .and_then(|index| self.cells.get_mut(index))
    }

    /// Flips the wall on the given side of `(x, y)` and its mirror on the neighbour.
    ///
    /// Boundary walls have no mirror and only the cell's own flag changes. Applying the same toggle
    /// twice restores the previous state.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidGeometry`] if `(x, y)` lies outside the grid.
    pub fn toggle_wall(&mut self, x: usize, y: usize, direction: Direction) -> Result<(), MazeError> {
        let position = Position::new(x, y);
        self.cell_mut(position)
            .ok_or_else(|| outside(position))?
            .flip(direction);

        if let Some(neighbor) = position
            .step(direction)
            .and_then(|next| self.cell_mut(next))
        {
            neighbor.flip(direction.opposite());
        }

        Ok(())
    }

    /// Opens the wall on the given side of `(x, y)` and its mirror on the neighbour.
    ///
    /// Unlike [`Grid::toggle_wall`] this is idempotent, which suits collaborators that rebuild a
    /// grid from an external encoding.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidGeometry`] if `(x, y)` lies outside the grid.
    pub fn open_wall(&mut self, x: usize, y: usize, direction: Direction) -> Result<(), MazeError> {
        let position = Position::new(x, y);
        self.cell_mut(position)
            .ok_or_else(|| outside(position))?
            .open(direction);

        if let Some(neighbor) = position
            .step(direction)
            .and_then(|next| self.cell_mut(next))
        {
            neighbor.open(direction.opposite());
        }

        Ok(())
    }

    /// Toggles the wall shared by two adjacent cells.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidGeometry`] if the cells are not orthogonally
    /// adjacent or if `from` lies outside the grid.
    pub fn carve_between(&mut self, from: Position, to: Position) -> Result<(), MazeError> {
        let direction = from.direction_to(to).ok_or_else(|| {
            MazeError::InvalidGeometry(format!("{from} and {to} are not adjacent"))
        })?;

        self.toggle_wall(from.x, from.y, direction)
    }

    /// Returns the cells around `(x, y)`.
    ///
    /// The neighbourhood is scanned row by row, skipping the centre, the four diagonals unless
    /// `allow_diagonal` is set, and anything outside the grid. The returned iterator borrows the
    /// grid; call the method again to restart the scan.
    pub fn neighbors(
        &self,
        x: usize,
        y: usize,
        allow_diagonal: bool,
    ) -> impl Iterator<Item = &Cell> + '_ {
        let centre = Position::new(x, y);

        NEIGHBOURHOOD
            .into_iter()
            .filter(move |&(dx, dy)| allow_diagonal || dx == 0 || dy == 0)
            .filter_map(move |(dx, dy)| centre.offset(dx, dy))
            .filter_map(|position| self.cell(position.x, position.y))
    }

    /// Resets every cell to fully walled.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Returns every open internal wall once, as the pair of cells it connects.
    ///
    /// Only the east and south sides are inspected, so each passage is reported from its
    /// north-western cell.
    pub fn passages(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.cells.iter().flat_map(move |cell| {
            [Direction::East, Direction::South]
                .into_iter()
                .filter(move |direction| !cell.has_wall(*direction))
                .filter_map(move |direction| cell.position().step(direction))
                .filter(move |next| self.contains(*next))
                .map(move |next| (cell.position(), next))
        })
    }

    /// Verifies that both sides of every internal wall agree.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::MalformedInput`] naming the first wall whose two copies
    /// disagree.
    pub fn check_mirroring(&self) -> Result<(), MazeError> {
        for cell in &self.cells {
            for direction in [Direction::East, Direction::South] {
                let Some(next) = cell.position().step(direction) else {
                    continue;
                };
                let Some(neighbor) = self.cell(next.x, next.y) else {
                    continue;
                };

                if cell.has_wall(direction) != neighbor.has_wall(direction.opposite()) {
                    return Err(MazeError::MalformedInput(format!(
                        "wall between {} and {next} is not mirrored",
                        cell.position()
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Error for a position that does not belong to the grid.
fn outside(position: Position) -> MazeError {
    MazeError::InvalidGeometry(format!("{position} lies outside the grid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collects the positions produced by a neighbour scan.
    fn neighbor_positions(grid: &Grid, x: usize, y: usize, diagonal: bool) -> Vec<Position> {
        grid.neighbors(x, y, diagonal).map(Cell::position).collect()
    }

    #[test]
    fn test_grid_new_rejects_zero_dimensions() {
        assert!(matches!(Grid::new(0, 5), Err(MazeError::InvalidGeometry(_))));
        assert!(matches!(Grid::new(5, 0), Err(MazeError::InvalidGeometry(_))));
        assert!(matches!(Grid::new(0, 0), Err(MazeError::InvalidGeometry(_))));
    }

    #[test]
    fn test_grid_new_is_fully_walled() {
        let grid = Grid::new(3, 4).expect("failed to create grid");

        assert_eq!(grid.length(), 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.area(), 12);
        assert_eq!(grid.start(), Position::new(0, 0));
        assert_eq!(grid.exit(), Position::new(3, 2));
        assert!(grid.cells().all(Cell::is_sealed), "new cells must be sealed");
        assert_eq!(grid.passages().count(), 0);
    }

    #[test]
    fn test_grid_cells_know_their_position() {
        let grid = Grid::new(2, 3).expect("failed to create grid");

        for y in 0..2 {
            for x in 0..3 {
                let cell = grid.cell(x, y).expect("cell should exist");
                assert_eq!(cell.position(), Position::new(x, y));
            }
        }
        assert!(grid.cell(3, 0).is_none(), "column 3 is outside the grid");
        assert!(grid.cell(0, 2).is_none(), "row 2 is outside the grid");
    }

    #[test]
    fn test_toggle_wall_mirrors_neighbor() {
        let mut grid = Grid::new(2, 2).expect("failed to create grid");

        grid.toggle_wall(0, 0, Direction::East)
            .expect("toggle should succeed");

        let west = grid.cell(0, 0).expect("cell should exist");
        let east = grid.cell(1, 0).expect("cell should exist");
        assert!(!west.has_wall(Direction::East), "own side must open");
        assert!(!east.has_wall(Direction::West), "mirrored side must open");
        assert!(east.has_wall(Direction::South), "unrelated walls stay");

        grid.toggle_wall(1, 1, Direction::North)
            .expect("toggle should succeed");
        assert!(!grid
            .cell(1, 0)
            .expect("cell should exist")
            .has_wall(Direction::South));
        grid.check_mirroring().expect("walls should agree");
    }

    #[test]
    fn test_toggle_wall_twice_restores_state() {
        let mut grid = Grid::new(3, 3).expect("failed to create grid");
        grid.toggle_wall(1, 1, Direction::West)
            .expect("toggle should succeed");
        let before = grid.clone();

        for direction in Direction::ALL {
            grid.toggle_wall(1, 1, direction)
                .expect("toggle should succeed");
            grid.toggle_wall(1, 1, direction)
                .expect("toggle should succeed");
            assert_eq!(grid, before, "double toggle of {direction:?} must be a no-op");
        }
    }

    #[test]
    fn test_toggle_wall_on_boundary_has_no_mirror() {
        let mut grid = Grid::new(2, 2).expect("failed to create grid");

        grid.toggle_wall(0, 0, Direction::North)
            .expect("toggle should succeed");

        assert!(!grid
            .cell(0, 0)
            .expect("cell should exist")
            .has_wall(Direction::North));
        assert_eq!(grid.passages().count(), 0, "boundary openings are not passages");
        grid.check_mirroring().expect("walls should agree");
    }

    #[test]
    fn test_toggle_wall_outside_grid_fails() {
        let mut grid = Grid::new(2, 2).expect("failed to create grid");

        assert!(matches!(
            grid.toggle_wall(2, 0, Direction::West),
            Err(MazeError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_carve_between_adjacent_cells() {
        let mut grid = Grid::new(2, 2).expect("failed to create grid");

        grid.carve_between(Position::new(1, 1), Position::new(1, 0))
            .expect("cells are adjacent");

        assert_eq!(
            grid.passages().collect::<Vec<_>>(),
            vec![(Position::new(1, 0), Position::new(1, 1))]
        );
    }

    #[test]
    fn test_carve_between_rejects_non_adjacent_cells() {
        let mut grid = Grid::new(3, 3).expect("failed to create grid");

        for target in [
            Position::new(1, 1),
            Position::new(2, 0),
            Position::new(0, 2),
            Position::new(0, 0),
        ] {
            assert!(
                matches!(
                    grid.carve_between(Position::new(0, 0), target),
                    Err(MazeError::InvalidGeometry(_))
                ),
                "carving towards {target} must fail"
            );
        }
        assert!(grid.cells().all(Cell::is_sealed), "failed carves must not mutate");
    }

    #[test]
    fn test_open_wall_is_idempotent() {
        let mut grid = Grid::new(1, 2).expect("failed to create grid");

        grid.open_wall(0, 0, Direction::East)
            .expect("open should succeed");
        grid.open_wall(0, 0, Direction::East)
            .expect("open should succeed");

        assert_eq!(grid.passages().count(), 1);
        grid.check_mirroring().expect("walls should agree");
    }

    #[test]
    fn test_open_wall_on_boundary_opens_one_side() {
        let mut grid = Grid::new(1, 2).expect("failed to create grid");

        grid.open_wall(0, 0, Direction::North)
            .expect("open should succeed");

        let cell = grid.cell(0, 0).expect("cell should exist");
        assert!(!cell.has_wall(Direction::North), "own flag must be open");
        assert!(cell.has_wall(Direction::East), "other sides stay closed");
        assert_eq!(grid.passages().count(), 0);
        assert!(
            grid.cell(1, 0).is_some_and(Cell::is_sealed),
            "the neighbour must stay untouched"
        );
        grid.check_mirroring().expect("walls should agree");
    }

    #[test]
    fn test_neighbors_orthogonal_order() {
        let grid = Grid::new(3, 3).expect("failed to create grid");

        assert_eq!(
            neighbor_positions(&grid, 1, 1, false),
            vec![
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_neighbors_with_diagonals() {
        let grid = Grid::new(3, 3).expect("failed to create grid");

        assert_eq!(neighbor_positions(&grid, 1, 1, true).len(), 8);
        assert_eq!(
            neighbor_positions(&grid, 0, 0, true),
            vec![Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_neighbors_respect_bounds() {
        let grid = Grid::new(3, 4).expect("failed to create grid");

        assert_eq!(neighbor_positions(&grid, 0, 0, false).len(), 2);
        assert_eq!(neighbor_positions(&grid, 3, 2, false).len(), 2);
        assert_eq!(neighbor_positions(&grid, 1, 0, false).len(), 3);
        assert_eq!(neighbor_positions(&grid, 3, 1, true).len(), 5);

        let single = Grid::new(1, 1).expect("failed to create grid");
        assert_eq!(single.neighbors(0, 0, true).count(), 0);
    }

    #[test]
    fn test_neighbors_is_restartable() {
        let grid = Grid::new(4, 4).expect("failed to create grid");

        let first = neighbor_positions(&grid, 2, 1, true);
        let second = neighbor_positions(&grid, 2, 1, true);
        assert_eq!(first, second, "repeated scans must agree");
    }

    #[test]
    fn test_clear_resets_walls() {
        let mut grid = Grid::new(2, 2).expect("failed to create grid");
        grid.carve_between(Position::new(0, 0), Position::new(1, 0))
            .expect("cells are adjacent");
        grid.carve_between(Position::new(0, 0), Position::new(0, 1))
            .expect("cells are adjacent");

        grid.clear();

        assert_eq!(grid, Grid::new(2, 2).expect("failed to create grid"));
    }

    #[test]
    fn test_check_mirroring_detects_disagreement() {
        let mut grid = Grid::new(2, 2).expect("failed to create grid");
        grid.cell_mut(Position::new(0, 1))
            .expect("cell should exist")
            .flip(Direction::East);

        assert!(matches!(
            grid.check_mirroring(),
            Err(MazeError::MalformedInput(_))
        ));
    }
}
