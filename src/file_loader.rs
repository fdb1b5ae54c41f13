//! File loading and validation utilities for text maze files.
//!
//! A maze file holds one line per board row: `#` for a blocked square, `.` for an open one, `S` for
//! the start anchor and `E` for the exit anchor. It is exactly the [`Display`](std::fmt::Display)
//! form of a [`Board`].

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr as _};
use log::debug;

use crate::{
    board::{Board, EXIT, OPEN, START, WALL},
    error::MazeError,
    grid::Grid,
    types::{Direction, Position},
};

/// Reads and validates a maze file.
///
/// # Errors
///
/// This function returns an error if the file cannot be read or if its contents are rejected by
/// [`parse_file_contents`].
pub fn load(path: &Path) -> Result<Board> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read maze file {}", path.display()))?;
    let board = parse_file_contents(&contents)
        .wrap_err_with(|| format!("failed to parse maze file {}", path.display()))?;

    debug!(
        "loaded a {}x{} board from {}",
        board.rows(),
        board.columns(),
        path.display()
    );

    Ok(board)
}

/// Writes a board to a maze file, replacing any previous contents.
///
/// # Errors
///
/// This function returns an error if the file cannot be written.
pub fn save(path: &Path, board: &Board) -> Result<()> {
    fs::write(path, board.to_string())
        .wrap_err_with(|| format!("failed to write maze file {}", path.display()))?;

    debug!("saved board to {}", path.display());

    Ok(())
}

/// Validates the format and content of a maze file and builds its board.
///
/// The following rules are enforced:
/// - Contains only the characters `#`, `.`, `S` and `E`
/// - Has consistent row lengths and odd row and column counts, at least three of each
/// - Has at most one start and one exit anchor, both on cell centres
/// - Is completely surrounded by walls, with every corner post blocked and every cell centre open
///
/// A missing start anchor defaults to the first cell centre and a missing exit anchor to the last
/// one.
///
/// # Errors
///
/// This function returns [`MazeError::MalformedInput`] describing the first rule that is broken.
pub fn parse_file_contents(input: &str) -> Result<Board, MazeError> {
    let lines: Vec<&str> = input.trim_end().lines().collect();
    let Some(first_line) = lines.first() else {
        return Err(malformed("maze file is empty"));
    };
    let expected_width = first_line.chars().count();

    let mut start = None;
    let mut exit = None;
    let mut rows = Vec::with_capacity(lines.len());

    for (y, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(expected_width);

        for (x, symbol) in line.chars().enumerate() {
            let anchor = match symbol {
                WALL | OPEN => None,
                START => Some(&mut start),
                EXIT => Some(&mut exit),
                other => {
                    return Err(malformed(format!(
                        "unexpected character {other:?} at {}",
                        Position::new(x, y)
                    )));
                }
            };
            if let Some(slot) = anchor {
                if slot.replace(Position::new(x, y)).is_some() {
                    return Err(malformed(format!("more than one {symbol} anchor")));
                }
            }
            row.push(symbol != WALL);
        }

        if row.len() != expected_width {
            return Err(malformed(format!(
                "row {y} has {} columns instead of {expected_width}",
                row.len()
            )));
        }
        rows.push(row);
    }

    let height = rows.len();
    let start = start.unwrap_or(Position::new(1, 1));
    let exit = exit.unwrap_or_else(|| {
        Position::new(expected_width.saturating_sub(2), height.saturating_sub(2))
    });

    let board = Board::new(rows, start, exit)?;
    check_structure(&board)?;

    Ok(board)
}

/// Rebuilds the grid whose board is `board`, with every internal wall mirrored.
///
/// Only the squares between two cell centres are read; border squares and corner posts carry no
/// wall information.
///
/// # Errors
///
/// This function returns [`MazeError::MalformedInput`] if the rebuilt walls do not agree on both
/// sides.
pub fn grid_from_board(board: &Board) -> Result<Grid, MazeError> {
    let (length, width) = board.cell_dimensions();
    let mut grid = Grid::new(length, width)?;

    for y in 0..length {
        for x in 0..width {
            let centre = Board::centre(Position::new(x, y));

            for direction in [Direction::East, Direction::South] {
                let inside = Position::new(x, y)
                    .step(direction)
                    .is_some_and(|next| grid.contains(next));
                let open = centre
                    .step(direction)
                    .is_some_and(|square| board.is_open(square));

                if inside && open {
                    grid.open_wall(x, y, direction)?;
                }
            }
        }
    }
    grid.check_mirroring()?;

    Ok(grid)
}

/// Verifies the wall structure a board must have to come from a grid.
fn check_structure(board: &Board) -> Result<(), MazeError> {
    let last_row = board.rows() - 1;
    let last_column = board.columns() - 1;

    for position in board.positions() {
        let border =
            position.x == 0 || position.y == 0 || position.x == last_column || position.y == last_row;
        let post = position.x % 2 == 0 && position.y % 2 == 0;
        let centre = position.x % 2 == 1 && position.y % 2 == 1;

        if (border || post) && board.is_open(position) {
            return Err(malformed(format!("{position} must be a wall")));
        }
        if centre && !board.is_open(position) {
            return Err(malformed(format!("cell centre {position} must be open")));
        }
    }

    for (name, anchor) in [("start", board.start()), ("exit", board.exit())] {
        if anchor.x % 2 == 0 || anchor.y % 2 == 0 {
            return Err(malformed(format!(
                "{name} anchor {anchor} is not on a cell centre"
            )));
        }
    }

    Ok(())
}

/// Builds a [`MazeError::MalformedInput`] from a message.
fn malformed<M: Into<String>>(message: M) -> MazeError {
    MazeError::MalformedInput(message.into())
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;
    use crate::{generator::Generator, types::Algorithm};

    /// A valid 2x2 maze with an L-shaped passage.
    const VALID_MAZE: &str = "#####\n#S..#\n#.#.#\n#.#E#\n#####\n";

    #[test]
    fn test_parse_file_contents_valid_maze() {
        let board = parse_file_contents(VALID_MAZE).expect("maze should parse");

        assert_eq!(board.rows(), 5);
        assert_eq!(board.columns(), 5);
        assert_eq!(board.start(), Position::new(1, 1));
        assert_eq!(board.exit(), Position::new(3, 3));
        assert_eq!(board.to_string(), VALID_MAZE);
    }

    #[test]
    fn test_parse_file_contents_default_anchors() {
        let board = parse_file_contents("#######\n#.....#\n#######").expect("maze should parse");

        assert_eq!(board.start(), Position::new(1, 1));
        assert_eq!(board.exit(), Position::new(5, 1));
    }

    #[test]
    fn test_parse_file_contents_moved_anchors() {
        let board = parse_file_contents("#####\n#E..#\n#.#.#\n#.#S#\n#####").expect("maze should parse");

        assert_eq!(board.start(), Position::new(3, 3));
        assert_eq!(board.exit(), Position::new(1, 1));
    }

    #[test]
    fn test_parse_file_contents_empty_input() {
        assert!(matches!(
            parse_file_contents(""),
            Err(MazeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_parse_file_contents_too_small() {
        for invalid_maze in ["###\n#S#", "##\n#.\n##", "#"] {
            assert!(
                matches!(parse_file_contents(invalid_maze), Err(MazeError::MalformedInput(_))),
                "{invalid_maze:?} must be rejected"
            );
        }
    }

    #[test]
    fn test_parse_file_contents_even_dimensions() {
        let invalid_maze = "####\n#S.#\n####";
        assert!(matches!(
            parse_file_contents(invalid_maze),
            Err(MazeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_parse_file_contents_inconsistent_row_lengths() {
        let invalid_maze = "#####\n#S.E#\n####";
        assert!(matches!(
            parse_file_contents(invalid_maze),
            Err(MazeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_parse_file_contents_invalid_characters() {
        let invalid_maze = "#####\n#SxE#\n#####";
        assert!(matches!(
            parse_file_contents(invalid_maze),
            Err(MazeError::MalformedInput(message)) if message.contains("'x'")
        ));
    }

    #[test]
    fn test_parse_file_contents_multiple_anchors() {
        for invalid_maze in ["#####\n#SSE#\n#####", "#####\n#SEE#\n#####"] {
            assert!(
                matches!(parse_file_contents(invalid_maze), Err(MazeError::MalformedInput(_))),
                "{invalid_maze:?} must be rejected"
            );
        }
    }

    #[test]
    fn test_parse_file_contents_open_border() {
        let invalid_maze = "#####\n....E\n#####";
        assert!(matches!(
            parse_file_contents(invalid_maze),
            Err(MazeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_parse_file_contents_open_post() {
        let invalid_maze = "#####\n#S..#\n#...#\n#..E#\n#####";
        assert!(matches!(
            parse_file_contents(invalid_maze),
            Err(MazeError::MalformedInput(message)) if message.contains("(2, 2)")
        ));
    }

    #[test]
    fn test_parse_file_contents_blocked_centre() {
        let invalid_maze = "#######\n#S.#.E#\n#######";
        assert!(matches!(
            parse_file_contents(invalid_maze),
            Err(MazeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_parse_file_contents_anchor_between_cells() {
        let invalid_maze = "#####\n#.S.#\n#.#.#\n#.#E#\n#####";
        assert!(matches!(
            parse_file_contents(invalid_maze),
            Err(MazeError::MalformedInput(message)) if message.contains("start")
        ));
    }

    #[test]
    fn test_grid_from_board_restores_walls() {
        let mut grid = Grid::new(6, 4).expect("failed to create grid");
        Generator::seeded(3)
            .generate(&mut grid, Algorithm::Backtrack)
            .expect("generation should succeed");
        let board = Board::from_grid(&grid);

        let restored = grid_from_board(&board).expect("board should convert");

        assert_eq!(restored, grid, "walls must survive the board round trip");
    }

    #[test]
    fn test_grid_from_parsed_board() {
        let board = parse_file_contents(VALID_MAZE).expect("maze should parse");
        let grid = grid_from_board(&board).expect("board should convert");

        assert_eq!(grid.length(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(
            grid.passages().collect::<Vec<_>>(),
            vec![
                (Position::new(0, 0), Position::new(1, 0)),
                (Position::new(0, 0), Position::new(0, 1)),
                (Position::new(1, 0), Position::new(1, 1)),
            ]
        );
    }

    #[test]
    fn test_save_then_load() {
        let path = env::temp_dir().join(format!("mazegraph-{}.maze", process::id()));
        let board = parse_file_contents(VALID_MAZE).expect("maze should parse");

        save(&path, &board).expect("saving should succeed");
        let loaded = load(&path);
        fs::remove_file(&path).expect("failed to remove maze file");

        assert_eq!(loaded.expect("loading should succeed"), board);
    }

    #[test]
    fn test_load_missing_file() {
        let path = env::temp_dir().join("mazegraph-missing.maze");

        assert!(load(&path).is_err(), "missing files cannot load");
    }
}
