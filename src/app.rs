//! Application driver for the command-line program.
//!
//! The driver runs one pass of the pipeline: it obtains a board, either from a maze file or from a
//! freshly generated grid, optionally saves it, compresses it into a corridor graph, solves it and
//! finally prints or draws the result.

use std::{
    io::{self, Write},
    path::Path,
};

use color_eyre::eyre::Result;
use log::info;
use rand::Rng as _;

use crate::{
    board::Board, config::Config, file_loader, generator::Generator, graph::Graph, grid::Grid,
    render, solver::Solver, types::Position,
};

/// Runs the program with the given configuration.
///
/// # Errors
///
/// This function returns an error if the maze cannot be loaded, generated, saved or solved, or if
/// the output cannot be written. Failures of the maze core carry a [`MazeError`](crate::MazeError)
/// that can be recovered with `downcast_ref`.
pub fn run(config: &Config) -> Result<()> {
    let board = match &config.input {
        Some(path) => load_board(path)?,
        None => generate_board(config)?,
    };

    if let Some(path) = &config.output {
        file_loader::save(path, &board)?;
        info!("saved the maze to {}", path.display());
    }

    let mut graph = Graph::build(&board)?;
    info!(
        "compressed {} open squares into {} vertices and {} edges",
        board.positions().filter(|position| board.is_open(*position)).count(),
        graph.len(),
        graph.edges().len()
    );

    let path = Solver::new(&mut graph).solve(config.strategy)?;
    let summary = caption(config, &path);
    info!("{summary}");

    if config.plain {
        write_plain(&mut io::stdout().lock(), &board, &path)
    } else {
        render::show(&board, &path, &summary)
    }
}

/// Loads a maze file and rebuilds its board from the walls of the reconstructed grid.
fn load_board(path: &Path) -> Result<Board> {
    let loaded = file_loader::load(path)?;
    let grid = file_loader::grid_from_board(&loaded)?;
    info!(
        "loaded a {}x{} maze from {}",
        grid.length(),
        grid.width(),
        path.display()
    );

    let board = Board::from_grid(&grid).with_anchors(loaded.start(), loaded.exit())?;

    Ok(board)
}

/// Generates a maze as configured and returns its board.
fn generate_board(config: &Config) -> Result<Board> {
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut grid = Grid::new(config.length, config.width)?;

    let mut generator = Generator::seeded(seed);
    if let Some(limit) = config.max_steps {
        generator = generator.with_step_limit(limit);
    }
    generator.generate(&mut grid, config.algorithm)?;
    info!(
        "generated a {}x{} maze with {:?} from seed {seed}",
        grid.length(),
        grid.width(),
        config.algorithm
    );

    Ok(Board::from_grid(&grid))
}

/// Summary line shown under the drawn maze.
fn caption(config: &Config, path: &[Position]) -> String {
    format!(
        "{:?}: {} vertices, {} squares",
        config.strategy,
        path.len(),
        render::trail(path).len()
    )
}

/// Writes the text depiction of the solved maze.
fn write_plain<W: Write>(writer: &mut W, board: &Board, path: &[Position]) -> Result<()> {
    writer.write_all(render::ascii(board, path).as_bytes())?;
    writer.flush()?;

    Ok(())
}
