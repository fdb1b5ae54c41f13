//! Perfect maze generation and solving over a compressed corridor graph.
//!
//! A maze starts life as a [`Grid`] of fully walled cells. A [`Generator`] carves a spanning tree
//! into it, either by randomized backtracking or by an Aldous-Broder random walk. The grid is then
//! laid out as a doubled-resolution [`Board`] and [`Graph::build`] compresses its corridors into a
//! sparse graph whose vertices are the decision points of the maze. A [`Solver`] runs breadth-first
//! or depth-first search over that graph and reconstructs the path from the start anchor to the
//! exit anchor.
//!
//! Boards can also be read from and written to text maze files, and the command-line program built
//! on [`run`] prints or draws the solved maze.

#![expect(
    clippy::cargo_common_metadata,
    reason = "The package is not published, so it carries no repository or readme."
)]

mod app;
mod board;
mod config;
mod corridor;
mod error;
mod file_loader;
mod generator;
mod graph;
mod grid;
mod logging;
mod render;
mod solver;
mod types;

pub use app::run;
pub use board::Board;
pub use config::Config;
pub use error::MazeError;
pub use file_loader::{grid_from_board, load, parse_file_contents, save};
pub use generator::Generator;
pub use graph::{Edge, Graph, Vertex, VertexId};
pub use grid::{Cell, Grid};
pub use logging::init_logger;
pub use render::{ascii, show, trail};
pub use solver::Solver;
pub use types::{Algorithm, Direction, Position, Strategy};
