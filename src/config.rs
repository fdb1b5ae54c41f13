//! Command-line configuration.

use std::path::PathBuf;

use clap::{builder::RangedU64ValueParser, ArgAction, Parser};
use log::LevelFilter;

use crate::types::{Algorithm, Strategy};

/// Default number of cells along each side of a generated maze.
const DEFAULT_SIDE: &str = "15";

/// Generate or load a perfect maze, compress its corridors into a graph of decision points and
/// solve it.
#[derive(Clone, Debug, Parser, PartialEq, Eq)]
#[command(version, about)]
pub struct Config {
    /// Number of cell rows of a generated maze.
    #[arg(
        short,
        long,
        default_value = DEFAULT_SIDE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub length: usize,
    /// Number of cell columns of a generated maze.
    #[arg(
        short,
        long,
        default_value = DEFAULT_SIDE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub width: usize,
    /// Generation algorithm.
    #[arg(short, long, value_enum, default_value_t)]
    pub algorithm: Algorithm,
    /// Search strategy of the solver.
    #[arg(short, long, value_enum, default_value_t)]
    pub strategy: Strategy,
    /// Seed of the random number generator; a random one is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Upper bound on Aldous-Broder random-walk steps.
    #[arg(long, value_name = "STEPS")]
    pub max_steps: Option<usize>,
    /// Maze file to solve instead of generating a maze.
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["length", "width", "algorithm", "seed", "max_steps"])]
    pub input: Option<PathBuf>,
    /// File to write the maze to.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Print the maze as plain text instead of drawing it.
    #[arg(short, long)]
    pub plain: bool,
    /// Increase logging verbosity; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    /// Silence every log message.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Config {
    /// Returns the log level selected by the verbosity flags.
    ///
    /// Warnings are shown by default; each `-v` adds one level of detail and `-q` silences
    /// everything.
    pub const fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }

        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
