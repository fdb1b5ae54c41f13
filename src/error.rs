//! Error taxonomy of the maze core.

use thiserror::Error;

use crate::types::Position;

/// Failure conditions surfaced by the grid, the generators, the corridor builder and the solver.
///
/// Every variant is a local, synchronous failure. The structure that was being built when the
/// error surfaced is left half-done and should be discarded by the caller; no retries happen inside
/// the crate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// Zero-sized dimensions, a position outside the grid or a step between non-adjacent cells.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A randomized generation loop ran past its step limit.
    ///
    /// Callers may retry with a different seed.
    #[error("generation did not converge within {steps} steps")]
    NonConvergence {
        /// Number of steps taken before giving up.
        steps: usize,
    },
    /// The search could not connect the start anchor to the exit anchor.
    #[error("no path from {start} to {exit}")]
    UnreachableExit {
        /// Position of the start anchor.
        start: Position,
        /// Position of the exit anchor.
        exit: Position,
    },
    /// An external maze encoding failed validation.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
