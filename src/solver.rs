//! Breadth-first and depth-first path search over a corridor graph.
//!
//! This module contains the `Solver` struct, which borrows a [`Graph`], records a parent link on
//! every vertex it discovers and rebuilds the start-to-exit path from those links.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::{
    error::MazeError,
    graph::{Graph, VertexId},
    types::{Position, Strategy},
};

/// Pending vertices of a search, popped in FIFO or LIFO order.
enum Frontier {
    /// First in, first out.
    Queue(VecDeque<VertexId>),
    /// Last in, first out.
    Stack(Vec<VertexId>),
}

impl Frontier {
    /// Creates a frontier for the strategy holding only `start`.
    fn new(strategy: Strategy, start: VertexId) -> Self {
        match strategy {
            Strategy::BreadthFirst => Self::Queue(VecDeque::from([start])),
            Strategy::DepthFirst => Self::Stack(vec![start]),
        }
    }

    /// Adds a vertex to the frontier.
    fn push(&mut self, id: VertexId) {
        match self {
            Self::Queue(queue) => queue.push_back(id),
            Self::Stack(stack) => stack.push(id),
        }
    }

    /// Takes the next vertex to expand.
    fn pop(&mut self) -> Option<VertexId> {
        match self {
            Self::Queue(queue) => queue.pop_front(),
            Self::Stack(stack) => stack.pop(),
        }
    }
}

/// Path finder over a borrowed corridor graph.
///
/// The solver does not own the graph: it only writes parent links into it for the duration of a
/// search. Every search starts from cleared links, so the same solver can run both strategies one
/// after the other.
#[derive(Debug)]
pub struct Solver<'graph> {
    /// Graph being searched.
    graph: &'graph mut Graph,
}

impl<'graph> Solver<'graph> {
    /// Creates a solver over the given graph.
    pub const fn new(graph: &'graph mut Graph) -> Self {
        Self { graph }
    }

    /// Returns the graph being searched, with the parent links of the last search.
    pub const fn graph(&self) -> &Graph {
        self.graph
    }

    /// Resets every parent link of the graph.
    pub fn clear(&mut self) {
        self.graph.clear_parents();
    }

    /// Finds the path with the fewest vertices from the start anchor to the exit anchor.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::UnreachableExit`] if the exit cannot be reached.
    pub fn bfs(&mut self) -> Result<Vec<Position>, MazeError> {
        self.solve(Strategy::BreadthFirst)
    }

    /// Finds some path from the start anchor to the exit anchor by depth-first search.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::UnreachableExit`] if the exit cannot be reached.
    pub fn dfs(&mut self) -> Result<Vec<Position>, MazeError> {
        self.solve(Strategy::DepthFirst)
    }

    /// Searches the graph with the chosen strategy and returns the vertex positions of the path.
    ///
    /// The path begins with the start anchor and ends with the exit anchor; consecutive positions
    /// are joined by an edge of the graph.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::UnreachableExit`] if the search drains its frontier
    /// without popping the exit or if the parent chain from the exit is broken.
    pub fn solve(&mut self, strategy: Strategy) -> Result<Vec<Position>, MazeError> {
        self.clear();

        let start = self.graph.start();
        let exit = self.graph.exit();
        let mut frontier = Frontier::new(strategy, start);
        let mut expanded = 0_usize;
        let mut reached = false;

        while let Some(current) = frontier.pop() {
            if current == exit {
                reached = true;
                break;
            }
            expanded += 1;

            let next: Vec<VertexId> = self
                .graph
                .neighbors(current)
                .iter()
                .copied()
                .filter(|id| *id != start && self.graph.parent(*id).is_none())
                .collect();
            for id in next {
                trace!("reached vertex {} from {}", id.index(), current.index());
                self.graph.set_parent(id, current);
                frontier.push(id);
            }
        }

        if !reached {
            debug!("{strategy:?} search drained its frontier after {expanded} vertices");
            return Err(self.unreachable());
        }

        let path = self.reconstruct()?;
        debug!(
            "{strategy:?} search expanded {expanded} vertices, path has {} vertices",
            path.len()
        );

        Ok(path)
    }

    /// Follows parent links from the exit back to the start.
    fn reconstruct(&self) -> Result<Vec<Position>, MazeError> {
        let start = self.graph.start();
        let mut current = self.graph.exit();
        let mut path = Vec::new();

        for _ in 0..self.graph.len() {
            path.push(self.graph.position(current).ok_or_else(|| self.unreachable())?);
            if current == start {
                path.reverse();
                return Ok(path);
            }
            current = self
                .graph
                .parent(current)
                .ok_or_else(|| self.unreachable())?;
        }

        Err(self.unreachable())
    }

    /// Error naming the anchors of the graph.
    fn unreachable(&self) -> MazeError {
        let anchor = |id| self.graph.position(id).unwrap_or_default();

        MazeError::UnreachableExit {
            start: anchor(self.graph.start()),
            exit: anchor(self.graph.exit()),
        }
    }
}
