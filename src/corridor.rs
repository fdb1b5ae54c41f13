//! Corridor compression algorithm.
//!
//! This module turns a [`Board`] into a [`Graph`] of decision points. A breadth-first frontier
//! starts at the start anchor; from every decision point the builder walks straight down each
//! corridor, marking the squares it steps over as visited, until the corridor reaches a junction,
//! a dead end, a turn or an already registered vertex. Only those stop squares become vertices, and
//! every walk becomes one edge.

use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use crate::{
    board::Board,
    error::MazeError,
    graph::{Edge, Graph},
    types::{Direction, Position},
};

/// Open, unvisited neighbour of a square and the direction leading to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Candidate {
    /// Position of the neighbour.
    position: Position,
    /// Direction from the square to the neighbour.
    direction: Direction,
}

/// Square waiting in the work queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Job {
    /// Last decision point on the way to `at`.
    origin: Position,
    /// Square to expand.
    at: Position,
    /// Direction of the step that led from `origin` towards `at`, unset for vertices.
    heading: Option<Direction>,
}

impl Job {
    /// Job expanding a registered vertex.
    const fn vertex(position: Position) -> Self {
        Self {
            origin: position,
            at: position,
            heading: None,
        }
    }
}

/// Mutable state of one compression run.
struct Builder<'board> {
    /// Board being compressed.
    board: &'board Board,
    /// Visited flags in the board's row-major order.
    visited: Vec<bool>,
    /// Registered vertex positions in registration order.
    vertices: Vec<Position>,
    /// Registered vertex positions for lookup.
    registered: HashSet<Position>,
    /// Edge records in discovery order.
    edges: Vec<Edge>,
    /// Edge records for duplicate detection.
    recorded: HashSet<Edge>,
    /// Work queue of squares to expand.
    queue: VecDeque<Job>,
}

/// Compresses the corridors of `board` into a graph.
///
/// # Errors
///
/// This function returns [`MazeError::MalformedInput`] if the graph cannot resolve its anchors.
pub(crate) fn build(board: &Board) -> Result<Graph, MazeError> {
    let mut builder = Builder::new(board);
    builder.run();

    debug!(
        "compressed a {}x{} board into {} vertices and {} edges",
        board.rows(),
        board.columns(),
        builder.vertices.len(),
        builder.edges.len()
    );

    Graph::from_parts(builder.vertices, builder.edges, board.start(), board.exit())
}

impl<'board> Builder<'board> {
    /// Prepares a run with both anchors registered up front.
    fn new(board: &'board Board) -> Self {
        let mut builder = Self {
            board,
            visited: vec![false; board.rows() * board.columns()],
            vertices: Vec::new(),
            registered: HashSet::new(),
            edges: Vec::new(),
            recorded: HashSet::new(),
            queue: VecDeque::new(),
        };
        builder.register(board.start());
        builder.register(board.exit());
        builder.queue.push_back(Job::vertex(board.start()));

        builder
    }

    /// Drains the work queue.
    fn run(&mut self) {
        while let Some(job) = self.queue.pop_front() {
            if job.at != job.origin && self.is_visited(job.at) {
                trace!("{} was reached by another corridor", job.at);
                continue;
            }
            self.mark_visited(job.at);
            self.expand(job);
        }
    }

    /// Classifies the square of a job and walks the corridors leaving it.
    fn expand(&mut self, job: Job) {
        if let Some(heading) = job.heading {
            if !self.is_vertex(job.at) && self.is_corridor(job.at, heading) {
                self.walk(job.origin, job.at, heading);
                return;
            }
        }

        self.register(job.at);
        self.record(job.origin, job.at);

        match self.candidates(job.at).as_slice() {
            [] => trace!("dead end at {}", job.at),
            [first, rest @ ..] => {
                if !rest.is_empty() {
                    trace!("junction at {} with {} exits", job.at, rest.len() + 1);
                }
                for candidate in rest {
                    self.queue.push_back(Job {
                        origin: job.at,
                        at: candidate.position,
                        heading: Some(candidate.direction),
                    });
                }
                self.walk(job.at, job.at, first.direction);
            }
        }
    }

    /// Walks from `from` in a fixed heading for as long as the squares form a straight corridor.
    ///
    /// The square the walk stops on is registered and joined to `origin` by an edge. Squares
    /// stepped over on the way are marked visited but never registered.
    fn walk(&mut self, origin: Position, from: Position, heading: Direction) {
        let mut current = from;
        let mut fresh = true;

        while let Some(next) = self.board.step(current, heading) {
            if self.is_visited(next) {
                if self.is_vertex(next) {
                    current = next;
                    fresh = false;
                }
                break;
            }

            self.mark_visited(next);
            current = next;

            if self.is_vertex(current) || !self.is_corridor(current, heading) {
                break;
            }
        }

        if current == from {
            return;
        }

        trace!("corridor {origin} -> {current}");
        self.register(current);
        self.record(origin, current);
        if fresh {
            self.queue.push_back(Job::vertex(current));
        }
    }

    /// Open, unvisited neighbours of a square in scan order.
    fn candidates(&self, position: Position) -> Vec<Candidate> {
        Direction::SCAN
            .into_iter()
            .filter_map(|direction| {
                self.board
                    .step(position, direction)
                    .filter(|next| !self.is_visited(*next))
                    .map(|next| Candidate {
                        position: next,
                        direction,
                    })
            })
            .collect()
    }

    /// Returns whether the square has exactly two open sides, lined up along `heading`.
    fn is_corridor(&self, position: Position, heading: Direction) -> bool {
        let open = Direction::ALL
            .into_iter()
            .filter(|direction| self.board.step(position, *direction).is_some())
            .count();

        open == 2
            && self.board.step(position, heading).is_some()
            && self.board.step(position, heading.opposite()).is_some()
    }

    /// Registers a vertex unless one already exists at the position.
    fn register(&mut self, position: Position) {
        if self.registered.insert(position) {
            self.vertices.push(position);
        }
    }

    /// Records a directed edge, skipping self-loops and duplicates.
    fn record(&mut self, from: Position, to: Position) {
        let edge = Edge::new(from, to);
        if from != to && self.recorded.insert(edge) {
            self.edges.push(edge);
        }
    }

    /// Returns whether a vertex is registered at the position.
    fn is_vertex(&self, position: Position) -> bool {
        self.registered.contains(&position)
    }

    /// Returns whether the square has been visited.
    fn is_visited(&self, position: Position) -> bool {
        self.board
            .index(position)
            .and_then(|index| self.visited.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// Marks the square as visited.
    fn mark_visited(&mut self, position: Position) {
        if let Some(flag) = self
            .board
            .index(position)
            .and_then(|index| self.visited.get_mut(index))
        {
            *flag = true;
        }
    }
}
