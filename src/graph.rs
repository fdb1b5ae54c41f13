//! Corridor graph arena.
//!
//! This module contains the `Graph` struct produced by the corridor builder: an arena of vertices
//! addressed by [`VertexId`], the directed edge records between them and the start and exit
//! anchors used by the solver.

use std::collections::{HashMap, VecDeque};

use crate::{board::Board, corridor, error::MazeError, types::Position};

/// Stable index of a vertex inside its [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    /// Returns the arena index of the vertex.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Decision point of the compressed maze: a junction, a dead end, a turn or an anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
    /// Board position of the vertex.
    position: Position,
    /// Vertices reached by the edges leaving this one.
    edges: Vec<VertexId>,
    /// Vertex this one was reached from during the last search.
    parent: Option<VertexId>,
}

impl Vertex {
    /// Returns the board position of the vertex.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the vertices reached by the outgoing edges.
    pub fn edges(&self) -> &[VertexId] {
        &self.edges
    }

    /// Returns the vertex this one was reached from during the last search.
    pub const fn parent(&self) -> Option<VertexId> {
        self.parent
    }
}

/// Straight corridor between two vertices, oriented the way it was discovered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Vertex the corridor was walked from.
    from: Position,
    /// Vertex the corridor walk stopped at.
    to: Position,
}

impl Edge {
    /// Creates an edge between two board positions.
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Returns the position the corridor was walked from.
    pub const fn from(&self) -> Position {
        self.from
    }

    /// Returns the position the corridor walk stopped at.
    pub const fn to(&self) -> Position {
        self.to
    }

    /// Returns the number of board steps along the corridor.
    pub const fn length(&self) -> usize {
        self.from.distance(self.to)
    }
}

/// Sparse graph of decision points connected by corridor edges.
///
/// The graph owns copies of every position it refers to, so it stays valid when the grid or board
/// it was built from changes afterwards. Parent links are the only mutable state and are reset
/// with [`Graph::clear_parents`].
#[derive(Clone, Debug)]
pub struct Graph {
    /// Vertex arena.
    vertices: Vec<Vertex>,
    /// Vertex lookup by position.
    lookup: HashMap<Position, VertexId>,
    /// Edge records in discovery order.
    edges: Vec<Edge>,
    /// Start anchor.
    start: VertexId,
    /// Exit anchor.
    exit: VertexId,
}

impl Graph {
    /// Compresses the corridors of a board into a graph of decision points.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::MalformedInput`] if an anchor of the board is not
    /// registered as a vertex, which only happens for boards whose anchors are blocked.
    pub fn build(board: &Board) -> Result<Self, MazeError> {
        corridor::build(board)
    }

    /// Assembles a graph from registered vertex positions and edge records.
    ///
    /// Each vertex receives the outgoing list of the edges that start at it, then the anchors are
    /// resolved to their vertices.
    pub(crate) fn from_parts(
        positions: Vec<Position>,
        edges: Vec<Edge>,
        start: Position,
        exit: Position,
    ) -> Result<Self, MazeError> {
        let lookup: HashMap<Position, VertexId> = positions
            .iter()
            .enumerate()
            .map(|(index, position)| (*position, VertexId(index)))
            .collect();
        let mut vertices: Vec<Vertex> = positions
            .into_iter()
            .map(|position| Vertex {
                position,
                edges: Vec::new(),
                parent: None,
            })
            .collect();

        for edge in &edges {
            let (Some(from), Some(to)) = (lookup.get(&edge.from), lookup.get(&edge.to)) else {
                return Err(MazeError::MalformedInput(format!(
                    "edge {} -> {} joins unregistered positions",
                    edge.from, edge.to
                )));
            };
            if let Some(vertex) = vertices.get_mut(from.index()) {
                vertex.edges.push(*to);
            }
        }

        let anchor = |position: Position| {
            lookup.get(&position).copied().ok_or_else(|| {
                MazeError::MalformedInput(format!("anchor {position} is not a vertex"))
            })
        };
        let start = anchor(start)?;
        let exit = anchor(exit)?;

        Ok(Self {
            vertices,
            lookup,
            edges,
            start,
            exit,
        })
    }

    /// Returns the vertex arena.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the edge records in discovery order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of vertices.
    pub const fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns whether the graph has no vertices.
    pub const fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertex with the given id.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Returns the id of the vertex at a position.
    pub fn find(&self, position: Position) -> Option<VertexId> {
        self.lookup.get(&position).copied()
    }

    /// Returns the vertices reached by the outgoing edges of `id`.
    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        self.vertex(id).map(Vertex::edges).unwrap_or_default()
    }

    /// Returns the start anchor.
    pub const fn start(&self) -> VertexId {
        self.start
    }

    /// Returns the exit anchor.
    pub const fn exit(&self) -> VertexId {
        self.exit
    }

    /// Returns the board position of a vertex.
    pub fn position(&self, id: VertexId) -> Option<Position> {
        self.vertex(id).map(Vertex::position)
    }

    /// Returns whether every vertex is reachable from the start when edges are read in both
    /// directions.
    pub fn is_connected(&self) -> bool {
        let mut undirected = vec![Vec::new(); self.vertices.len()];
        for (id, vertex) in self.vertices.iter().enumerate() {
            for next in &vertex.edges {
                if let Some(list) = undirected.get_mut(id) {
                    list.push(next.index());
                }
                if let Some(list) = undirected.get_mut(next.index()) {
                    list.push(id);
                }
            }
        }

        let mut seen = vec![false; self.vertices.len()];
        let mut queue = VecDeque::from([self.start.index()]);
        let mut reached = 0_usize;
        while let Some(current) = queue.pop_front() {
            match seen.get_mut(current) {
                Some(flag) if !*flag => *flag = true,
                _ => continue,
            }
            reached += 1;
            queue.extend(undirected.get(current).into_iter().flatten().copied());
        }

        reached == self.vertices.len()
    }

    /// Returns the parent link of a vertex.
    pub(crate) fn parent(&self, id: VertexId) -> Option<VertexId> {
        self.vertex(id).and_then(Vertex::parent)
    }

    /// Sets the parent link of a vertex.
    pub(crate) fn set_parent(&mut self, id: VertexId, parent: VertexId) {
        if let Some(vertex) = self.vertices.get_mut(id.index()) {
            vertex.parent = Some(parent);
        }
    }

    /// Resets every parent link.
    pub fn clear_parents(&mut self) {
        for vertex in &mut self.vertices {
            vertex.parent = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a three-vertex chain `(1,1) -> (3,1) -> (3,3)`.
    fn create_test_graph() -> Graph {
        Graph::from_parts(
            vec![Position::new(1, 1), Position::new(3, 3), Position::new(3, 1)],
            vec![
                Edge::new(Position::new(1, 1), Position::new(3, 1)),
                Edge::new(Position::new(3, 1), Position::new(3, 3)),
            ],
            Position::new(1, 1),
            Position::new(3, 3),
        )
        .expect("parts are consistent")
    }

    #[test]
    fn test_from_parts_populates_outgoing_edges() {
        let graph = create_test_graph();

        assert_eq!(graph.len(), 3);
        assert!(!graph.is_empty(), "graph has vertices");
        assert_eq!(graph.position(graph.start()), Some(Position::new(1, 1)));
        assert_eq!(graph.position(graph.exit()), Some(Position::new(3, 3)));

        let corner = graph.find(Position::new(3, 1)).expect("corner is a vertex");
        assert_eq!(graph.neighbors(graph.start()), &[corner]);
        assert_eq!(graph.neighbors(corner), &[graph.exit()]);
        assert!(graph.neighbors(graph.exit()).is_empty(), "exit has no outgoing edges");
    }

    #[test]
    fn test_from_parts_rejects_unknown_positions() {
        let dangling = Graph::from_parts(
            vec![Position::new(1, 1)],
            vec![Edge::new(Position::new(1, 1), Position::new(1, 3))],
            Position::new(1, 1),
            Position::new(1, 1),
        );
        assert!(matches!(dangling, Err(MazeError::MalformedInput(_))));

        let missing_exit = Graph::from_parts(
            vec![Position::new(1, 1)],
            Vec::new(),
            Position::new(1, 1),
            Position::new(5, 5),
        );
        assert!(matches!(missing_exit, Err(MazeError::MalformedInput(_))));
    }

    #[test]
    fn test_edge_length() {
        assert_eq!(Edge::new(Position::new(1, 1), Position::new(1, 7)).length(), 6);
        assert_eq!(Edge::new(Position::new(5, 3), Position::new(1, 3)).length(), 4);
    }

    #[test]
    fn test_is_connected() {
        assert!(create_test_graph().is_connected(), "chain is connected");

        let split = Graph::from_parts(
            vec![Position::new(1, 1), Position::new(5, 5)],
            Vec::new(),
            Position::new(1, 1),
            Position::new(5, 5),
        )
        .expect("parts are consistent");
        assert!(!split.is_connected(), "isolated exit is not connected");
    }

    #[test]
    fn test_parent_links_reset() {
        let mut graph = create_test_graph();
        let exit = graph.exit();
        let start = graph.start();

        graph.set_parent(exit, start);
        assert_eq!(graph.parent(exit), Some(start));

        graph.clear_parents();
        assert!(
            graph.vertices().iter().all(|vertex| vertex.parent().is_none()),
            "clearing must drop every parent link"
        );
    }
}
