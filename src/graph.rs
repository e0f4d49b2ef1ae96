// MAZE
use crate::error::{MazeError, Result};

/// Backing store for maze passages. An edge between two grid-adjacent
/// vertices means there is no wall between them.
pub trait Graph {
    fn vertex_count(&self) -> usize;

    /// Must answer `false`, never panic, for ids outside the vertex range.
    fn has_edge(&self, u: isize, v: isize) -> bool;

    fn add_edge(&mut self, u: usize, v: usize) -> Result<()>;
}

/// Undirected graph stored as one neighbour list per vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    adjacency: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![vec![]; vertex_count],
        }
    }

    /// Installs a complete adjacency structure in one go. Every listed edge
    /// is mirrored so the result stays undirected.
    pub fn set_adjacency(&mut self, adjacency: Vec<Vec<usize>>) -> Result<()> {
        let n = self.adjacency.len();
        if adjacency.len() != n {
            return Err(MazeError::length_mismatch(n, adjacency.len()));
        }
        if let Some(&bad) = adjacency.iter().flatten().find(|&&v| v >= n) {
            return Err(MazeError::out_of_range(bad, n));
        }

        let mut graph = Self::new(n);
        for (u, neighbors) in adjacency.iter().enumerate() {
            for &v in neighbors {
                graph.link(u, v);
            }
        }
        log::trace!("installed adjacency with {} edges", graph.edge_count());
        *self = graph;
        Ok(())
    }

    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        self.adjacency.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn clear(&mut self) {
        for neighbors in self.adjacency.iter_mut() {
            neighbors.clear();
        }
    }

    fn link(&mut self, u: usize, v: usize) {
        if u == v || self.adjacency[u].contains(&v) {
            return;
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
    }

    fn checked(&self, v: isize) -> Option<usize> {
        if 0 <= v && (v as usize) < self.adjacency.len() {
            Some(v as usize)
        } else {
            None
        }
    }
}

impl Graph for AdjacencyGraph {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn has_edge(&self, u: isize, v: isize) -> bool {
        match (self.checked(u), self.checked(v)) {
            (Some(u), Some(v)) => self.adjacency[u].contains(&v),
            _ => false,
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<()> {
        let n = self.adjacency.len();
        for &id in &[u, v] {
            if id >= n {
                return Err(MazeError::out_of_range(id, n));
            }
        }
        self.link(u, v);
        Ok(())
    }
}
