// Standard library
use std::fmt;

// MAZE
use crate::error::{MazeError, Result};
use crate::graph::{AdjacencyGraph, Graph};
use crate::grid::{CellRef, Coord, Dimensions, Direction, Grid, DIRECTIONS};

/// Whether the edge of the playable region counts as a wall.
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum BoundaryMode {
    /// A missing or masked-out neighbour is not a wall.
    Open,
    /// A missing or masked-out neighbour is reported as a wall.
    Closed,
}

impl Default for BoundaryMode {
    fn default() -> Self {
        BoundaryMode::Open
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Wall {
    pub x: isize,
    pub y: isize,
    pub direction: Direction,
}

impl Wall {
    pub fn new(pos: Coord, direction: Direction) -> Self {
        Self {
            x: pos.x(),
            y: pos.y(),
            direction,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.coord(), self.direction)
    }
}

/// A grid of cells mapped onto the vertices of a graph.
///
/// Cells carry two flags: a reveal state written by generation and search
/// algorithms, and a validity mask that carves the playable region out of the
/// rectangle. Passages live in the graph; the maze only reads them.
#[derive(Debug, Clone)]
pub struct Maze<G: Graph = AdjacencyGraph> {
    dim: Dimensions,
    graph: G,
    cell_states: Grid<bool>,
    valid_cells: Grid<bool>,
    boundary: BoundaryMode,
}

impl Maze<AdjacencyGraph> {
    pub fn new(width: usize, height: usize) -> Self {
        let dim = Dimensions::new(width, height);
        Self {
            dim,
            graph: AdjacencyGraph::new(dim.size()),
            cell_states: Grid::new(dim),
            valid_cells: Grid::filled(dim, true),
            boundary: BoundaryMode::default(),
        }
    }
}

impl<G: Graph> Maze<G> {
    pub fn with_graph(width: usize, height: usize, graph: G) -> Result<Self> {
        let dim = Dimensions::new(width, height);
        if graph.vertex_count() != dim.size() {
            return Err(MazeError::length_mismatch(dim.size(), graph.vertex_count()));
        }
        Ok(Self {
            dim,
            graph,
            cell_states: Grid::new(dim),
            valid_cells: Grid::filled(dim, true),
            boundary: BoundaryMode::default(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dim.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dim.height()
    }

    #[inline]
    pub fn dim(&self) -> &Dimensions {
        &self.dim
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.dim.size()
    }

    #[inline]
    pub fn index_of(&self, pos: Coord) -> isize {
        self.dim.index(pos)
    }

    #[inline]
    pub fn coord_of(&self, idx: isize) -> Coord {
        self.dim.coord(idx)
    }

    pub fn is_valid_coordinate<C: Into<CellRef>>(&self, cell: C) -> bool {
        match cell.into() {
            CellRef::Index(idx) => self.dim.contains_index(idx),
            CellRef::Coord(pos) => self.dim.contains(pos),
        }
    }

    pub fn is_valid_cell<C: Into<CellRef>>(&self, cell: C) -> Result<bool> {
        lookup(&self.valid_cells, cell.into())
    }

    /// Rebuilds the mask from `rule(old, index)`, in ascending index order.
    pub fn set_validity_rule<F>(&mut self, rule: F)
    where
        F: FnMut(bool, usize) -> bool,
    {
        self.valid_cells = self.valid_cells.map_indexed(rule);
        log::trace!(
            "validity rule applied, {} of {} cells valid",
            self.valid_cell_count(),
            self.vertex_count()
        );
    }

    pub fn set_cell_validity<C: Into<CellRef>>(&mut self, cell: C, valid: bool) -> Result<()> {
        store(&mut self.valid_cells, cell.into(), valid)
    }

    pub fn valid_cells(&self) -> &[bool] {
        self.valid_cells.as_slice()
    }

    pub fn valid_cell_count(&self) -> usize {
        self.valid_cells.iter().filter(|valid| **valid).count()
    }

    pub fn set_cell_state<C: Into<CellRef>>(&mut self, cell: C, state: bool) -> Result<()> {
        store(&mut self.cell_states, cell.into(), state)
    }

    pub fn get_cell_state<C: Into<CellRef>>(&self, cell: C) -> Result<bool> {
        lookup(&self.cell_states, cell.into())
    }

    pub fn replace_cell_states(&mut self, states: Vec<bool>) -> Result<()> {
        self.cell_states.switch_data(states)?;
        log::trace!("cell states replaced");
        Ok(())
    }

    pub fn cell_states(&self) -> &[bool] {
        self.cell_states.as_slice()
    }

    pub fn reset_cell_states(&mut self) {
        self.cell_states.fill(false);
    }

    #[inline]
    pub fn neighbor(&self, pos: Coord, dir: Direction) -> Coord {
        pos.offset(dir)
    }

    /// Whether a passage joins `pos` and its neighbour in `dir`. Always false
    /// when either end lies outside the grid.
    pub fn has_edge(&self, pos: Coord, dir: Direction) -> bool {
        let next = pos.offset(dir);
        if !self.dim.contains(pos) || !self.dim.contains(next) {
            return false;
        }
        self.graph.has_edge(self.index_of(pos), self.index_of(next))
    }

    pub fn get_inter_cell(&self, pos: Coord, dir: Direction) -> Option<Coord> {
        let next = pos.offset(dir);
        if self.in_region(next) {
            Some(next)
        } else {
            None
        }
    }

    /// Indices of the in-region neighbours of `idx` for which `filter` is set,
    /// in top, bottom, left, right order.
    pub fn neighbors_filtered(&self, idx: usize, filter: &[bool]) -> Result<Vec<usize>> {
        if filter.len() != self.vertex_count() {
            return Err(MazeError::length_mismatch(self.vertex_count(), filter.len()));
        }
        if !self.dim.contains_index(idx as isize) {
            return Err(MazeError::out_of_range(idx, self.vertex_count()));
        }
        let pos = self.coord_of(idx as isize);
        Ok(DIRECTIONS
            .iter()
            .map(|dir| pos.offset(*dir))
            .filter(|next| self.in_region(*next))
            .map(|next| self.index_of(next) as usize)
            .filter(|next| filter[*next])
            .collect())
    }

    pub fn walls_on<C: Into<CellRef>>(&self, cell: C, allowed: &[Direction]) -> Vec<Wall> {
        let pos = self.dim.resolve_coord(cell.into());
        if !self.in_region(pos) {
            return vec![];
        }
        DIRECTIONS
            .iter()
            .copied()
            .filter(|dir| allowed.contains(dir))
            .filter(|dir| {
                if self.in_region(pos.offset(*dir)) {
                    !self.has_edge(pos, *dir)
                } else {
                    self.boundary == BoundaryMode::Closed
                }
            })
            .map(|dir| Wall::new(pos, dir))
            .collect()
    }

    pub fn all_walls_on<C: Into<CellRef>>(&self, cell: C) -> Vec<Wall> {
        self.walls_on(cell, &DIRECTIONS)
    }

    #[inline]
    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    pub fn set_boundary(&mut self, boundary: BoundaryMode) {
        self.boundary = boundary;
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Generation algorithms open passages through this.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn set_graph(&mut self, graph: G) -> Result<()> {
        if graph.vertex_count() != self.vertex_count() {
            return Err(MazeError::length_mismatch(
                self.vertex_count(),
                graph.vertex_count(),
            ));
        }
        self.graph = graph;
        Ok(())
    }

    fn in_region(&self, pos: Coord) -> bool {
        self.valid_cells.get_at(pos).unwrap_or(false)
    }
}

fn lookup(grid: &Grid<bool>, cell: CellRef) -> Result<bool> {
    match cell {
        CellRef::Index(idx) => grid.get(idx),
        CellRef::Coord(pos) => grid.get_at(pos),
    }
}

fn store(grid: &mut Grid<bool>, cell: CellRef, value: bool) -> Result<()> {
    match cell {
        CellRef::Index(idx) => grid.set(idx, value),
        CellRef::Coord(pos) => grid.set_at(pos, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(maze: &mut Maze, a: Coord, b: Coord) {
        let (u, v) = (maze.index_of(a) as usize, maze.index_of(b) as usize);
        maze.graph_mut().add_edge(u, v).unwrap();
    }

    #[test]
    fn fresh_maze() {
        let maze = Maze::new(4, 3);
        assert_eq!(maze.vertex_count(), 12);
        assert_eq!(maze.graph().vertex_count(), 12);
        assert!(maze.cell_states().iter().all(|s| !s));
        assert!(maze.valid_cells().iter().all(|v| *v));
        assert_eq!(maze.boundary(), BoundaryMode::Open);
    }

    #[test]
    fn validity_accepts_both_forms() {
        let maze = Maze::new(3, 3);
        assert!(maze.is_valid_coordinate(Coord::new(2, 2)));
        assert!(!maze.is_valid_coordinate(Coord::new(3, 0)));
        assert!(!maze.is_valid_coordinate(Coord::new(0, -1)));
        assert!(maze.is_valid_coordinate(8usize));
        assert!(!maze.is_valid_coordinate(9usize));
        assert!(!maze.is_valid_coordinate(-1isize));

        assert!(maze.is_valid_cell(Coord::new(1, 1)).unwrap());
        assert!(maze.is_valid_cell(4usize).unwrap());
        assert!(matches!(
            maze.is_valid_cell(9usize),
            Err(MazeError::IndexOutOfRange { index: 9, len: 9 })
        ));
        assert!(maze.is_valid_cell(Coord::new(3, 0)).is_err());
    }

    #[test]
    fn cell_state_accessors() {
        let mut maze = Maze::new(3, 2);
        maze.set_cell_state(Coord::new(2, 1), true).unwrap();
        maze.set_cell_state(0usize, true).unwrap();
        assert!(maze.get_cell_state(5usize).unwrap());
        assert!(maze.get_cell_state(Coord::new(0, 0)).unwrap());
        assert!(!maze.get_cell_state(Coord::new(1, 0)).unwrap());
        assert!(maze.set_cell_state(6usize, true).is_err());

        assert!(matches!(
            maze.replace_cell_states(vec![true; 5]),
            Err(MazeError::LengthMismatch {
                expected: 6,
                actual: 5
            })
        ));
        maze.replace_cell_states(vec![true; 6]).unwrap();
        assert!(maze.cell_states().iter().all(|s| *s));
        maze.reset_cell_states();
        assert!(maze.cell_states().iter().all(|s| !s));
    }

    #[test]
    fn per_cell_validity() {
        let mut maze = Maze::new(2, 2);
        maze.set_cell_validity(Coord::new(1, 0), false).unwrap();
        assert!(!maze.is_valid_cell(1usize).unwrap());
        assert_eq!(maze.valid_cell_count(), 3);
        assert!(maze.set_cell_validity(4usize, false).is_err());
    }

    #[test]
    fn has_edge_is_false_off_grid() {
        let mut maze = Maze::new(3, 3);
        // (2, 0) -> (0, 1) would alias through index arithmetic
        maze.graph_mut().add_edge(2, 3).unwrap();
        assert!(!maze.has_edge(Coord::new(2, 0), Direction::Right));
        assert!(!maze.has_edge(Coord::new(0, 0), Direction::Top));
        assert!(!maze.has_edge(Coord::new(-4, 7), Direction::Left));
    }

    #[test]
    fn extreme_coordinates_are_outside() {
        let maze = Maze::new(3, 3);
        let far = Coord::new(isize::MAX, isize::MAX);
        assert!(!maze.is_valid_coordinate(far));
        assert!(!maze.is_valid_coordinate(maze.index_of(far)));
        assert!(!maze.has_edge(Coord::new(isize::MAX, 0), Direction::Right));
        assert!(!maze.has_edge(Coord::new(0, isize::MIN), Direction::Top));
        assert_eq!(maze.get_inter_cell(Coord::new(isize::MIN, 1), Direction::Left), None);
        assert!(maze.all_walls_on(far).is_empty());
        assert!(maze.get_cell_state(far).is_err());
    }

    #[test]
    fn inter_cell_respects_mask_and_bounds() {
        let mut maze = Maze::new(3, 3);
        maze.set_validity_rule(|_, idx| idx != 1);
        let corner = Coord::new(0, 0);
        assert_eq!(maze.get_inter_cell(corner, Direction::Top), None);
        assert_eq!(maze.get_inter_cell(corner, Direction::Right), None);
        assert_eq!(
            maze.get_inter_cell(corner, Direction::Bottom),
            Some(Coord::new(0, 1))
        );
    }

    #[test]
    fn neighbors_filtered_order_and_filter() {
        let maze = Maze::new(3, 3);
        let all = vec![true; 9];
        assert_eq!(maze.neighbors_filtered(4, &all).unwrap(), vec![1, 7, 3, 5]);
        assert_eq!(maze.neighbors_filtered(0, &all).unwrap(), vec![3, 1]);

        let mut filter = vec![true; 9];
        filter[7] = false;
        assert_eq!(maze.neighbors_filtered(4, &filter).unwrap(), vec![1, 3, 5]);
        assert!(maze.neighbors_filtered(4, &[true; 4]).is_err());
        assert!(matches!(
            maze.neighbors_filtered(9, &all),
            Err(MazeError::IndexOutOfRange { index: 9, len: 9 })
        ));
    }

    #[test]
    fn walls_follow_edges() {
        let mut maze = Maze::new(2, 1);
        let (a, b) = (Coord::new(0, 0), Coord::new(1, 0));
        assert_eq!(
            maze.all_walls_on(a),
            vec![Wall::new(a, Direction::Right)]
        );
        open(&mut maze, a, b);
        assert!(maze.all_walls_on(a).is_empty());
        assert!(maze.all_walls_on(1usize).is_empty());
    }

    #[test]
    fn walls_on_allowed_directions_only() {
        let maze = Maze::new(3, 3);
        let walls = maze.walls_on(Coord::new(1, 1), &[Direction::Right, Direction::Top]);
        let dirs: Vec<Direction> = walls.iter().map(|w| w.direction).collect();
        assert_eq!(dirs, vec![Direction::Top, Direction::Right]);
    }

    #[test]
    fn closed_boundary_reports_outer_walls() {
        let mut maze = Maze::new(3, 3);
        assert_eq!(maze.all_walls_on(Coord::new(0, 0)).len(), 2);
        maze.set_boundary(BoundaryMode::Closed);
        assert_eq!(maze.all_walls_on(Coord::new(0, 0)).len(), 4);

        maze.set_cell_validity(Coord::new(1, 0), false).unwrap();
        let walls = maze.all_walls_on(Coord::new(0, 0));
        assert!(walls.contains(&Wall::new(Coord::new(0, 0), Direction::Right)));
    }

    #[test]
    fn replace_graph_checks_vertex_count() {
        let mut maze = Maze::new(2, 2);
        assert!(matches!(
            maze.set_graph(AdjacencyGraph::new(3)),
            Err(MazeError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        ));
        let mut graph = AdjacencyGraph::new(4);
        graph.add_edge(0, 1).unwrap();
        maze.set_graph(graph).unwrap();
        assert!(maze.has_edge(Coord::new(0, 0), Direction::Right));
        assert!(Maze::with_graph(3, 3, AdjacencyGraph::new(8)).is_err());
    }
}
