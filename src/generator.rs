// External libraries
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// MAZE
use crate::error::{MazeError, Result};
use crate::graph::Graph;
use crate::maze::Maze;

/// Outcome of a single generation step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    Carved { from: usize, to: usize },
    Backtracked(usize),
    Done,
}

/// A maze generation algorithm driven one step at a time, so that a host
/// loop can draw between steps.
pub trait MazeGenerator {
    fn step<G: Graph>(&mut self, maze: &mut Maze<G>) -> Result<Step>;

    /// Cells currently being searched from.
    fn frontier(&self) -> &[usize];

    fn steps(&self) -> usize;

    fn is_done(&self) -> bool;

    fn name(&self) -> &str {
        "Maze generator"
    }

    /// Performs up to `nb_steps` steps, returns how many were performed.
    fn run_steps<G: Graph>(&mut self, maze: &mut Maze<G>, nb_steps: usize) -> Result<usize> {
        for done in 0..nb_steps {
            if let Step::Done = self.step(maze)? {
                return Ok(done);
            }
        }
        Ok(nb_steps)
    }

    /// Steps until the generator is exhausted.
    fn run<G: Graph>(&mut self, maze: &mut Maze<G>) -> Result<usize> {
        let mut done = 0;
        while self.step(maze)? != Step::Done {
            done += 1;
        }
        Ok(done)
    }
}

/// Randomized depth-first search (recursive backtracker) with an explicit
/// stack. Visited cells are revealed in the maze as they are reached.
pub struct RandomDfs<R: Rng> {
    rng: R,
    stack: Vec<usize>,
    unvisited: Vec<bool>,
    steps: usize,
}

impl<R: Rng> RandomDfs<R> {
    pub fn new<G: Graph>(maze: &mut Maze<G>, start: usize, rng: R) -> Result<Self> {
        if !maze.is_valid_cell(start)? {
            return Err(MazeError::InvalidStartCell(start));
        }
        let mut unvisited = maze.valid_cells().to_vec();
        unvisited[start] = false;
        maze.set_cell_state(start, true)?;
        debug!("depth-first search starting from {}", maze.coord_of(start as isize));

        Ok(Self {
            rng,
            stack: vec![start],
            unvisited,
            steps: 0,
        })
    }

    #[inline]
    pub fn current(&self) -> Option<usize> {
        self.stack.last().copied()
    }
}

impl RandomDfs<StdRng> {
    /// Reproducible when `seed` is given, seeded from the OS otherwise.
    pub fn seeded<G: Graph>(maze: &mut Maze<G>, start: usize, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(maze, start, rng)
    }
}

impl<R: Rng> MazeGenerator for RandomDfs<R> {
    fn step<G: Graph>(&mut self, maze: &mut Maze<G>) -> Result<Step> {
        let current = match self.current() {
            Some(current) => current,
            None => return Ok(Step::Done),
        };

        let candidates = maze.neighbors_filtered(current, &self.unvisited)?;
        self.steps += 1;
        match candidates.choose(&mut self.rng) {
            Some(&next) => {
                maze.graph_mut().add_edge(current, next)?;
                maze.set_cell_state(next, true)?;
                self.unvisited[next] = false;
                self.stack.push(next);
                debug!("carved {} -> {}", current, next);
                Ok(Step::Carved {
                    from: current,
                    to: next,
                })
            }
            None => {
                self.stack.pop();
                debug!("backtracked from {}", current);
                if self.stack.is_empty() {
                    info!("maze generated in {} steps", self.steps);
                }
                Ok(Step::Backtracked(current))
            }
        }
    }

    fn frontier(&self) -> &[usize] {
        &self.stack
    }

    #[inline]
    fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    fn name(&self) -> &str {
        "Randomized depth-first search"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyGraph;
    use crate::grid::{Coord, DIRECTIONS};
    use crate::shape::Shape;

    fn assert_spanning_tree(maze: &Maze) {
        let valid = maze.valid_cell_count();
        assert_eq!(maze.graph().edge_count(), valid - 1);
        for idx in 0..maze.vertex_count() {
            let is_valid = maze.is_valid_cell(idx).unwrap();
            assert_eq!(maze.get_cell_state(idx).unwrap(), is_valid);
            for &n in maze.graph().neighbors(idx) {
                assert!(maze.is_valid_cell(n).unwrap());
                let pos = maze.coord_of(idx as isize);
                assert!(DIRECTIONS
                    .iter()
                    .any(|dir| maze.index_of(pos.offset(*dir)) == n as isize
                        && maze.has_edge(pos, *dir)));
            }
        }
    }

    #[test]
    fn carves_spanning_tree() {
        let mut maze = Maze::new(8, 5);
        let mut dfs = RandomDfs::seeded(&mut maze, 0, Some(7)).unwrap();
        let steps = dfs.run(&mut maze).unwrap();
        // one carve per cell but the start, one backtrack per cell
        assert_eq!(steps, 2 * 40 - 1);
        assert!(dfs.is_done());
        assert!(dfs.frontier().is_empty());
        assert_eq!(dfs.step(&mut maze).unwrap(), Step::Done);
        assert_spanning_tree(&maze);
    }

    #[test]
    fn carves_inside_circle_only() {
        let mut maze = Maze::new(20, 20);
        let dim = *maze.dim();
        maze.set_validity_rule(Shape::Circle.rule(dim, None));
        let start = maze.index_of(Coord::new(10, 10)) as usize;
        let mut dfs = RandomDfs::seeded(&mut maze, start, Some(1)).unwrap();
        dfs.run(&mut maze).unwrap();
        assert_spanning_tree(&maze);
    }

    #[test]
    fn same_seed_same_maze() {
        let carve = |seed| {
            let mut maze = Maze::new(6, 6);
            let mut dfs = RandomDfs::seeded(&mut maze, 14, Some(seed)).unwrap();
            dfs.run(&mut maze).unwrap();
            maze.graph().clone()
        };
        assert_eq!(carve(3), carve(3));
    }

    #[test]
    fn stepping_reveals_progressively() {
        let mut maze = Maze::new(4, 4);
        let mut dfs = RandomDfs::seeded(&mut maze, 5, Some(11)).unwrap();
        assert_eq!(maze.cell_states().iter().filter(|s| **s).count(), 1);
        assert_eq!(dfs.frontier(), &[5]);

        match dfs.step(&mut maze).unwrap() {
            Step::Carved { from, to } => {
                assert_eq!(from, 5);
                assert!(maze.get_cell_state(to).unwrap());
                assert_eq!(dfs.current(), Some(to));
            }
            other => panic!("expected a carve, got {:?}", other),
        }
        assert_eq!(dfs.run_steps(&mut maze, 3).unwrap(), 3);
        assert_eq!(dfs.steps(), 4);
        assert_eq!(dfs.run_steps(&mut maze, 1000).unwrap(), 2 * 16 - 1 - 4);
    }

    #[test]
    fn start_must_be_in_region() {
        let mut maze = Maze::new(3, 3);
        maze.set_validity_rule(|_, idx| idx != 4);
        assert!(matches!(
            RandomDfs::seeded(&mut maze, 4, None),
            Err(MazeError::InvalidStartCell(4))
        ));
        assert!(matches!(
            RandomDfs::seeded(&mut maze, 9, None),
            Err(MazeError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn isolated_start_finishes_at_once() {
        let mut maze: Maze<AdjacencyGraph> = Maze::new(3, 1);
        maze.set_validity_rule(|_, idx| idx != 1);
        let mut dfs = RandomDfs::seeded(&mut maze, 0, Some(0)).unwrap();
        assert_eq!(dfs.step(&mut maze).unwrap(), Step::Backtracked(0));
        assert!(dfs.is_done());
        assert!(!maze.get_cell_state(2usize).unwrap());
    }
}
