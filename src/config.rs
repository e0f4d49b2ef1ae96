// Standard library
use std::time::Duration;

// External libraries
use cascade::cascade;
use clap::Parser;

// MAZE
use crate::grid::{Coord, Dimensions};
use crate::maze::{BoundaryMode, Maze};
use crate::shape::Shape;

/// Step-by-step maze generation in the terminal
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Maze width in cells
    #[arg(long, default_value_t = 50)]
    pub width: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = 50)]
    pub height: usize,

    /// Outline of the region cells are carved in
    #[arg(long, value_enum, default_value_t = Shape::Circle)]
    pub shape: Shape,

    /// Squared radius of the circle shape, derived from the size if omitted
    #[arg(long, value_name = "R2")]
    pub radius_sq: Option<isize>,

    /// Index of the cell generation starts from, the centre cell if omitted
    #[arg(long, value_name = "INDEX")]
    pub start: Option<usize>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause between two drawn generation steps
    #[arg(long, value_name = "MS", default_value_t = 20)]
    pub delay_ms: u64,

    /// Whether the edge of the region counts as walls
    #[arg(long, value_enum, default_value_t = BoundaryMode::Open)]
    pub boundary: BoundaryMode,

    /// Generate the whole maze and print it instead of opening the UI
    #[arg(long)]
    pub headless: bool,
}

impl Config {
    pub fn dim(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn start_cell(&self) -> usize {
        self.start.unwrap_or_else(|| {
            let center = Coord::new((self.width / 2) as isize, (self.height / 2) as isize);
            self.dim().index(center) as usize
        })
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Empty maze with the configured boundary mode and shape mask.
    pub fn build_maze(&self) -> Maze {
        let maze = cascade! {
            Maze::new(self.width, self.height);
            ..set_boundary(self.boundary);
            ..set_validity_rule(self.shape.rule(self.dim(), self.radius_sq));
        };
        maze
    }
}
