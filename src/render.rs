// Standard library
use std::collections::HashSet;

// External libraries
use crossterm::style::{style, Attribute, Color, StyledContent, Stylize};

// MAZE
use crate::graph::Graph;
use crate::grid::{Coord, Dimensions, Direction, Grid};
use crate::maze::Maze;

/// What occupies one position of a rendered maze.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Glyph {
    Void,
    Hidden,
    Revealed,
    Search,
    Wall,
    Passage,
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph::Void
    }
}

/// Paint for every glyph. Passed explicitly to each draw call.
#[derive(Debug, Clone)]
pub struct DrawStyle {
    pub void: StyledContent<char>,
    pub hidden_cell: StyledContent<char>,
    pub revealed_cell: StyledContent<char>,
    pub search_cell: StyledContent<char>,
    pub wall_on: StyledContent<char>,
    pub wall_off: StyledContent<char>,
    /// Terminal columns per raster column.
    pub cell_width: u16,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            void: style(' '),
            hidden_cell: style('·').with(Color::DarkGrey),
            revealed_cell: style(' '),
            search_cell: style('█').with(Color::Green).attribute(Attribute::Bold),
            wall_on: style('█').with(Color::Grey),
            wall_off: style(' '),
            cell_width: 2,
        }
    }
}

impl DrawStyle {
    /// Unstyled single-column characters, for logs and non-terminal output.
    pub fn ascii() -> Self {
        Self {
            void: style(' '),
            hidden_cell: style('.'),
            revealed_cell: style(' '),
            search_cell: style('@'),
            wall_on: style('#'),
            wall_off: style(' '),
            cell_width: 1,
        }
    }

    pub fn styled(&self, glyph: Glyph) -> &StyledContent<char> {
        match glyph {
            Glyph::Void => &self.void,
            Glyph::Hidden => &self.hidden_cell,
            Glyph::Revealed => &self.revealed_cell,
            Glyph::Search => &self.search_cell,
            Glyph::Wall => &self.wall_on,
            Glyph::Passage => &self.wall_off,
        }
    }

    /// Raster as plain text, one line per row, colours dropped.
    pub fn plain_text(&self, raster: &Grid<Glyph>) -> String {
        let width = raster.dim().width();
        let mut text = String::with_capacity(raster.len() * (self.cell_width as usize) + raster.dim().height());
        for (idx, glyph) in raster.iter().enumerate() {
            if idx > 0 && idx % width == 0 {
                text.push('\n');
            }
            let c = *self.styled(*glyph).content();
            for _ in 0..self.cell_width {
                text.push(c);
            }
        }
        text
    }
}

/// Rasterizes `maze` into a `(2w + 1) x (2h + 1)` glyph grid: cells sit at odd
/// positions, the separators between them at mixed positions and wall posts
/// at even positions. Cells listed in `search` are drawn as being searched.
pub fn raster<G: Graph>(maze: &Maze<G>, search: &[usize]) -> Grid<Glyph> {
    let dim = raster_dim(maze.dim());
    let search: HashSet<usize> = search.iter().copied().collect();
    let in_region = |pos: Coord| maze.is_valid_cell(pos).unwrap_or(false);

    let separator = |from: Coord, dir: Direction| {
        match (in_region(from), in_region(from.offset(dir))) {
            (false, false) => Glyph::Void,
            (true, true) if maze.has_edge(from, dir) => Glyph::Passage,
            _ => Glyph::Wall,
        }
    };

    Grid::new(dim).map_indexed(|_, idx| {
        let rpos = dim.coord(idx as isize);
        let (cx, cy) = (rpos.x() / 2, rpos.y() / 2);
        match (rpos.x() % 2 == 1, rpos.y() % 2 == 1) {
            (true, true) => {
                let pos = Coord::new(cx, cy);
                if !in_region(pos) {
                    Glyph::Void
                } else if search.contains(&(maze.index_of(pos) as usize)) {
                    Glyph::Search
                } else if maze.get_cell_state(pos).unwrap_or(false) {
                    Glyph::Revealed
                } else {
                    Glyph::Hidden
                }
            }
            (false, true) => separator(Coord::new(cx - 1, cy), Direction::Right),
            (true, false) => separator(Coord::new(cx, cy - 1), Direction::Bottom),
            (false, false) => {
                let touching = [
                    Coord::new(cx - 1, cy - 1),
                    Coord::new(cx, cy - 1),
                    Coord::new(cx - 1, cy),
                    Coord::new(cx, cy),
                ];
                if touching.iter().any(|pos| in_region(*pos)) {
                    Glyph::Wall
                } else {
                    Glyph::Void
                }
            }
        }
    })
}

pub fn raster_dim(dim: &Dimensions) -> Dimensions {
    Dimensions::new(2 * dim.width() + 1, 2 * dim.height() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(maze: &mut Maze, a: usize, b: usize) {
        maze.graph_mut().add_edge(a, b).unwrap();
    }

    #[test]
    fn single_cell_is_boxed() {
        let maze = Maze::new(1, 1);
        let text = DrawStyle::ascii().plain_text(&raster(&maze, &[]));
        assert_eq!(text, "###\n#.#\n###");
    }

    #[test]
    fn passages_and_states() {
        let mut maze = Maze::new(2, 2);
        open(&mut maze, 0, 1);
        open(&mut maze, 1, 3);
        maze.set_cell_state(0usize, true).unwrap();
        maze.set_cell_state(1usize, true).unwrap();
        let text = DrawStyle::ascii().plain_text(&raster(&maze, &[3]));
        assert_eq!(
            text,
            ["#####", "#   #", "### #", "#.#@#", "#####"].join("\n")
        );
    }

    #[test]
    fn masked_cells_are_void() {
        let mut maze = Maze::new(3, 1);
        maze.set_validity_rule(|_, idx| idx != 2);
        let grid = raster(&maze, &[]);
        assert_eq!(grid.dim().width(), 7);
        assert_eq!(grid.get_at(Coord::new(5, 1)).unwrap(), Glyph::Void);
        // separator between a valid and a masked cell closes the region
        assert_eq!(grid.get_at(Coord::new(4, 1)).unwrap(), Glyph::Wall);
        assert_eq!(grid.get_at(Coord::new(6, 1)).unwrap(), Glyph::Void);
        assert_eq!(grid.get_at(Coord::new(6, 0)).unwrap(), Glyph::Void);
        assert_eq!(grid.get_at(Coord::new(4, 0)).unwrap(), Glyph::Wall);
    }

    #[test]
    fn cell_width_repeats_columns() {
        let maze = Maze::new(1, 1);
        let mut style = DrawStyle::ascii();
        style.cell_width = 2;
        let text = style.plain_text(&raster(&maze, &[0]));
        assert_eq!(text, "######\n##@@##\n######");
    }
}
