// Standard library
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

// MAZE
pub mod grid;
pub use grid::Grid;
use crate::error::MazeError;

/// Cell coordinate. Signed so that a step off the edge of the grid is still
/// representable; bounds are checked by [`Dimensions::contains`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord {
    x: isize,
    y: isize,
}

impl Coord {
    pub fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> isize {
        self.x
    }

    #[inline]
    pub fn y(&self) -> isize {
        self.y
    }

    /// Neighbouring coordinate in `dir`. Wraps at the `isize` limits, which
    /// always lands outside any grid.
    #[inline]
    pub fn offset(&self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }
}

impl From<(isize, isize)> for Coord {
    fn from(pos: (isize, isize)) -> Self {
        Coord::new(pos.0, pos.1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// `y * width + x`, with no bounds check. Wrapping, so any pair maps to
    /// some index.
    #[inline]
    pub fn index(&self, pos: Coord) -> isize {
        pos.y().wrapping_mul(self.width as isize).wrapping_add(pos.x())
    }

    /// Inverse of [`Dimensions::index`]. The row is the quotient truncated
    /// toward zero, so negative indices land on negative rows.
    pub fn coord(&self, idx: isize) -> Coord {
        if self.width == 0 {
            return Coord::new(idx, 0);
        }
        let width = self.width as isize;
        let y = idx / width;
        Coord::new(idx - y * width, y)
    }

    #[inline]
    pub fn contains(&self, pos: Coord) -> bool {
        0 <= pos.x()
            && 0 <= pos.y()
            && pos.x() < (self.width as isize)
            && pos.y() < (self.height as isize)
    }

    #[inline]
    pub fn contains_index(&self, idx: isize) -> bool {
        0 <= idx && (idx as usize) < self.size()
    }

    pub fn resolve(&self, cell: CellRef) -> isize {
        match cell {
            CellRef::Index(idx) => idx,
            CellRef::Coord(pos) => self.index(pos),
        }
    }

    pub fn resolve_coord(&self, cell: CellRef) -> Coord {
        match cell {
            CellRef::Index(idx) => self.coord(idx),
            CellRef::Coord(pos) => pos,
        }
    }
}

impl From<(usize, usize)> for Dimensions {
    fn from(dim: (usize, usize)) -> Self {
        Dimensions::new(dim.0, dim.1)
    }
}

/// A cell addressed either by index or by coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellRef {
    Index(isize),
    Coord(Coord),
}

impl From<usize> for CellRef {
    fn from(idx: usize) -> Self {
        CellRef::Index(idx as isize)
    }
}

impl From<isize> for CellRef {
    fn from(idx: isize) -> Self {
        CellRef::Index(idx)
    }
}

impl From<Coord> for CellRef {
    fn from(pos: Coord) -> Self {
        CellRef::Coord(pos)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

/// Neighbour scan order.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Top,
    Direction::Bottom,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Top => (0, -1),
            Direction::Bottom => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Direction::Top),
            "bottom" => Ok(Direction::Bottom),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(MazeError::InvalidDirection(String::from(s))),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = MazeError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Direction::Top),
            1 => Ok(Direction::Bottom),
            2 => Ok(Direction::Left),
            3 => Ok(Direction::Right),
            _ => Err(MazeError::InvalidDirection(id.to_string())),
        }
    }
}
