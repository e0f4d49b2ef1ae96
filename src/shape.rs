// MAZE
use crate::grid::{Coord, Dimensions};

pub type ValidityRule = Box<dyn FnMut(bool, usize) -> bool>;

/// Outline of the playable region.
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum Shape {
    Full,
    Circle,
}

impl Shape {
    /// Mask rule for this shape. Circles are centred on the grid; without an
    /// explicit `radius_sq` they use `r * r + r` with `r` half the short side.
    pub fn rule(self, dim: Dimensions, radius_sq: Option<isize>) -> ValidityRule {
        match self {
            Shape::Full => Box::new(|valid: bool, _: usize| valid),
            Shape::Circle => {
                let center = Coord::new((dim.width() / 2) as isize, (dim.height() / 2) as isize);
                let radius_sq = radius_sq.unwrap_or_else(|| default_radius_sq(dim));
                Box::new(circle(dim, center, radius_sq))
            }
        }
    }
}

pub fn default_radius_sq(dim: Dimensions) -> isize {
    let r = (dim.width().min(dim.height()) / 2) as isize;
    r * r + r
}

/// Keeps cells strictly inside the circle of squared radius `radius_sq`.
pub fn circle(dim: Dimensions, center: Coord, radius_sq: isize) -> impl Fn(bool, usize) -> bool {
    move |_, idx| {
        let pos = dim.coord(idx as isize);
        let (dx, dy) = (pos.x() - center.x(), pos.y() - center.y());
        dx * dx + dy * dy < radius_sq
    }
}
