//! Coordinate arithmetic on the toroidal playing field
use crate::game::Direction;
use ratatui::layout::{Position, Size};
use std::collections::HashSet;

/// The dimensions of a wraparound grid.  Both dimensions are always nonzero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// Create a grid of the given size.  Returns `None` if either dimension
    /// is zero.
    pub(crate) fn new(width: u16, height: u16) -> Option<Grid> {
        (width > 0 && height > 0).then_some(Grid { width, height })
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// The cell at which a new snake starts
    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Reduce `coord` modulo `dimension`, yielding a value in
    /// `0..dimension` even for negative inputs.
    ///
    /// `dimension` must be nonzero.
    pub(crate) fn wrap(coord: i32, dimension: u16) -> u16 {
        let r = coord.rem_euclid(i32::from(dimension));
        u16::try_from(r).expect("Euclidean remainder should be less than a u16 dimension")
    }

    /// Return the cell one step from `pos` in `direction`, wrapping around
    /// the edges of the grid
    pub(crate) fn advance(self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: Grid::wrap(i32::from(pos.x) + dx, self.width),
            y: Grid::wrap(i32::from(pos.y) + dy, self.height),
        }
    }

    /// Iterate over every cell of the grid in row-major order (top row first,
    /// left to right within each row)
    pub(crate) fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position { x, y }))
    }

    /// Iterate, in row-major order, over the cells of the grid that are not
    /// in `occupied`
    pub(crate) fn free_cells<'a>(
        self,
        occupied: &'a HashSet<Position>,
    ) -> impl Iterator<Item = Position> + 'a {
        self.positions().filter(move |p| !occupied.contains(p))
    }
}
