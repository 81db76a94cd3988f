/// A direction in which the snake can travel.  The grid's origin is the
/// top-left corner, so `North` decreases the y coordinate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// The unit vector `(dx, dy)` for this direction
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Returns `true` if `other` points exactly the opposite way
    pub(crate) fn is_opposite(self, other: Direction) -> bool {
        self.reverse() == other
    }
}
