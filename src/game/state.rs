use super::direction::Direction;
use crate::consts;
use crate::grid::Grid;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use std::collections::{HashSet, VecDeque};

/// The state of a single round of Snake, advanced one tick at a time.
///
/// A `GameState` is never repaired or reset in place; starting over means
/// constructing a new one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    grid: Grid,

    /// The cells occupied by the snake, head first
    snake: VecDeque<Position>,

    /// The direction the snake will move on the next tick
    direction: Direction,

    /// Number of upcoming ticks on which the tail should stay put
    pending_growth: usize,

    food: Position,
    score: u32,
    status: Status,

    /// The cell the snake tried to move into when it bit itself
    collision: Option<Position>,
}

impl GameState {
    /// Start a new round: a one-cell snake in the middle of `grid` heading
    /// east, with food placed at random
    pub(crate) fn new<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> GameState {
        let snake = VecDeque::from([grid.center()]);
        let food = place_food(grid, &snake, rng);
        GameState {
            grid,
            snake,
            direction: Direction::East,
            pending_growth: 0,
            food,
            score: 0,
            status: Status::Playing,
            collision: None,
        }
    }

    /// Construct a game in progress with the given layout
    #[cfg(test)]
    pub(super) fn with_layout(
        grid: Grid,
        cells: &[(u16, u16)],
        direction: Direction,
        food: (u16, u16),
        score: u32,
    ) -> GameState {
        GameState {
            grid,
            snake: cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction,
            pending_growth: 0,
            food: Position::new(food.0, food.1),
            score,
            status: Status::Playing,
            collision: None,
        }
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub(crate) fn head(&self) -> Position {
        *self
            .snake
            .front()
            .expect("snake should always have at least one segment")
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn pending_growth(&self) -> usize {
        self.pending_growth
    }

    pub(crate) fn food(&self) -> Position {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn collision(&self) -> Option<Position> {
        self.collision
    }

    /// Change the direction in which the snake will next move.  Turning to
    /// face directly backwards is ignored.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }
    }

    /// Advance the game by one tick
    pub(crate) fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Step {
        if self.status == Status::GameOver {
            return Step::Halted;
        }
        let new_head = self.grid.advance(self.head(), self.direction);
        // The tail is still in place at this point, so moving into the cell
        // it is about to vacate counts as a collision.
        if self.snake.iter().skip(1).any(|&p| p == new_head) {
            self.status = Status::GameOver;
            self.collision = Some(new_head);
            return Step::Collided(new_head);
        }
        self.snake.push_front(new_head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.snake.pop_back();
        }
        if new_head == self.food {
            self.score = self.score.saturating_add(1);
            self.pending_growth += 1;
            self.food = place_food(self.grid, &self.snake, rng);
            Step::Ate
        } else {
            Step::Moved
        }
    }
}

/// Choose a cell for the food uniformly at random from the cells not covered
/// by `snake`, falling back to [`consts::FALLBACK_FOOD`] when the snake fills
/// the grid
fn place_food<R: Rng + ?Sized>(grid: Grid, snake: &VecDeque<Position>, rng: &mut R) -> Position {
    let occupied = snake.iter().copied().collect::<HashSet<_>>();
    grid.free_cells(&occupied)
        .choose(rng)
        .unwrap_or(consts::FALLBACK_FOOD)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Playing,
    GameOver,
}

/// What happened during a call to [`GameState::step()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    /// The snake moved without eating
    Moved,

    /// The snake moved onto the food and ate it
    Ate,

    /// The snake tried to move into the given cell of its own body, ending
    /// the game
    Collided(Position),

    /// The game was already over; nothing changed
    Halted,
}
