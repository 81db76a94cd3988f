mod direction;
mod popup;
mod state;
pub(crate) use self::direction::Direction;
use self::popup::{Choice, Popup};
use self::state::{GameState, Status, Step};
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::Style,
    text::Line,
    widgets::Widget,
    Frame,
};
use std::time::Instant;

/// The screen on which a round of Snake is played
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    state: GameState,
    mode: Mode,
    globals: Globals,

    /// When the snake should next move.  `None` while no tick is being
    /// waited for, e.g., right after resuming from a pause.
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: rand::Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, mut rng: R) -> Game<R> {
        let state = GameState::new(globals.options.grid(), &mut rng);
        log::info!(
            "Starting new game: difficulty {}, level size {}, snake at ({}, {}), food at ({}, {})",
            globals.options.difficulty,
            globals.options.level_size,
            state.head().x,
            state.head().y,
            state.food().x,
            state.food().y,
        );
        Game {
            rng,
            state,
            mode: Mode::Running,
            globals,
            next_tick: None,
        }
    }

    /// Wait for either the next input event or the next tick, whichever comes
    /// first, and handle it
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.running() {
            let period = self.globals.options.difficulty.tick_period();
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + period);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn advance(&mut self) {
        match self.state.step(&mut self.rng) {
            Step::Ate => {
                let food = self.state.food();
                log::debug!(
                    "Snake ate; score = {}, pending growth = {}, new food at ({}, {})",
                    self.state.score(),
                    self.state.pending_growth(),
                    food.x,
                    food.y,
                );
            }
            Step::Collided(pos) => self.end(pos),
            Step::Moved | Step::Halted => (),
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.mode {
            Mode::Running => {
                if event == Event::FocusLost {
                    self.pause();
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Up => self.state.set_direction(Direction::North),
                        Command::Left => self.state.set_direction(Direction::West),
                        Command::Down => self.state.set_direction(Direction::South),
                        Command::Right => self.state.set_direction(Direction::East),
                        Command::Esc | Command::P => self.pause(),
                        _ => (),
                    }
                }
            }
            Mode::Paused(ref mut popup) | Mode::Over(ref mut popup) => {
                let cmd = Command::from_key_event(event.as_key_press_event()?)?;
                match popup.handle_command(cmd)? {
                    Choice::Resume => {
                        log::debug!("Resuming game");
                        self.mode = Mode::Running;
                    }
                    Choice::PlayAgain => return Some(Screen::Game(Game::new(self.globals))),
                    Choice::MainMenu => return Some(Screen::Main(MainMenu::new(self.globals))),
                    Choice::Quit => return Some(Screen::Quit),
                }
            }
        }
        None
    }

    fn running(&self) -> bool {
        self.mode == Mode::Running && self.state.status() == Status::Playing
    }

    fn pause(&mut self) {
        log::debug!("Pausing game");
        self.mode = Mode::Paused(Popup::paused());
        self.next_tick = None;
    }

    /// Record the end of the game after the snake bit itself at `pos`
    fn end(&mut self, pos: Position) {
        let score = self.state.score();
        log::info!(
            "Game over: snake bit itself at ({}, {}) with a score of {score}",
            pos.x,
            pos.y
        );
        let new_best = score > self.globals.best;
        if new_best {
            log::info!("New best score for this session: {score}");
            self.globals.best = score;
        }
        self.mode = Mode::Over(Popup::game_over(score, self.globals.best, new_best));
        self.next_tick = None;
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.globals.theme;
        let display = get_display_area(area);
        let [score_area, board_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(display);
        Line::styled(format!(" Score: {}", self.state.score()), theme.score_bar)
            .render(score_area, buf);
        Line::from(format!("Best: {} ", self.globals.best))
            .right_aligned()
            .render(score_area, buf);

        let mut block_size = self.state.grid().size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(board_area, block_size);
        DottedBorder(theme.border).render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        canvas.draw(self.state.food(), consts::FOOD_SYMBOL, theme.food);
        for &pos in self.state.snake().iter().skip(1) {
            canvas.draw(pos, consts::SNAKE_BODY_SYMBOL, theme.snake_body);
        }
        canvas.draw(
            self.state.head(),
            head_symbol(self.state.direction()),
            theme.snake_head,
        );
        if let Some(pos) = self.state.collision() {
            canvas.draw(pos, consts::COLLISION_SYMBOL, theme.collision);
        }

        if let Mode::Paused(popup) | Mode::Over(popup) = self.mode {
            popup.render(center_rect(display, popup.size()), buf);
        }
    }
}

/// The glyph for the snake's head, pointing its mouth the way it is moving
fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
        Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
    }
}

/// A view of a region of a `Buffer` addressed in coordinates relative to the
/// region's top-left corner
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw(&mut self, pos: Position, symbol: char, style: Style) {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return;
        }
        let Some(cell) = self.buf.cell_mut((self.area.x + pos.x, self.area.y + pos.y)) else {
            return;
        };
        cell.set_char(symbol);
        cell.set_style(Style::reset().patch(style));
    }
}

/// A border of dots, marking edges that the snake can pass through
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder(Style);

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let max_x = area.width - 1;
        let max_y = area.height - 1;
        let style = self.0;
        let mut canvas = Canvas { area, buf };
        for corner in [
            Position::ORIGIN,
            Position::new(max_x, 0),
            Position::new(max_x, max_y),
            Position::new(0, max_y),
        ] {
            canvas.draw(corner, '·', style);
        }
        for x in 1..max_x {
            canvas.draw(Position::new(x, 0), '⋯', style);
            canvas.draw(Position::new(x, max_y), '⋯', style);
        }
        for y in 1..max_y {
            canvas.draw(Position::new(0, y), '⋮', style);
            canvas.draw(Position::new(max_x, y), '⋮', style);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Running,
    Paused(Popup),
    Over(Popup),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::options::LevelSize;
    use crossterm::event::KeyCode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game(globals: Globals) -> Game<ChaCha12Rng> {
        Game::new_with_rng(globals, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn render(game: &Game<ChaCha12Rng>) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        buffer
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    /// A snake that will bite itself on its next move west
    fn doomed(game: &mut Game<ChaCha12Rng>, score: u32) {
        game.state = GameState::with_layout(
            game.state.grid(),
            &[(11, 11), (11, 10), (10, 10), (10, 11)],
            Direction::West,
            (30, 5),
            score,
        );
    }

    #[test]
    fn new_game_layout() {
        let game = new_game(Globals::default());
        let buffer = render(&game);
        let theme = Globals::default().theme;
        assert!(row_text(&buffer, 0).starts_with(" Score: 0 "));
        assert!(row_text(&buffer, 0).ends_with(" Best: 0 "));
        assert_eq!(buffer[(0, 0)].modifier, theme.score_bar.add_modifier);
        // A 76x19 board is centered below the score bar with its border at
        // (1, 2).
        assert_eq!(buffer[(1, 2)].symbol(), "·");
        assert_eq!(buffer[(2, 2)].symbol(), "⋯");
        assert_eq!(buffer[(1, 3)].symbol(), "⋮");
        assert_eq!(buffer[(78, 22)].symbol(), "·");
        let head = buffer[(2 + 38, 3 + 9)].clone();
        assert_eq!(head.symbol(), "<");
        assert_eq!(head.fg, theme.snake_head.fg.unwrap_or_default());
        let food = game.state.food();
        assert_eq!(buffer[(2 + food.x, 3 + food.y)].symbol(), "●");
    }

    #[test]
    fn small_level_layout() {
        let mut globals = Globals::default();
        globals.options.level_size = LevelSize::Small;
        let game = new_game(globals);
        assert_eq!(game.state.grid(), Grid::new(38, 8).unwrap());
        let buffer = render(&game);
        let corner = buffer
            .content()
            .iter()
            .position(|c| c.symbol() == "·")
            .expect("border should be drawn");
        let (x, y) = buffer.pos_of(corner);
        assert_eq!(buffer[(x + 39, y)].symbol(), "·");
        assert_eq!(buffer[(x, y + 9)].symbol(), "·");
        assert_eq!(buffer[(x + 1 + 19, y + 1 + 4)].symbol(), "<");
    }

    #[test]
    fn steer_and_advance() {
        let mut game = new_game(Globals::default());
        let start = game.state.head();
        assert!(game.handle_event(key(KeyCode::Up)).is_none());
        assert!(game.handle_event(key(KeyCode::Char('a'))).is_none());
        game.advance();
        assert_eq!(game.state.head(), Position::new(start.x - 1, start.y));
        assert!(game.handle_event(key(KeyCode::Char('d'))).is_none());
        game.advance();
        assert_eq!(game.state.head(), Position::new(start.x - 2, start.y));
        let buffer = render(&game);
        assert_eq!(buffer[(2 + start.x - 2, 3 + start.y)].symbol(), ">");
    }

    #[test]
    fn pause_and_resume() {
        let mut game = new_game(Globals::default());
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        assert!(matches!(game.mode, Mode::Paused(_)));
        assert!(!game.running());
        assert!(render(&game).content().iter().any(|c| c.symbol() == "»"));
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        assert_eq!(game.mode, Mode::Running);
    }

    #[test]
    fn focus_lost_pauses() {
        let mut game = new_game(Globals::default());
        assert!(game.handle_event(Event::FocusLost).is_none());
        assert!(matches!(game.mode, Mode::Paused(_)));
    }

    #[test]
    fn ctrl_c_quits() {
        let mut game = new_game(Globals::default());
        let ev = Event::Key(crossterm::event::KeyEvent::new(
            KeyCode::Char('c'),
            crossterm::event::KeyModifiers::CONTROL,
        ));
        assert!(matches!(game.handle_event(ev), Some(Screen::Quit)));
    }

    #[test]
    fn game_over_new_best() {
        let mut globals = Globals::default();
        globals.best = 2;
        let mut game = new_game(globals);
        doomed(&mut game, 3);
        game.advance();
        assert_eq!(game.state.status(), Status::GameOver);
        assert_eq!(game.mode, Mode::Over(Popup::game_over(3, 3, true)));
        assert_eq!(game.globals.best, 3);
        let buffer = render(&game);
        assert_eq!(buffer[(2 + 10, 3 + 11)].symbol(), "×");
        // Further ticks change nothing
        game.advance();
        assert_eq!(game.state.status(), Status::GameOver);
        match game.handle_event(key(KeyCode::Char('r'))) {
            Some(Screen::Game(g)) => {
                assert_eq!(g.globals.best, 3);
                assert_eq!(g.state.score(), 0);
                assert_eq!(g.state.status(), Status::Playing);
            }
            other => panic!("expected a new game, got {other:?}"),
        }
    }

    #[test]
    fn game_over_keeps_best() {
        let mut globals = Globals::default();
        globals.best = 10;
        let mut game = new_game(globals);
        doomed(&mut game, 4);
        game.advance();
        assert_eq!(game.mode, Mode::Over(Popup::game_over(4, 10, false)));
        assert_eq!(game.globals.best, 10);
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('m'))),
            Some(Screen::Main(_))
        ));
    }

    #[test]
    fn steering_ignored_when_over() {
        let mut game = new_game(Globals::default());
        doomed(&mut game, 0);
        game.advance();
        assert!(game.handle_event(key(KeyCode::Up)).is_none());
        assert_eq!(game.state.direction(), Direction::West);
    }
}
