use crate::command::Command;
use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A pop-up menu shown over the playing field when the game is paused or over
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Popup {
    kind: PopupKind,

    /// Index into `self.choices()` of the highlighted item
    selected: usize,
}

impl Popup {
    const WIDTH: u16 = 22;

    pub(super) fn paused() -> Popup {
        Popup {
            kind: PopupKind::Paused,
            selected: 0,
        }
    }

    pub(super) fn game_over(score: u32, best: u32, new_best: bool) -> Popup {
        Popup {
            kind: PopupKind::GameOver {
                score,
                best,
                new_best,
            },
            selected: 0,
        }
    }

    fn choices(&self) -> &'static [Choice] {
        match self.kind {
            PopupKind::Paused => &[
                Choice::Resume,
                Choice::PlayAgain,
                Choice::MainMenu,
                Choice::Quit,
            ],
            PopupKind::GameOver { .. } => &[Choice::PlayAgain, Choice::MainMenu, Choice::Quit],
        }
    }

    pub(super) fn selection(&self) -> Choice {
        self.choices()[self.selected]
    }

    /// Lines of text shown above the choices
    fn summary(&self) -> Vec<Line<'static>> {
        match self.kind {
            PopupKind::Paused => Vec::new(),
            PopupKind::GameOver {
                score,
                best,
                new_best,
            } => {
                let best_line = if new_best {
                    Line::from(format!("Best:  {best} (new!)"))
                } else {
                    Line::from(format!("Best:  {best}"))
                };
                vec![Line::from(format!("Score: {score}")), best_line, Line::default()]
            }
        }
    }

    /// The size of the area that should be passed to `render()`
    pub(super) fn size(&self) -> Size {
        let rows = self.summary().len() + self.choices().len();
        Size {
            width: Popup::WIDTH,
            height: u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2),
        }
    }

    /// Handle a user command.  Returns `Some` if the user made a choice.
    pub(super) fn handle_command(&mut self, cmd: Command) -> Option<Choice> {
        let last = self.choices().len() - 1;
        match (self.kind, cmd) {
            (_, Command::Quit | Command::Q) => return Some(Choice::Quit),
            (_, Command::Enter) => return Some(self.selection()),
            (_, Command::R) => return Some(Choice::PlayAgain),
            (_, Command::M) => return Some(Choice::MainMenu),
            (PopupKind::Paused, Command::Esc | Command::P) => return Some(Choice::Resume),
            (PopupKind::GameOver { .. }, Command::Esc) => return Some(Choice::MainMenu),
            (_, Command::Up) => self.selected = self.selected.saturating_sub(1),
            (_, Command::Down) => self.selected = (self.selected + 1).min(last),
            (_, Command::Next) => {
                self.selected = if self.selected == last {
                    0
                } else {
                    self.selected + 1
                };
            }
            (_, Command::Prev) => self.selected = self.selected.checked_sub(1).unwrap_or(last),
            (_, Command::Home) => self.selected = 0,
            (_, Command::End) => self.selected = last,
            _ => (),
        }
        None
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PopupKind {
    Paused,
    GameOver { score: u32, best: u32, new_best: bool },
}

/// The items that can appear in a pop-up menu
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Choice {
    /// Continue the paused game
    Resume,

    /// Start a new game with the same options
    PlayAgain,

    /// Return to the main menu
    MainMenu,

    /// Quit the application
    Quit,
}

impl Choice {
    fn to_line(self, selected: bool) -> Line<'static> {
        let (label, key) = match self {
            Choice::Resume => ("Resume (", "Esc"),
            Choice::PlayAgain => ("Play Again (", "r"),
            Choice::MainMenu => ("Main Menu (", "m"),
            Choice::Quit => ("Quit (", "q"),
        };
        let line = Line::from_iter([
            Span::raw(if selected { "» " } else { "  " }),
            Span::raw(label),
            Span::styled(key, consts::KEY_STYLE),
            Span::raw(")"),
        ]);
        if selected {
            line.style(consts::MENU_SELECTION_STYLE)
        } else {
            line
        }
    }
}

impl Widget for Popup {
    /*
     * ┌──── GAME OVER ─────┐
     * │ Score: 7           │
     * │ Best:  9           │
     * │                    │
     * │ » Play Again (r)   │
     * │   Main Menu (m)    │
     * │   Quit (q)         │
     * └────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.kind {
            PopupKind::Paused => " PAUSED ",
            PopupKind::GameOver { .. } => " GAME OVER ",
        };
        let block = Block::bordered()
            .title(title)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let choices = self
            .choices()
            .iter()
            .enumerate()
            .map(|(i, &ch)| ch.to_line(i == self.selected));
        for (line, row) in self.summary().into_iter().chain(choices).zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(popup: Popup) -> Buffer {
        let size = popup.size();
        let area = Rect::new(0, 0, size.width, size.height);
        let mut buffer = Buffer::empty(area);
        popup.render(area, &mut buffer);
        buffer
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn paused_navigation() {
        let mut popup = Popup::paused();
        assert_eq!(popup.selection(), Choice::Resume);
        assert_eq!(popup.handle_command(Command::Up), None);
        assert_eq!(popup.selection(), Choice::Resume);
        assert_eq!(popup.handle_command(Command::Down), None);
        assert_eq!(popup.handle_command(Command::Down), None);
        assert_eq!(popup.selection(), Choice::MainMenu);
        assert_eq!(popup.handle_command(Command::End), None);
        assert_eq!(popup.selection(), Choice::Quit);
        assert_eq!(popup.handle_command(Command::Down), None);
        assert_eq!(popup.selection(), Choice::Quit);
        assert_eq!(popup.handle_command(Command::Next), None);
        assert_eq!(popup.selection(), Choice::Resume);
        assert_eq!(popup.handle_command(Command::Prev), None);
        assert_eq!(popup.selection(), Choice::Quit);
        assert_eq!(popup.handle_command(Command::Home), None);
        assert_eq!(popup.handle_command(Command::Down), None);
        assert_eq!(popup.handle_command(Command::Enter), Some(Choice::PlayAgain));
    }

    #[test]
    fn paused_shortcuts() {
        let mut popup = Popup::paused();
        assert_eq!(popup.handle_command(Command::Esc), Some(Choice::Resume));
        assert_eq!(popup.handle_command(Command::P), Some(Choice::Resume));
        assert_eq!(popup.handle_command(Command::R), Some(Choice::PlayAgain));
        assert_eq!(popup.handle_command(Command::M), Some(Choice::MainMenu));
        assert_eq!(popup.handle_command(Command::Q), Some(Choice::Quit));
        assert_eq!(popup.handle_command(Command::Quit), Some(Choice::Quit));
        assert_eq!(popup.handle_command(Command::Left), None);
    }

    #[test]
    fn game_over_shortcuts() {
        let mut popup = Popup::game_over(3, 5, false);
        assert_eq!(popup.selection(), Choice::PlayAgain);
        assert_eq!(popup.handle_command(Command::Esc), Some(Choice::MainMenu));
        assert_eq!(popup.handle_command(Command::P), None);
        assert_eq!(popup.handle_command(Command::Enter), Some(Choice::PlayAgain));
    }

    #[test]
    fn render_paused() {
        let popup = Popup::paused();
        assert_eq!(popup.size(), Size::new(22, 6));
        let buffer = render(popup);
        assert_eq!(row_text(&buffer, 0), "┌────── PAUSED ──────┐");
        assert_eq!(row_text(&buffer, 1), "│ » Resume (Esc)     │");
        assert_eq!(row_text(&buffer, 2), "│   Play Again (r)   │");
        assert_eq!(row_text(&buffer, 3), "│   Main Menu (m)    │");
        assert_eq!(row_text(&buffer, 4), "│   Quit (q)         │");
        assert_eq!(row_text(&buffer, 5), "└────────────────────┘");
    }

    #[test]
    fn render_game_over() {
        let popup = Popup::game_over(7, 7, true);
        assert_eq!(popup.size(), Size::new(22, 8));
        let buffer = render(popup);
        assert_eq!(row_text(&buffer, 1), "│ Score: 7           │");
        assert_eq!(row_text(&buffer, 2), "│ Best:  7 (new!)    │");
        assert_eq!(row_text(&buffer, 3), "│                    │");
        assert_eq!(row_text(&buffer, 4), "│ » Play Again (r)   │");
        assert_eq!(row_text(&buffer, 7), "└────────────────────┘");
    }
}
