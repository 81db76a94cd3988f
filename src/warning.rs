use crate::command::Command;
use crate::consts;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Span, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use std::borrow::Cow;
use std::error::Error;

/// A pop-up describing a problem that the program recovered from, such as an
/// unreadable configuration file
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
    scroll_offset: usize,
    max_scroll: usize,
}

impl Warning {
    const MAX_LINES: u16 = 14;
    const TEXT_WIDTH: u16 = 50;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    /// Build a warning from an error and its chain of sources
    pub(crate) fn from_error(e: &dyn Error) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_messages(msgs)
    }

    fn from_messages(msgs: Vec<String>) -> Warning {
        let mut msgs = msgs.into_iter();
        let mut lines = Vec::new();
        let width = usize::from(Warning::TEXT_WIDTH);
        if let Some(first) = msgs.next() {
            lines.extend(wrap(&first, textwrap::Options::new(width)));
        }
        let causes = msgs.collect::<Vec<_>>();
        if !causes.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
            let numbered = causes.len() > 1;
            for (i, m) in causes.iter().enumerate() {
                let init_indent = if numbered {
                    format!("{i:>4}: ")
                } else {
                    String::from("    ")
                };
                let subsequent = if numbered { "      " } else { "    " };
                let opts = textwrap::Options::new(width)
                    .initial_indent(&init_indent)
                    .subsequent_indent(subsequent);
                lines.extend(wrap(m, opts));
            }
        }
        let max_scroll = lines
            .len()
            .saturating_sub(usize::from(Warning::MAX_LINES));
        Warning {
            lines,
            scroll_offset: 0,
            max_scroll,
        }
    }

    /// Handle a user command.  Returns `Some` once the user has closed the
    /// pop-up.
    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter | Command::Esc => return Some(WarningOutcome::Dismissed),
            Command::Quit | Command::Q => return Some(WarningOutcome::Quit),
            Command::Up => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            Command::Down => self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll),
            Command::Home => self.scroll_offset = 0,
            Command::End => self.scroll_offset = self.max_scroll,
            _ => (),
        }
        None
    }

    fn scrolling(&self) -> bool {
        self.max_scroll > 0
    }
}

fn wrap(s: &str, opts: textwrap::Options<'_>) -> Vec<String> {
    textwrap::wrap(s, opts.break_words(true))
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

/// How the user closed a [`Warning`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl Widget for &Warning {
    // `area` is the whole display; the pop-up centers itself within it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES)
            .saturating_add(4);
        let width = if self.scrolling() {
            Warning::WIDTH + 2
        } else {
            Warning::WIDTH
        };
        let block_area = center_rect(area, Size { width, height });
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        let visible = Text::from_iter(
            self.lines
                .iter()
                .skip(self.scroll_offset)
                .take(usize::from(Warning::MAX_LINES))
                .map(String::as_str),
        );
        if self.scrolling() {
            let [text_area, scrollbar_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)])
                    .flex(Flex::Start)
                    .spacing(1)
                    .areas(text_area);
            visible.render(text_area, buf);
            let mut state = ScrollbarState::new(self.max_scroll).position(self.scroll_offset);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .track_symbol(Some(ratatui::symbols::shade::MEDIUM))
                .render(scrollbar_area, buf, &mut state);
        } else {
            visible.render(text_area, buf);
        }
        Line::from_iter([
            Span::raw("[OK ("),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(")]"),
        ])
        .centered()
        .render(ok_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("failed to load settings")]
    struct Outer(#[source] Middle);

    #[derive(Debug, Error)]
    #[error("bad value for difficulty")]
    struct Middle(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("unknown variant `extreme`")]
    struct Inner;

    fn render(warning: &Warning) -> Vec<String> {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    #[test]
    fn follows_source_chain() {
        let warning = Warning::from_error(&Outer(Middle(Inner)));
        assert_eq!(
            warning.lines,
            [
                "failed to load settings",
                "",
                "Caused by:",
                "   0: bad value for difficulty",
                "   1: unknown variant `extreme`",
            ]
        );
        assert!(!warning.scrolling());
    }

    #[test]
    fn single_cause_is_indented() {
        let warning = Warning::from_error(&Middle(Inner));
        assert_eq!(
            warning.lines,
            [
                "bad value for difficulty",
                "",
                "Caused by:",
                "    unknown variant `extreme`",
            ]
        );
    }

    #[test]
    fn long_messages_wrap() {
        let warning = Warning::from_messages(vec![String::from(
            "The configuration file could not be parsed, so the built-in defaults are in effect",
        )]);
        assert_eq!(
            warning.lines,
            [
                "The configuration file could not be parsed, so the",
                "built-in defaults are in effect",
            ]
        );
    }

    #[test]
    fn render_no_cause() {
        let warning = Warning::from_messages(vec![String::from("Config file is empty")]);
        let rows = render(&warning);
        let top = rows
            .iter()
            .position(|r| r.contains(" WARNING "))
            .expect("pop-up should be drawn");
        assert_eq!(
            rows[top..top + 5],
            [
                "             ┌───────────────────── WARNING ──────────────────────┐",
                "             │ Config file is empty                               │",
                "             │                                                    │",
                "             │                    [OK (Enter)]                    │",
                "             └────────────────────────────────────────────────────┘",
            ]
        );
        assert!(rows[top + 5..].iter().all(String::is_empty));
    }

    #[test]
    fn dismiss_and_quit() {
        let mut warning = Warning::from_messages(vec![String::from("oops")]);
        assert_eq!(warning.handle_command(Command::Down), None);
        assert_eq!(warning.scroll_offset, 0);
        assert_eq!(
            warning.handle_command(Command::Enter),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(
            warning.handle_command(Command::Esc),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(warning.handle_command(Command::Q), Some(WarningOutcome::Quit));
        assert_eq!(
            warning.handle_command(Command::Quit),
            Some(WarningOutcome::Quit)
        );
    }

    #[test]
    fn scroll_long_chain() {
        let msgs = (0..20).map(|i| format!("line {i}")).collect::<Vec<_>>();
        let mut warning = Warning::from_messages(msgs);
        // 1 + blank + "Caused by:" + 19 causes
        assert_eq!(warning.lines.len(), 22);
        assert!(warning.scrolling());
        assert_eq!(warning.max_scroll, 8);
        assert_eq!(warning.handle_command(Command::Up), None);
        assert_eq!(warning.scroll_offset, 0);
        assert_eq!(warning.handle_command(Command::Down), None);
        assert_eq!(warning.scroll_offset, 1);
        assert_eq!(warning.handle_command(Command::End), None);
        assert_eq!(warning.scroll_offset, 8);
        assert_eq!(warning.handle_command(Command::Down), None);
        assert_eq!(warning.scroll_offset, 8);
        let rows = render(&warning);
        assert!(rows.iter().any(|r| r.contains("  18: line 19")));
        assert!(!rows.iter().any(|r| r.contains("line 0 ")));
        assert_eq!(warning.handle_command(Command::Home), None);
        assert_eq!(warning.scroll_offset, 0);
    }
}
