use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Widget,
};

/// The title shown at the top of the main menu
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    pub(super) const WIDTH: u16 = 28;
    pub(super) const HEIGHT: u16 = 7;

    #[rustfmt::skip]
    const TITLE: &[&str] = &[
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Logo::TITLE
            .iter()
            .map(|&ln| Line::styled(ln, consts::LOGO_STYLE))
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(
            Line::from_iter([
                Span::styled(
                    String::from_iter([consts::SNAKE_BODY_SYMBOL; 8]),
                    consts::SNAKE_BODY_STYLE,
                ),
                Span::styled(
                    consts::SNAKE_HEAD_EAST_SYMBOL.to_string(),
                    consts::SNAKE_HEAD_STYLE,
                ),
                Span::raw("  "),
                Span::styled(consts::FOOD_SYMBOL.to_string(), consts::FOOD_STYLE),
            ])
            .centered(),
        );
        Text::from(lines).render(area, buf);
    }
}

/// How-to-play text shown on the main menu
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const WIDTH: u16 = 20;
    pub(super) const HEIGHT: u16 = 6;

    fn keys(prefix: &'static str, keys: [&'static str; 4]) -> Line<'static> {
        let mut line = Line::from(prefix);
        for (i, k) in keys.into_iter().enumerate() {
            if i > 0 {
                line.push_span(" ");
            }
            line.push_span(Span::styled(k, consts::KEY_STYLE));
        }
        line
    }

    fn text() -> Text<'static> {
        Text::from_iter([
            Line::from("Move the snake with:"),
            Instructions::keys("       ", ["←", "↓", "↑", "→"]),
            Instructions::keys("   or: ", ["h", "j", "k", "l"]),
            Instructions::keys("   or: ", ["a", "s", "w", "d"]),
            Line::from("Eat the apples, but"),
            Line::from("don't bite yourself!"),
        ])
    }
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Instructions::text().render(area, buf);
    }
}
