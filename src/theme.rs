use crate::consts;
use ratatui::style::Style;
use serde::Deserialize;

/// Styles used for drawing the playing field
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(from = "RawTheme")]
pub(crate) struct Theme {
    pub(crate) snake_head: Style,
    pub(crate) snake_body: Style,
    pub(crate) food: Style,
    pub(crate) collision: Style,
    pub(crate) border: Style,
    pub(crate) score_bar: Style,
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            snake_head: consts::SNAKE_HEAD_STYLE,
            snake_body: consts::SNAKE_BODY_STYLE,
            food: consts::FOOD_STYLE,
            collision: consts::COLLISION_STYLE,
            border: consts::BORDER_STYLE,
            score_bar: consts::SCORE_BAR_STYLE,
        }
    }
}

/// The `[theme]` table of the configuration file.  Each value is a style
/// string like `"bold green"` or `"white on red"`; omitted keys keep their
/// default styles.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct RawTheme {
    snake_head: Option<parse_style::Style>,
    snake_body: Option<parse_style::Style>,
    food: Option<parse_style::Style>,
    collision: Option<parse_style::Style>,
    border: Option<parse_style::Style>,
    score_bar: Option<parse_style::Style>,
}

impl From<RawTheme> for Theme {
    fn from(value: RawTheme) -> Theme {
        fn style_or(style: Option<parse_style::Style>, default: Style) -> Style {
            style.map_or(default, Style::from)
        }

        let dflt = Theme::default();
        Theme {
            snake_head: style_or(value.snake_head, dflt.snake_head),
            snake_body: style_or(value.snake_body, dflt.snake_body),
            food: style_or(value.food, dflt.food),
            collision: style_or(value.collision, dflt.collision),
            border: style_or(value.border, dflt.border),
            score_bar: style_or(value.score_bar, dflt.score_bar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    #[test]
    fn empty_table() {
        let theme = toml::from_str::<Theme>("").unwrap();
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn override_some() {
        let theme = toml::from_str::<Theme>("food = \"italic blue\"\nborder = \"red\"\n").unwrap();
        let dflt = Theme::default();
        let food = "italic blue".parse::<parse_style::Style>().unwrap();
        let border = "red".parse::<parse_style::Style>().unwrap();
        assert_eq!(theme.food, Style::from(food));
        assert_eq!(theme.border, Style::from(border));
        assert_eq!(theme.food.fg, Some(Color::Indexed(4)));
        assert!(theme.food.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(theme.border.fg, Some(Color::Indexed(1)));
        assert_eq!(theme.snake_head, dflt.snake_head);
        assert_eq!(theme.snake_body, dflt.snake_body);
        assert_eq!(theme.collision, dflt.collision);
        assert_eq!(theme.score_bar, dflt.score_bar);
    }

    #[test]
    fn bad_style() {
        assert!(toml::from_str::<Theme>("food = \"blorple\"").is_err());
    }
}
