use crate::consts;
use crate::grid::Grid;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Gameplay options selectable from the main menu
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    pub(crate) difficulty: Difficulty,
    pub(crate) level_size: LevelSize,
}

impl Options {
    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Difficulty => self.difficulty.into(),
            OptKey::LevelSize => self.level_size.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match key {
            OptKey::Difficulty => {
                self.difficulty = value
                    .try_into()
                    .expect("Options::set(Difficulty, value) called with non-Difficulty value");
            }
            OptKey::LevelSize => {
                self.level_size = value
                    .try_into()
                    .expect("Options::set(LevelSize, value) called with non-LevelSize value");
            }
        }
    }

    pub(crate) fn grid(&self) -> Grid {
        self.level_size.as_grid()
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Difficulty,
    LevelSize,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Difficulty => "Difficulty",
            OptKey::LevelSize => "Level Size",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A setting that can be stepped up & down through a fixed range of values
#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;

    /// Step to the next value, going back to the first after the last
    fn cycle(&mut self);
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Difficulty,
    LevelSize,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::Difficulty(Difficulty::default())
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, left, right) = match *self {
            OptValue::Difficulty(d) => (d.as_str(), d.can_decrease(), d.can_increase()),
            OptValue::LevelSize(sz) => (sz.as_str(), sz.can_decrease(), sz.can_increase()),
        };
        write!(
            f,
            "{left} {name:^6} {right}",
            left = if left { '◀' } else { '◁' },
            right = if right { '▶' } else { '▷' }
        )
    }
}

/// How fast the snake moves
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Factor by which the snake's speed is scaled relative to
    /// [`BASE_TICK_PERIOD`][consts::BASE_TICK_PERIOD]
    pub(crate) fn speed_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.3,
        }
    }

    /// Time between movements of the snake
    pub(crate) fn tick_period(self) -> Duration {
        consts::BASE_TICK_PERIOD.div_f64(self.speed_multiplier())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Adjustable for Difficulty {
    fn increase(&mut self) {
        match self {
            Difficulty::Easy => *self = Difficulty::Normal,
            Difficulty::Normal => *self = Difficulty::Hard,
            Difficulty::Hard => (),
        }
    }

    fn decrease(&mut self) {
        match self {
            Difficulty::Easy => (),
            Difficulty::Normal => *self = Difficulty::Easy,
            Difficulty::Hard => *self = Difficulty::Normal,
        }
    }

    fn can_increase(&self) -> bool {
        *self != Difficulty::Hard
    }

    fn can_decrease(&self) -> bool {
        *self != Difficulty::Easy
    }

    fn cycle(&mut self) {
        if self.can_increase() {
            self.increase();
        } else {
            *self = Difficulty::Easy;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LevelSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl LevelSize {
    const MINIMUM: LevelSize = LevelSize::Small;
    const MAXIMUM: LevelSize = LevelSize::Large;

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            LevelSize::Small => "Small",
            LevelSize::Medium => "Medium",
            LevelSize::Large => "Large",
        }
    }

    pub(crate) fn as_grid(self) -> Grid {
        let (width, height) = match self {
            LevelSize::Small => (38, 8),
            LevelSize::Medium => (53, 12),
            LevelSize::Large => (76, 19),
        };
        Grid::new(width, height).expect("level sizes should be nonzero")
    }
}

impl fmt::Display for LevelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Adjustable for LevelSize {
    fn increase(&mut self) {
        match self {
            LevelSize::Small => *self = LevelSize::Medium,
            LevelSize::Medium => *self = LevelSize::Large,
            LevelSize::Large => (),
        }
    }

    fn decrease(&mut self) {
        match self {
            LevelSize::Small => (),
            LevelSize::Medium => *self = LevelSize::Small,
            LevelSize::Large => *self = LevelSize::Medium,
        }
    }

    fn can_increase(&self) -> bool {
        *self != Self::MAXIMUM
    }

    fn can_decrease(&self) -> bool {
        *self != Self::MINIMUM
    }

    fn cycle(&mut self) {
        if self.can_increase() {
            self.increase();
        } else {
            *self = Self::MINIMUM;
        }
    }
}
