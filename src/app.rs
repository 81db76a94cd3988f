use crate::game::Game;
use crate::menu::MainMenu;
use crate::options::Options;
use crate::theme::Theme;
use crate::warning::Warning;
use ratatui::{backend::Backend, Terminal};
use std::io;

/// State shared by all screens for the lifetime of the program
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Globals {
    /// The options with which the next game will be played
    pub(crate) options: Options,

    pub(crate) theme: Theme,

    /// The highest score achieved since the program started
    pub(crate) best: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    /// Start the application on the main menu, with a pop-up showing
    /// `warning` if it is set
    pub(crate) fn new(globals: Globals, warning: Option<Warning>) -> App {
        let mut menu = MainMenu::new(globals);
        if let Some(w) = warning {
            menu.set_warning(w);
        }
        App {
            screen: Screen::Main(menu),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Main(ref menu) => {
                terminal.draw(|frame| menu.draw(frame))?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

/// The screen currently shown by the application
#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(Game),
    Quit,
}
