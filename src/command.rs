use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A user action, decoded from a key press
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    /// Ctrl-C: leave the program from any screen
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Esc,
    Home,
    End,
    Next,
    Prev,
    M,
    P,
    Q,
    R,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let plain = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (m, _) if !plain.contains(m) => None,
            (_, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (_, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (_, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (_, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (_, KeyCode::Char(' ')) => Some(Command::Space),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (_, KeyCode::Home) => Some(Command::Home),
            (_, KeyCode::End) => Some(Command::End),
            (_, KeyCode::Tab) => Some(Command::Next),
            (_, KeyCode::BackTab) => Some(Command::Prev),
            (_, KeyCode::Char('m')) => Some(Command::M),
            (_, KeyCode::Char('p')) => Some(Command::P),
            (_, KeyCode::Char('q')) => Some(Command::Q),
            (_, KeyCode::Char('r')) => Some(Command::R),
            _ => None,
        }
    }
}
