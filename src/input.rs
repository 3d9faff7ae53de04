use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::grid::Dir;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Dir),
    Surrender,
    Quit,
}

/// Non-blocking poll: drains pending events and returns the first key that
/// maps to a command, or `None` when nothing relevant is queued. At most one
/// command is consumed per tick.
pub fn poll_command() -> io::Result<Option<Command>> {
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            if let Some(cmd) = map_key(key.code) {
                return Ok(Some(cmd));
            }
        }
    }
    Ok(None)
}

fn map_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Move(Dir::Left)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Move(Dir::Right)),
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Move(Dir::Up)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Move(Dir::Down)),
        KeyCode::Char('t') => Some(Command::Surrender),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
