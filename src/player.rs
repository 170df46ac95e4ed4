use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::config::JUMP_TICKS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub column: u16,
    pub row: u16,
}

// ── Commands ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Jump,
    Quit,
}

impl Command {
    pub fn from_key(key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Left),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Right),
            KeyCode::Char('w') | KeyCode::Char(' ') | KeyCode::Up => Some(Command::Jump),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }
    }
}

// ── Jack ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pos: Position,
    ground_row: u16,
    max_column: u16,
    airborne: u8,
}

impl Player {
    pub fn new(column: u16, ground_row: u16, max_column: u16) -> Self {
        Player {
            pos: Position {
                column: column.min(max_column),
                row: ground_row,
            },
            ground_row,
            max_column,
            airborne: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne > 0
    }

    pub fn step_left(&mut self) {
        if self.pos.column > 0 {
            self.pos.column -= 1;
        }
    }

    pub fn step_right(&mut self) {
        if self.pos.column < self.max_column {
            self.pos.column += 1;
        }
    }

    /// Lifts Jack one row for `JUMP_TICKS` ticks. Returns false while already
    /// in the air.
    pub fn jump(&mut self) -> bool {
        if self.is_airborne() || self.ground_row == 0 {
            return false;
        }
        self.pos.row = self.ground_row - 1;
        self.airborne = JUMP_TICKS;
        true
    }

    /// Counts down the jump; lands on the tick the counter runs out.
    pub fn tick(&mut self) {
        if self.airborne == 0 {
            return;
        }
        self.airborne -= 1;
        if self.airborne == 0 {
            self.pos.row = self.ground_row;
        }
    }
}
