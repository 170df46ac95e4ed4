use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue, style, terminal,
};
use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crate::error::{GameError, Result};

/// Something glyphs can be painted on.
pub trait Canvas {
    fn clear(&mut self);
    fn put(&mut self, column: u16, row: u16, glyph: char);
    fn text(&mut self, row: u16, column: u16, text: &str);
}

/// A canvas that ends up on a real display.
pub trait Surface: Canvas {
    fn present(&mut self) -> Result<()>;
    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;
    /// Blocks until a printable key (or Esc, reported as `'\x1b'`) is pressed.
    fn read_key(&mut self) -> Result<char>;
    /// Throws away keys pressed so far.
    fn discard_pending_keys(&mut self) -> Result<()>;
}

// ── Glyph grid ──────────────────────────────────────────────────────────────

/// Fixed-size back buffer of characters. Writes outside the grid are dropped.
#[derive(Clone, Debug)]
pub struct Grid {
    w: u16,
    h: u16,
    cells: Vec<char>,
}

impl Grid {
    pub fn new(w: u16, h: u16) -> Self {
        Grid {
            w,
            h,
            cells: vec![' '; w as usize * h as usize],
        }
    }

    pub fn get(&self, column: u16, row: u16) -> Option<char> {
        (column < self.w && row < self.h)
            .then(|| self.cells[row as usize * self.w as usize + column as usize])
    }

    pub fn row_text(&self, row: u16) -> String {
        (0..self.w).filter_map(|c| self.get(c, row)).collect()
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        for row in 0..self.h {
            queue!(out, style::Print(self.row_text(row)))?;
            if row < self.h - 1 {
                queue!(out, style::Print("\r\n"))?;
            }
        }
        out.flush()
    }
}

impl Canvas for Grid {
    fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn put(&mut self, column: u16, row: u16, glyph: char) {
        if column < self.w && row < self.h {
            self.cells[row as usize * self.w as usize + column as usize] = glyph;
        }
    }

    fn text(&mut self, row: u16, column: u16, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(i) else { break };
            self.put(column.saturating_add(offset), row, ch);
        }
    }
}

// ── Terminal ────────────────────────────────────────────────────────────────

/// The real terminal, in raw mode on the alternate screen while it lives.
pub struct Terminal {
    out: Stdout,
    grid: Grid,
}

impl Terminal {
    pub fn acquire(w: u16, h: u16) -> Result<Self> {
        terminal::enable_raw_mode().map_err(GameError::Surface)?;
        let mut out = stdout();
        let entered = execute!(
            out,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            terminal::DisableLineWrap,
        );
        if let Err(e) = entered {
            let _ = terminal::disable_raw_mode();
            return Err(GameError::Surface(e));
        }
        Ok(Terminal {
            out,
            grid: Grid::new(w, h),
        })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            style::ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

impl Canvas for Terminal {
    fn clear(&mut self) {
        self.grid.clear();
    }

    fn put(&mut self, column: u16, row: u16, glyph: char) {
        self.grid.put(column, row, glyph);
    }

    fn text(&mut self, row: u16, column: u16, text: &str) {
        self.grid.text(row, column, text);
    }
}

impl Surface for Terminal {
    fn present(&mut self) -> Result<()> {
        self.grid.render(&mut self.out)?;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            execute!(self.out, cursor::Show)?;
        } else {
            execute!(self.out, cursor::Hide)?;
        }
        Ok(())
    }

    fn read_key(&mut self) -> Result<char> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(c) = key_char(key) {
                    return Ok(c);
                }
            }
        }
    }

    fn discard_pending_keys(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            event::read()?;
        }
        Ok(())
    }
}

fn key_char(key: KeyEvent) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\n'),
        KeyCode::Esc => Some('\x1b'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_outside_the_grid_are_dropped() {
        let mut grid = Grid::new(4, 2);
        grid.put(4, 0, 'x');
        grid.put(0, 2, 'x');
        grid.text(1, 2, "abc");
        assert_eq!(grid.row_text(0), "    ");
        assert_eq!(grid.row_text(1), "  ab");
        assert_eq!(grid.get(9, 9), None);
    }

    #[test]
    fn render_emits_every_row() {
        let mut grid = Grid::new(3, 2);
        grid.text(0, 0, "abc");
        grid.text(1, 0, "def");
        let mut out = Vec::new();
        grid.render(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("abc\r\ndef"));
    }
}
