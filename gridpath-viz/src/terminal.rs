//! Crossterm terminal driver: raw-mode setup, input mapping, and painting.
//!
//! Each grid cell is drawn two characters wide so cells come out roughly
//! square. Layout: title line, then the grid, then a status line and a key
//! hint line.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::Pos;

use crate::app::{App, CellVisual, COLS, Key, Msg, ROWS};

/// Terminal row of the first grid row.
const GRID_TOP: u16 = 1;
/// Characters per grid cell.
const CELL_WIDTH: u16 = 2;

const HINTS: &str = "d/a algorithm   enter run   c clear   esc cancel   q quit";

/// RAII wrapper around the raw-mode terminal. Restores the terminal on
/// drop, including on error paths.
pub struct Terminal {
    out: io::Stdout,
}

impl Terminal {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }

    /// Wait up to `timeout` for one input event and map it to a [`Msg`].
    /// Events that mean nothing to the app (e.g. clicks outside the grid)
    /// are swallowed and reported as `None`.
    pub fn poll(&mut self, timeout: Duration) -> Result<Option<Msg>, Box<dyn std::error::Error>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let msg = match event::read()? {
            Event::Key(KeyEvent {
                code, modifiers, ..
            }) => map_key(code, modifiers),
            Event::Mouse(me) => {
                let cell = cell_at(me.column, me.row);
                match me.kind {
                    MouseEventKind::Down(MouseButton::Left) => cell.map(Msg::MouseDown),
                    MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                        cell.map(Msg::MouseMove)
                    }
                    MouseEventKind::Up(MouseButton::Left) => Some(Msg::MouseUp),
                    _ => None,
                }
            }
            Event::Resize(_, _) => Some(Msg::Resize),
            _ => None,
        };
        Ok(msg)
    }

    /// Repaint the whole screen from the app state.
    pub fn draw(&mut self, app: &App) -> Result<(), Box<dyn std::error::Error>> {
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(" gridpath — algorithm: {}", app.strategy_label())),
        )?;

        for row in 0..ROWS {
            queue!(self.out, cursor::MoveTo(0, GRID_TOP + row as u16))?;
            for col in 0..COLS {
                let (bg, fg, text) = cell_style(app.cell_visual(Pos::new(row, col)));
                queue!(
                    self.out,
                    SetBackgroundColor(bg),
                    SetForegroundColor(fg),
                    Print(text),
                )?;
            }
            queue!(self.out, ResetColor)?;
        }

        queue!(
            self.out,
            cursor::MoveTo(0, GRID_TOP + ROWS as u16),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(" {}", app.status())),
            cursor::MoveTo(0, GRID_TOP + ROWS as u16 + 1),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(" {HINTS}")),
        )?;

        self.out.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Msg> {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Msg::Quit);
    }
    match code {
        KeyCode::Char(c) => Some(Msg::Key(Key::Char(c))),
        KeyCode::Enter => Some(Msg::Key(Key::Enter)),
        KeyCode::Esc => Some(Msg::Key(Key::Escape)),
        _ => None,
    }
}

/// Map a terminal coordinate to the grid cell under it, if any.
fn cell_at(x: u16, y: u16) -> Option<Pos> {
    if y < GRID_TOP {
        return None;
    }
    let row = (y - GRID_TOP) as i32;
    let col = (x / CELL_WIDTH) as i32;
    if row < ROWS && col < COLS {
        Some(Pos::new(row, col))
    } else {
        None
    }
}

fn cell_style(visual: CellVisual) -> (Color, Color, &'static str) {
    match visual {
        CellVisual::Empty => (Color::Reset, Color::DarkGrey, "· "),
        CellVisual::Wall => (Color::DarkGrey, Color::DarkGrey, "  "),
        CellVisual::Visited => (Color::DarkBlue, Color::DarkBlue, "  "),
        CellVisual::Path => (Color::DarkYellow, Color::DarkYellow, "  "),
        CellVisual::Start => (Color::DarkGreen, Color::White, "S "),
        CellVisual::End => (Color::DarkRed, Color::White, "E "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_mapping_covers_the_grid() {
        assert_eq!(cell_at(0, GRID_TOP), Some(Pos::new(0, 0)));
        assert_eq!(cell_at(1, GRID_TOP), Some(Pos::new(0, 0)));
        assert_eq!(cell_at(2, GRID_TOP), Some(Pos::new(0, 1)));
        assert_eq!(
            cell_at(CELL_WIDTH * 19 + 1, GRID_TOP + 19),
            Some(Pos::new(19, 19))
        );
    }

    #[test]
    fn outside_the_grid_maps_to_nothing() {
        assert_eq!(cell_at(0, 0), None);
        assert_eq!(cell_at(CELL_WIDTH * 20, GRID_TOP), None);
        assert_eq!(cell_at(0, GRID_TOP + 20), None);
    }
}
