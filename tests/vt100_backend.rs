//! A ratatui backend that writes escape sequences into a `vt100` screen, so
//! tests can read back the text, reverse-video cells, and cursor a real
//! terminal would show.

use std::fmt;
use std::io;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType as TermClearType},
};
use ratatui::backend::{Backend, ClearType, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};
use ratatui::style::{Color, Modifier};
use vt100::{Cell as ScreenCell, Parser};

pub struct VT100Backend {
    parser: Parser,
    size: Size,
}

impl VT100Backend {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            parser: Parser::new(height, width, 0),
            size: Size::new(width, height),
        }
    }

    /// Screen rows, trailing blanks and blank rows trimmed.
    pub fn screen_text(&self) -> String {
        let screen = self.parser.screen();
        let mut rows: Vec<String> = (0..self.size.height)
            .map(|row| {
                let mut text = String::new();
                for col in 0..self.size.width {
                    match screen.cell(row, col) {
                        Some(cell) if cell.is_wide_continuation() => {}
                        Some(cell) if cell.has_contents() => text.push_str(&cell.contents()),
                        _ => text.push(' '),
                    }
                }
                text.trim_end().to_string()
            })
            .collect();
        while rows.last().is_some_and(String::is_empty) {
            rows.pop();
        }
        rows.join("\n")
    }

    /// `(row, col)` of every cell drawn in reverse video, in reading order.
    pub fn reversed_cells(&self) -> Vec<(u16, u16)> {
        let screen = self.parser.screen();
        let mut cells = Vec::new();
        for row in 0..self.size.height {
            for col in 0..self.size.width {
                if screen.cell(row, col).is_some_and(ScreenCell::inverse) {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    /// `(row, col)` of the terminal cursor, or `None` while it is hidden.
    pub fn visible_cursor(&self) -> Option<(u16, u16)> {
        let screen = self.parser.screen();
        (!screen.hide_cursor()).then(|| screen.cursor_position())
    }

    fn emit(&mut self, bytes: &[u8]) {
        self.parser.process(bytes);
    }
}

impl fmt::Display for VT100Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.screen_text())
    }
}

impl Backend for VT100Backend {
    type Error = io::Error;

    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        let mut out = Vec::new();
        let mut next = None;
        let mut current = None;
        for (x, y, cell) in content {
            if next != Some((x, y)) {
                queue!(out, MoveTo(x, y))?;
            }
            let style = cell.style();
            if current != Some(style) {
                queue!(out, SetAttribute(Attribute::Reset))?;
                if style.add_modifier.contains(Modifier::REVERSED) {
                    queue!(out, SetAttribute(Attribute::Reverse))?;
                }
                if style.add_modifier.contains(Modifier::BOLD) {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if let Some(fg) = style.fg.and_then(term_color) {
                    queue!(out, SetForegroundColor(fg))?;
                }
                if let Some(bg) = style.bg.and_then(term_color) {
                    queue!(out, SetBackgroundColor(bg))?;
                }
                current = Some(style);
            }
            queue!(out, Print(cell.symbol()))?;
            next = Some((x + 1, y));
        }
        queue!(out, SetAttribute(Attribute::Reset))?;
        self.emit(&out);
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        let mut out = Vec::new();
        queue!(out, Hide)?;
        self.emit(&out);
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        let mut out = Vec::new();
        queue!(out, Show)?;
        self.emit(&out);
        Ok(())
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        let (row, col) = self.parser.screen().cursor_position();
        Ok(Position::new(col, row))
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        let Position { x, y } = position.into();
        let mut out = Vec::new();
        queue!(out, MoveTo(x, y))?;
        self.emit(&out);
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        let mut out = Vec::new();
        queue!(out, Clear(TermClearType::All))?;
        self.emit(&out);
        Ok(())
    }

    fn clear_region(&mut self, _clear_type: ClearType) -> io::Result<()> {
        self.clear()
    }

    fn size(&self) -> io::Result<Size> {
        Ok(self.size)
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        Ok(WindowSize {
            columns_rows: self.size,
            pixels: Size::default(),
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Named colors map onto the 16-entry ANSI table.
fn term_color(color: Color) -> Option<TermColor> {
    let index = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => return Some(TermColor::Rgb { r, g, b }),
        Color::Indexed(i) => i,
        Color::Black => 0,
        Color::Red => 1,
        Color::Green => 2,
        Color::Yellow => 3,
        Color::Blue => 4,
        Color::Magenta => 5,
        Color::Cyan => 6,
        Color::Gray => 7,
        Color::DarkGray => 8,
        Color::LightRed => 9,
        Color::LightGreen => 10,
        Color::LightYellow => 11,
        Color::LightBlue => 12,
        Color::LightMagenta => 13,
        Color::LightCyan => 14,
        Color::White => 15,
    };
    Some(TermColor::AnsiValue(index))
}
