use super::Position;
use crossterm::{cursor::MoveTo, queue, style::Print};
use std::io::{self, Write};

use crate::terminal_ui::styled_text::StyledText;

/// A titled box on the terminal. Content is drawn inside the border.
pub struct Module {
    title: StyledText,
    pos: Position,
    size: Position,
}

impl Module {
    /// Sizes below 3x3 are raised to 3x3 so there is always a border.
    pub fn new(title: StyledText, pos: Position, size: Position) -> Self {
        let size = (size.0.max(MIN_SIDE), size.1.max(MIN_SIDE));
        Module { title, pos, size }
    }

    pub fn title(&self) -> &StyledText {
        &self.title
    }

    pub fn set_title(&mut self, title: StyledText) {
        self.title = title;
    }

    pub fn clear_content<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (x, y) = self.get_render_pos();
        let (width, height) = self.get_render_size();
        let empty_line = " ".repeat(width as usize);
        for row in 0..height {
            queue!(out, MoveTo(x, y + row), Print(&empty_line))?;
        }
        Ok(())
    }

    pub fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (x, y) = self.pos;
        let (width, height) = self.size;

        for row in (y + 1)..(y + height - 1) {
            queue!(out, MoveTo(x, row), Print('│'), MoveTo(x + width - 1, row), Print('│'))?;
        }
        let hline = "─".repeat(width as usize - 2);
        queue!(
            out,
            MoveTo(x, y),
            Print('┌'),
            Print(&hline),
            Print('┐'),
            MoveTo(x, y + height - 1),
            Print('└'),
            Print(&hline),
            Print('┘')
        )?;

        self.draw_title(out)
    }

    pub fn draw_title<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (x, y) = self.pos;
        if self.size.0 < 6 {
            return Ok(());
        }
        let max_len = self.size.0 - 6;
        queue!(out, MoveTo(x + 2, y), Print(' '))?;
        self.title.draw(out, MoveTo(x + 3, y), max_len)?;
        queue!(out, Print(' '))
    }

    pub fn get_render_pos(&self) -> Position {
        (self.pos.0 + 1, self.pos.1 + 1)
    }

    pub fn get_render_size(&self) -> Position {
        (self.size.0 - 2, self.size.1 - 2)
    }
}

const MIN_SIDE: u16 = 3;
