use crossterm::{
    cursor, queue,
    style::{PrintStyledContent, StyledContent},
};
use std::io::{self, Write};

/// A line made of differently styled pieces.
#[derive(Clone, Default)]
pub struct StyledText {
    text: Vec<StyledContent<String>>,
}

impl StyledText {
    pub fn pop(&mut self) {
        self.text.pop();
    }

    pub fn push(&mut self, content: StyledContent<String>) {
        self.text.push(content);
    }

    /// Number of characters over all pieces.
    pub fn len(&self) -> usize {
        self.text.iter().map(|elem| elem.content().chars().count()).sum()
    }

    /// Prints whole pieces from `pos` until the next one would exceed
    /// `max_len`, returns the number of characters written.
    pub fn draw<W: Write>(&self, out: &mut W, pos: cursor::MoveTo, max_len: u16) -> io::Result<u16> {
        queue!(out, pos)?;
        let mut total_len = 0;
        for elem in &self.text {
            let elem_len = elem.content().chars().count();
            if total_len + elem_len > (max_len as usize) {
                break;
            }
            queue!(out, PrintStyledContent(elem.clone()))?;
            total_len += elem_len;
        }
        Ok(total_len as u16)
    }
}

impl From<Vec<StyledContent<String>>> for StyledText {
    fn from(text: Vec<StyledContent<String>>) -> Self {
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::style;

    #[test]
    fn draw_stops_before_overflow() {
        let text = StyledText::from(vec![
            style(String::from("Step: ")),
            style(String::from("12")),
            style(String::from(" of 99")),
        ]);
        assert_eq!(text.len(), 14);

        let mut out = Vec::new();
        assert_eq!(text.draw(&mut out, cursor::MoveTo(0, 0), 10).unwrap(), 8);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Step: "));
        assert!(printed.contains("12"));
        assert!(!printed.contains("of 99"));
    }
}
