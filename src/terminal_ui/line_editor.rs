/// Editable command line with history, driven by key presses.
#[derive(Default)]
pub struct LineEditor {
    line: Vec<char>,
    cursor: usize,
    history: Vec<Vec<char>>,
    history_idx: usize,
    stashed: Vec<char>,
}

impl LineEditor {
    pub fn line(&self) -> String {
        self.line.iter().collect()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char, max_len: usize) {
        if self.line.len() < max_len {
            self.line.insert(self.cursor, c);
            self.cursor += 1;
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.line.len() {
            self.cursor += 1;
        }
    }

    pub fn backspace(&mut self) {
        if 0 < self.cursor {
            self.cursor -= 1;
            self.line.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.line.len() {
            self.line.remove(self.cursor);
        }
    }

    pub fn history_up(&mut self) {
        if 0 < self.history_idx {
            if self.history_idx == self.history.len() {
                self.stashed = self.line.clone();
            }
            self.history_idx -= 1;
            self.recall(self.history[self.history_idx].clone());
        }
    }

    pub fn history_down(&mut self) {
        if self.history_idx < self.history.len() {
            self.history_idx += 1;
            let line = if self.history_idx == self.history.len() {
                self.stashed.clone()
            } else {
                self.history[self.history_idx].clone()
            };
            self.recall(line);
        }
    }

    /// Takes the current line, recording it in history. Empty lines are
    /// ignored.
    pub fn submit(&mut self) -> Option<String> {
        if self.line.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.line);
        let submitted = line.iter().collect();
        self.history.push(line);
        self.history_idx = self.history.len();
        self.cursor = 0;
        Some(submitted)
    }

    fn recall(&mut self, line: Vec<char>) {
        self.line = line;
        self.cursor = self.line.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut LineEditor, s: &str) {
        for c in s.chars() {
            editor.insert(c, 80);
        }
    }

    #[test]
    fn edit_in_the_middle() {
        let mut editor = LineEditor::default();
        type_str(&mut editor, "rn 5");
        editor.left();
        editor.left();
        editor.left();
        editor.insert('u', 80);
        assert_eq!(editor.line(), "run 5");
        editor.right();
        editor.backspace();
        assert_eq!(editor.line(), "ru 5");
        editor.delete();
        assert_eq!(editor.line(), "ru5");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn line_length_is_bounded() {
        let mut editor = LineEditor::default();
        for c in "finish".chars() {
            editor.insert(c, 3);
        }
        assert_eq!(editor.line(), "fin");
    }

    #[test]
    fn history_round_trip() {
        let mut editor = LineEditor::default();
        assert_eq!(editor.submit(), None);
        type_str(&mut editor, "run 1");
        assert_eq!(editor.submit().as_deref(), Some("run 1"));
        type_str(&mut editor, "finish");
        editor.submit();
        type_str(&mut editor, "vi");

        editor.history_up();
        assert_eq!(editor.line(), "finish");
        editor.history_up();
        assert_eq!(editor.line(), "run 1");
        editor.history_up();
        assert_eq!(editor.line(), "run 1");
        editor.history_down();
        editor.history_down();
        assert_eq!(editor.line(), "vi");
        assert_eq!(editor.cursor(), 2);
    }
}
