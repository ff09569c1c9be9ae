/// Editable text fields: the image path line and the coordinate number inputs.

/// Path input line with recent-image browsing.
pub struct PathInput {
    /// Current input text.
    pub text: String,
    /// Cursor position (byte offset).
    pub cursor: usize,
    /// Recently loaded paths, oldest first.
    pub recent: Vec<String>,
    /// Current position in `recent` while browsing.
    pub recent_pos: Option<usize>,
    /// Saved current input when browsing.
    pub saved_input: String,
}

impl PathInput {
    pub fn new(recent: Vec<String>) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            recent,
            recent_pos: None,
            saved_input: String::new(),
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
        self.recent_pos = None;
    }

    pub fn insert(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn kill_line(&mut self) {
        self.text.truncate(self.cursor);
    }

    /// Delete back to the previous path separator or space.
    pub fn kill_segment_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let before = self.text[..self.cursor].trim_end_matches(['/', '\\']);
        let new_end = before
            .rfind(|c: char| c == '/' || c == '\\' || c.is_whitespace())
            .map(|i| i + 1)
            .unwrap_or(0);
        self.text.replace_range(new_end..self.cursor, "");
        self.cursor = new_end;
    }

    /// Trimmed text with a leading `~/` expanded to the home directory.
    pub fn resolved_path(&self) -> String {
        let trimmed = self.text.trim();
        if let Some(rest) = trimmed.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest).to_string_lossy().to_string();
            }
        }
        trimmed.to_string()
    }

    pub fn recent_up(&mut self) {
        if self.recent.is_empty() {
            return;
        }
        let pos = match self.recent_pos {
            None => {
                self.saved_input = self.text.clone();
                self.recent.len() - 1
            }
            Some(pos) if pos > 0 => pos - 1,
            Some(_) => return,
        };
        self.recent_pos = Some(pos);
        self.text = self.recent[pos].clone();
        self.cursor = self.text.len();
    }

    pub fn recent_down(&mut self) {
        if let Some(pos) = self.recent_pos {
            if pos + 1 < self.recent.len() {
                self.recent_pos = Some(pos + 1);
                self.text = self.recent[pos + 1].clone();
            } else {
                // Back to current input
                self.recent_pos = None;
                self.text = std::mem::take(&mut self.saved_input);
            }
            self.cursor = self.text.len();
        }
    }

    /// Cursor position in characters.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    /// First character shown in a field `width` cells wide so the cursor stays visible.
    pub fn scroll_start(&self, width: usize) -> usize {
        if width == 0 {
            return self.cursor_column();
        }
        (self.cursor_column() + 1).saturating_sub(width)
    }

    fn prev_boundary(&self) -> Option<usize> {
        if self.cursor == 0 {
            return None;
        }
        self.text[..self.cursor].char_indices().last().map(|(i, _)| i)
    }
}

/// Maximum digits accepted in a coordinate field.
const MAX_DIGITS: usize = 6;

/// Digit buffer for a bounded integer field.
///
/// The buffer is only a draft; the committed value lives in the selection.
#[derive(Debug, Default)]
pub struct NumberInput {
    pub text: String,
    pub dirty: bool,
}

impl NumberInput {
    /// Replace the draft with the committed value.
    pub fn sync(&mut self, value: u32) {
        self.text = value.to_string();
        self.dirty = false;
    }

    pub fn push_digit(&mut self, ch: char) {
        if !ch.is_ascii_digit() {
            return;
        }
        if !self.dirty {
            self.text.clear();
            self.dirty = true;
        }
        if self.text.len() < MAX_DIGITS {
            self.text.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.dirty = true;
        self.text.pop();
    }

    /// Parsed draft, if it was edited and holds a number.
    pub fn take_edit(&mut self) -> Option<u32> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.text.parse().ok()
    }
}
