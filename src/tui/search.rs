/// Search input state for the TUI.
///
/// `query` is the input box content; the owning app forwards it to the
/// product table after every edit. `cursor_pos` is a byte offset that always
/// sits on a char boundary.
pub struct SearchState {
    pub query: String,
    pub cursor_pos: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            cursor_pos: 0,
        }
    }
}

impl SearchState {
    pub fn insert(&mut self, c: char) {
        self.query.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    /// Remove the char before the cursor. Returns `true` if the query changed.
    pub fn backspace(&mut self) -> bool {
        match self.prev_boundary() {
            Some(prev) => {
                self.query.remove(prev);
                self.cursor_pos = prev;
                true
            }
            None => false,
        }
    }

    /// Remove the char under the cursor. Returns `true` if the query changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor_pos < self.query.len() {
            self.query.remove(self.cursor_pos);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor_pos = prev;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.query.len() {
            let next = self.query[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.query.len());
            self.cursor_pos = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.query.len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor_pos = 0;
    }

    /// Text before the cursor, for placing the terminal cursor
    pub fn before_cursor(&self) -> &str {
        &self.query[..self.cursor_pos]
    }

    fn prev_boundary(&self) -> Option<usize> {
        if self.cursor_pos == 0 {
            return None;
        }
        self.query[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> SearchState {
        let mut search = SearchState::default();
        for c in text.chars() {
            search.insert(c);
        }
        search
    }

    #[test]
    fn editing_handles_multibyte_chars() {
        let mut search = typed("café");
        assert_eq!(search.cursor_pos, "café".len());

        assert!(search.backspace());
        assert_eq!(search.query, "caf");

        search.move_left();
        search.insert('ñ');
        assert_eq!(search.query, "cañf");
        assert_eq!(search.before_cursor(), "cañ");
    }

    #[test]
    fn cursor_moves_stay_in_bounds() {
        let mut search = typed("ab");
        search.move_right();
        assert_eq!(search.cursor_pos, 2);
        search.move_home();
        search.move_left();
        assert_eq!(search.cursor_pos, 0);
        assert!(!search.backspace());
        assert!(search.delete());
        assert_eq!(search.query, "b");
        search.move_end();
        assert!(!search.delete());
        assert_eq!(search.before_cursor(), "b");
    }

    #[test]
    fn clear_resets_cursor() {
        let mut search = typed("mug");
        search.clear();
        assert!(search.query.is_empty());
        assert_eq!(search.cursor_pos, 0);
    }
}
