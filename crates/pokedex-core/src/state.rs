/// Browser state: which of the loaded records is on screen.
pub struct AppState {
    pub selected: usize,
    pub count: usize,
    pub status_line: String,
}

impl AppState {
    pub fn new(count: usize) -> Self {
        let status_line = if count == 0 {
            "NO RECORDS LOADED.".to_string()
        } else {
            String::new()
        };
        Self {
            selected: 0,
            count,
            status_line,
        }
    }

    /// Advance to the next record, wrapping at the end.
    pub fn select_next(&mut self) {
        if self.count == 0 {
            return;
        }
        self.selected = (self.selected + 1) % self.count;
    }

    /// Step back to the previous record, wrapping at the start.
    pub fn select_prev(&mut self) {
        if self.count == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            self.count - 1
        } else {
            self.selected - 1
        };
    }

    /// One-based `"<n>/<count>"` position label.
    pub fn position_label(&self) -> String {
        if self.count == 0 {
            "0/0".to_string()
        } else {
            format!("{}/{}", self.selected + 1, self.count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_around() {
        let mut s = AppState::new(3);
        s.select_next();
        s.select_next();
        assert_eq!(s.selected, 2);
        s.select_next();
        assert_eq!(s.selected, 0);
    }

    #[test]
    fn prev_wraps_around() {
        let mut s = AppState::new(3);
        s.select_prev();
        assert_eq!(s.selected, 2);
        assert_eq!(s.position_label(), "3/3");
    }

    #[test]
    fn empty_selection_is_noop() {
        let mut s = AppState::new(0);
        s.select_next();
        s.select_prev();
        assert_eq!(s.selected, 0);
        assert_eq!(s.position_label(), "0/0");
    }

    #[test]
    fn status_reports_empty_data_only() {
        assert_eq!(AppState::new(0).status_line, "NO RECORDS LOADED.");
        assert!(AppState::new(2).status_line.is_empty());
    }
}
