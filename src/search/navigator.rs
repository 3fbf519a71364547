/// Keys the autocomplete widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Focus index over the rendered suggestion rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardNavigator {
    focus: Option<usize>,
}

impl KeyboardNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based focus index, `-1` when nothing is focused.
    pub fn index(&self) -> isize {
        self.focus.map_or(-1, |i| i as isize)
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    pub fn reset(&mut self) {
        self.focus = None;
    }

    /// Move down, wrapping to the first row. Returns `None` when `len` is zero.
    pub fn next(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            self.focus = None;
            return None;
        }
        let next = match self.focus {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.focus = Some(next);
        self.focus
    }

    /// Move up, wrapping to the last row. Returns `None` when `len` is zero.
    pub fn prev(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            self.focus = None;
            return None;
        }
        let prev = match self.focus {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.focus = Some(prev);
        self.focus
    }

    pub fn set(&mut self, index: usize, len: usize) -> bool {
        if index < len {
            self.focus = Some(index);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_down_from_none_selects_first() {
        let mut nav = KeyboardNavigator::new();
        assert_eq!(nav.index(), -1);
        assert_eq!(nav.next(5), Some(0));
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn arrow_up_from_first_wraps_to_last() {
        let mut nav = KeyboardNavigator::new();
        nav.next(5);
        assert_eq!(nav.prev(5), Some(4));
    }

    #[test]
    fn arrow_up_from_none_selects_last() {
        let mut nav = KeyboardNavigator::new();
        assert_eq!(nav.prev(3), Some(2));
    }

    #[test]
    fn arrow_down_wraps_at_end() {
        let mut nav = KeyboardNavigator::new();
        for _ in 0..3 {
            nav.next(3);
        }
        assert_eq!(nav.index(), 2);
        assert_eq!(nav.next(3), Some(0));
    }

    #[test]
    fn empty_list_clears_focus() {
        let mut nav = KeyboardNavigator::new();
        nav.next(2);
        assert_eq!(nav.next(0), None);
        assert_eq!(nav.index(), -1);
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut nav = KeyboardNavigator::new();
        assert!(!nav.set(3, 3));
        assert!(nav.set(1, 3));
        assert_eq!(nav.focused(), Some(1));
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_name("Esc"), Key::Escape);
        assert_eq!(Key::from_name("a"), Key::Other);
    }
}
