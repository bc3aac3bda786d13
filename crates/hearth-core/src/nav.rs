//! Keyboard focus over the days of a month grid.
//!
//! Focus is an index into the real days (padding is never focusable). Moves
//! clamp at both ends instead of wrapping into the neighbouring month.

use std::fmt;
use std::str::FromStr;

use crate::month::DAYS_PER_WEEK;

/// Keys the grid reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Space,
}

impl Key {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ArrowLeft => "left",
            Self::ArrowRight => "right",
            Self::ArrowUp => "up",
            Self::ArrowDown => "down",
            Self::Home => "home",
            Self::End => "end",
            Self::Enter => "enter",
            Self::Space => "space",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for key names the grid does not handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(String);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key: {}", self.0)
    }
}

impl std::error::Error for UnknownKey {}

impl FromStr for Key {
    type Err = UnknownKey;

    /// Accepts short names (`left`) and DOM-style names (`ArrowLeft`, `" "`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "ArrowLeft" => Ok(Self::ArrowLeft),
            "right" | "ArrowRight" => Ok(Self::ArrowRight),
            "up" | "ArrowUp" => Ok(Self::ArrowUp),
            "down" | "ArrowDown" => Ok(Self::ArrowDown),
            "home" | "Home" => Ok(Self::Home),
            "end" | "End" => Ok(Self::End),
            "enter" | "Enter" => Ok(Self::Enter),
            "space" | " " | "Space" => Ok(Self::Space),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Focus moved (or stayed at an edge) to this index.
    Moved(usize),
    /// The day at this index was chosen.
    Select(usize),
    /// The grid has no days; nothing happened.
    Ignored,
}

/// Focus state for one mounted month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridNavigator {
    day_count: usize,
    today: Option<usize>,
    focus: Option<usize>,
}

impl GridNavigator {
    /// Starts unfocused. `today` is the index of today if it is in this month.
    pub fn new(day_count: usize, today: Option<usize>) -> Self {
        Self {
            day_count,
            today: today.filter(|&i| i < day_count),
            focus: None,
        }
    }

    /// Forgets focus, e.g. when the displayed month changes.
    pub fn reset(&mut self, day_count: usize, today: Option<usize>) {
        *self = Self::new(day_count, today);
    }

    /// Updates the fallback cell without touching explicit focus.
    pub fn set_today(&mut self, today: Option<usize>) {
        self.today = today.filter(|&i| i < self.day_count);
    }

    pub const fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub const fn day_count(&self) -> usize {
        self.day_count
    }

    /// The cell reachable by Tab: the focused one, else today, else the first.
    pub fn active_index(&self) -> Option<usize> {
        if self.day_count == 0 {
            return None;
        }
        Some(self.clamp(self.focus.or(self.today).unwrap_or(0)))
    }

    /// Roving tab index: `0` for the active cell, `-1` for the rest.
    pub fn tab_index(&self, index: usize) -> i32 {
        if self.active_index() == Some(index) {
            0
        } else {
            -1
        }
    }

    /// Pointer or tab focus landed on a cell.
    pub fn pointer_focus(&mut self, index: usize) -> Option<usize> {
        if self.day_count == 0 {
            return None;
        }
        let index = self.clamp(index);
        self.focus = Some(index);
        Some(index)
    }

    pub fn handle_key(&mut self, key: Key) -> NavOutcome {
        let Some(current) = self.active_index() else {
            return NavOutcome::Ignored;
        };
        let last = self.day_count - 1;

        let next = match key {
            Key::ArrowLeft => current.saturating_sub(1),
            Key::ArrowRight => current.saturating_add(1).min(last),
            Key::ArrowUp => current.saturating_sub(DAYS_PER_WEEK),
            Key::ArrowDown => current.saturating_add(DAYS_PER_WEEK).min(last),
            Key::Home => 0,
            Key::End => last,
            Key::Enter | Key::Space => return NavOutcome::Select(current),
        };

        self.focus = Some(next);
        NavOutcome::Moved(next)
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.day_count.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_at_zero_stays_at_zero() {
        let mut nav = GridNavigator::new(31, None);
        nav.pointer_focus(0);
        assert_eq!(nav.handle_key(Key::ArrowLeft), NavOutcome::Moved(0));
        assert_eq!(nav.focus(), Some(0));
    }

    #[test]
    fn right_at_last_stays_at_last() {
        let mut nav = GridNavigator::new(30, None);
        nav.pointer_focus(29);
        assert_eq!(nav.handle_key(Key::ArrowRight), NavOutcome::Moved(29));
    }

    #[test]
    fn home_and_end_from_anywhere() {
        let mut nav = GridNavigator::new(29, Some(14));
        assert_eq!(nav.handle_key(Key::End), NavOutcome::Moved(28));
        assert_eq!(nav.handle_key(Key::Home), NavOutcome::Moved(0));
        nav.pointer_focus(17);
        assert_eq!(nav.handle_key(Key::Home), NavOutcome::Moved(0));
        nav.pointer_focus(3);
        assert_eq!(nav.handle_key(Key::End), NavOutcome::Moved(28));
    }

    #[test]
    fn vertical_moves_step_a_week_and_clamp() {
        let mut nav = GridNavigator::new(31, None);
        nav.pointer_focus(10);
        assert_eq!(nav.handle_key(Key::ArrowDown), NavOutcome::Moved(17));
        assert_eq!(nav.handle_key(Key::ArrowUp), NavOutcome::Moved(10));
        nav.pointer_focus(3);
        assert_eq!(nav.handle_key(Key::ArrowUp), NavOutcome::Moved(0));
        nav.pointer_focus(27);
        assert_eq!(nav.handle_key(Key::ArrowDown), NavOutcome::Moved(30));
    }

    #[test]
    fn enter_and_space_select_without_moving() {
        let mut nav = GridNavigator::new(31, None);
        nav.pointer_focus(5);
        assert_eq!(nav.handle_key(Key::Enter), NavOutcome::Select(5));
        assert_eq!(nav.handle_key(Key::Space), NavOutcome::Select(5));
        assert_eq!(nav.focus(), Some(5));
    }

    #[test]
    fn unset_falls_back_to_today() {
        let mut nav = GridNavigator::new(31, Some(8));
        assert_eq!(nav.focus(), None);
        assert_eq!(nav.tab_index(8), 0);
        assert_eq!(nav.tab_index(0), -1);
        assert_eq!(nav.handle_key(Key::ArrowRight), NavOutcome::Moved(9));
        assert_eq!(nav.tab_index(9), 0);
        assert_eq!(nav.tab_index(8), -1);
    }

    #[test]
    fn unset_without_today_uses_first_day() {
        let mut nav = GridNavigator::new(31, None);
        assert_eq!(nav.tab_index(0), 0);
        assert_eq!(nav.handle_key(Key::Enter), NavOutcome::Select(0));
    }

    #[test]
    fn reset_on_month_change_clamps_and_unsets() {
        let mut nav = GridNavigator::new(31, None);
        nav.pointer_focus(30);
        nav.reset(28, Some(40));
        assert_eq!(nav.focus(), None);
        assert_eq!(nav.active_index(), Some(0));
        assert_eq!(nav.pointer_focus(99), Some(27));
    }

    #[test]
    fn empty_grid_ignores_keys() {
        let mut nav = GridNavigator::new(0, None);
        assert_eq!(nav.handle_key(Key::ArrowDown), NavOutcome::Ignored);
        assert_eq!(nav.pointer_focus(0), None);
        assert_eq!(nav.tab_index(0), -1);
    }

    #[test]
    fn parses_short_and_dom_names() {
        assert_eq!("ArrowUp".parse::<Key>().unwrap(), Key::ArrowUp);
        assert_eq!("space".parse::<Key>().unwrap(), Key::Space);
        assert_eq!(" ".parse::<Key>().unwrap(), Key::Space);
        let err = "PageDown".parse::<Key>().unwrap_err();
        assert_eq!(err.to_string(), "unknown key: PageDown");
    }
}
