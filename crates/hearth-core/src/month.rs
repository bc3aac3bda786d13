//! Month grid layout.
//!
//! A month is laid out as rows of seven Monday-first columns. Padding cells
//! fill the slots before the first and after the last day so every row is
//! complete.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::bucket::DayBuckets;
use crate::event::Event;

/// Columns in a week row.
pub const DAYS_PER_WEEK: usize = 7;

/// Events surfaced per cell before the rest collapse into an overflow count.
pub const MAX_VISIBLE_EVENTS: usize = 3;

/// Number of days in the given month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(chrono::Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (first, last)
}

/// Cells needed before the first of the month in a Monday-first grid.
///
/// Monday maps to 0 and Sunday to 6.
pub fn leading_padding(first_of_month: NaiveDate) -> usize {
    first_of_month.weekday().num_days_from_monday() as usize
}

/// Cells needed after the last day so the grid closes on a full week.
pub const fn trailing_padding(leading: usize, day_count: usize) -> usize {
    (DAYS_PER_WEEK - (leading + day_count) % DAYS_PER_WEEK) % DAYS_PER_WEEK
}

/// One real day of the displayed month.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDayCell<'a> {
    pub date: NaiveDate,
    pub is_in_current_month: bool,
    pub is_today: bool,
    pub is_weekend: bool,
    /// All events starting this day, in input order.
    pub events: Vec<&'a Event>,
}

impl<'a> CalendarDayCell<'a> {
    /// The events shown inline.
    pub fn visible_events(&self) -> &[&'a Event] {
        &self.events[..self.events.len().min(MAX_VISIBLE_EVENTS)]
    }

    /// How many events are hidden behind the "+N more" marker.
    pub fn overflow(&self) -> usize {
        self.events.len().saturating_sub(MAX_VISIBLE_EVENTS)
    }
}

/// A slot in the flattened grid.
#[derive(Debug, Clone)]
pub enum GridCell<'a, 'g> {
    Padding,
    Day {
        /// Position among the real days, as used for keyboard focus.
        index: usize,
        cell: &'g CalendarDayCell<'a>,
    },
}

/// The laid-out month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    leading: usize,
    trailing: usize,
    days: Vec<CalendarDayCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// Lays out the month containing `current_date`.
    pub fn build(current_date: NaiveDate, today: NaiveDate, buckets: &'a DayBuckets) -> Self {
        let (first, last) = month_bounds(current_date);
        let leading = leading_padding(first);

        let days: Vec<_> = first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| CalendarDayCell {
                date,
                is_in_current_month: true,
                is_today: date == today,
                is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
                events: buckets.events_on(date).collect(),
            })
            .collect();

        let trailing = trailing_padding(leading, days.len());

        Self {
            year: first.year(),
            month: first.month(),
            leading,
            trailing,
            days,
        }
    }

    pub const fn leading(&self) -> usize {
        self.leading
    }

    pub const fn trailing(&self) -> usize {
        self.trailing
    }

    /// Real days, first to last.
    pub fn days(&self) -> &[CalendarDayCell<'a>] {
        &self.days
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Total slots including padding; always a multiple of seven.
    pub fn cell_count(&self) -> usize {
        self.leading + self.days.len() + self.trailing
    }

    /// Every slot, padding included, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell<'a, '_>> {
        let leading = std::iter::repeat_n(GridCell::Padding, self.leading);
        let days = self
            .days
            .iter()
            .enumerate()
            .map(|(index, cell)| GridCell::Day { index, cell });
        let trailing = std::iter::repeat_n(GridCell::Padding, self.trailing);
        leading.chain(days).chain(trailing)
    }

    /// Cells grouped into week rows.
    pub fn weeks(&self) -> Vec<Vec<GridCell<'a, '_>>> {
        let cells: Vec<_> = self.cells().collect();
        cells
            .chunks(DAYS_PER_WEEK)
            .map(|week| week.to_vec())
            .collect()
    }

    pub fn day(&self, index: usize) -> Option<&CalendarDayCell<'a>> {
        self.days.get(index)
    }

    /// Index of `date` among the real days.
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|cell| cell.date == date)
    }

    pub fn today_index(&self) -> Option<usize> {
        self.days.iter().position(|cell| cell.is_today)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDateTime;

    use super::*;
    use crate::types::EventId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, start: &str) -> Event {
        Event::new(
            EventId::new(id).unwrap(),
            id,
            NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M").unwrap(),
        )
    }

    fn empty() -> DayBuckets {
        DayBuckets::build(Arc::from(Vec::new()))
    }

    #[test]
    fn saturday_start_has_five_leading_cells() {
        // 2025-03-01 is a Saturday.
        let buckets = empty();
        let grid = MonthGrid::build(date(2025, 3, 15), date(2025, 3, 15), &buckets);
        assert_eq!(grid.leading(), 5);
        assert_eq!(grid.day_count(), 31);
        assert_eq!(grid.trailing(), 6);
        assert_eq!(grid.cell_count() % DAYS_PER_WEEK, 0);
    }

    #[test]
    fn march_2024_starts_on_friday() {
        let buckets = empty();
        let grid = MonthGrid::build(date(2024, 3, 15), date(2024, 3, 15), &buckets);
        assert_eq!(grid.leading(), 4);
        assert_eq!(grid.trailing(), 0);
        assert_eq!(grid.cell_count(), 35);
    }

    #[test]
    fn every_month_closes_on_full_weeks() {
        for year in 1900..=2100 {
            for month in 1..=12 {
                let buckets = empty();
                let grid = MonthGrid::build(date(year, month, 1), date(2000, 1, 1), &buckets);
                let expected_days = days_in_month(year, month).unwrap() as usize;
                assert_eq!(grid.day_count(), expected_days, "{year}-{month}");
                assert_eq!(
                    (grid.leading() + grid.day_count() + grid.trailing()) % DAYS_PER_WEEK,
                    0,
                    "{year}-{month}"
                );
                assert!(grid.leading() < DAYS_PER_WEEK);
                assert!(grid.trailing() < DAYS_PER_WEEK);
            }
        }
    }

    #[test]
    fn leap_februaries() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn sunday_first_maps_to_last_column() {
        // 2024-09-01 is a Sunday.
        let buckets = empty();
        let grid = MonthGrid::build(date(2024, 9, 10), date(2024, 9, 10), &buckets);
        assert_eq!(grid.leading(), 6);
        // 2024-04-01 is a Monday.
        let grid = MonthGrid::build(date(2024, 4, 10), date(2024, 4, 10), &buckets);
        assert_eq!(grid.leading(), 0);
    }

    #[test]
    fn flags_today_and_weekends() {
        let buckets = empty();
        let grid = MonthGrid::build(date(2024, 3, 1), date(2024, 3, 9), &buckets);
        let saturday = grid.day(8).unwrap();
        assert_eq!(saturday.date, date(2024, 3, 9));
        assert!(saturday.is_today);
        assert!(saturday.is_weekend);
        assert!(saturday.is_in_current_month);
        assert!(!grid.day(10).unwrap().is_weekend);
        assert_eq!(grid.today_index(), Some(8));

        let elsewhere = MonthGrid::build(date(2024, 3, 1), date(2024, 4, 9), &buckets);
        assert_eq!(elsewhere.today_index(), None);
    }

    #[test]
    fn cells_truncate_to_three_but_keep_everything() {
        let events: Arc<[Event]> = Arc::from(vec![
            event("a", "2024-03-09T08:00"),
            event("b", "2024-03-09T09:00"),
            event("c", "2024-03-09T10:00"),
            event("d", "2024-03-09T11:00"),
            event("e", "2024-03-09T12:00"),
            event("other", "2024-04-09T12:00"),
        ]);
        let buckets = DayBuckets::build(events);
        let grid = MonthGrid::build(date(2024, 3, 1), date(2024, 3, 1), &buckets);
        let cell = grid.day(grid.day_index(date(2024, 3, 9)).unwrap()).unwrap();

        let visible: Vec<_> = cell.visible_events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(visible, vec!["a", "b", "c"]);
        assert_eq!(cell.overflow(), 2);
        assert_eq!(cell.events.len(), 5);

        let total: usize = grid.days().iter().map(|c| c.events.len()).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn weeks_are_rows_of_seven_with_padding_at_edges() {
        let buckets = empty();
        let grid = MonthGrid::build(date(2025, 3, 1), date(2025, 3, 1), &buckets);
        let weeks = grid.weeks();
        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|w| w.len() == DAYS_PER_WEEK));
        assert!(matches!(weeks[0][4], GridCell::Padding));
        assert!(matches!(weeks[0][5], GridCell::Day { index: 0, .. }));
        assert!(matches!(weeks[5][0], GridCell::Day { index: 30, .. }));
        assert!(matches!(weeks[5][1], GridCell::Padding));
    }

    #[test]
    fn month_bounds_of_leap_february() {
        assert_eq!(
            month_bounds(date(2024, 2, 14)),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            month_bounds(date(2024, 12, 31)),
            (date(2024, 12, 1), date(2024, 12, 31))
        );
    }
}
