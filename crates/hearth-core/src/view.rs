//! Month, week and day views.
//!
//! Views own the transient state of one mounted calendar (bucket cache,
//! keyboard focus, current-time marker) and translate clicks and key presses
//! into [`CalendarHandler`] callbacks. Event data stays with the caller.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::bucket::BucketCache;
use crate::event::Event;
use crate::month::{DAYS_PER_WEEK, MonthGrid, days_in_month, month_bounds};
use crate::nav::{GridNavigator, Key, NavOutcome};
use crate::position::{NowMarker, TimeScale};
use crate::time_grid::{
    Hit, NowPosition, OverlapStrategy, StackByOrder, TimeGrid, TimeSlot, initial_scroll_offset,
};

/// Receives user intent from a view. All methods default to doing nothing.
pub trait CalendarHandler {
    /// A month-grid day was clicked or activated with Enter/Space.
    fn on_day_click(&mut self, _date: NaiveDate) {}

    /// An event glyph was activated in any view.
    fn on_event_click(&mut self, _event: &Event) {}

    /// Empty space in a timeline hour row was clicked.
    ///
    /// The day view reports its own date in `slot.date`.
    fn on_time_slot_click(&mut self, _slot: TimeSlot) {}
}

/// Which callback a timeline click produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Event,
    Slot(TimeSlot),
    Nothing,
}

/// The Monday-first week containing `date`.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    let mut dates = [monday; DAYS_PER_WEEK];
    for (offset, slot) in (0..).zip(dates.iter_mut()) {
        *slot = monday + Duration::days(offset);
    }
    dates
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn today_index(current_date: NaiveDate, today: NaiveDate) -> Option<usize> {
    same_month(current_date, today).then(|| today.day0() as usize)
}

fn day_count(date: NaiveDate) -> usize {
    days_in_month(date.year(), date.month()).map_or(0, |n| n as usize)
}

/// Month presentation with keyboard navigation.
#[derive(Debug)]
pub struct MonthView {
    events: Arc<[Event]>,
    current_date: NaiveDate,
    today: NaiveDate,
    cache: BucketCache,
    nav: GridNavigator,
}

impl MonthView {
    pub fn new(events: Arc<[Event]>, current_date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            events,
            current_date,
            today,
            cache: BucketCache::new(),
            nav: GridNavigator::new(day_count(current_date), today_index(current_date, today)),
        }
    }

    pub fn set_events(&mut self, events: Arc<[Event]>) {
        self.events = events;
    }

    /// Moves the view. Focus is reset only when the month changes.
    pub fn set_current_date(&mut self, date: NaiveDate) {
        let month_changed = !same_month(self.current_date, date);
        self.current_date = date;
        if month_changed {
            tracing::debug!(%date, "month changed, resetting focus");
            self.nav
                .reset(day_count(date), today_index(date, self.today));
        }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
        self.nav.set_today(today_index(self.current_date, today));
    }

    pub const fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Lays out the displayed month, reusing cached buckets when possible.
    pub fn grid(&mut self) -> MonthGrid<'_> {
        let buckets = self.cache.get(&self.events, self.current_date);
        MonthGrid::build(self.current_date, self.today, buckets)
    }

    pub const fn navigator(&self) -> &GridNavigator {
        &self.nav
    }

    pub fn tab_index(&self, index: usize) -> i32 {
        self.nav.tab_index(index)
    }

    pub fn pointer_focus(&mut self, index: usize) -> Option<usize> {
        self.nav.pointer_focus(index)
    }

    /// Date of the `index`-th real day of the displayed month.
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        if index >= self.nav.day_count() {
            return None;
        }
        let (first, _) = month_bounds(self.current_date);
        first.checked_add_signed(Duration::days(i64::try_from(index).ok()?))
    }

    pub fn handle_key(&mut self, key: Key, handler: &mut dyn CalendarHandler) -> NavOutcome {
        let outcome = self.nav.handle_key(key);
        if let NavOutcome::Select(index) = outcome {
            if let Some(date) = self.date_at(index) {
                handler.on_day_click(date);
            }
        }
        outcome
    }

    /// A day cell was clicked: it takes focus and is selected.
    pub fn click_day(&mut self, index: usize, handler: &mut dyn CalendarHandler) {
        let Some(index) = self.nav.pointer_focus(index) else {
            return;
        };
        if let Some(date) = self.date_at(index) {
            handler.on_day_click(date);
        }
    }

    /// An event glyph inside a day cell was clicked; the day is not selected.
    pub fn click_event(&self, event: &Event, handler: &mut dyn CalendarHandler) {
        handler.on_event_click(event);
    }

    /// How many times day buckets were rebuilt for this view.
    pub const fn bucket_computations(&self) -> u64 {
        self.cache.computations()
    }
}

/// State shared by the week and day timelines.
#[derive(Debug)]
struct Timeline {
    events: Arc<[Event]>,
    current_date: NaiveDate,
    today: NaiveDate,
    cache: BucketCache,
    scale: TimeScale,
    strategy: Box<dyn OverlapStrategy>,
    now: NowMarker,
}

impl Timeline {
    fn new(
        events: Arc<[Event]>,
        current_date: NaiveDate,
        today: NaiveDate,
        scale: TimeScale,
    ) -> Self {
        Self {
            events,
            current_date,
            today,
            cache: BucketCache::new(),
            scale,
            strategy: Box::new(StackByOrder),
            now: NowMarker::new(scale),
        }
    }

    fn layout(&mut self, dates: &[NaiveDate]) -> TimeGrid<'_> {
        let buckets = self.cache.get(&self.events, self.current_date);
        TimeGrid::build(dates, self.today, buckets, self.scale, self.strategy.as_ref())
    }

    fn click(
        &mut self,
        dates: &[NaiveDate],
        column: usize,
        y: f32,
        handler: &mut dyn CalendarHandler,
    ) -> ClickOutcome {
        let grid = self.layout(dates);
        match grid.hit_test(column, y) {
            Some(Hit::Event(event)) => {
                handler.on_event_click(event);
                ClickOutcome::Event
            }
            Some(Hit::Slot(slot)) => {
                handler.on_time_slot_click(slot);
                ClickOutcome::Slot(slot)
            }
            None => ClickOutcome::Nothing,
        }
    }
}

macro_rules! timeline_accessors {
    () => {
        pub fn set_events(&mut self, events: Arc<[Event]>) {
            self.inner.events = events;
        }

        pub fn set_current_date(&mut self, date: NaiveDate) {
            self.inner.current_date = date;
        }

        pub fn set_today(&mut self, today: NaiveDate) {
            self.inner.today = today;
        }

        pub const fn current_date(&self) -> NaiveDate {
            self.inner.current_date
        }

        pub const fn scale(&self) -> TimeScale {
            self.inner.scale
        }

        /// Replaces how overlapping events are arranged.
        #[must_use]
        pub fn with_strategy(mut self, strategy: Box<dyn OverlapStrategy>) -> Self {
            self.inner.strategy = strategy;
            self
        }

        #[must_use]
        pub fn with_scale(mut self, scale: TimeScale) -> Self {
            self.inner.scale = scale;
            self.inner.now = NowMarker::with_period(scale, self.inner.now.period());
            self
        }

        /// Sets how often the current-time marker may be recomputed.
        #[must_use]
        pub fn with_refresh_period(mut self, period: Duration) -> Self {
            self.inner.now = NowMarker::with_period(self.inner.scale, period);
            self
        }

        /// Timer hook: refreshes the current-time marker if it is due.
        pub fn tick(&mut self, now: NaiveDateTime) -> bool {
            self.inner.now.refresh(now)
        }

        /// Recomputes the current-time marker regardless of the period.
        pub fn refresh_now(&mut self, now: NaiveDateTime) {
            self.inner.now.recompute(now);
        }

        pub const fn now_marker(&self) -> &NowMarker {
            &self.inner.now
        }

        /// Scroll offset to apply when the view is first shown.
        pub fn initial_scroll(&self, now: NaiveTime) -> f32 {
            initial_scroll_offset(now, self.inner.scale)
        }

        pub const fn bucket_computations(&self) -> u64 {
            self.inner.cache.computations()
        }
    };
}

/// Seven timeline columns, Monday to Sunday.
#[derive(Debug)]
pub struct WeekView {
    inner: Timeline,
}

impl WeekView {
    pub fn new(events: Arc<[Event]>, current_date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            inner: Timeline::new(events, current_date, today, TimeScale::WEEK),
        }
    }

    timeline_accessors!();

    pub fn dates(&self) -> [NaiveDate; DAYS_PER_WEEK] {
        week_dates(self.inner.current_date)
    }

    pub fn layout(&mut self) -> TimeGrid<'_> {
        let dates = self.dates();
        self.inner.layout(&dates)
    }

    /// Current-time line, if today is in the displayed week.
    pub fn now_position(&mut self) -> Option<NowPosition> {
        let dates = self.dates();
        let marker = self.inner.now.clone();
        self.inner.layout(&dates).now_position(&marker)
    }

    /// Dispatches a click at offset `y` of day column `column` (0 = Monday).
    pub fn click(
        &mut self,
        column: usize,
        y: f32,
        handler: &mut dyn CalendarHandler,
    ) -> ClickOutcome {
        let dates = self.dates();
        self.inner.click(&dates, column, y, handler)
    }
}

/// A single timeline column for the current date.
#[derive(Debug)]
pub struct DayView {
    inner: Timeline,
}

impl DayView {
    pub fn new(events: Arc<[Event]>, current_date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            inner: Timeline::new(events, current_date, today, TimeScale::DAY),
        }
    }

    timeline_accessors!();

    pub fn layout(&mut self) -> TimeGrid<'_> {
        let dates = [self.inner.current_date];
        self.inner.layout(&dates)
    }

    pub fn now_position(&mut self) -> Option<NowPosition> {
        let dates = [self.inner.current_date];
        let marker = self.inner.now.clone();
        self.inner.layout(&dates).now_position(&marker)
    }

    pub fn click(&mut self, y: f32, handler: &mut dyn CalendarHandler) -> ClickOutcome {
        let dates = [self.inner.current_date];
        self.inner.click(&dates, 0, y, handler)
    }
}
