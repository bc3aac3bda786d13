//! Hourly timeline columns shared by the week and day views.
//!
//! Each column has an all-day lane and a 24-hour track. Timed events are
//! absolutely positioned on the track; overlaps are resolved by an
//! [`OverlapStrategy`], which by default only stacks them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::bucket::DayBuckets;
use crate::event::Event;
use crate::month::MAX_VISIBLE_EVENTS;
use crate::position::{
    HOURS_PER_DAY, LayoutError, NowMarker, TimeScale, TimeSlotPosition, position_for,
};

/// Hours kept visible above the current hour when a timeline first opens.
pub const SCROLL_LEAD_HOURS: u32 = 2;

/// A timed event placed on the track.
#[derive(Debug, Clone, Serialize)]
pub struct PositionedEvent<'a> {
    pub event: &'a Event,
    pub position: TimeSlotPosition,
    /// Paint order; higher is drawn on top.
    pub z_index: u32,
}

/// Decides how overlapping timed events share a column.
pub trait OverlapStrategy: std::fmt::Debug {
    /// Called with a column's events in input order.
    fn arrange(&self, events: &mut [PositionedEvent<'_>]);
}

/// Stacks events by input order: later events paint over earlier ones.
///
/// Overlapping events are not moved side by side.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackByOrder;

impl OverlapStrategy for StackByOrder {
    fn arrange(&self, events: &mut [PositionedEvent<'_>]) {
        for (z, positioned) in (1..).zip(events.iter_mut()) {
            positioned.z_index = z;
        }
    }
}

/// One hour row of the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourRow {
    pub hour: u32,
    pub top: f32,
    pub height: f32,
}

/// The 24 fixed-height rows of a track.
#[expect(clippy::cast_precision_loss, reason = "hours are small")]
pub fn hour_rows(scale: TimeScale) -> impl Iterator<Item = HourRow> {
    (0..HOURS_PER_DAY).map(move |hour| HourRow {
        hour,
        top: hour as f32 * scale.hour_height,
        height: scale.hour_height,
    })
}

/// Scroll offset that puts the hour two before `now` at the top, never negative.
#[expect(clippy::cast_precision_loss, reason = "hours are small")]
pub fn initial_scroll_offset(now: NaiveTime, scale: TimeScale) -> f32 {
    now.hour().saturating_sub(SCROLL_LEAD_HOURS) as f32 * scale.hour_height
}

/// An hour row of a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub hour: u32,
}

/// What a click on the track landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit<'a> {
    /// An event glyph; takes precedence over the slot underneath.
    Event(&'a Event),
    /// Empty space in an hour row.
    Slot(TimeSlot),
}

/// One day of a timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TimeGridColumn<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Every all-day event of the day, in input order.
    pub all_day: Vec<&'a Event>,
    pub timed: Vec<PositionedEvent<'a>>,
    /// Events that could not be placed on the track.
    #[serde(skip)]
    pub skipped: Vec<LayoutError>,
}

impl<'a> TimeGridColumn<'a> {
    fn build(
        date: NaiveDate,
        today: NaiveDate,
        buckets: &'a DayBuckets,
        scale: TimeScale,
        strategy: &dyn OverlapStrategy,
    ) -> Self {
        let mut all_day = Vec::new();
        let mut timed = Vec::new();
        let mut skipped = Vec::new();

        for event in buckets.events_on(date) {
            if event.all_day {
                all_day.push(event);
                continue;
            }
            match position_for(event, scale) {
                Ok(position) => timed.push(PositionedEvent {
                    event,
                    position,
                    z_index: 0,
                }),
                Err(e) => {
                    tracing::warn!(id = %event.id, error = %e, "event left off the timeline");
                    skipped.push(e);
                }
            }
        }
        strategy.arrange(&mut timed);

        Self {
            date,
            is_today: date == today,
            all_day,
            timed,
            skipped,
        }
    }

    /// All-day events shown in the lane.
    pub fn visible_all_day(&self) -> &[&'a Event] {
        &self.all_day[..self.all_day.len().min(MAX_VISIBLE_EVENTS)]
    }

    pub fn all_day_overflow(&self) -> usize {
        self.all_day.len().saturating_sub(MAX_VISIBLE_EVENTS)
    }

    /// Resolves a click at track offset `y`.
    ///
    /// The topmost event under the pointer wins; otherwise the hour row is hit.
    /// Offsets outside the track hit nothing.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "y is checked to be within the track"
    )]
    pub fn hit_test(&self, y: f32, scale: TimeScale) -> Option<Hit<'a>> {
        if !(0.0..scale.track_height()).contains(&y) {
            return None;
        }
        let topmost = self
            .timed
            .iter()
            .filter(|p| p.position.contains(y))
            .max_by_key(|p| p.z_index);
        if let Some(p) = topmost {
            return Some(Hit::Event(p.event));
        }
        let hour = ((y / scale.hour_height) as u32).min(HOURS_PER_DAY - 1);
        Some(Hit::Slot(TimeSlot {
            date: self.date,
            hour,
        }))
    }
}

/// Where the current-time line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NowPosition {
    pub column: usize,
    pub offset: f32,
}

/// A set of timeline columns sharing one scale.
#[derive(Debug, Clone, Serialize)]
pub struct TimeGrid<'a> {
    pub scale: TimeScale,
    pub columns: Vec<TimeGridColumn<'a>>,
}

impl<'a> TimeGrid<'a> {
    pub fn build(
        dates: &[NaiveDate],
        today: NaiveDate,
        buckets: &'a DayBuckets,
        scale: TimeScale,
        strategy: &dyn OverlapStrategy,
    ) -> Self {
        let columns = dates
            .iter()
            .map(|&date| TimeGridColumn::build(date, today, buckets, scale, strategy))
            .collect();
        Self { scale, columns }
    }

    pub fn hit_test(&self, column: usize, y: f32) -> Option<Hit<'a>> {
        self.columns.get(column)?.hit_test(y, self.scale)
    }

    /// Places the marker's last computed time, if its day is on screen.
    pub fn now_position(&self, marker: &NowMarker) -> Option<NowPosition> {
        let at = marker.computed_at()?;
        let offset = marker.offset()?;
        self.column_for(at).map(|column| NowPosition { column, offset })
    }

    fn column_for(&self, at: NaiveDateTime) -> Option<usize> {
        self.columns.iter().position(|c| c.date == at.date())
    }

    /// Layout errors across all columns.
    pub fn skipped(&self) -> impl Iterator<Item = &LayoutError> {
        self.columns.iter().flat_map(|c| c.skipped.iter())
    }
}
