//! Vertical placement of timed events on an hourly track.
//!
//! Positions are in abstract layout units: one hour is `hour_height` units
//! tall and midnight sits at offset zero.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::Event;
use crate::types::EventId;

/// Hours on a timeline track.
pub const HOURS_PER_DAY: u32 = 24;

/// Default refresh period of the current-time marker.
pub const NOW_REFRESH_SECS: i64 = 60;

/// Errors raised while placing an event on the track.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The event ends before it starts.
    #[error("event {id} ends at {end} before it starts at {start}")]
    InvertedInterval {
        id: EventId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Vertical scale of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    /// Layout units per hour.
    pub hour_height: f32,
    /// Floor applied to event heights so short events stay clickable.
    pub min_height: f32,
}

impl TimeScale {
    /// Week columns are narrow, so hours are shorter.
    pub const WEEK: Self = Self::new(48.0, 30.0);
    pub const DAY: Self = Self::new(64.0, 40.0);

    pub const fn new(hour_height: f32, min_height: f32) -> Self {
        Self {
            hour_height,
            min_height,
        }
    }

    /// Height of the full 24-hour track.
    #[expect(clippy::cast_precision_loss, reason = "24 is exact in f32")]
    pub fn track_height(&self) -> f32 {
        HOURS_PER_DAY as f32 * self.hour_height
    }
}

/// Where an event sits on the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSlotPosition {
    pub top: f32,
    pub height: f32,
}

impl TimeSlotPosition {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whether `y` falls inside the half-open span `[top, bottom)`.
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Offset of a wall-clock time from midnight.
#[expect(clippy::cast_precision_loss, reason = "hours and minutes are small")]
pub fn offset_for_time(time: NaiveTime, scale: TimeScale) -> f32 {
    let hour = time.hour() as f32;
    let minute = time.minute() as f32;
    hour * scale.hour_height + (minute / 60.0) * scale.hour_height
}

/// Places a timed event, clamping its height to the scale's minimum.
///
/// Events without an end last one hour. An end before the start is rejected
/// rather than flipped.
#[expect(clippy::cast_precision_loss, reason = "minute counts fit in f32")]
pub fn position_for(event: &Event, scale: TimeScale) -> Result<TimeSlotPosition, LayoutError> {
    let end = event.effective_end();
    if end < event.start {
        return Err(LayoutError::InvertedInterval {
            id: event.id.clone(),
            start: event.start,
            end,
        });
    }

    let minutes = (end - event.start).num_minutes() as f32;
    let height = ((minutes / 60.0) * scale.hour_height).max(scale.min_height);

    Ok(TimeSlotPosition {
        top: offset_for_time(event.start.time(), scale),
        height,
    })
}

/// Current-time indicator that is recomputed on a fixed period.
///
/// The host calls [`NowMarker::refresh`] from its timer; the offset only
/// changes when the period has elapsed (or the clock moved backwards).
#[derive(Debug, Clone)]
pub struct NowMarker {
    scale: TimeScale,
    period: Duration,
    last: Option<(NaiveDateTime, f32)>,
}

impl NowMarker {
    pub fn new(scale: TimeScale) -> Self {
        Self::with_period(scale, Duration::seconds(NOW_REFRESH_SECS))
    }

    pub const fn with_period(scale: TimeScale, period: Duration) -> Self {
        Self {
            scale,
            period,
            last: None,
        }
    }

    /// Recomputes the offset if due. Returns whether it was recomputed.
    pub fn refresh(&mut self, now: NaiveDateTime) -> bool {
        let due = match self.last {
            None => true,
            Some((at, _)) => now < at || now - at >= self.period,
        };
        if due {
            self.recompute(now);
        }
        due
    }

    /// Recomputes the offset unconditionally.
    ///
    /// For hosts whose own timer already fires once per period, where the
    /// elapsed-time check would drop ticks that arrive slightly early.
    pub fn recompute(&mut self, now: NaiveDateTime) -> f32 {
        let offset = offset_for_time(now.time(), self.scale);
        tracing::trace!(%now, offset, "now marker refreshed");
        self.last = Some((now, offset));
        offset
    }

    pub fn offset(&self) -> Option<f32> {
        self.last.map(|(_, offset)| offset)
    }

    /// When the offset was last computed.
    pub fn computed_at(&self) -> Option<NaiveDateTime> {
        self.last.map(|(at, _)| at)
    }

    pub const fn period(&self) -> Duration {
        self.period
    }
}
