//! Calendar layout engine for the household planner.
//!
//! This crate turns a flat list of events into:
//! - Month grids: Monday-first rows of day cells with padding
//! - Week and day timelines: 24-hour tracks with positioned events
//! - Keyboard focus over month grids
//!
//! It never fetches or mutates events; views report user intent through
//! [`CalendarHandler`].

pub mod bucket;
pub mod category;
pub mod event;
pub mod month;
pub mod nav;
pub mod position;
pub mod time_grid;
mod types;
pub mod view;

pub use bucket::{BucketCache, DayBuckets};
pub use category::{Category, Color, color_for};
pub use event::{Event, EventKind, EventRecord, events_from_records};
pub use month::{CalendarDayCell, GridCell, MonthGrid};
pub use nav::{GridNavigator, Key, NavOutcome};
pub use position::{LayoutError, NowMarker, TimeScale, TimeSlotPosition, position_for};
pub use time_grid::{
    Hit, OverlapStrategy, PositionedEvent, StackByOrder, TimeGrid, TimeGridColumn, TimeSlot,
};
pub use types::{EventId, ValidationError};
pub use view::{CalendarHandler, ClickOutcome, DayView, MonthView, WeekView, week_dates};
