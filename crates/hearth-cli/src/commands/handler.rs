//! Records view callbacks so commands can print them.

use std::fmt;

use chrono::NaiveDate;
use hearth_core::{CalendarHandler, Event, EventId, TimeSlot};

/// One callback fired by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Day(NaiveDate),
    Event { id: EventId, title: String },
    Slot(TimeSlot),
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "day-click {date}"),
            Self::Event { id, title } => write!(f, "event-click {id} ({title})"),
            Self::Slot(slot) => write!(f, "slot-click {} {:02}:00", slot.date, slot.hour),
        }
    }
}

/// Collects callbacks in the order they fire.
#[derive(Debug, Default)]
pub struct Recorder {
    fired: Vec<Callback>,
}

impl Recorder {
    /// Takes everything recorded so far.
    pub fn drain(&mut self) -> Vec<Callback> {
        std::mem::take(&mut self.fired)
    }
}

impl CalendarHandler for Recorder {
    fn on_day_click(&mut self, date: NaiveDate) {
        self.fired.push(Callback::Day(date));
    }

    fn on_event_click(&mut self, event: &Event) {
        self.fired.push(Callback::Event {
            id: event.id.clone(),
            title: event.title.clone(),
        });
    }

    fn on_time_slot_click(&mut self, slot: TimeSlot) {
        self.fired.push(Callback::Slot(slot));
    }
}
