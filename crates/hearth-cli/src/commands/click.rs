//! Click command: hit-tests a pointer press on a timeline.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use hearth_core::position::offset_for_time;
use hearth_core::{ClickOutcome, DayView, Event, TimeScale, WeekView};

use super::handler::Recorder;
use crate::TimelineKind;

/// Where on the track the click lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickTarget {
    /// Raw track offset in layout units.
    Offset(f32),
    /// A clock time, converted with the view's scale.
    At(NaiveTime),
}

impl ClickTarget {
    fn offset(self, scale: TimeScale) -> f32 {
        match self {
            Self::Offset(y) => y,
            Self::At(time) => offset_for_time(time, scale),
        }
    }
}

#[expect(
    clippy::too_many_arguments,
    reason = "mirrors the click subcommand's flags"
)]
pub fn run<W: Write>(
    writer: &mut W,
    events: Arc<[Event]>,
    kind: TimelineKind,
    date: NaiveDate,
    today: NaiveDate,
    column: usize,
    target: ClickTarget,
    scale: TimeScale,
) -> Result<()> {
    let mut recorder = Recorder::default();
    let y = target.offset(scale);

    let outcome = match kind {
        TimelineKind::Week => {
            let mut view = WeekView::new(events, date, today).with_scale(scale);
            view.click(column, y, &mut recorder)
        }
        TimelineKind::Day => {
            let mut view = DayView::new(events, date, today).with_scale(scale);
            view.click(y, &mut recorder)
        }
    };
    tracing::debug!(?outcome, y, "click dispatched");

    if outcome == ClickOutcome::Nothing {
        writeln!(writer, "nothing")?;
    }
    for callback in recorder.drain() {
        writeln!(writer, "{callback}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use hearth_core::EventId;

    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn events() -> Arc<[Event]> {
        Arc::from(vec![
            Event::new(EventId::new("dentist").unwrap(), "Dentist", dt("2024-03-13T10:00"))
                .with_end(dt("2024-03-13T11:30")),
        ])
    }

    fn click(kind: TimelineKind, column: usize, target: ClickTarget) -> String {
        let mut output = Vec::new();
        run(
            &mut output,
            events(),
            kind,
            date(2024, 3, 13),
            date(2024, 3, 13),
            column,
            target,
            TimeScale::WEEK,
        )
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn at(hour: u32, minute: u32) -> ClickTarget {
        ClickTarget::At(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }

    #[test]
    fn event_wins_over_slot() {
        let output = click(TimelineKind::Week, 2, at(10, 45));
        assert_eq!(output, "event-click dentist (Dentist)\n");
    }

    #[test]
    fn empty_space_reports_slot_of_column() {
        let output = click(TimelineKind::Week, 0, at(10, 45));
        assert_eq!(output, "slot-click 2024-03-11 10:00\n");
    }

    #[test]
    fn day_view_uses_its_own_date() {
        let output = click(TimelineKind::Day, 5, at(14, 0));
        assert_eq!(output, "slot-click 2024-03-13 14:00\n");
    }

    #[test]
    fn offset_outside_track_hits_nothing() {
        let output = click(TimelineKind::Day, 0, ClickTarget::Offset(-1.0));
        assert_eq!(output, "nothing\n");
        let output = click(TimelineKind::Week, 9, ClickTarget::Offset(10.0));
        assert_eq!(output, "nothing\n");
    }
}
