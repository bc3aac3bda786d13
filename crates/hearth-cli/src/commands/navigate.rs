//! Navigate command: replays key presses over a month grid.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use hearth_core::{Event, Key, MonthView, NavOutcome};

use super::handler::Recorder;

pub fn run<W: Write>(
    writer: &mut W,
    events: Arc<[Event]>,
    date: NaiveDate,
    today: NaiveDate,
    keys: &[Key],
) -> Result<()> {
    let mut view = MonthView::new(events, date, today);
    let mut recorder = Recorder::default();

    match view.navigator().active_index().and_then(|i| view.date_at(i)) {
        Some(start) => writeln!(writer, "{:<7}focus {start}", "start")?,
        None => writeln!(writer, "{:<7}no days", "start")?,
    }

    for &key in keys {
        let outcome = view.handle_key(key, &mut recorder);
        tracing::debug!(%key, ?outcome, "key handled");
        let label = key.as_str();
        match outcome {
            NavOutcome::Moved(index) => {
                if let Some(focused) = view.date_at(index) {
                    writeln!(writer, "{label:<7}focus {focused}")?;
                }
            }
            NavOutcome::Select(_) => {
                for callback in recorder.drain() {
                    writeln!(writer, "{label:<7}{callback}")?;
                }
            }
            NavOutcome::Ignored => writeln!(writer, "{label:<7}ignored")?,
        }
    }
    Ok(())
}
