//! Month command: prints the month grid containing a date.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use hearth_core::{Event, MonthView};

use crate::render::format_month;

pub fn run<W: Write>(
    writer: &mut W,
    events: Arc<[Event]>,
    date: NaiveDate,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let mut view = MonthView::new(events, date, today);
    let grid = view.grid();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&grid)?)?;
    } else {
        write!(writer, "{}", format_month(&grid))?;
    }
    Ok(())
}
