//! Week and day commands: print hourly timelines.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use hearth_core::time_grid::NowPosition;
use hearth_core::{DayView, Event, TimeGrid, TimeScale, WeekView};
use serde::Serialize;

use crate::render::format_timeline;

/// Timeline as emitted by `--json`.
#[derive(Debug, Serialize)]
struct TimelineJson<'g, 'a> {
    /// Offset the view would scroll to when first shown.
    scroll: f32,
    now: Option<NowPosition>,
    #[serde(flatten)]
    grid: &'g TimeGrid<'a>,
}

fn emit<W: Write>(
    writer: &mut W,
    title: &str,
    grid: &TimeGrid<'_>,
    now: Option<NowPosition>,
    scroll: f32,
    json: bool,
) -> Result<()> {
    if json {
        let out = TimelineJson { scroll, now, grid };
        writeln!(writer, "{}", serde_json::to_string_pretty(&out)?)?;
    } else {
        write!(writer, "{}", format_timeline(title, grid, now))?;
    }
    Ok(())
}

pub fn run_week<W: Write>(
    writer: &mut W,
    events: Arc<[Event]>,
    date: NaiveDate,
    now: NaiveDateTime,
    scale: TimeScale,
    json: bool,
) -> Result<()> {
    let mut view = WeekView::new(events, date, now.date()).with_scale(scale);
    view.tick(now);
    let now_position = view.now_position();
    let scroll = view.initial_scroll(now.time());
    let title = format!("Week of {}", view.dates()[0]);

    let grid = view.layout();
    emit(writer, &title, &grid, now_position, scroll, json)
}

pub fn run_day<W: Write>(
    writer: &mut W,
    events: Arc<[Event]>,
    date: NaiveDate,
    now: NaiveDateTime,
    scale: TimeScale,
    json: bool,
) -> Result<()> {
    let mut view = DayView::new(events, date, now.date()).with_scale(scale);
    view.tick(now);
    let now_position = view.now_position();
    let scroll = view.initial_scroll(now.time());
    let title = date.to_string();

    let grid = view.layout();
    emit(writer, &title, &grid, now_position, scroll, json)
}
