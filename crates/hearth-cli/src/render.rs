//! Plain-text rendering of laid-out grids.

use std::fmt::Write;

use chrono::Datelike;
use hearth_core::time_grid::NowPosition;
use hearth_core::{Category, Event, GridCell, MonthGrid, TimeGrid};

const CELL_WIDTH: usize = 7;
const WEEKDAY_HEADER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Title plus category and kind, e.g. `Dentist (appointment)`.
pub fn event_label(event: &Event) -> String {
    let mut label = event.title.clone();
    if event.category != Category::Custom {
        let _ = write!(label, " ({})", event.category);
    }
    if event.is_major() {
        label.push_str(" [major]");
    }
    label
}

fn time_range(event: &Event) -> String {
    if event.all_day {
        return "all day".to_string();
    }
    format!(
        "{}-{}",
        event.start.format("%H:%M"),
        event.effective_end().format("%H:%M")
    )
}

fn day_cell(day: u32, is_today: bool, visible: usize, overflow: usize) -> String {
    let mark = if is_today { '*' } else { ' ' };
    let mut dots = "•".repeat(visible);
    if overflow > 0 {
        dots.push('+');
    }
    format!("{day:>2}{mark}{dots:<4}")
}

/// Renders a month as a Monday-first grid followed by an agenda.
///
/// Today is marked with `*`; each visible event is a dot and `+` stands for
/// hidden ones.
pub fn format_month(grid: &MonthGrid<'_>) -> String {
    let mut out = String::new();

    if let Some(first) = grid.days().first() {
        let _ = writeln!(out, "{}", first.date.format("%B %Y"));
    }

    let header: String = WEEKDAY_HEADER
        .iter()
        .map(|name| format!("{name:<CELL_WIDTH$}"))
        .collect();
    let _ = writeln!(out, "{}", header.trim_end());

    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                GridCell::Padding => " ".repeat(CELL_WIDTH),
                GridCell::Day { cell, .. } => day_cell(
                    cell.date.day(),
                    cell.is_today,
                    cell.visible_events().len(),
                    cell.overflow(),
                ),
            })
            .collect();
        let _ = writeln!(out, "{}", row.trim_end());
    }

    let busy: Vec<_> = grid.days().iter().filter(|c| !c.events.is_empty()).collect();
    if !busy.is_empty() {
        out.push('\n');
    }
    for cell in busy {
        for event in cell.visible_events() {
            let _ = writeln!(
                out,
                "{:<8}{:<13}{}",
                cell.date.format("%a %d").to_string(),
                time_range(event),
                event_label(event)
            );
        }
        if cell.overflow() > 0 {
            let _ = writeln!(out, "{:21}+{} more", "", cell.overflow());
        }
    }

    out
}

/// Renders timeline columns as a per-day listing with layout coordinates.
pub fn format_timeline(title: &str, grid: &TimeGrid<'_>, now: Option<NowPosition>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");

    for (index, column) in grid.columns.iter().enumerate() {
        let today = if column.is_today { " (today)" } else { "" };
        let _ = writeln!(out, "{}{today}", column.date.format("%a %d %b"));

        if !column.all_day.is_empty() {
            let titles: Vec<_> = column.visible_all_day().iter().map(|e| event_label(e)).collect();
            let _ = write!(out, "  {:<13}{}", "all day", titles.join(", "));
            if column.all_day_overflow() > 0 {
                let _ = write!(out, " +{} more", column.all_day_overflow());
            }
            out.push('\n');
        }

        for positioned in &column.timed {
            let _ = writeln!(
                out,
                "  {:<13}{}  [top {:.0}, height {:.0}, z {}]",
                time_range(positioned.event),
                event_label(positioned.event),
                positioned.position.top,
                positioned.position.height,
                positioned.z_index
            );
        }

        if let Some(now) = now.filter(|n| n.column == index) {
            let _ = writeln!(out, "  {:<13}[offset {:.1}]", "now", now.offset);
        }

        for error in &column.skipped {
            let _ = writeln!(out, "  {:<13}{error}", "skipped");
        }

        if column.all_day.is_empty() && column.timed.is_empty() && column.skipped.is_empty() {
            let _ = writeln!(out, "  -");
        }
    }

    out
}
