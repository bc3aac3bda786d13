//! Watch command: keeps the current-time marker fresh on a timer.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use hearth_core::time_grid::NowPosition;
use hearth_core::{DayView, Event, TimeScale, WeekView};
use tokio::time::MissedTickBehavior;

use crate::TimelineKind;

/// Settings for one watch session.
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    pub kind: TimelineKind,
    pub scale: TimeScale,
    /// Timer period. Every timer tick recomputes the marker.
    pub period: Duration,
    /// Stop after this many refreshes; run until Ctrl-C when `None`.
    pub ticks: Option<u32>,
}

#[derive(Debug)]
enum Watched {
    Week(WeekView),
    Day(DayView),
}

impl Watched {
    fn new(events: Arc<[Event]>, options: &WatchOptions, today: NaiveDate) -> Self {
        match options.kind {
            TimelineKind::Week => Self::Week(
                WeekView::new(events, today, today)
                    .with_scale(options.scale)
                    .with_refresh_period(options.period),
            ),
            TimelineKind::Day => Self::Day(
                DayView::new(events, today, today)
                    .with_scale(options.scale)
                    .with_refresh_period(options.period),
            ),
        }
    }

    /// Keeps the displayed day on today across midnight.
    fn follow(&mut self, today: NaiveDate) {
        match self {
            Self::Week(view) => {
                view.set_current_date(today);
                view.set_today(today);
            }
            Self::Day(view) => {
                view.set_current_date(today);
                view.set_today(today);
            }
        }
    }

    fn refresh(&mut self, now: NaiveDateTime) {
        match self {
            Self::Week(view) => view.refresh_now(now),
            Self::Day(view) => view.refresh_now(now),
        }
    }

    fn now_position(&mut self) -> Option<NowPosition> {
        match self {
            Self::Week(view) => view.now_position(),
            Self::Day(view) => view.now_position(),
        }
    }
}

/// Refreshes the marker every `options.period`, printing each new position.
///
/// `clock` supplies the local time for every refresh.
pub async fn run<W, C>(
    writer: &mut W,
    events: Arc<[Event]>,
    options: &WatchOptions,
    mut clock: C,
) -> Result<()>
where
    W: Write,
    C: FnMut() -> NaiveDateTime,
{
    let period = options
        .period
        .to_std()
        .context("refresh period must not be negative")?;
    anyhow::ensure!(!period.is_zero(), "refresh period must be positive");

    let start = clock();
    let mut day = start.date();
    let mut view = Watched::new(events, options, day);
    let mut pending = Some(start);

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut refreshes = 0u32;
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            result = &mut shutdown => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "failed to listen for Ctrl-C");
                }
                tracing::debug!("watch stopped");
                break;
            }
        }

        let now = pending.take().unwrap_or_else(&mut clock);
        if now.date() != day {
            day = now.date();
            tracing::debug!(%day, "day changed");
            view.follow(day);
        }
        view.refresh(now);

        let stamp = now.format("%Y-%m-%d %H:%M");
        match view.now_position() {
            Some(position) => writeln!(
                writer,
                "{stamp}  now at offset {:.1} (column {})",
                position.offset, position.column
            )?,
            None => writeln!(writer, "{stamp}  now is off screen")?,
        }
        writer.flush()?;

        refreshes += 1;
        if options.ticks.is_some_and(|max| refreshes >= max) {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn stepping_clock(start: &str, step: Duration) -> impl FnMut() -> NaiveDateTime {
        let mut now = dt(start);
        move || {
            let current = now;
            now += step;
            current
        }
    }

    fn options(kind: TimelineKind, scale: TimeScale, ticks: u32) -> WatchOptions {
        WatchOptions {
            kind,
            scale,
            period: Duration::milliseconds(5),
            ticks: Some(ticks),
        }
    }

    #[tokio::test]
    async fn day_watch_prints_each_refresh() {
        let mut output = Vec::new();
        run(
            &mut output,
            Arc::from(Vec::new()),
            &options(TimelineKind::Day, TimeScale::DAY, 3),
            stepping_clock("2024-03-13T08:00", Duration::minutes(5)),
        )
        .await
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        insta::assert_snapshot!(output, @r"
        2024-03-13 08:00  now at offset 512.0 (column 0)
        2024-03-13 08:05  now at offset 517.3 (column 0)
        2024-03-13 08:10  now at offset 522.7 (column 0)
        ");
    }

    #[tokio::test]
    async fn week_watch_follows_midnight() {
        let mut output = Vec::new();
        run(
            &mut output,
            Arc::from(Vec::new()),
            &options(TimelineKind::Week, TimeScale::WEEK, 2),
            stepping_clock("2024-03-17T23:30", Duration::hours(1)),
        )
        .await
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        insta::assert_snapshot!(output, @r"
        2024-03-17 23:30  now at offset 1128.0 (column 6)
        2024-03-18 00:30  now at offset 24.0 (column 0)
        ");
    }

    #[tokio::test]
    async fn early_timer_ticks_still_refresh() {
        let readings = [
            Duration::milliseconds(3),
            Duration::milliseconds(20),
            Duration::milliseconds(40),
        ];
        let start = dt("2024-03-13T08:00");
        let reads = Rc::new(Cell::new(0usize));
        let clock = {
            let reads = Rc::clone(&reads);
            move || {
                let i = reads.get();
                reads.set(i + 1);
                start + readings[i.min(readings.len() - 1)]
            }
        };
        let mut opts = options(TimelineKind::Day, TimeScale::DAY, 2);
        opts.period = Duration::milliseconds(20);

        let mut output = Vec::new();
        run(&mut output, Arc::from(Vec::new()), &opts, clock)
            .await
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert_eq!(reads.get(), 2);
    }

    #[tokio::test]
    async fn negative_period_is_rejected() {
        let mut output = Vec::new();
        let mut opts = options(TimelineKind::Day, TimeScale::DAY, 1);
        opts.period = Duration::seconds(-1);
        let result = run(
            &mut output,
            Arc::from(Vec::new()),
            &opts,
            stepping_clock("2024-03-13T08:00", Duration::minutes(1)),
        )
        .await;
        assert!(result.is_err());
    }
}
