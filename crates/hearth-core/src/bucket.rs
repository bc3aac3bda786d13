//! Day bucketing of events.
//!
//! Events are indexed by the local date of their start. There is no
//! recurrence expansion and no multi-day spanning: an event lives in exactly
//! one bucket, the day it starts.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::event::Event;

/// Events grouped by start date, preserving input order within each day.
#[derive(Debug, Clone)]
pub struct DayBuckets {
    events: Arc<[Event]>,
    index: HashMap<NaiveDate, Vec<usize>>,
}

impl DayBuckets {
    /// Indexes `events` in a single pass.
    pub fn build(events: Arc<[Event]>) -> Self {
        let mut index: HashMap<NaiveDate, Vec<usize>> = HashMap::new();
        for (i, event) in events.iter().enumerate() {
            index.entry(event.day_key()).or_default().push(i);
        }
        Self { events, index }
    }

    /// Events starting on `date`, in input order.
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &Event> {
        self.index
            .get(&date)
            .into_iter()
            .flatten()
            .map(|&i| &self.events[i])
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.index.get(&date).map_or(0, Vec::len)
    }

    /// Every date that has at least one event, unordered.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.index.keys().copied()
    }

    /// The event list these buckets were built from.
    pub const fn events(&self) -> &Arc<[Event]> {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Debug)]
struct CacheEntry {
    month: (i32, u32),
    buckets: DayBuckets,
}

impl CacheEntry {
    fn matches(&self, events: &Arc<[Event]>, month: (i32, u32)) -> bool {
        self.month == month && Arc::ptr_eq(&self.buckets.events, events)
    }
}

/// Memoizes [`DayBuckets`] against the event list identity and the displayed month.
///
/// Handing the same `Arc` back with a date in the same month is a cache hit;
/// a different `Arc` (even with equal contents) or a month change rebuilds.
#[derive(Debug, Default)]
pub struct BucketCache {
    entry: Option<CacheEntry>,
    computations: u64,
}

impl BucketCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, events: &Arc<[Event]>, current_date: NaiveDate) -> &DayBuckets {
        let month = (current_date.year(), current_date.month());
        let entry = match self.entry.take() {
            Some(entry) if entry.matches(events, month) => entry,
            _ => {
                self.computations += 1;
                tracing::debug!(
                    events = events.len(),
                    year = month.0,
                    month = month.1,
                    "rebuilding day buckets"
                );
                CacheEntry {
                    month,
                    buckets: DayBuckets::build(Arc::clone(events)),
                }
            }
        };
        &self.entry.insert(entry).buckets
    }

    /// Number of times the buckets have been rebuilt.
    pub const fn computations(&self) -> u64 {
        self.computations
    }
}
