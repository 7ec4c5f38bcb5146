// File: crates/drops-core/src/model.rs
// Summary: Immutable chart data model (period, per-category time buckets) and bucketing of raw drop events.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::error::DataError;

/// Identifier of a drop category (e.g. `"afk"`, `"ban"`), keyed into the category registry.
pub type CategoryId = String;

/// One time bucket of the drop log: counts per category over `[time, time + width)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LogBucket {
    pub time: DateTime<Utc>,
    pub drops: BTreeMap<CategoryId, f64>,
}

impl LogBucket {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self { time, drops: BTreeMap::new() }
    }

    pub fn with(mut self, category: impl Into<CategoryId>, count: f64) -> Self {
        self.drops.insert(category.into(), count);
        self
    }

    /// Count for `category`; absent categories count as zero.
    pub fn count(&self, category: &str) -> f64 {
        self.drops.get(category).copied().unwrap_or(0.0)
    }

    /// Stacked height of the bucket across all categories.
    pub fn total(&self) -> f64 {
        self.drops.values().sum()
    }
}

/// A single logged player drop, as produced by the data-loading collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropEvent {
    pub time: DateTime<Utc>,
    pub category: CategoryId,
}

impl DropEvent {
    pub fn new(time: DateTime<Utc>, category: impl Into<CategoryId>) -> Self {
        Self { time, category: category.into() }
    }
}

/// What to draw. Owned by the caller and handed down as an immutable snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartDataModel {
    pub selected_period: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Upper bound of the value axis.
    pub max_drops: f64,
    /// Display order; the first category is stacked at the bottom.
    pub categories_sorted: Vec<CategoryId>,
    pub log: Vec<LogBucket>,
}

impl ChartDataModel {
    pub fn new(
        selected_period: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        max_drops: f64,
        categories_sorted: Vec<CategoryId>,
        log: Vec<LogBucket>,
    ) -> Self {
        Self {
            selected_period: selected_period.into(),
            start_date,
            end_date,
            max_drops,
            categories_sorted,
            log,
        }
    }

    /// Rendering only proceeds when there is at least one bucket.
    pub fn has_log(&self) -> bool {
        !self.log.is_empty()
    }

    /// Width of one bucket: the gap between the first two buckets, or the
    /// whole period for a single-bucket log.
    pub fn bucket_width(&self) -> Duration {
        match self.log.as_slice() {
            [a, b, ..] if b.time > a.time => b.time - a.time,
            _ => self.end_date - self.start_date,
        }
    }

    /// Sum of `category` over the whole log.
    pub fn total_for(&self, category: &str) -> f64 {
        self.log.iter().map(|b| b.count(category)).sum()
    }

    /// Aggregate raw events into fixed `bucket`-wide slots over `[start, end)`.
    ///
    /// Events outside the period are ignored. Empty buckets are kept so the
    /// time axis stays continuous. `max_drops` is the tallest stacked bucket and
    /// categories are ordered by descending total (ties by id), which puts the
    /// largest series at the bottom of the stack.
    pub fn bucketize(
        selected_period: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        bucket: Duration,
        events: &[DropEvent],
    ) -> Result<Self, DataError> {
        if end <= start {
            return Err(DataError::InvertedPeriod {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        let width_ms = bucket.num_milliseconds();
        if width_ms <= 0 {
            return Err(DataError::EmptyBucket);
        }

        let span_ms = (end - start).num_milliseconds();
        let n = ((span_ms + width_ms - 1) / width_ms).max(1);
        let mut log: Vec<LogBucket> = (0..n)
            .map(|i| LogBucket::new(start + Duration::milliseconds(i * width_ms)))
            .collect();

        let mut totals: BTreeMap<CategoryId, f64> = BTreeMap::new();
        for ev in events {
            if ev.time < start || ev.time >= end {
                continue;
            }
            let idx = (ev.time - start).num_milliseconds() / width_ms;
            let Some(slot) = usize::try_from(idx).ok().and_then(|i| log.get_mut(i)) else {
                continue;
            };
            *slot.drops.entry(ev.category.clone()).or_insert(0.0) += 1.0;
            *totals.entry(ev.category.clone()).or_insert(0.0) += 1.0;
        }

        let max_drops = log.iter().map(LogBucket::total).fold(0.0, f64::max);

        let mut ranked: Vec<(CategoryId, f64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let categories_sorted = ranked.into_iter().map(|(id, _)| id).collect();

        Ok(Self {
            selected_period: selected_period.into(),
            start_date: start,
            end_date: end,
            max_drops,
            categories_sorted,
            log,
        })
    }
}
