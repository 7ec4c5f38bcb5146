// File: crates/drops-demo/src/lib.rs
// Summary: Demo input helpers shared by the headless and windowed demos: drop-log CSV, sample data, logging setup.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, DurationRound, Utc};
use drops_core::{CategoryMetadata, ChartDataModel, DropEvent, StaticRegistry};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Target number of buckets across the loaded period.
pub const TARGET_BUCKETS: i64 = 48;

/// Install a `RUST_LOG`-driven subscriber, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

/// RFC 3339, or epoch seconds / milliseconds.
pub fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t.with_timezone(&Utc));
    }
    let n: i64 = raw.parse().with_context(|| format!("unrecognized timestamp '{raw}'"))?;
    // Anything past year 5138 in seconds is taken as milliseconds.
    let t = if n.abs() >= 100_000_000_000 {
        DateTime::from_timestamp_millis(n)
    } else {
        DateTime::from_timestamp(n, 0)
    };
    t.with_context(|| format!("timestamp {n} out of range"))
}

/// Load a `time,category` drop log.
pub fn load_events_csv(path: &Path) -> Result<Vec<DropEvent>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    let col = |name: &str| headers.iter().position(|h| h == name);
    let (Some(ti), Some(ci)) = (col("time"), col("category")) else {
        bail!("{}: expected `time` and `category` columns, found {:?}", path.display(), headers);
    };

    let mut events = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let (Some(time), Some(category)) = (rec.get(ti), rec.get(ci)) else { continue };
        if category.is_empty() {
            continue;
        }
        let time = parse_time(time).with_context(|| format!("{} row {}", path.display(), line + 2))?;
        events.push(DropEvent::new(time, category));
    }
    debug!(count = events.len(), path = %path.display(), "drop log loaded");
    Ok(events)
}

pub fn sample_registry() -> StaticRegistry {
    StaticRegistry::new()
        .with("afk", CategoryMetadata::new("AFK kick", "#f5a623", "#b37400"))
        .with("ban", CategoryMetadata::new("Banned", "#d0021b", "#8b0012"))
        .with("crash", CategoryMetadata::new("Client crash", "#9013fe", "#5c0aa6"))
        .with("quit", CategoryMetadata::new("Quit", "#4a90e2", "#1f5fa8"))
        .with("timeout", CategoryMetadata::new("Timed out", "rgb(126, 211, 33)", "#4c8a12"))
}

/// A deterministic day of drops ending at `end`.
pub fn sample_events(end: DateTime<Utc>) -> Vec<DropEvent> {
    const IDS: [&str; 5] = ["quit", "timeout", "afk", "crash", "ban"];
    const WEIGHTS: [u64; 5] = [40, 25, 20, 10, 5];
    let start = end - Duration::hours(24);
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut events = Vec::with_capacity(2_000);
    for _ in 0..2_000 {
        let minute = (next() % (24 * 60)) as i64;
        let mut pick = next() % 100;
        let mut id = IDS[0];
        for (cand, w) in IDS.iter().zip(WEIGHTS) {
            if pick < w {
                id = cand;
                break;
            }
            pick -= w;
        }
        events.push(DropEvent::new(start + Duration::minutes(minute), id));
    }
    events
}

/// Bucket `events` over their own time range, rounded to whole hours.
pub fn build_data(period: &str, events: &[DropEvent]) -> Result<ChartDataModel> {
    let (Some(first), Some(last)) = (events.iter().map(|e| e.time).min(), events.iter().map(|e| e.time).max())
    else {
        bail!("drop log is empty");
    };
    let start = first.duration_trunc(Duration::hours(1))?;
    let end = last.duration_trunc(Duration::hours(1))? + Duration::hours(1);
    let bucket = Duration::minutes(((end - start).num_minutes() / TARGET_BUCKETS).max(1));
    let data = ChartDataModel::bucketize(period, start, end, bucket, events)?;
    info!(
        period,
        buckets = data.log.len(),
        categories = data.categories_sorted.len(),
        max = data.max_drops,
        "drop log bucketed"
    );
    Ok(data)
}

/// `target/out/drops_<period>[_suffix].<ext>`, with the period reduced to a file-safe slug.
pub fn out_path(period: &str, suffix: &str, ext: &str) -> PathBuf {
    let slug: String = period
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let slug = slug.trim_matches('_');
    let slug = if slug.is_empty() { "chart" } else { slug };
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    if suffix.is_empty() {
        out.push(format!("drops_{slug}.{ext}"));
    } else {
        out.push(format!("drops_{slug}_{suffix}.{ext}"));
    }
    out
}
