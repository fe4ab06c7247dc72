//! Calendar heatmap bucketing.
//!
//! Pure functions: entries are reduced to per-day counts, and each day of a
//! fixed window is classified into one of five intensity buckets, with 0
//! reserved for days that have no entry at all.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::entry::{DateRange, MoodEntry};
use crate::models::heatmap::{HeatmapCell, HeatmapPoint};

pub const EMPTY_BUCKET: u8 = 0;
pub const MAX_BUCKET: u8 = 5;

/// Inclusive upper bounds of buckets 1 through 4.
const BUCKET_THRESHOLDS: [i64; 4] = [2, 4, 6, 8];

pub fn bucket_for(count: i64) -> u8 {
    BUCKET_THRESHOLDS
        .iter()
        .position(|&upper| count <= upper)
        .map_or(MAX_BUCKET, |i| i as u8 + 1)
}

/// Number of entries per day, in date order.
pub fn aggregate(entries: &[MoodEntry]) -> Vec<HeatmapPoint> {
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for entry in entries {
        *per_day.entry(entry.entry_date).or_default() += 1;
    }
    per_day
        .into_iter()
        .map(|(date, count)| HeatmapPoint { date, count })
        .collect()
}

/// One cell per day of `window`. Points outside the window are dropped and
/// repeated points for the same day are summed.
pub fn render(points: &[HeatmapPoint], window: DateRange) -> Vec<HeatmapCell> {
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for point in points.iter().filter(|p| window.contains(p.date)) {
        *per_day.entry(point.date).or_default() += point.count;
    }

    window
        .days()
        .map(|date| match per_day.get(&date) {
            Some(&count) => HeatmapCell {
                date,
                count,
                bucket: bucket_for(count),
            },
            None => HeatmapCell {
                date,
                count: 0,
                bucket: EMPTY_BUCKET,
            },
        })
        .collect()
}
