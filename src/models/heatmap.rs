use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Entry volume for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub date: NaiveDate,
    pub count: i64,
}

/// One day of the rendered calendar. `bucket` 0 means no entry that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: i64,
    pub bucket: u8,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub year: i32,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    pub year: Option<i32>,
}
