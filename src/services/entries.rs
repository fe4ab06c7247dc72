use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::auth::Session;
use crate::error::{AppError, AppResult};
use crate::models::entry::{CreateEntryRequest, DateRange, MoodEntry, NewMoodEntry};
use crate::models::heatmap::HeatmapResponse;
use crate::services::heatmap;
use crate::store::{EntryStore, StoreError};

/// Write and query operations over the entry store.
#[derive(Clone)]
pub struct EntryService {
    store: Arc<dyn EntryStore>,
}

impl EntryService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Validate and persist one entry on behalf of `session`.
    ///
    /// Every call inserts a new row; there is no deduplication.
    pub async fn create(&self, session: &Session, body: CreateEntryRequest) -> AppResult<MoodEntry> {
        let new_entry = validate_new_entry(&body)?;

        if new_entry.user_id != session.user_id {
            tracing::warn!(
                session_user = %session.user_id,
                body_user = %new_entry.user_id,
                "Entry submitted for another user"
            );
            return Err(AppError::Forbidden);
        }

        let stored = self.store.insert(new_entry).await?;

        tracing::info!(
            entry_id = %stored.id,
            user_id = %stored.user_id,
            entry_date = %stored.entry_date,
            "Mood entry created"
        );

        Ok(stored)
    }

    pub async fn list(&self, user_id: &str, range: DateRange) -> AppResult<Vec<MoodEntry>> {
        Ok(self.store.list_by_user(user_id, range).await?)
    }

    /// Calendar heatmap of `user_id`'s entries for one calendar year.
    pub async fn heatmap(&self, user_id: &str, year: i32) -> AppResult<HeatmapResponse> {
        let window = DateRange::calendar_year(year)
            .ok_or_else(|| AppError::invalid_fields(vec!["year"], "year is out of range"))?;

        let entries = self.store.list_by_user(user_id, window).await?;
        let points = heatmap::aggregate(&entries);

        Ok(HeatmapResponse {
            year,
            cells: heatmap::render(&points, window),
        })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}

/// The value as submitted, unless it is absent or only whitespace.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn json_field_name(field: &str) -> &'static str {
    match field {
        "user_id" => "userId",
        "entry_date" => "entryDate",
        "mood_color" => "moodColor",
        "reflection" => "reflection",
        "image_url" => "imageUrl",
        _ => "unknown",
    }
}

/// Turn a request body into an insertable entry, stamping id and timestamps.
///
/// Missing required fields are all reported at once, in declaration order.
pub fn validate_new_entry(body: &CreateEntryRequest) -> AppResult<NewMoodEntry> {
    let user_id = non_blank(&body.user_id);
    let entry_date = non_blank(&body.entry_date);
    let mood_color = non_blank(&body.mood_color);

    let mut missing = Vec::new();
    if user_id.is_none() {
        missing.push("userId");
    }
    if entry_date.is_none() {
        missing.push("entryDate");
    }
    if mood_color.is_none() {
        missing.push("moodColor");
    }

    let (Some(user_id), Some(entry_date), Some(mood_color)) = (user_id, entry_date, mood_color)
    else {
        return Err(AppError::missing_fields(missing));
    };

    if let Err(errors) = body.validate() {
        let mut fields: Vec<&'static str> = errors
            .field_errors()
            .keys()
            .map(|f| json_field_name(f))
            .collect();
        fields.sort_unstable();
        return Err(AppError::invalid_fields(fields, errors.to_string()));
    }

    let entry_date = NaiveDate::parse_from_str(entry_date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::invalid_fields(vec!["entryDate"], "entryDate must be a date in YYYY-MM-DD format")
    })?;

    Ok(NewMoodEntry {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        entry_date,
        mood_color: mood_color.to_string(),
        reflection: body.reflection.clone(),
        image_url: non_blank(&body.image_url).map(str::to_string),
        created_at: Utc::now(),
    })
}
