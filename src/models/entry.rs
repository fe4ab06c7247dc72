use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// One persisted journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: String,
    pub entry_date: NaiveDate,
    pub mood_color: String,
    pub reflection: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated entry with its server-derived identity, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMoodEntry {
    pub id: Uuid,
    pub user_id: String,
    pub entry_date: NaiveDate,
    pub mood_color: String,
    pub reflection: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewMoodEntry {
    pub fn into_entry(self) -> MoodEntry {
        MoodEntry {
            id: self.id,
            user_id: self.user_id,
            entry_date: self.entry_date,
            mood_color: self.mood_color,
            reflection: self.reflection,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// POST /api/entries
///
/// Required fields are optional here so that absent and blank values are
/// reported the same way, by name. `createdAt`/`updatedAt` sent by older
/// clients are ignored; the server stamps both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 128, message = "userId must be at most 128 characters"))]
    pub user_id: Option<String>,

    /// Calendar date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 64, message = "moodColor must be at most 64 characters"))]
    pub mood_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 10000, message = "reflection must be at most 10000 characters"))]
    pub reflection: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// January 1st through December 31st of `year`.
    pub fn calendar_year(year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}
