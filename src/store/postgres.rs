use async_trait::async_trait;
use sqlx::PgPool;

use super::{EntryStore, StoreError};
use crate::models::entry::{DateRange, MoodEntry, NewMoodEntry};

#[derive(Clone)]
pub struct PgEntryStore {
    db: PgPool,
}

impl PgEntryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn insert(&self, entry: NewMoodEntry) -> Result<MoodEntry, StoreError> {
        let stored = sqlx::query_as::<_, MoodEntry>(
            r#"
            INSERT INTO mood_entries
                (id, user_id, entry_date, mood_color, reflection, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(entry.id)
        .bind(&entry.user_id)
        .bind(entry.entry_date)
        .bind(&entry.mood_color)
        .bind(&entry.reflection)
        .bind(&entry.image_url)
        .bind(entry.created_at)
        .fetch_one(&self.db)
        .await?;

        Ok(stored)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Vec<MoodEntry>, StoreError> {
        let entries = sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT * FROM mood_entries
            WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
            ORDER BY entry_date ASC, created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}
