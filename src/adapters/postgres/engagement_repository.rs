//! PostgreSQL implementations of the favorites and click ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::engagement::{ActivityClick, Favorite};
use crate::domain::foundation::{ActivityId, DomainError, Timestamp, UserId};
use crate::ports::{ClickRecorder, FavoriteRepository};

/// PostgreSQL implementation of the FavoriteRepository port.
pub struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FavoriteRow {
    user_id: String,
    activity_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<FavoriteRow> for Favorite {
    type Error = DomainError;

    fn try_from(row: FavoriteRow) -> Result<Self, Self::Error> {
        Ok(Favorite {
            user_id: UserId::new(row.user_id)
                .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?,
            activity_id: ActivityId::from_uuid(row.activity_id),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn add(&self, favorite: &Favorite) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, activity_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, activity_id) DO NOTHING
            "#,
        )
        .bind(favorite.user_id.as_str())
        .bind(favorite.activity_id.as_uuid())
        .bind(favorite.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to add favorite: {}", e)))?;
        Ok(())
    }

    async fn remove(&self, user_id: &UserId, activity_id: &ActivityId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND activity_id = $2")
            .bind(user_id.as_str())
            .bind(activity_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to remove favorite: {}", e)))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Favorite>, DomainError> {
        let rows: Vec<FavoriteRow> = sqlx::query_as(
            r#"
            SELECT user_id, activity_id, created_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list favorites: {}", e)))?;

        rows.into_iter().map(Favorite::try_from).collect()
    }
}

/// PostgreSQL implementation of the ClickRecorder port.
pub struct PostgresClickRecorder {
    pool: PgPool,
}

impl PostgresClickRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRecorder for PostgresClickRecorder {
    async fn record(&self, click: &ActivityClick) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO activity_clicks (activity_id, user_id, occurred_at) VALUES ($1, $2, $3)",
        )
        .bind(click.activity_id.as_uuid())
        .bind(click.user_id.as_ref().map(UserId::as_str))
        .bind(click.occurred_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to record click: {}", e)))?;
        Ok(())
    }
}
