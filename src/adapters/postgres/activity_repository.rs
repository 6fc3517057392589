//! PostgreSQL implementation of ActivityRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::activity::{Activity, ActivityFields, ActivityFilter, PublicationStatus};
use crate::domain::foundation::{ActivityId, CompanyId, DomainError, ErrorCode, Timestamp};
use crate::ports::ActivityRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, company_id, title, description, category, age_min, age_max,
           price_cents, address, city, province, postal_code, latitude, longitude,
           images, published, created_at, updated_at
    FROM activities
"#;

/// PostgreSQL implementation of the ActivityRepository port.
pub struct PostgresActivityRepository {
    pool: PgPool,
}

impl PostgresActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a listing.
#[derive(Debug, sqlx::FromRow)]
struct ActivityRow {
    id: Uuid,
    company_id: Uuid,
    title: String,
    description: String,
    category: String,
    age_min: i32,
    age_max: i32,
    price_cents: i64,
    address: String,
    city: String,
    province: String,
    postal_code: String,
    latitude: f64,
    longitude: f64,
    images: Vec<String>,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = DomainError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        if row.age_min > row.age_max || row.price_cents < 0 {
            return Err(DomainError::database(format!(
                "Stored activity {} violates content rules",
                row.id
            )));
        }

        Ok(Activity::reconstitute(
            ActivityId::from_uuid(row.id),
            CompanyId::from_uuid(row.company_id),
            ActivityFields {
                title: row.title,
                description: row.description,
                category: row.category,
                age_min: row.age_min,
                age_max: row.age_max,
                price_cents: row.price_cents,
                address: row.address,
                city: row.city,
                province: row.province,
                postal_code: row.postal_code,
                latitude: row.latitude,
                longitude: row.longitude,
                images: row.images,
            },
            PublicationStatus::from_published(row.published),
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

fn not_found(id: &ActivityId) -> DomainError {
    DomainError::new(ErrorCode::ActivityNotFound, format!("Activity not found: {}", id))
}

fn into_activities(rows: Vec<ActivityRow>) -> Result<Vec<Activity>, DomainError> {
    rows.into_iter().map(Activity::try_from).collect()
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError> {
        let row: Option<ActivityRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch activity", e))?;

        row.map(Activity::try_from).transpose()
    }

    async fn find_owned(
        &self,
        company_id: &CompanyId,
        id: &ActivityId,
    ) -> Result<Option<Activity>, DomainError> {
        let row: Option<ActivityRow> = sqlx::query_as(&format!(
            "{} WHERE id = $1 AND company_id = $2",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(company_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch activity", e))?;

        row.map(Activity::try_from).transpose()
    }

    async fn create(&self, activity: &Activity) -> Result<(), DomainError> {
        let d = &activity.details;
        sqlx::query(
            r#"
            INSERT INTO activities (
                id, company_id, title, description, category, age_min, age_max,
                price_cents, address, city, province, postal_code, latitude, longitude,
                images, published, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(activity.id.as_uuid())
        .bind(activity.company_id.as_uuid())
        .bind(&d.title)
        .bind(&d.description)
        .bind(&d.category)
        .bind(d.age_min)
        .bind(d.age_max)
        .bind(d.price_cents)
        .bind(&d.address)
        .bind(&d.city)
        .bind(&d.province)
        .bind(&d.postal_code)
        .bind(d.latitude)
        .bind(d.longitude)
        .bind(&d.images)
        .bind(activity.is_published())
        .bind(activity.created_at.as_datetime())
        .bind(activity.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("activities_company_id_fkey") {
                    return DomainError::new(ErrorCode::CompanyNotFound, "Company not found");
                }
            }
            db_error("Failed to create activity", e)
        })?;

        Ok(())
    }

    async fn update(&self, activity: &Activity) -> Result<(), DomainError> {
        let d = &activity.details;
        let result = sqlx::query(
            r#"
            UPDATE activities SET
                title = $2,
                description = $3,
                category = $4,
                age_min = $5,
                age_max = $6,
                price_cents = $7,
                address = $8,
                city = $9,
                province = $10,
                postal_code = $11,
                latitude = $12,
                longitude = $13,
                images = $14,
                published = $15,
                updated_at = $16
            WHERE id = $1
            "#,
        )
        .bind(activity.id.as_uuid())
        .bind(&d.title)
        .bind(&d.description)
        .bind(&d.category)
        .bind(d.age_min)
        .bind(d.age_max)
        .bind(d.price_cents)
        .bind(&d.address)
        .bind(&d.city)
        .bind(&d.province)
        .bind(&d.postal_code)
        .bind(d.latitude)
        .bind(d.longitude)
        .bind(&d.images)
        .bind(activity.is_published())
        .bind(activity.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update activity", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&activity.id));
        }
        Ok(())
    }

    async fn set_published(&self, id: &ActivityId, published: bool) -> Result<(), DomainError> {
        // Only touch updated_at when the flag actually flips.
        let result = sqlx::query(
            r#"
            UPDATE activities SET
                published = $2,
                updated_at = CASE WHEN published = $2 THEN updated_at ELSE NOW() END
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(published)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to set published flag", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: &ActivityId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete activity", e))?;
        Ok(())
    }

    async fn list_published(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, DomainError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_COLUMNS);
        query.push(" WHERE published = TRUE");
        if let Some(category) = filter.category() {
            query.push(" AND LOWER(category) = LOWER(").push_bind(category.to_string()).push(")");
        }
        if let Some(city) = filter.city() {
            query.push(" AND LOWER(city) = LOWER(").push_bind(city.to_string()).push(")");
        }
        query
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(i64::from(filter.page_size()))
            .push(" OFFSET ")
            .push_bind(i64::from(filter.page_offset()));

        let rows: Vec<ActivityRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list activities", e))?;

        into_activities(rows)
    }

    async fn list_published_by_ids(&self, ids: &[ActivityId]) -> Result<Vec<Activity>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<ActivityRow> = sqlx::query_as(&format!(
            "{} WHERE published = TRUE AND id = ANY($1) ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list activities", e))?;

        into_activities(rows)
    }

    async fn list_by_company(&self, company_id: &CompanyId) -> Result<Vec<Activity>, DomainError> {
        let rows: Vec<ActivityRow> = sqlx::query_as(&format!(
            "{} WHERE company_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(company_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list company activities", e))?;

        into_activities(rows)
    }
}
