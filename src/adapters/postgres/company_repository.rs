//! PostgreSQL implementation of CompanyRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::company::{Company, SubscriptionState};
use crate::domain::foundation::{CompanyId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::CompanyRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, name, subscription_id, current_period_end, price_id,
           customer_id, created_at, updated_at
    FROM companies
"#;

/// PostgreSQL implementation of the CompanyRepository port.
pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(
        &self,
        clause: &str,
        value: impl AsRef<str>,
    ) -> Result<Option<Company>, DomainError> {
        let row: Option<CompanyRow> =
            sqlx::query_as(&format!("{} WHERE {} = $1", SELECT_COLUMNS, clause))
                .bind(value.as_ref())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to fetch company: {}", e))
                })?;

        row.map(Company::try_from).transpose()
    }
}

/// Database row representation of a company.
#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    id: Uuid,
    user_id: String,
    name: String,
    subscription_id: Option<String>,
    current_period_end: Option<DateTime<Utc>>,
    price_id: Option<String>,
    customer_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CompanyRow> for Company {
    type Error = DomainError;

    fn try_from(row: CompanyRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?;

        Ok(Company {
            id: CompanyId::from_uuid(row.id),
            user_id,
            name: row.name,
            subscription: SubscriptionState {
                subscription_id: row.subscription_id,
                current_period_end: row.current_period_end.map(Timestamp::from_datetime),
                price_id: row.price_id,
                customer_id: row.customer_id,
            },
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn save(&self, company: &Company) -> Result<(), DomainError> {
        let sub = &company.subscription;
        sqlx::query(
            r#"
            INSERT INTO companies (
                id, user_id, name, subscription_id, current_period_end, price_id,
                customer_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(company.id.as_uuid())
        .bind(company.user_id.as_str())
        .bind(&company.name)
        .bind(&sub.subscription_id)
        .bind(sub.current_period_end.as_ref().map(Timestamp::as_datetime))
        .bind(&sub.price_id)
        .bind(&sub.customer_id)
        .bind(company.created_at.as_datetime())
        .bind(company.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("companies_user_id_key") {
                    return DomainError::validation("user_id", "User already operates a company");
                }
            }
            DomainError::database(format!("Failed to save company: {}", e))
        })?;

        Ok(())
    }

    async fn update_subscription(&self, company: &Company) -> Result<(), DomainError> {
        let sub = &company.subscription;
        let result = sqlx::query(
            r#"
            UPDATE companies SET
                subscription_id = $2,
                current_period_end = $3,
                price_id = $4,
                customer_id = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(company.id.as_uuid())
        .bind(&sub.subscription_id)
        .bind(sub.current_period_end.as_ref().map(Timestamp::as_datetime))
        .bind(&sub.price_id)
        .bind(&sub.customer_id)
        .bind(company.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update subscription: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CompanyNotFound,
                format!("Company not found: {}", company.id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, DomainError> {
        let row: Option<CompanyRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch company: {}", e)))?;

        row.map(Company::try_from).transpose()
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Company>, DomainError> {
        self.find_where("user_id", user_id.as_str()).await
    }

    async fn find_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Company>, DomainError> {
        self.find_where("subscription_id", subscription_id).await
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Option<Company>, DomainError> {
        self.find_where("customer_id", customer_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Role;

    #[test]
    fn row_maps_subscription_snapshot() {
        let end = Utc::now() + chrono::Duration::days(3);
        let row = CompanyRow {
            id: Uuid::new_v4(),
            user_id: "owner-1".to_string(),
            name: "Chess Club".to_string(),
            subscription_id: Some("sub_1".to_string()),
            current_period_end: Some(end),
            price_id: None,
            customer_id: Some("cus_1".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let company = Company::try_from(row).unwrap();

        assert_eq!(company.user_id.as_str(), "owner-1");
        assert!(company.entitlement(Role::Company, Timestamp::now()).is_allowed());
    }

    #[test]
    fn blank_user_id_in_storage_is_rejected() {
        let row = CompanyRow {
            id: Uuid::new_v4(),
            user_id: " ".to_string(),
            name: "Broken".to_string(),
            subscription_id: None,
            current_period_end: None,
            price_id: None,
            customer_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(Company::try_from(row).is_err());
    }
}
