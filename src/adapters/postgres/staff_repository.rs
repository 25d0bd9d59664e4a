use crate::domain::{Email, StaffId, auth::StaffUser};
use crate::ports::{Result, StaffCredentials, StaffRepository as StaffRepositoryTrait};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_staff(row: &PgRow) -> Result<StaffUser> {
    let email: String = row.try_get("email")?;

    Ok(StaffUser {
        id: StaffId::from_raw(row.try_get("id")?),
        email: Email::parse(&email)?,
        created_at: row.try_get("created_at")?,
    })
}

/// StaffRepositoryのPostgreSQL実装
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRepositoryTrait for StaffRepository {
    async fn insert(&self, email: Email, password_hash: String) -> Result<Option<StaffUser>> {
        let row = sqlx::query(
            r#"
            INSERT INTO staff_users (email, password_hash, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, created_at
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_staff).transpose()
    }

    async fn get_by_id(&self, staff_id: StaffId) -> Result<Option<StaffUser>> {
        let row = sqlx::query("SELECT id, email, created_at FROM staff_users WHERE id = $1")
            .bind(staff_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_staff).transpose()
    }

    async fn find_credentials_by_email(&self, email: &Email) -> Result<Option<StaffCredentials>> {
        let row = sqlx::query(
            "SELECT id, email, created_at, password_hash FROM staff_users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(StaffCredentials {
                user: map_row_to_staff(&row)?,
                password_hash: row.try_get("password_hash")?,
            })),
            None => Ok(None),
        }
    }
}
