use crate::domain::{
    MemberId, StaffId,
    auth::{Principal, Session, SessionToken},
};
use crate::ports::{Result, SessionStore as SessionStoreTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::rows::invalid_data;

/// PostgreSQLの行データをSessionに変換する
///
/// 持ち主は staff_id と member_id のどちらか一方だけが入っている。
fn map_row_to_session(row: &PgRow) -> Result<Session> {
    let staff_id: Option<i64> = row.try_get("staff_id")?;
    let member_id: Option<i64> = row.try_get("member_id")?;

    let principal = match (staff_id, member_id) {
        (Some(id), None) => Principal::Staff(StaffId::from_raw(id)),
        (None, Some(id)) => Principal::Member(MemberId::from_raw(id)),
        _ => return Err(invalid_data("session must belong to exactly one principal".to_string())),
    };

    Ok(Session {
        token: SessionToken::from_uuid(row.try_get("token")?),
        principal,
        issued_at: row.try_get("issued_at")?,
        expires_at: row.try_get("expires_at")?,
    })
}

/// SessionStoreのPostgreSQL実装
pub struct SessionStore {
    pool: PgPool,
}

impl SessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStoreTrait for SessionStore {
    async fn save(&self, session: Session) -> Result<()> {
        let (staff_id, member_id) = match session.principal {
            Principal::Staff(id) => (Some(id.value()), None),
            Principal::Member(id) => (None, Some(id.value())),
        };

        sqlx::query(
            r#"
            INSERT INTO sessions (token, staff_id, member_id, issued_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.token.value())
        .bind(staff_id)
        .bind(member_id)
        .bind(session.issued_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, token: SessionToken) -> Result<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT token, staff_id, member_id, issued_at, expires_at
            FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_session).transpose()
    }

    async fn revoke(&self, token: SessionToken) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
