use crate::domain::{
    Email, MemberId,
    member::{Member, MemberChanges, NewMember},
};
use crate::ports::{
    MemberCredentials, MemberDeletion, MemberRepository as MemberRepositoryTrait, MemberWrite,
    Result,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::rows::map_row_to_member;

/// MemberRepositoryのPostgreSQL実装
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 一意制約違反（メールアドレス重複）かどうか
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl MemberRepositoryTrait for MemberRepository {
    /// 会員を登録する
    ///
    /// メールアドレスが既に使われている場合は ON CONFLICT で行が返らない。
    async fn insert(&self, member: NewMember) -> Result<MemberWrite> {
        let row = sqlx::query(
            r#"
            INSERT INTO members (full_name, email, phone_number, status, join_date)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, full_name, email, phone_number, status, join_date, membership_plan_id
            "#,
        )
        .bind(&member.full_name)
        .bind(member.email.as_str())
        .bind(&member.phone_number)
        .bind(member.status.as_str())
        .bind(member.join_date)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(MemberWrite::Saved(map_row_to_member(&row)?)),
            None => Ok(MemberWrite::EmailTaken),
        }
    }

    async fn list(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, email, phone_number, status, join_date, membership_plan_id
            FROM members
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_member).collect()
    }

    async fn get_by_id(&self, member_id: MemberId) -> Result<Option<Member>> {
        let row = sqlx::query(
            r#"
            SELECT id, full_name, email, phone_number, status, join_date, membership_plan_id
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(member_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_member).transpose()
    }

    /// 会員情報を部分更新する
    ///
    /// 行ロックを取って現在値を読み、変更を適用して書き戻す。
    async fn update(
        &self,
        member_id: MemberId,
        changes: MemberChanges,
    ) -> Result<Option<MemberWrite>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT id, full_name, email, phone_number, status, join_date, membership_plan_id
            FROM members
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(member_id.value())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let updated = changes.apply(&map_row_to_member(&row)?);

        let result = sqlx::query(
            r#"
            UPDATE members
            SET full_name = $2, email = $3, phone_number = $4, status = $5
            WHERE id = $1
            RETURNING id, full_name, email, phone_number, status, join_date, membership_plan_id
            "#,
        )
        .bind(member_id.value())
        .bind(&updated.full_name)
        .bind(updated.email.as_str())
        .bind(&updated.phone_number)
        .bind(updated.status.as_str())
        .fetch_one(&mut *tx)
        .await;

        match result {
            Ok(row) => {
                let member = map_row_to_member(&row)?;
                tx.commit().await?;
                Ok(Some(MemberWrite::Saved(member)))
            }
            Err(err) if is_unique_violation(&err) => Ok(Some(MemberWrite::EmailTaken)),
            Err(err) => Err(err.into()),
        }
    }

    /// 会員を削除する
    ///
    /// invoices の外部キーは RESTRICT のため、請求書が残っていると削除できない。
    async fn delete(&self, member_id: MemberId) -> Result<MemberDeletion> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(member_id.value())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Ok(MemberDeletion::NotFound),
            Ok(_) => Ok(MemberDeletion::Deleted),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Ok(MemberDeletion::HasInvoices)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn set_password_hash(&self, member_id: MemberId, password_hash: String) -> Result<bool> {
        let result = sqlx::query("UPDATE members SET password_hash = $2 WHERE id = $1")
            .bind(member_id.value())
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_credentials_by_email(&self, email: &Email) -> Result<Option<MemberCredentials>> {
        let row = sqlx::query(
            r#"
            SELECT id, full_name, email, phone_number, status, join_date, membership_plan_id,
                   password_hash
            FROM members
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(MemberCredentials {
                member: map_row_to_member(&row)?,
                password_hash: row.try_get("password_hash")?,
            })),
            None => Ok(None),
        }
    }
}
