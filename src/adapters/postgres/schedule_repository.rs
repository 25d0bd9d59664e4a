use crate::domain::{
    MemberId, ScheduleId,
    schedule::{
        DateWindow, PersonalSchedule, ScheduleEntry, ScheduleKind, parse_weekday, weekday_name,
    },
};
use crate::ports::{Result, ScheduleRepository as ScheduleRepositoryTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

use super::rows::invalid_data;

/// PostgreSQLの行データをPersonalScheduleに変換する
///
/// recurring_days は曜日名の TEXT[] として保存している。
fn map_row_to_schedule(row: &PgRow) -> Result<PersonalSchedule> {
    let kind: String = row.try_get("kind")?;
    let days: Vec<String> = row.try_get("recurring_days")?;
    let recurring_days = days
        .iter()
        .map(|day| parse_weekday(day).map_err(|e| invalid_data(e.to_string())))
        .collect::<Result<Vec<_>>>()?;

    Ok(PersonalSchedule {
        id: ScheduleId::from_raw(row.try_get("id")?),
        member_id: MemberId::from_raw(row.try_get("member_id")?),
        entry: ScheduleEntry {
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            date: row.try_get("date")?,
            start_time: row.try_get("start_time")?,
            end_time: row.try_get("end_time")?,
            kind: ScheduleKind::from_str(&kind)?,
            is_recurring: row.try_get("is_recurring")?,
            recurring_days,
        },
    })
}

fn day_names(entry: &ScheduleEntry) -> Vec<String> {
    entry
        .recurring_days
        .iter()
        .map(|day| weekday_name(*day).to_string())
        .collect()
}

/// ScheduleRepositoryのPostgreSQL実装
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepositoryTrait for ScheduleRepository {
    /// 会員の存在確認は外部キー制約に任せる
    async fn insert(
        &self,
        member_id: MemberId,
        entry: ScheduleEntry,
    ) -> Result<Option<PersonalSchedule>> {
        let result = sqlx::query(
            r#"
            INSERT INTO member_schedules (
                member_id,
                title,
                description,
                date,
                start_time,
                end_time,
                kind,
                is_recurring,
                recurring_days
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, member_id, title, description, date, start_time, end_time,
                      kind, is_recurring, recurring_days
            "#,
        )
        .bind(member_id.value())
        .bind(&entry.title)
        .bind(&entry.description)
        .bind(entry.date)
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(entry.kind.as_str())
        .bind(entry.is_recurring)
        .bind(day_names(&entry))
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(Some(map_row_to_schedule(&row)?)),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn list_for_member(&self, member_id: MemberId) -> Result<Vec<PersonalSchedule>> {
        let rows = sqlx::query(
            r#"
            SELECT id, member_id, title, description, date, start_time, end_time,
                   kind, is_recurring, recurring_days
            FROM member_schedules
            WHERE member_id = $1
            ORDER BY date ASC, start_time ASC, id ASC
            "#,
        )
        .bind(member_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_schedule).collect()
    }

    async fn list_within(
        &self,
        member_id: MemberId,
        window: DateWindow,
    ) -> Result<Vec<PersonalSchedule>> {
        let rows = sqlx::query(
            r#"
            SELECT id, member_id, title, description, date, start_time, end_time,
                   kind, is_recurring, recurring_days
            FROM member_schedules
            WHERE member_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date ASC, start_time ASC, id ASC
            "#,
        )
        .bind(member_id.value())
        .bind(window.from)
        .bind(window.to)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_schedule).collect()
    }

    async fn replace(
        &self,
        schedule_id: ScheduleId,
        entry: ScheduleEntry,
    ) -> Result<Option<PersonalSchedule>> {
        let row = sqlx::query(
            r#"
            UPDATE member_schedules
            SET title = $2,
                description = $3,
                date = $4,
                start_time = $5,
                end_time = $6,
                kind = $7,
                is_recurring = $8,
                recurring_days = $9
            WHERE id = $1
            RETURNING id, member_id, title, description, date, start_time, end_time,
                      kind, is_recurring, recurring_days
            "#,
        )
        .bind(schedule_id.value())
        .bind(&entry.title)
        .bind(&entry.description)
        .bind(entry.date)
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(entry.kind.as_str())
        .bind(entry.is_recurring)
        .bind(day_names(&entry))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_schedule).transpose()
    }

    async fn delete(&self, schedule_id: ScheduleId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM member_schedules WHERE id = $1")
            .bind(schedule_id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
