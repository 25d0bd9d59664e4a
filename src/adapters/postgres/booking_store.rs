use crate::domain::{
    ClassId, MemberId,
    booking::{self, UpcomingBooking},
};
use crate::ports::{BookingStore as BookingStoreTrait, ReservationOutcome, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::rows::{map_row_to_booking, map_row_to_class};

/// BookingStoreのPostgreSQL実装
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    /// 定員チェック付きで予約を作成する
    ///
    /// クラス行を `SELECT ... FOR UPDATE` でロックしてから予約数を数える。
    /// 同じクラスへの予約はこのロックで直列化されるため、
    /// 数えた予約数はコミットまで変わらない。
    /// (class_id, member_id) の一意制約は重複予約の最後の砦として残す。
    async fn reserve(
        &self,
        class_id: ClassId,
        member_id: MemberId,
        booked_at: DateTime<Utc>,
    ) -> Result<ReservationOutcome> {
        let mut tx = self.pool.begin().await?;

        let class_row = sqlx::query(
            r#"
            SELECT id, title, trainer_name, start_time, end_time, capacity
            FROM classes
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(class_id.value())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(class_row) = class_row else {
            return Ok(ReservationOutcome::ClassNotFound);
        };
        let class = map_row_to_class(&class_row, "id")?;

        let member_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM members WHERE id = $1)")
                .bind(member_id.value())
                .fetch_one(&mut *tx)
                .await?;
        if !member_exists {
            return Ok(ReservationOutcome::MemberNotFound);
        }

        let booked: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE class_id = $1")
            .bind(class_id.value())
            .fetch_one(&mut *tx)
            .await?;

        let already_booked: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE class_id = $1 AND member_id = $2)",
        )
        .bind(class_id.value())
        .bind(member_id.value())
        .fetch_one(&mut *tx)
        .await?;

        if let Err(rejection) = booking::admit(&class, booked, already_booked) {
            return Ok(ReservationOutcome::Rejected(rejection));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO bookings (class_id, member_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (class_id, member_id) DO NOTHING
            RETURNING id, class_id, member_id, created_at
            "#,
        )
        .bind(class_id.value())
        .bind(member_id.value())
        .bind(booked_at)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(ReservationOutcome::Rejected(
                booking::BookingRejection::AlreadyBooked,
            ));
        };
        let created = map_row_to_booking(&row, "id")?;

        tx.commit().await?;
        Ok(ReservationOutcome::Booked(created))
    }

    /// 会員の今後の予約をクラス情報付きで取得する
    async fn upcoming_for_member(
        &self,
        member_id: MemberId,
        from: DateTime<Utc>,
    ) -> Result<Vec<UpcomingBooking>> {
        let rows = sqlx::query(
            r#"
            SELECT
                b.id AS booking_id,
                b.class_id,
                b.member_id,
                b.created_at,
                c.title,
                c.trainer_name,
                c.start_time,
                c.end_time,
                c.capacity
            FROM bookings b
            JOIN classes c ON c.id = b.class_id
            WHERE b.member_id = $1 AND c.start_time >= $2
            ORDER BY c.start_time ASC, b.id ASC
            "#,
        )
        .bind(member_id.value())
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(UpcomingBooking {
                    booking: map_row_to_booking(row, "booking_id")?,
                    class: map_row_to_class(row, "class_id")?,
                })
            })
            .collect()
    }
}
