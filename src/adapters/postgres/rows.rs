use crate::domain::{
    BookingId, Capacity, ClassId, DurationDays, Email, InvoiceId, MemberId, Money, PlanId,
    booking::Booking,
    gym_class::GymClass,
    invoice::{Invoice, InvoiceStatus},
    member::{Member, MemberStatus},
    plan::MembershipPlan,
};
use crate::ports::Result;
use sqlx::{Row, postgres::PgRow};
use std::str::FromStr;

/// 保存済みデータが不変条件を満たさない場合のエラー
pub(super) fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

/// PostgreSQLの行データをMemberに変換する
///
/// members テーブルの列名（id, full_name, ...）をそのまま読む。
pub(super) fn map_row_to_member(row: &PgRow) -> Result<Member> {
    let email: String = row.try_get("email")?;
    let status: String = row.try_get("status")?;
    let plan_id: Option<i64> = row.try_get("membership_plan_id")?;

    Ok(Member {
        id: MemberId::from_raw(row.try_get("id")?),
        full_name: row.try_get("full_name")?,
        email: Email::parse(&email)?,
        phone_number: row.try_get("phone_number")?,
        status: MemberStatus::from_str(&status)?,
        join_date: row.try_get("join_date")?,
        membership_plan_id: plan_id.map(PlanId::from_raw),
    })
}

pub(super) fn map_row_to_plan(row: &PgRow) -> Result<MembershipPlan> {
    Ok(MembershipPlan {
        id: PlanId::from_raw(row.try_get("id")?),
        name: row.try_get("name")?,
        price: Money::new(row.try_get("price")?)?,
        duration_days: DurationDays::new(row.try_get("duration_days")?)?,
    })
}

/// PostgreSQLの行データをGymClassに変換する
///
/// JOIN で読む場合に備えて、ID列名を指定できる。
pub(super) fn map_row_to_class(row: &PgRow, id_column: &str) -> Result<GymClass> {
    Ok(GymClass {
        id: ClassId::from_raw(row.try_get(id_column)?),
        title: row.try_get("title")?,
        trainer_name: row.try_get("trainer_name")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        capacity: Capacity::new(row.try_get("capacity")?)?,
    })
}

pub(super) fn map_row_to_booking(row: &PgRow, id_column: &str) -> Result<Booking> {
    Ok(Booking {
        id: BookingId::from_raw(row.try_get(id_column)?),
        class_id: ClassId::from_raw(row.try_get("class_id")?),
        member_id: MemberId::from_raw(row.try_get("member_id")?),
        created_at: row.try_get("created_at")?,
    })
}

pub(super) fn map_row_to_invoice(row: &PgRow) -> Result<Invoice> {
    let status: String = row.try_get("status")?;

    Ok(Invoice {
        id: InvoiceId::from_raw(row.try_get("id")?),
        member_id: MemberId::from_raw(row.try_get("member_id")?),
        amount: Money::new(row.try_get("amount")?)?,
        status: InvoiceStatus::from_str(&status)?,
        due_date: row.try_get("due_date")?,
        paid_at: row.try_get("paid_at")?,
        created_at: row.try_get("created_at")?,
    })
}
