use crate::application::{auth::LoginGrant, billing::PlanAssignment, membership::MemberProfile};
use crate::domain::{
    auth::{Identity, StaffUser},
    booking::{Booking, UpcomingBooking},
    gym_class::GymClass,
    invoice::{Invoice, InvoiceWithMember},
    member::Member,
    plan::MembershipPlan,
    profile::ProfileKpis,
    schedule::{PersonalSchedule, weekday_name},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// 予約レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    pub class_id: i64,
    pub member_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.value(),
            class_id: booking.class_id.value(),
            member_id: booking.member_id.value(),
            created_at: booking.created_at,
        }
    }
}

/// 会員レスポンス（パスワードハッシュは含めない）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: &'static str,
    pub join_date: DateTime<Utc>,
    pub membership_plan_id: Option<i64>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.value(),
            full_name: member.full_name,
            email: member.email.as_str().to_string(),
            phone_number: member.phone_number,
            status: member.status.as_str(),
            join_date: member.join_date,
            membership_plan_id: member.membership_plan_id.map(|id| id.value()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub duration_days: i32,
}

impl From<MembershipPlan> for PlanResponse {
    fn from(plan: MembershipPlan) -> Self {
        Self {
            id: plan.id.value(),
            name: plan.name,
            price: plan.price.value(),
            duration_days: plan.duration_days.value(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassResponse {
    pub id: i64,
    pub title: String,
    pub trainer_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: i32,
}

impl From<GymClass> for ClassResponse {
    fn from(class: GymClass) -> Self {
        Self {
            id: class.id.value(),
            title: class.title,
            trainer_name: class.trainer_name,
            start_time: class.start_time,
            end_time: class.end_time,
            capacity: class.capacity.value(),
        }
    }
}

/// 請求書レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: i64,
    pub member_id: i64,
    pub amount: Decimal,
    pub status: &'static str,
    pub due_date: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.value(),
            member_id: invoice.member_id.value(),
            amount: invoice.amount.value(),
            status: invoice.status.as_str(),
            due_date: invoice.due_date,
            paid_at: invoice.paid_at,
            created_at: invoice.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceMemberResponse {
    pub id: i64,
    pub full_name: String,
}

/// 請求書一覧の要素（会員の氏名付き）
#[derive(Debug, Serialize)]
pub struct InvoiceListItem {
    #[serde(flatten)]
    pub invoice: InvoiceResponse,
    pub member: InvoiceMemberResponse,
}

impl From<InvoiceWithMember> for InvoiceListItem {
    fn from(item: InvoiceWithMember) -> Self {
        Self {
            invoice: item.invoice.into(),
            member: InvoiceMemberResponse {
                id: item.member.id.value(),
                full_name: item.member.full_name,
            },
        }
    }
}

/// POST /invoices/assign のレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAssignmentResponse {
    pub updated_member: MemberResponse,
    pub new_invoice: InvoiceResponse,
}

impl From<PlanAssignment> for PlanAssignmentResponse {
    fn from(assignment: PlanAssignment) -> Self {
        Self {
            updated_member: assignment.member.into(),
            new_invoice: assignment.invoice.into(),
        }
    }
}

/// 個人スケジュールレスポンス
///
/// 時刻は `HH:MM`、曜日は英語名で返す。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub id: i64,
    pub member_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub is_recurring: bool,
    pub recurring_days: Vec<&'static str>,
}

impl From<PersonalSchedule> for ScheduleResponse {
    fn from(schedule: PersonalSchedule) -> Self {
        let entry = schedule.entry;
        Self {
            id: schedule.id.value(),
            member_id: schedule.member_id.value(),
            title: entry.title,
            description: entry.description,
            date: entry.date,
            start_time: entry.start_time.format("%H:%M").to_string(),
            end_time: entry.end_time.format("%H:%M").to_string(),
            kind: entry.kind.as_str(),
            is_recurring: entry.is_recurring,
            recurring_days: entry.recurring_days.into_iter().map(weekday_name).collect(),
        }
    }
}

/// プロフィール内の予約（クラス情報付き）
#[derive(Debug, Serialize)]
pub struct ProfileBookingResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub class: ClassResponse,
}

impl From<UpcomingBooking> for ProfileBookingResponse {
    fn from(upcoming: UpcomingBooking) -> Self {
        Self {
            booking: upcoming.booking.into(),
            class: upcoming.class.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberDetailsResponse {
    #[serde(flatten)]
    pub member: MemberResponse,
    pub plan: Option<PlanResponse>,
    pub bookings: Vec<ProfileBookingResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiResponse {
    pub pending_invoices_count: usize,
    pub total_amount_paid: Decimal,
    pub plan_expiry_date: Option<DateTime<Utc>>,
    pub days_remaining: i64,
}

impl From<ProfileKpis> for KpiResponse {
    fn from(kpis: ProfileKpis) -> Self {
        Self {
            pending_invoices_count: kpis.pending_invoices_count,
            total_amount_paid: kpis.total_amount_paid,
            plan_expiry_date: kpis.plan_expiry_date,
            days_remaining: kpis.days_remaining,
        }
    }
}

/// GET /my-profile/:memberId のレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub member_details: MemberDetailsResponse,
    pub invoices: Vec<InvoiceResponse>,
    pub kpis: KpiResponse,
}

impl From<MemberProfile> for ProfileResponse {
    fn from(profile: MemberProfile) -> Self {
        Self {
            member_details: MemberDetailsResponse {
                member: profile.member.into(),
                plan: profile.plan.map(PlanResponse::from),
                bookings: profile
                    .upcoming_bookings
                    .into_iter()
                    .map(ProfileBookingResponse::from)
                    .collect(),
            },
            invoices: profile.invoices.into_iter().map(InvoiceResponse::from).collect(),
            kpis: profile.kpis.into(),
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StaffUserResponse {
    pub id: i64,
    pub email: String,
}

impl From<StaffUser> for StaffUserResponse {
    fn from(user: StaffUser) -> Self {
        Self {
            id: user.id.value(),
            email: user.email.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberIdentityResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
}

/// ログイン中の利用者
///
/// スタッフは `{"user": {...}}`、会員は `{"member": {...}}` になる。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentityResponse {
    User(StaffUserResponse),
    Member(MemberIdentityResponse),
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        match identity {
            Identity::Staff { id, email } => IdentityResponse::User(StaffUserResponse {
                id: id.value(),
                email: email.as_str().to_string(),
            }),
            Identity::Member {
                id,
                email,
                full_name,
            } => IdentityResponse::Member(MemberIdentityResponse {
                id: id.value(),
                email: email.as_str().to_string(),
                full_name,
            }),
        }
    }
}

/// ログイン成功レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub msg: &'static str,
    pub token: Uuid,
    pub expires_at: DateTime<Utc>,
    #[serde(flatten)]
    pub identity: IdentityResponse,
}

impl From<LoginGrant> for LoginResponse {
    fn from(grant: LoginGrant) -> Self {
        Self {
            msg: "Login successful!",
            token: grant.session.token.value(),
            expires_at: grant.session.expires_at,
            identity: grant.identity.into(),
        }
    }
}

/// `{"msg": "..."}`
#[derive(Debug, Serialize)]
pub struct MsgResponse {
    pub msg: &'static str,
}

/// `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
