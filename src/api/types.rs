use crate::application::ApplicationError;
use crate::domain::{
    ClassId, DomainValidationError, Email, MemberId, PlanId,
    auth::PlainPassword,
    commands::{AssignPlan, CreateBooking, Login, RegisterStaff, SetMemberPassword},
    gym_class::NewClass,
    member::{MemberChanges, NewMember},
    plan::NewPlan,
    schedule::{DateWindow, ScheduleEntry, ScheduleKind, parse_weekday},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// リクエストのフィールドはすべて Option で受け取り、
// 欠けていれば to_* の変換時に 400 として返す。

// ============================================================================
// Parsing helpers
// ============================================================================

/// 数値または数値文字列
///
/// フォームから送られる値は `"30"` のような文字列になることがあるため、両方を受け付ける。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexibleNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FlexibleNumber {
    pub fn to_i64(&self, field: &'static str) -> Result<i64, ApplicationError> {
        match self {
            FlexibleNumber::Integer(n) => Ok(*n),
            FlexibleNumber::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(*f as i64),
            FlexibleNumber::Float(_) => Err(not_an_integer(field)),
            FlexibleNumber::Text(s) => s.trim().parse().map_err(|_| not_an_integer(field)),
        }
    }

    pub fn to_i32(&self, field: &'static str) -> Result<i32, ApplicationError> {
        i32::try_from(self.to_i64(field)?).map_err(|_| not_an_integer(field))
    }

    pub fn to_decimal(&self, field: &'static str) -> Result<Decimal, ApplicationError> {
        let parsed = match self {
            FlexibleNumber::Integer(n) => Some(Decimal::from(*n)),
            FlexibleNumber::Float(f) => Decimal::try_from(*f).ok(),
            FlexibleNumber::Text(s) => Decimal::from_str(s.trim()).ok(),
        };
        parsed.ok_or_else(|| invalid(format!("{field} must be a number.")))
    }
}

fn invalid(message: String) -> ApplicationError {
    ApplicationError::Validation(message)
}

fn not_an_integer(field: &'static str) -> ApplicationError {
    invalid(format!("{field} must be an integer."))
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ApplicationError> {
    value.ok_or_else(|| DomainValidationError::Required(field).into())
}

/// ISO 8601 のタイムスタンプを解釈する
///
/// タイムゾーンのない値（`2026-05-01T10:00`）はUTCとして扱う。
pub fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>, ApplicationError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(invalid(format!("{field} must be an ISO 8601 timestamp.")))
}

/// `YYYY-MM-DD` の日付を解釈する。タイムスタンプが来た場合は日付部分だけを使う
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ApplicationError> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| invalid(format!("{field} must be a date (YYYY-MM-DD).")))
}

/// `HH:MM` または `HH:MM:SS` の時刻を解釈する
pub fn parse_time(field: &'static str, raw: &str) -> Result<NaiveTime, ApplicationError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| invalid(format!("{field} must be a time (HH:MM).")))
}

// ============================================================================
// Requests
// ============================================================================

/// POST /bookings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub class_id: Option<FlexibleNumber>,
    pub member_id: Option<FlexibleNumber>,
}

impl CreateBookingRequest {
    pub fn to_command(&self, booked_at: DateTime<Utc>) -> Result<CreateBooking, ApplicationError> {
        Ok(CreateBooking {
            class_id: ClassId::from_raw(
                required("Class ID", self.class_id.as_ref())?.to_i64("Class ID")?,
            ),
            member_id: MemberId::from_raw(
                required("Member ID", self.member_id.as_ref())?.to_i64("Member ID")?,
            ),
            booked_at,
        })
    }
}

/// POST /invoices/assign
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPlanRequest {
    pub member_id: Option<FlexibleNumber>,
    pub plan_id: Option<FlexibleNumber>,
}

impl AssignPlanRequest {
    pub fn to_command(&self, assigned_at: DateTime<Utc>) -> Result<AssignPlan, ApplicationError> {
        Ok(AssignPlan {
            member_id: MemberId::from_raw(
                required("Member ID", self.member_id.as_ref())?.to_i64("Member ID")?,
            ),
            plan_id: PlanId::from_raw(
                required("Plan ID", self.plan_id.as_ref())?.to_i64("Plan ID")?,
            ),
            assigned_at,
        })
    }
}

/// POST /classes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub title: Option<String>,
    pub trainer_name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub capacity: Option<FlexibleNumber>,
}

impl CreateClassRequest {
    pub fn to_new_class(&self) -> Result<NewClass, ApplicationError> {
        let title = required("Title", self.title.as_deref())?;
        let start_time = required("Start time", self.start_time.as_deref())?;
        let start_time = parse_timestamp("Start time", start_time)?;
        let end_time = required("End time", self.end_time.as_deref())?;
        let end_time = parse_timestamp("End time", end_time)?;
        let capacity = required("Capacity", self.capacity.as_ref())?.to_i32("Capacity")?;

        Ok(NewClass::new(
            title,
            self.trainer_name.as_deref(),
            start_time,
            end_time,
            capacity,
        )?)
    }
}

/// POST /members
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl CreateMemberRequest {
    pub fn to_new_member(&self, joined_at: DateTime<Utc>) -> Result<NewMember, ApplicationError> {
        Ok(NewMember::register(
            required("Full name", self.full_name.as_deref())?,
            required("Email", self.email.as_deref())?,
            self.phone_number.as_deref(),
            joined_at,
        )?)
    }
}

/// PUT /members/:id（部分更新）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub status: Option<String>,
}

impl UpdateMemberRequest {
    pub fn to_changes(&self) -> Result<MemberChanges, ApplicationError> {
        Ok(MemberChanges::parse(
            self.full_name.as_deref(),
            self.email.as_deref(),
            self.phone_number.as_deref(),
            self.status.as_deref(),
        )?)
    }
}

/// POST /plans
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    pub name: Option<String>,
    pub price: Option<FlexibleNumber>,
    pub duration_days: Option<FlexibleNumber>,
}

impl CreatePlanRequest {
    pub fn to_new_plan(&self) -> Result<NewPlan, ApplicationError> {
        let name = required("Name", self.name.as_deref())?;
        let price = required("Price", self.price.as_ref())?.to_decimal("Price")?;
        let duration_days =
            required("Duration days", self.duration_days.as_ref())?.to_i32("Duration days")?;

        Ok(NewPlan::new(name, price, duration_days)?)
    }
}

/// 繰り返し曜日
///
/// 配列でも、配列をJSONエンコードした文字列でも受け付ける。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecurringDays {
    List(Vec<String>),
    Encoded(String),
}

impl RecurringDays {
    fn names(&self) -> Result<Vec<String>, ApplicationError> {
        match self {
            RecurringDays::List(days) => Ok(days.clone()),
            RecurringDays::Encoded(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            RecurringDays::Encoded(raw) => serde_json::from_str(raw)
                .map_err(|_| invalid("Recurring days must be a list of weekdays.".to_string())),
        }
    }
}

/// POST /schedule/member/:memberId と PUT /schedule/:id
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub is_recurring: Option<bool>,
    pub recurring_days: Option<RecurringDays>,
}

impl ScheduleRequest {
    pub fn to_entry(&self) -> Result<ScheduleEntry, ApplicationError> {
        let title = required("Title", self.title.as_deref())?;
        let date = parse_date("Date", required("Date", self.date.as_deref())?)?;
        let start_time = required("Start time", self.start_time.as_deref())?;
        let start_time = parse_time("Start time", start_time)?;
        let end_time = required("End time", self.end_time.as_deref())?;
        let end_time = parse_time("End time", end_time)?;

        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") => ScheduleKind::default(),
            Some(raw) => raw.parse()?,
        };

        let recurring_days = match &self.recurring_days {
            Some(days) => days
                .names()?
                .iter()
                .map(|name| parse_weekday(name))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(ScheduleEntry::new(
            title,
            self.description.as_deref(),
            date,
            start_time,
            end_time,
            kind,
            self.is_recurring.unwrap_or(false),
            recurring_days,
        )?)
    }
}

/// GET /schedule/member/:memberId/range
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    pub fn to_window(&self) -> Result<DateWindow, ApplicationError> {
        let from = parse_date("Start date", required("Start date", self.start_date.as_deref())?)?;
        let to = parse_date("End date", required("End date", self.end_date.as_deref())?)?;
        Ok(DateWindow::new(from, to)?)
    }
}

/// POST /auth/register, /auth/login, /member-auth/login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn parts(&self) -> Result<(Email, PlainPassword), ApplicationError> {
        let email = Email::parse(required("Email", self.email.as_deref())?)?;
        let password = PlainPassword::new(required("Password", self.password.as_deref())?)?;
        Ok((email, password))
    }

    pub fn to_login(&self) -> Result<Login, ApplicationError> {
        let (email, password) = self.parts()?;
        Ok(Login { email, password })
    }

    pub fn to_registration(&self) -> Result<RegisterStaff, ApplicationError> {
        let (email, password) = self.parts()?;
        Ok(RegisterStaff { email, password })
    }
}

/// POST /member-auth/set-password
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPasswordRequest {
    pub member_id: Option<FlexibleNumber>,
    pub password: Option<String>,
}

impl SetPasswordRequest {
    pub fn to_command(&self) -> Result<SetMemberPassword, ApplicationError> {
        Ok(SetMemberPassword {
            member_id: MemberId::from_raw(
                required("Member ID", self.member_id.as_ref())?.to_i64("Member ID")?,
            ),
            password: PlainPassword::new(required("Password", self.password.as_deref())?)?,
        })
    }
}

// ============================================================================
// Errors
// ============================================================================

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            error: message.into(),
        }
    }
}
