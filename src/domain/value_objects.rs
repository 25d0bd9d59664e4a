use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 値オブジェクト生成時のバリデーションエラー
///
/// API層で400 Bad Requestに変換される。メッセージはそのままクライアントに返す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainValidationError {
    #[error("{0} is required.")]
    Required(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Capacity must be greater than zero.")]
    NonPositiveCapacity,

    #[error("Duration must be at least one day.")]
    NonPositiveDuration,

    #[error("Duration cannot exceed 36500 days.")]
    DurationTooLong,

    #[error("Price cannot be negative.")]
    NegativePrice,

    #[error("Price must be less than 10000000000.")]
    PriceTooLarge,

    #[error("Price cannot have more than 2 decimal places.")]
    PriceTooPrecise,

    #[error("End time must be after start time.")]
    EndBeforeStart,

    #[error("Start date must not be after end date.")]
    InvertedRange,

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid schedule type: {0}")]
    InvalidScheduleKind(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),
}

/// 連番IDの newtype を定義する
///
/// すべてのテーブルは BIGSERIAL 主キーを持つ。
/// 型でIDの取り違え（ClassIdとMemberIdなど）を防ぐ。
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn from_raw(value: i64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// 会員ID
    MemberId
);
entity_id!(
    /// 会員プランID
    PlanId
);
entity_id!(
    /// クラス（レッスン枠）ID
    ClassId
);
entity_id!(
    /// 予約ID
    BookingId
);
entity_id!(
    /// 請求書ID
    InvoiceId
);
entity_id!(
    /// 個人スケジュールID
    ScheduleId
);
entity_id!(
    /// スタッフID
    StaffId
);

/// メールアドレス
///
/// 前後の空白を除去し、小文字に正規化して保持する。
/// 一意制約は正規化後の値に対して効く。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, DomainValidationError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainValidationError::Required("Email"));
        }

        let valid = match normalized.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        };
        if !valid || normalized.chars().any(char::is_whitespace) {
            return Err(DomainValidationError::InvalidEmail(raw.to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// クラス定員
///
/// 不変条件：1以上
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity(i32);

impl Capacity {
    pub fn new(value: i32) -> Result<Self, DomainValidationError> {
        if value <= 0 {
            return Err(DomainValidationError::NonPositiveCapacity);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// プラン有効日数の上限（約100年）
pub const MAX_DURATION_DAYS: i32 = 36_500;

/// プラン有効日数
///
/// 不変条件：1以上、MAX_DURATION_DAYS 以下
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationDays(i32);

impl DurationDays {
    pub fn new(value: i32) -> Result<Self, DomainValidationError> {
        if value <= 0 {
            return Err(DomainValidationError::NonPositiveDuration);
        }
        if value > MAX_DURATION_DAYS {
            return Err(DomainValidationError::DurationTooLong);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// 金額の小数桁数（NUMERIC(12, 2) に合わせる）
pub const MONEY_SCALE: u32 = 2;

/// 金額
///
/// 不変条件：0以上、10^10 未満、小数2桁まで。
/// 浮動小数点の丸め誤差を避けるため Decimal で保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn new(value: Decimal) -> Result<Self, DomainValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainValidationError::NegativePrice);
        }
        if value >= Decimal::from(10_000_000_000_i64) {
            return Err(DomainValidationError::PriceTooLarge);
        }
        if value.normalize().scale() > MONEY_SCALE {
            return Err(DomainValidationError::PriceTooPrecise);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// 必須文字列フィールドの検証（前後空白を除去）
pub fn required_text(field: &'static str, value: &str) -> Result<String, DomainValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}
