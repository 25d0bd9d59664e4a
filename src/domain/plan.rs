use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::{DomainValidationError, DurationDays, Money, PlanId, required_text};

/// 会員プラン（料金と有効日数を持つテンプレート）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipPlan {
    pub id: PlanId,
    pub name: String,
    pub price: Money,
    pub duration_days: DurationDays,
}

impl MembershipPlan {
    /// 支払日からのプラン失効日時
    ///
    /// 表現可能な日時の範囲を超える場合は None
    pub fn expiry_from(&self, paid_on: DateTime<Utc>) -> Option<DateTime<Utc>> {
        paid_on.checked_add_signed(Duration::days(i64::from(self.duration_days.value())))
    }
}

/// 新規プラン（永続化前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlan {
    pub name: String,
    pub price: Money,
    pub duration_days: DurationDays,
}

impl NewPlan {
    pub fn new(name: &str, price: Decimal, duration_days: i32) -> Result<Self, DomainValidationError> {
        Ok(Self {
            name: required_text("Name", name)?,
            price: Money::new(price)?,
            duration_days: DurationDays::new(duration_days)?,
        })
    }
}
