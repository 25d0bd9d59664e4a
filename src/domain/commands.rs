use chrono::{DateTime, Utc};

use super::{ClassId, InvoiceId, MemberId, PlanId, auth::PlainPassword, Email};

/// コマンド：クラスを予約する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBooking {
    pub class_id: ClassId,
    pub member_id: MemberId,
    pub booked_at: DateTime<Utc>,
}

/// コマンド：会員にプランを割り当て、請求書を発行する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignPlan {
    pub member_id: MemberId,
    pub plan_id: PlanId,
    pub assigned_at: DateTime<Utc>,
}

/// コマンド：請求書を支払済みにする
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayInvoice {
    pub invoice_id: InvoiceId,
    pub paid_at: DateTime<Utc>,
}

/// コマンド：メールアドレスとパスワードでログインする
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    pub email: Email,
    pub password: PlainPassword,
}

/// コマンド：スタッフを登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterStaff {
    pub email: Email,
    pub password: PlainPassword,
}

/// コマンド：会員のパスワードを設定する（スタッフ操作）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetMemberPassword {
    pub member_id: MemberId,
    pub password: PlainPassword,
}
