use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DomainValidationError, InvoiceId, MemberId, Money, plan::MembershipPlan};

/// 請求書ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// 未払い
    Pending,
    /// 支払済み
    Paid,
    /// 延滞
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = DomainValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(InvoiceStatus::Pending),
            "Paid" => Ok(InvoiceStatus::Paid),
            "Overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(DomainValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// 請求書
///
/// 不変条件：
/// - amount は発行時点のプラン料金
/// - Paid になった後はステータス以外変更されない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub member_id: MemberId,
    pub amount: Money,
    pub status: InvoiceStatus,
    pub due_date: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// 新規請求書（永続化前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub member_id: MemberId,
    pub amount: Money,
    pub status: InvoiceStatus,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// 一覧表示用の会員サマリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSummary {
    pub id: MemberId,
    pub full_name: String,
}

/// 会員情報付きの請求書（請求書一覧用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceWithMember {
    pub invoice: Invoice,
    pub member: MemberSummary,
}

/// 純粋関数：プラン割り当てに対する請求書を発行する
///
/// ビジネスルール：
/// - 金額はプラン料金
/// - ステータスは Pending
/// - 支払期限は発行時点（即時）
pub fn issue_for_plan(
    member_id: MemberId,
    plan: &MembershipPlan,
    issued_at: DateTime<Utc>,
) -> NewInvoice {
    NewInvoice {
        member_id,
        amount: plan.price,
        status: InvoiceStatus::Pending,
        due_date: issued_at,
        created_at: issued_at,
    }
}

/// 純粋関数：請求書を支払済みにする
///
/// 現在のステータスに関係なく Paid にする。
/// 既に Paid の場合は何も変えない（paid_at も最初の値を保持する）。
pub fn mark_paid(invoice: Invoice, paid_at: DateTime<Utc>) -> Invoice {
    if invoice.status == InvoiceStatus::Paid {
        return invoice;
    }
    Invoice {
        status: InvoiceStatus::Paid,
        paid_at: Some(invoice.paid_at.unwrap_or(paid_at)),
        ..invoice
    }
}

/// 支払済み請求書の合計金額
pub fn total_paid(invoices: &[Invoice]) -> Decimal {
    invoices
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Paid)
        .map(|inv| inv.amount.value())
        .sum()
}
