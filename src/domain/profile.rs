use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{
    invoice::{self, Invoice, InvoiceStatus},
    plan::MembershipPlan,
};

/// 会員ダッシュボードのKPI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileKpis {
    pub pending_invoices_count: usize,
    pub total_amount_paid: Decimal,
    pub plan_expiry_date: Option<DateTime<Utc>>,
    /// 失効までの日数（0方向に切り捨て）。失効日がない場合は0
    pub days_remaining: i64,
}

/// 純粋関数：会員のKPIを算出する
///
/// - 失効日 = 最新の支払済み請求書の支払期限 + プラン日数
/// - プラン未設定、支払済み請求書がない、または日時の範囲を超える場合は失効日なし
pub fn compute_kpis(
    plan: Option<&MembershipPlan>,
    invoices: &[Invoice],
    now: DateTime<Utc>,
) -> ProfileKpis {
    let pending_invoices_count = invoices
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Pending)
        .count();

    let last_paid_due = invoices
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Paid)
        .map(|inv| inv.due_date)
        .max();

    let plan_expiry_date = match (plan, last_paid_due) {
        (Some(plan), Some(due)) => plan.expiry_from(due),
        _ => None,
    };

    ProfileKpis {
        pending_invoices_count,
        total_amount_paid: invoice::total_paid(invoices),
        plan_expiry_date,
        days_remaining: plan_expiry_date
            .map(|expiry| (expiry - now).num_days())
            .unwrap_or(0),
    }
}
