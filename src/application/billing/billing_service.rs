use crate::domain::{
    commands::{AssignPlan, PayInvoice},
    invoice::{Invoice, InvoiceWithMember},
    member::Member,
};
use crate::ports::AssignmentOutcome;
use tracing::info;

use crate::application::{ApplicationError, Result, ServiceDependencies};

/// プラン割り当ての結果（更新後の会員と新しい請求書）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanAssignment {
    pub member: Member,
    pub invoice: Invoice,
}

/// 会員にプランを割り当て、未払いの請求書を発行する
///
/// ビジネスルール：
/// - プランが存在すること
/// - 会員が存在すること
/// - 以前のプラン参照は上書きされる（履歴は過去の請求書にのみ残る）
/// - 請求書の金額はプラン料金、ステータスは Pending、支払期限は即時
///
/// # 一貫性保証
///
/// 会員の更新と請求書の発行は1トランザクションで行われる。
/// 請求書のないプラン変更は発生しない。
pub async fn assign_plan(deps: &ServiceDependencies, cmd: AssignPlan) -> Result<PlanAssignment> {
    let outcome = deps
        .billing
        .assign_plan(cmd.member_id, cmd.plan_id, cmd.assigned_at)
        .await
        .map_err(ApplicationError::StoreError)?;

    match outcome {
        AssignmentOutcome::Assigned { member, invoice } => {
            info!(
                member_id = %member.id,
                plan_id = %cmd.plan_id,
                invoice_id = %invoice.id,
                amount = %invoice.amount.value(),
                "Plan assigned and invoice issued"
            );
            Ok(PlanAssignment { member, invoice })
        }
        AssignmentOutcome::PlanNotFound => Err(ApplicationError::PlanNotFound),
        AssignmentOutcome::MemberNotFound => Err(ApplicationError::MemberNotFound),
    }
}

/// 請求書を支払済みにする
///
/// 現在のステータスは確認しない。支払済みの請求書に対しては何もしない（冪等）。
pub async fn pay_invoice(deps: &ServiceDependencies, cmd: PayInvoice) -> Result<Invoice> {
    let invoice = deps
        .billing
        .mark_paid(cmd.invoice_id, cmd.paid_at)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::InvoiceNotFound)?;

    info!(invoice_id = %invoice.id, "Invoice marked as paid");
    Ok(invoice)
}

/// 全請求書を会員名付きで取得する
pub async fn list_invoices(deps: &ServiceDependencies) -> Result<Vec<InvoiceWithMember>> {
    deps.billing
        .list_with_members()
        .await
        .map_err(ApplicationError::StoreError)
}
