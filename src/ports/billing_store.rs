use crate::domain::{
    InvoiceId, MemberId, PlanId,
    invoice::{Invoice, InvoiceWithMember},
    member::Member,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Result;

/// プラン割り当ての結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// 会員の更新と請求書の発行が両方成功した
    Assigned { member: Member, invoice: Invoice },
    PlanNotFound,
    MemberNotFound,
}

/// 請求ストアポート
#[async_trait]
pub trait BillingStore: Send + Sync {
    /// プランを割り当てて請求書を発行する
    ///
    /// プランの取得、会員のプラン参照の更新、請求書の挿入
    /// （`domain::invoice::issue_for_plan`）を1トランザクションで実行する。
    /// 途中で失敗した場合はどちらの書き込みも残らない。
    async fn assign_plan(
        &self,
        member_id: MemberId,
        plan_id: PlanId,
        assigned_at: DateTime<Utc>,
    ) -> Result<AssignmentOutcome>;

    /// 請求書を支払済みにする
    ///
    /// 既に Paid の場合は変更しない。存在しない場合は None。
    async fn mark_paid(
        &self,
        invoice_id: InvoiceId,
        paid_at: DateTime<Utc>,
    ) -> Result<Option<Invoice>>;

    /// 全請求書を会員情報付きで取得する（支払期限の新しい順）
    async fn list_with_members(&self) -> Result<Vec<InvoiceWithMember>>;

    /// 会員の請求書を取得する（支払期限の新しい順）
    async fn find_by_member(&self, member_id: MemberId) -> Result<Vec<Invoice>>;
}
