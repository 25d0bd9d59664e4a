use crate::domain::{
    PlanId,
    plan::{MembershipPlan, NewPlan},
};
use async_trait::async_trait;

use super::Result;

/// 会員プランリポジトリポート
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn insert(&self, plan: NewPlan) -> Result<MembershipPlan>;

    /// 全プラン（料金の安い順）
    async fn list(&self) -> Result<Vec<MembershipPlan>>;

    async fn get_by_id(&self, plan_id: PlanId) -> Result<Option<MembershipPlan>>;
}
