use crate::domain::plan::{MembershipPlan, NewPlan};
use tracing::info;

use crate::application::{ApplicationError, Result, ServiceDependencies};

/// 会員プランを作成する
pub async fn create_plan(deps: &ServiceDependencies, new_plan: NewPlan) -> Result<MembershipPlan> {
    let plan = deps
        .plans
        .insert(new_plan)
        .await
        .map_err(ApplicationError::StoreError)?;

    info!(plan_id = %plan.id, name = %plan.name, "Membership plan created");
    Ok(plan)
}

/// 全プランを料金の安い順に取得する
pub async fn list_plans(deps: &ServiceDependencies) -> Result<Vec<MembershipPlan>> {
    deps.plans.list().await.map_err(ApplicationError::StoreError)
}
