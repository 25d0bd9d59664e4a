use crate::domain::{
    PlanId,
    plan::{MembershipPlan, NewPlan},
};
use crate::ports::{PlanRepository as PlanRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::map_row_to_plan;

/// PlanRepositoryのPostgreSQL実装
pub struct PlanRepository {
    pool: PgPool,
}

impl PlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepositoryTrait for PlanRepository {
    async fn insert(&self, plan: NewPlan) -> Result<MembershipPlan> {
        let row = sqlx::query(
            r#"
            INSERT INTO membership_plans (name, price, duration_days)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, duration_days
            "#,
        )
        .bind(&plan.name)
        .bind(plan.price.value())
        .bind(plan.duration_days.value())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_plan(&row)
    }

    async fn list(&self) -> Result<Vec<MembershipPlan>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price, duration_days
            FROM membership_plans
            ORDER BY price ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_plan).collect()
    }

    async fn get_by_id(&self, plan_id: PlanId) -> Result<Option<MembershipPlan>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, duration_days
            FROM membership_plans
            WHERE id = $1
            "#,
        )
        .bind(plan_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_plan).transpose()
    }
}
