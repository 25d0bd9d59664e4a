use crate::domain::{
    InvoiceId, MemberId, PlanId,
    invoice::{self, Invoice, InvoiceWithMember, MemberSummary},
};
use crate::ports::{AssignmentOutcome, BillingStore as BillingStoreTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use super::rows::{map_row_to_invoice, map_row_to_member, map_row_to_plan};

/// BillingStoreのPostgreSQL実装
pub struct BillingStore {
    pool: PgPool,
}

impl BillingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BillingStoreTrait for BillingStore {
    /// プランを割り当てて請求書を発行する
    ///
    /// 会員の更新と請求書の挿入は同じトランザクションで行う。
    /// コミット前に失敗した場合、トランザクションはドロップ時にロールバックされる。
    async fn assign_plan(
        &self,
        member_id: MemberId,
        plan_id: PlanId,
        assigned_at: DateTime<Utc>,
    ) -> Result<AssignmentOutcome> {
        let mut tx = self.pool.begin().await?;

        let plan_row = sqlx::query(
            r#"
            SELECT id, name, price, duration_days
            FROM membership_plans
            WHERE id = $1
            "#,
        )
        .bind(plan_id.value())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(plan_row) = plan_row else {
            return Ok(AssignmentOutcome::PlanNotFound);
        };
        let plan = map_row_to_plan(&plan_row)?;

        // 以前のプランは上書きする（履歴は請求書にのみ残る）
        let member_row = sqlx::query(
            r#"
            UPDATE members
            SET membership_plan_id = $2
            WHERE id = $1
            RETURNING id, full_name, email, phone_number, status, join_date, membership_plan_id
            "#,
        )
        .bind(member_id.value())
        .bind(plan.id.value())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(member_row) = member_row else {
            return Ok(AssignmentOutcome::MemberNotFound);
        };
        let member = map_row_to_member(&member_row)?;

        let new_invoice = invoice::issue_for_plan(member.id, &plan, assigned_at);
        let invoice_row = sqlx::query(
            r#"
            INSERT INTO invoices (member_id, amount, status, due_date, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, member_id, amount, status, due_date, paid_at, created_at
            "#,
        )
        .bind(new_invoice.member_id.value())
        .bind(new_invoice.amount.value())
        .bind(new_invoice.status.as_str())
        .bind(new_invoice.due_date)
        .bind(new_invoice.created_at)
        .fetch_one(&mut *tx)
        .await?;
        let invoice = map_row_to_invoice(&invoice_row)?;

        tx.commit().await?;
        Ok(AssignmentOutcome::Assigned { member, invoice })
    }

    /// 請求書を支払済みにする
    ///
    /// 行ロックを取ってから `domain::invoice::mark_paid` を適用する。
    /// 既に Paid の場合は書き込まない。
    async fn mark_paid(
        &self,
        invoice_id: InvoiceId,
        paid_at: DateTime<Utc>,
    ) -> Result<Option<Invoice>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT id, member_id, amount, status, due_date, paid_at, created_at
            FROM invoices
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(invoice_id.value())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let current = map_row_to_invoice(&row)?;
        let paid = invoice::mark_paid(current.clone(), paid_at);

        if paid != current {
            sqlx::query("UPDATE invoices SET status = $2, paid_at = $3 WHERE id = $1")
                .bind(paid.id.value())
                .bind(paid.status.as_str())
                .bind(paid.paid_at)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(paid))
    }

    async fn list_with_members(&self) -> Result<Vec<InvoiceWithMember>> {
        let rows = sqlx::query(
            r#"
            SELECT
                i.id,
                i.member_id,
                i.amount,
                i.status,
                i.due_date,
                i.paid_at,
                i.created_at,
                m.full_name
            FROM invoices i
            JOIN members m ON m.id = i.member_id
            ORDER BY i.due_date DESC, i.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let invoice = map_row_to_invoice(row)?;
                Ok(InvoiceWithMember {
                    member: MemberSummary {
                        id: invoice.member_id,
                        full_name: row.try_get("full_name")?,
                    },
                    invoice,
                })
            })
            .collect()
    }

    async fn find_by_member(&self, member_id: MemberId) -> Result<Vec<Invoice>> {
        let rows = sqlx::query(
            r#"
            SELECT id, member_id, amount, status, due_date, paid_at, created_at
            FROM invoices
            WHERE member_id = $1
            ORDER BY due_date DESC, id DESC
            "#,
        )
        .bind(member_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_invoice).collect()
    }
}
