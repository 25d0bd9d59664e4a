use crate::application::billing::{
    assign_plan as execute_assign_plan, list_invoices as execute_list_invoices,
    pay_invoice as execute_pay_invoice,
};
use crate::domain::{InvoiceId, commands::PayInvoice};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::AppState;
use crate::api::{
    error::ApiError,
    responses::{InvoiceListItem, InvoiceResponse, PlanAssignmentResponse},
    types::AssignPlanRequest,
};

/// POST /invoices/assign - 会員にプランを割り当てて請求書を発行
///
/// 会員のプラン更新と請求書の作成は同じトランザクションで行われる。
pub async fn assign_plan(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AssignPlanRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlanAssignmentResponse>), ApiError> {
    let Json(req) = body?;
    let cmd = req.to_command(chrono::Utc::now())?;

    let assignment = execute_assign_plan(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(assignment.into())))
}

/// PUT /invoices/:id/pay - 請求書を支払済みにする
///
/// 支払済みの請求書に対しては何も変えずに現在の内容を返す。
pub async fn pay_invoice(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let Path(invoice_id) = path?;
    let cmd = PayInvoice {
        invoice_id: InvoiceId::from_raw(invoice_id),
        paid_at: chrono::Utc::now(),
    };

    let invoice = execute_pay_invoice(&state.service_deps, cmd).await?;

    Ok(Json(invoice.into()))
}

/// GET /invoices - 全請求書（支払期限の新しい順）
pub async fn list_invoices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<InvoiceListItem>>, ApiError> {
    let invoices = execute_list_invoices(&state.service_deps).await?;

    Ok(Json(invoices.into_iter().map(InvoiceListItem::from).collect()))
}
