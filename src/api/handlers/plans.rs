use crate::application::membership::{
    create_plan as execute_create_plan, list_plans as execute_list_plans,
};
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use std::sync::Arc;

use super::AppState;
use crate::api::{error::ApiError, responses::PlanResponse, types::CreatePlanRequest};

/// GET /plans - プラン一覧（料金の安い順）
pub async fn list_plans(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlanResponse>>, ApiError> {
    let plans = execute_list_plans(&state.service_deps).await?;

    Ok(Json(plans.into_iter().map(PlanResponse::from).collect()))
}

/// POST /plans - プランを作成
pub async fn create_plan(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreatePlanRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlanResponse>), ApiError> {
    let Json(req) = body?;
    let new_plan = req.to_new_plan()?;

    let plan = execute_create_plan(&state.service_deps, new_plan).await?;

    Ok((StatusCode::CREATED, Json(plan.into())))
}
