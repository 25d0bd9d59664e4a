use crate::application::scheduling::{
    create_class as execute_create_class, list_classes as execute_list_classes,
};
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use std::sync::Arc;

use super::AppState;
use crate::api::{error::ApiError, responses::ClassResponse, types::CreateClassRequest};

/// GET /classes - クラス一覧（開始時刻順）
pub async fn list_classes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClassResponse>>, ApiError> {
    let classes = execute_list_classes(&state.service_deps).await?;

    Ok(Json(classes.into_iter().map(ClassResponse::from).collect()))
}

/// POST /classes - クラスを作成
pub async fn create_class(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateClassRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ClassResponse>), ApiError> {
    let Json(req) = body?;
    let new_class = req.to_new_class()?;

    let class = execute_create_class(&state.service_deps, new_class).await?;

    Ok((StatusCode::CREATED, Json(class.into())))
}
