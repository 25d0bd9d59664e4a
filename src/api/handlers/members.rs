use crate::application::membership::{
    delete_member as execute_delete_member, list_members as execute_list_members,
    register_member as execute_register_member, update_member as execute_update_member,
};
use crate::domain::MemberId;
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
    responses::MemberResponse,
    types::{CreateMemberRequest, UpdateMemberRequest},
};

/// GET /members - 会員一覧（ID順）
pub async fn list_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = execute_list_members(&state.service_deps).await?;

    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// POST /members - 会員を登録
///
/// ステータスは Active、入会日は現在時刻になる。
pub async fn create_member(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateMemberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let Json(req) = body?;
    let new_member = req.to_new_member(chrono::Utc::now())?;

    let member = execute_register_member(&state.service_deps, new_member).await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// PUT /members/:id - 会員情報を部分更新
pub async fn update_member(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateMemberRequest>, JsonRejection>,
) -> Result<Json<MemberResponse>, ApiError> {
    let Path(member_id) = path?;
    let Json(req) = body?;
    let changes = req.to_changes()?;

    let member =
        execute_update_member(&state.service_deps, MemberId::from_raw(member_id), changes).await?;

    Ok(Json(member.into()))
}

/// DELETE /members/:id - 会員を削除
///
/// 請求書が残っている会員は削除できない（409）。
pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(member_id) = path?;

    execute_delete_member(&state.service_deps, MemberId::from_raw(member_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
