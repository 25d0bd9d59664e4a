use crate::application::membership::member_profile;
use crate::domain::MemberId;
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use std::sync::Arc;

use super::AppState;
use crate::api::{error::ApiError, responses::ProfileResponse};

/// GET /my-profile/:memberId - 会員ダッシュボード
///
/// 会員情報、現在のプラン、今後の予約、請求書、KPIをまとめて返す。
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let Path(member_id) = path?;

    let profile = member_profile(
        &state.service_deps,
        MemberId::from_raw(member_id),
        chrono::Utc::now(),
    )
    .await?;

    Ok(Json(profile.into()))
}
