use crate::application::scheduling::{
    create_schedule as execute_create_schedule, delete_schedule as execute_delete_schedule,
    list_schedules as execute_list_schedules, schedules_within,
    update_schedule as execute_update_schedule, upcoming_schedules,
};
use crate::domain::{MemberId, ScheduleId, schedule::PersonalSchedule};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::AppState;
use crate::api::{
    error::ApiError,
    responses::{MessageResponse, ScheduleResponse},
    types::{DateRangeQuery, ScheduleRequest},
};

fn to_responses(schedules: Vec<PersonalSchedule>) -> Json<Vec<ScheduleResponse>> {
    Json(schedules.into_iter().map(ScheduleResponse::from).collect())
}

/// GET /schedule/member/:memberId - 会員の全スケジュール（日付・開始時刻順）
pub async fn list_member_schedules(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ScheduleResponse>>, ApiError> {
    let Path(member_id) = path?;

    let schedules =
        execute_list_schedules(&state.service_deps, MemberId::from_raw(member_id)).await?;

    Ok(to_responses(schedules))
}

/// GET /schedule/member/:memberId/upcoming - 今日から7日後までのスケジュール
pub async fn list_upcoming_schedules(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ScheduleResponse>>, ApiError> {
    let Path(member_id) = path?;
    let today = chrono::Utc::now().date_naive();

    let schedules =
        upcoming_schedules(&state.service_deps, MemberId::from_raw(member_id), today).await?;

    Ok(to_responses(schedules))
}

/// GET /schedule/member/:memberId/range?startDate=&endDate= - 期間内のスケジュール
pub async fn list_schedules_in_range(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Json<Vec<ScheduleResponse>>, ApiError> {
    let Path(member_id) = path?;
    let Query(range) = query?;
    let window = range.to_window()?;

    let schedules =
        schedules_within(&state.service_deps, MemberId::from_raw(member_id), window).await?;

    Ok(to_responses(schedules))
}

/// POST /schedule/member/:memberId - スケジュールを作成
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ScheduleResponse>), ApiError> {
    let Path(member_id) = path?;
    let Json(req) = body?;
    let entry = req.to_entry()?;

    let schedule =
        execute_create_schedule(&state.service_deps, MemberId::from_raw(member_id), entry).await?;

    Ok((StatusCode::CREATED, Json(schedule.into())))
}

/// PUT /schedule/:id - スケジュールを全置換
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let Path(schedule_id) = path?;
    let Json(req) = body?;
    let entry = req.to_entry()?;

    let schedule =
        execute_update_schedule(&state.service_deps, ScheduleId::from_raw(schedule_id), entry)
            .await?;

    Ok(Json(schedule.into()))
}

/// DELETE /schedule/:id - スケジュールを削除
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(schedule_id) = path?;

    execute_delete_schedule(&state.service_deps, ScheduleId::from_raw(schedule_id)).await?;

    Ok(Json(MessageResponse {
        message: "Member schedule deleted successfully",
    }))
}
