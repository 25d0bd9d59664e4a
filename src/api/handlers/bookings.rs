use crate::application::booking::create_booking as execute_create_booking;
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use std::sync::Arc;

use super::AppState;
use crate::api::{error::ApiError, responses::BookingResponse, types::CreateBookingRequest};

/// POST /bookings - クラスを予約
///
/// 強制されるビジネスルール:
/// - クラスと会員が存在すること（404）
/// - 同じ会員が同じクラスを予約済みでないこと（409）
/// - クラスが満席でないこと（409）
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let Json(req) = body?;
    let cmd = req.to_command(chrono::Utc::now())?;

    let booking = execute_create_booking(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}
