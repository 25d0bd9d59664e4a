use crate::application::ApplicationError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError(err)
    }
}

// 不正なJSON・パス・クエリはすべて 400
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(ApplicationError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(ApplicationError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(ApplicationError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let (status, code) = match &self.0 {
            // 400 Bad Request - 入力値が不正
            ApplicationError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),

            // 404 Not Found - 参照先が存在しない
            ApplicationError::ClassNotFound => (StatusCode::NOT_FOUND, "CLASS_NOT_FOUND"),
            ApplicationError::MemberNotFound => (StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND"),
            ApplicationError::PlanNotFound => (StatusCode::NOT_FOUND, "PLAN_NOT_FOUND"),
            ApplicationError::InvoiceNotFound => (StatusCode::NOT_FOUND, "INVOICE_NOT_FOUND"),
            ApplicationError::ScheduleNotFound => (StatusCode::NOT_FOUND, "SCHEDULE_NOT_FOUND"),

            // 409 Conflict - 現在の状態と両立しない
            ApplicationError::ClassFull => (StatusCode::CONFLICT, "CLASS_FULL"),
            ApplicationError::AlreadyBooked => (StatusCode::CONFLICT, "ALREADY_BOOKED"),
            ApplicationError::EmailAlreadyRegistered => {
                (StatusCode::CONFLICT, "EMAIL_ALREADY_REGISTERED")
            }
            ApplicationError::MemberHasInvoices => (StatusCode::CONFLICT, "MEMBER_HAS_INVOICES"),

            // 401 Unauthorized
            ApplicationError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
            }
            ApplicationError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApplicationError::StoreError(e) => {
                tracing::error!("Store error: {}", e);
                let body = ErrorResponse::new("STORE_ERROR", "An unexpected error occurred");
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
            ApplicationError::PasswordHashError(e) => {
                tracing::error!("Password hashing error: {}", e);
                let body = ErrorResponse::new("INTERNAL_ERROR", "An unexpected error occurred");
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        let body = Json(ErrorResponse::new(code, message));
        (status, body).into_response()
    }
}
