use crate::domain::{DomainValidationError, booking::BookingRejection};
use thiserror::Error;

/// アプリケーション層のエラー
///
/// API層でHTTPステータスに対応付けられる：
/// - Validation → 400
/// - *NotFound → 404
/// - ClassFull / AlreadyBooked / EmailAlreadyRegistered / MemberHasInvoices → 409
/// - InvalidCredentials / Unauthorized → 401
/// - StoreError / PasswordHashError → 500
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 入力値が不正
    #[error("{0}")]
    Validation(String),

    #[error("Class not found.")]
    ClassNotFound,

    #[error("Member not found.")]
    MemberNotFound,

    #[error("Plan not found.")]
    PlanNotFound,

    #[error("Invoice not found.")]
    InvoiceNotFound,

    #[error("Schedule not found.")]
    ScheduleNotFound,

    /// 定員に達している
    #[error("This class is already full.")]
    ClassFull,

    /// 同じクラスを既に予約済み
    #[error("Member is already booked for this class.")]
    AlreadyBooked,

    #[error("Email is already registered.")]
    EmailAlreadyRegistered,

    /// 請求書が残っている会員は削除できない
    #[error("Member has invoices and cannot be deleted.")]
    MemberHasInvoices,

    /// メールアドレスまたはパスワードが違う（どちらかは明かさない）
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// セッションがない、または期限切れ
    #[error("Session is missing or expired.")]
    Unauthorized,

    /// ストアのエラー
    #[error("Store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// パスワードハッシュ処理のエラー
    #[error("Password hashing error")]
    PasswordHashError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<DomainValidationError> for ApplicationError {
    fn from(err: DomainValidationError) -> Self {
        ApplicationError::Validation(err.to_string())
    }
}

impl From<BookingRejection> for ApplicationError {
    fn from(rejection: BookingRejection) -> Self {
        match rejection {
            BookingRejection::ClassFull => ApplicationError::ClassFull,
            BookingRejection::AlreadyBooked => ApplicationError::AlreadyBooked,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ApplicationError>;
