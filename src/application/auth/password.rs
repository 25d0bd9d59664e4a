use crate::domain::auth::PlainPassword;
use tracing::warn;

use crate::application::{ApplicationError, Result};

/// パスワードをbcryptでハッシュ化する
///
/// bcrypt はCPUを占有するため、ブロッキングスレッドプールで実行する。
pub(super) async fn hash(password: PlainPassword, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password.expose(), cost))
        .await
        .map_err(|e| ApplicationError::PasswordHashError(Box::new(e)))?
        .map_err(|e| ApplicationError::PasswordHashError(Box::new(e)))
}

/// パスワードとハッシュを照合する
///
/// 保存済みハッシュが壊れている場合は不一致として扱う。
pub(super) async fn verify(password: PlainPassword, password_hash: String) -> Result<bool> {
    let verified = tokio::task::spawn_blocking(move || {
        bcrypt::verify(password.expose(), &password_hash)
    })
    .await
    .map_err(|e| ApplicationError::PasswordHashError(Box::new(e)))?;

    Ok(verified.unwrap_or_else(|e| {
        warn!("Stored password hash could not be verified: {}", e);
        false
    }))
}
