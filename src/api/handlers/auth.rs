use crate::application::{
    ApplicationError,
    auth::{
        logout as execute_logout, member_login, register_staff, resolve_session,
        set_member_password, staff_login,
    },
};
use crate::domain::{
    Email, StaffId,
    auth::{Identity, SessionToken},
};
use axum::{
    Json, async_trait,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use super::AppState;
use crate::api::{
    error::ApiError,
    responses::{IdentityResponse, LoginResponse, MsgResponse, StaffUserResponse},
    types::{CredentialsRequest, SetPasswordRequest},
};

/// `Authorization: Bearer <token>` からセッショントークンを取り出す
///
/// ヘッダーがない、または形式が不正な場合は 401。
fn bearer_token(headers: &HeaderMap) -> Result<SessionToken, ApiError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| Uuid::parse_str(token.trim()).ok())
        .map(SessionToken::from_uuid)
        .ok_or_else(|| ApiError::from(ApplicationError::Unauthorized))
}

/// スタッフのセッションを要求するエクストラクタ
///
/// トークンがない、失効している、または会員のセッションの場合は 401。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffSession {
    pub id: StaffId,
    pub email: Email,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for StaffSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        match resolve_session(&state.service_deps, token, chrono::Utc::now()).await? {
            Identity::Staff { id, email } => Ok(Self { id, email }),
            Identity::Member { id, .. } => {
                warn!(member_id = %id, uri = ?parts.uri, "Member session used on a staff route");
                Err(ApplicationError::Unauthorized.into())
            }
        }
    }
}

/// POST /auth/register - スタッフを登録
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StaffUserResponse>), ApiError> {
    let Json(req) = body?;
    let cmd = req.to_registration()?;

    let user = register_staff(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /auth/login - スタッフのログイン
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = body?;
    let cmd = req.to_login()?;

    let grant = staff_login(&state.service_deps, cmd, chrono::Utc::now()).await?;

    Ok(Json(grant.into()))
}

/// POST /member-auth/login - 会員のログイン
pub async fn login_member(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = body?;
    let cmd = req.to_login()?;

    let grant = member_login(&state.service_deps, cmd, chrono::Utc::now()).await?;

    Ok(Json(grant.into()))
}

/// POST /member-auth/set-password - 会員のパスワードを設定（スタッフのみ）
pub async fn set_password(
    State(state): State<Arc<AppState>>,
    staff: StaffSession,
    body: Result<Json<SetPasswordRequest>, JsonRejection>,
) -> Result<Json<MsgResponse>, ApiError> {
    let Json(req) = body?;
    let cmd = req.to_command()?;

    set_member_password(&state.service_deps, cmd).await?;
    info!(staff_id = %staff.id, "Member password set by staff");

    Ok(Json(MsgResponse {
        msg: "Member password updated successfully.",
    }))
}

/// GET /auth/session - トークンに対応する利用者
pub async fn current_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<IdentityResponse>, ApiError> {
    let token = bearer_token(&headers)?;

    let identity = resolve_session(&state.service_deps, token, chrono::Utc::now()).await?;

    Ok(Json(identity.into()))
}

/// POST /auth/logout - セッションを破棄
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers)?;

    execute_logout(&state.service_deps, token).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parses_uuid() {
        let token = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        assert_eq!(bearer_token(&headers).unwrap().value(), token);
    }

    #[test]
    fn test_bearer_token_rejects_missing_or_malformed() {
        assert!(bearer_token(&HeaderMap::new()).is_err());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-uuid"));
        assert!(bearer_token(&headers).is_err());
    }
}
