use crate::domain::{
    auth::{Identity, Principal, Session, SessionToken, StaffUser},
    commands::{Login, RegisterStaff, SetMemberPassword},
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::password;
use crate::application::{ApplicationError, Result, ServiceDependencies};

/// ログイン成功時に発行されるセッションと利用者情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub session: Session,
    pub identity: Identity,
}

/// スタッフを登録する
pub async fn register_staff(deps: &ServiceDependencies, cmd: RegisterStaff) -> Result<StaffUser> {
    let password_hash = password::hash(cmd.password, deps.auth.password_cost).await?;

    let user = deps
        .staff
        .insert(cmd.email, password_hash)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::EmailAlreadyRegistered)?;

    info!(staff_id = %user.id, "Staff user registered");
    Ok(user)
}

/// スタッフとしてログインする
///
/// メールアドレスの不一致とパスワードの不一致は区別しない。
pub async fn staff_login(
    deps: &ServiceDependencies,
    cmd: Login,
    now: DateTime<Utc>,
) -> Result<LoginGrant> {
    let credentials = deps
        .staff
        .find_credentials_by_email(&cmd.email)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::InvalidCredentials)?;

    if !password::verify(cmd.password, credentials.password_hash).await? {
        warn!(staff_id = %credentials.user.id, "Staff login failed");
        return Err(ApplicationError::InvalidCredentials);
    }

    let user = credentials.user;
    let session = open_session(deps, Principal::Staff(user.id), now).await?;
    info!(staff_id = %user.id, "Staff logged in");

    Ok(LoginGrant {
        session,
        identity: Identity::Staff {
            id: user.id,
            email: user.email,
        },
    })
}

/// 会員としてログインする
///
/// パスワード未設定の会員はログインできない。
pub async fn member_login(
    deps: &ServiceDependencies,
    cmd: Login,
    now: DateTime<Utc>,
) -> Result<LoginGrant> {
    let credentials = deps
        .members
        .find_credentials_by_email(&cmd.email)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::InvalidCredentials)?;

    let password_hash = credentials
        .password_hash
        .ok_or(ApplicationError::InvalidCredentials)?;

    if !password::verify(cmd.password, password_hash).await? {
        warn!(member_id = %credentials.member.id, "Member login failed");
        return Err(ApplicationError::InvalidCredentials);
    }

    let member = credentials.member;
    let session = open_session(deps, Principal::Member(member.id), now).await?;
    info!(member_id = %member.id, "Member logged in");

    Ok(LoginGrant {
        session,
        identity: Identity::Member {
            id: member.id,
            email: member.email,
            full_name: member.full_name,
        },
    })
}

/// 会員のパスワードを設定・変更する
pub async fn set_member_password(deps: &ServiceDependencies, cmd: SetMemberPassword) -> Result<()> {
    let password_hash = password::hash(cmd.password, deps.auth.password_cost).await?;

    let updated = deps
        .members
        .set_password_hash(cmd.member_id, password_hash)
        .await
        .map_err(ApplicationError::StoreError)?;

    if !updated {
        return Err(ApplicationError::MemberNotFound);
    }

    info!(member_id = %cmd.member_id, "Member password updated");
    Ok(())
}

/// トークンからログイン中の利用者を解決する
///
/// 期限切れのセッションは破棄して Unauthorized を返す。
/// 持ち主（スタッフ・会員）が削除済みの場合も Unauthorized。
pub async fn resolve_session(
    deps: &ServiceDependencies,
    token: SessionToken,
    now: DateTime<Utc>,
) -> Result<Identity> {
    let session = deps
        .sessions
        .find(token)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::Unauthorized)?;

    if session.is_expired(now) {
        deps.sessions
            .revoke(token)
            .await
            .map_err(ApplicationError::StoreError)?;
        return Err(ApplicationError::Unauthorized);
    }

    match session.principal {
        Principal::Staff(staff_id) => {
            let user = deps
                .staff
                .get_by_id(staff_id)
                .await
                .map_err(ApplicationError::StoreError)?
                .ok_or(ApplicationError::Unauthorized)?;
            Ok(Identity::Staff {
                id: user.id,
                email: user.email,
            })
        }
        Principal::Member(member_id) => {
            let member = deps
                .members
                .get_by_id(member_id)
                .await
                .map_err(ApplicationError::StoreError)?
                .ok_or(ApplicationError::Unauthorized)?;
            Ok(Identity::Member {
                id: member.id,
                email: member.email,
                full_name: member.full_name,
            })
        }
    }
}

/// セッションを破棄する
pub async fn logout(deps: &ServiceDependencies, token: SessionToken) -> Result<()> {
    let revoked = deps
        .sessions
        .revoke(token)
        .await
        .map_err(ApplicationError::StoreError)?;

    if !revoked {
        return Err(ApplicationError::Unauthorized);
    }
    Ok(())
}

async fn open_session(
    deps: &ServiceDependencies,
    principal: Principal,
    now: DateTime<Utc>,
) -> Result<Session> {
    let session = Session::issue(principal, now, deps.auth.session_ttl);
    deps.sessions
        .save(session.clone())
        .await
        .map_err(ApplicationError::StoreError)?;
    Ok(session)
}
