use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DomainValidationError, Email, MemberId, StaffId};

/// スタッフアカウント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffUser {
    pub id: StaffId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// 平文パスワード
///
/// ハッシュ化される前の値。Debug出力でも中身を表示しない。
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(String);

impl PlainPassword {
    pub fn new(raw: &str) -> Result<Self, DomainValidationError> {
        if raw.is_empty() {
            return Err(DomainValidationError::Required("Password"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PlainPassword(***)")
    }
}

/// セッショントークン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

/// セッションの持ち主
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Staff(StaffId),
    Member(MemberId),
}

/// サーバー発行のセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub principal: Principal,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// 純粋関数：新しいセッションを発行する
    ///
    /// 有効期限が表現可能な範囲を超える場合は最大日時に丸める
    pub fn issue(principal: Principal, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token: SessionToken::generate(),
            principal,
            issued_at,
            expires_at: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// ログイン済みの利用者
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Staff {
        id: StaffId,
        email: Email,
    },
    Member {
        id: MemberId,
        email: Email,
        full_name: String,
    },
}
