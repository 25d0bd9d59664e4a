use crate::domain::auth::{Session, SessionToken};
use async_trait::async_trait;

use super::Result;

/// セッションストアポート
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, session: Session) -> Result<()>;

    /// トークンに対応するセッション（期限切れも含む）
    async fn find(&self, token: SessionToken) -> Result<Option<Session>>;

    /// セッションを破棄する。存在しなかった場合は false
    async fn revoke(&self, token: SessionToken) -> Result<bool>;
}
