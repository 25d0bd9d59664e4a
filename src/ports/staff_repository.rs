use crate::domain::{Email, StaffId, auth::StaffUser};
use async_trait::async_trait;

use super::Result;

/// ログイン検証用のスタッフ資格情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffCredentials {
    pub user: StaffUser,
    pub password_hash: String,
}

/// スタッフリポジトリポート
#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// スタッフを登録する。メールアドレスが使用済みの場合は None
    async fn insert(&self, email: Email, password_hash: String) -> Result<Option<StaffUser>>;

    async fn get_by_id(&self, staff_id: StaffId) -> Result<Option<StaffUser>>;

    async fn find_credentials_by_email(&self, email: &Email) -> Result<Option<StaffCredentials>>;
}
