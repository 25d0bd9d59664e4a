use crate::domain::{
    Email, MemberId,
    member::{Member, MemberChanges, NewMember},
};
use async_trait::async_trait;

use super::Result;

/// 会員の書き込み結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberWrite {
    Saved(Member),
    /// メールアドレスの一意制約違反
    EmailTaken,
}

/// 会員削除の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberDeletion {
    Deleted,
    NotFound,
    /// 請求書が残っているため削除できない
    HasInvoices,
}

/// ログイン検証用の会員資格情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCredentials {
    pub member: Member,
    pub password_hash: Option<String>,
}

/// 会員リポジトリポート
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn insert(&self, member: NewMember) -> Result<MemberWrite>;

    /// 全会員（ID順）
    async fn list(&self) -> Result<Vec<Member>>;

    async fn get_by_id(&self, member_id: MemberId) -> Result<Option<Member>>;

    /// 部分更新。会員が存在しない場合は None
    async fn update(&self, member_id: MemberId, changes: MemberChanges)
    -> Result<Option<MemberWrite>>;

    /// 会員を削除する。予約・個人スケジュール・セッションは連鎖削除される
    async fn delete(&self, member_id: MemberId) -> Result<MemberDeletion>;

    /// パスワードハッシュを設定する。会員が存在しない場合は false
    async fn set_password_hash(&self, member_id: MemberId, password_hash: String) -> Result<bool>;

    async fn find_credentials_by_email(&self, email: &Email) -> Result<Option<MemberCredentials>>;
}
