use crate::domain::{
    MemberId,
    member::{Member, MemberChanges, NewMember},
};
use crate::ports::{MemberDeletion, MemberWrite};
use tracing::info;

use crate::application::{ApplicationError, Result, ServiceDependencies};

/// 会員を登録する
///
/// メールアドレスが登録済みの場合は EmailAlreadyRegistered。
pub async fn register_member(deps: &ServiceDependencies, new_member: NewMember) -> Result<Member> {
    let written = deps
        .members
        .insert(new_member)
        .await
        .map_err(ApplicationError::StoreError)?;

    match written {
        MemberWrite::Saved(member) => {
            info!(member_id = %member.id, "Member registered");
            Ok(member)
        }
        MemberWrite::EmailTaken => Err(ApplicationError::EmailAlreadyRegistered),
    }
}

/// 全会員を取得する
pub async fn list_members(deps: &ServiceDependencies) -> Result<Vec<Member>> {
    deps.members
        .list()
        .await
        .map_err(ApplicationError::StoreError)
}

/// 会員情報を部分更新する
pub async fn update_member(
    deps: &ServiceDependencies,
    member_id: MemberId,
    changes: MemberChanges,
) -> Result<Member> {
    let written = deps
        .members
        .update(member_id, changes)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::MemberNotFound)?;

    match written {
        MemberWrite::Saved(member) => {
            info!(member_id = %member.id, "Member updated");
            Ok(member)
        }
        MemberWrite::EmailTaken => Err(ApplicationError::EmailAlreadyRegistered),
    }
}

/// 会員を削除する
///
/// 予約と個人スケジュールは連鎖削除される。
/// 請求書は削除しない方針のため、請求書を持つ会員は削除できない。
pub async fn delete_member(deps: &ServiceDependencies, member_id: MemberId) -> Result<()> {
    let deletion = deps
        .members
        .delete(member_id)
        .await
        .map_err(ApplicationError::StoreError)?;

    match deletion {
        MemberDeletion::Deleted => {
            info!(member_id = %member_id, "Member deleted");
            Ok(())
        }
        MemberDeletion::NotFound => Err(ApplicationError::MemberNotFound),
        MemberDeletion::HasInvoices => Err(ApplicationError::MemberHasInvoices),
    }
}
