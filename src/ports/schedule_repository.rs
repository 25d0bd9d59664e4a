use crate::domain::{
    MemberId, ScheduleId,
    schedule::{DateWindow, PersonalSchedule, ScheduleEntry},
};
use async_trait::async_trait;

use super::Result;

/// 個人スケジュールリポジトリポート
///
/// 一覧系はすべて日付→開始時刻の順に返す。
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// 会員が存在しない場合は None
    async fn insert(
        &self,
        member_id: MemberId,
        entry: ScheduleEntry,
    ) -> Result<Option<PersonalSchedule>>;

    async fn list_for_member(&self, member_id: MemberId) -> Result<Vec<PersonalSchedule>>;

    /// 日付が範囲内（両端を含む）のスケジュール
    async fn list_within(
        &self,
        member_id: MemberId,
        window: DateWindow,
    ) -> Result<Vec<PersonalSchedule>>;

    /// 内容を全置換する。存在しない場合は None
    async fn replace(
        &self,
        schedule_id: ScheduleId,
        entry: ScheduleEntry,
    ) -> Result<Option<PersonalSchedule>>;

    async fn delete(&self, schedule_id: ScheduleId) -> Result<bool>;
}
