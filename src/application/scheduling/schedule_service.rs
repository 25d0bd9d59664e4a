use crate::domain::{
    MemberId, ScheduleId,
    schedule::{DateWindow, PersonalSchedule, ScheduleEntry},
};
use chrono::NaiveDate;
use tracing::info;

use crate::application::{ApplicationError, Result, ServiceDependencies};

/// 個人スケジュールを作成する
///
/// 会員が存在しない場合は MemberNotFound。
pub async fn create_schedule(
    deps: &ServiceDependencies,
    member_id: MemberId,
    entry: ScheduleEntry,
) -> Result<PersonalSchedule> {
    let schedule = deps
        .schedules
        .insert(member_id, entry)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::MemberNotFound)?;

    info!(schedule_id = %schedule.id, member_id = %member_id, "Personal schedule created");
    Ok(schedule)
}

/// 会員の全スケジュール
pub async fn list_schedules(
    deps: &ServiceDependencies,
    member_id: MemberId,
) -> Result<Vec<PersonalSchedule>> {
    deps.schedules
        .list_for_member(member_id)
        .await
        .map_err(ApplicationError::StoreError)
}

/// 今日から7日後までのスケジュール
pub async fn upcoming_schedules(
    deps: &ServiceDependencies,
    member_id: MemberId,
    today: NaiveDate,
) -> Result<Vec<PersonalSchedule>> {
    schedules_within(deps, member_id, DateWindow::upcoming(today)).await
}

/// 日付範囲内のスケジュール
pub async fn schedules_within(
    deps: &ServiceDependencies,
    member_id: MemberId,
    window: DateWindow,
) -> Result<Vec<PersonalSchedule>> {
    deps.schedules
        .list_within(member_id, window)
        .await
        .map_err(ApplicationError::StoreError)
}

/// スケジュールの内容を全置換する
pub async fn update_schedule(
    deps: &ServiceDependencies,
    schedule_id: ScheduleId,
    entry: ScheduleEntry,
) -> Result<PersonalSchedule> {
    let schedule = deps
        .schedules
        .replace(schedule_id, entry)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::ScheduleNotFound)?;

    info!(schedule_id = %schedule.id, "Personal schedule updated");
    Ok(schedule)
}

/// スケジュールを削除する
pub async fn delete_schedule(deps: &ServiceDependencies, schedule_id: ScheduleId) -> Result<()> {
    let deleted = deps
        .schedules
        .delete(schedule_id)
        .await
        .map_err(ApplicationError::StoreError)?;

    if !deleted {
        return Err(ApplicationError::ScheduleNotFound);
    }

    info!(schedule_id = %schedule_id, "Personal schedule deleted");
    Ok(())
}
