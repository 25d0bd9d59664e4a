use crate::domain::{
    MemberId,
    booking::UpcomingBooking,
    invoice::Invoice,
    member::Member,
    plan::MembershipPlan,
    profile::{self, ProfileKpis},
};
use chrono::{DateTime, Utc};

use crate::application::{ApplicationError, Result, ServiceDependencies};

/// 会員ダッシュボードの表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    pub member: Member,
    pub plan: Option<MembershipPlan>,
    pub upcoming_bookings: Vec<UpcomingBooking>,
    pub invoices: Vec<Invoice>,
    pub kpis: ProfileKpis,
}

/// 会員のプロフィールを組み立てる
///
/// 1. 会員を取得（存在しなければ MemberNotFound）
/// 2. 現在のプラン・今後の予約・請求書を並行して取得
/// 3. KPIを算出（`domain::profile::compute_kpis`）
pub async fn member_profile(
    deps: &ServiceDependencies,
    member_id: MemberId,
    now: DateTime<Utc>,
) -> Result<MemberProfile> {
    let member = deps
        .members
        .get_by_id(member_id)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::MemberNotFound)?;

    let plan_lookup = async {
        match member.membership_plan_id {
            Some(plan_id) => deps.plans.get_by_id(plan_id).await,
            None => Ok(None),
        }
    };

    let (plan, upcoming_bookings, invoices) = futures::try_join!(
        plan_lookup,
        deps.bookings.upcoming_for_member(member_id, now),
        deps.billing.find_by_member(member_id),
    )
    .map_err(ApplicationError::StoreError)?;

    let kpis = profile::compute_kpis(plan.as_ref(), &invoices, now);

    Ok(MemberProfile {
        member,
        plan,
        upcoming_bookings,
        invoices,
        kpis,
    })
}
