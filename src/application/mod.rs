pub mod auth;
pub mod billing;
pub mod booking;
mod errors;
pub mod membership;
pub mod scheduling;

pub use errors::{ApplicationError, Result};

use crate::ports::*;
use std::sync::Arc;

/// 認証まわりの設定値
#[derive(Debug, Clone, Copy)]
pub struct AuthSettings {
    /// bcrypt のコスト
    pub password_cost: u32,
    /// セッションの有効期間
    pub session_ttl: chrono::Duration,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            password_cost: bcrypt::DEFAULT_COST,
            session_ttl: chrono::Duration::hours(24),
        }
    }
}

/// サービスの依存関係
///
/// 振る舞いは持たず、各サービス関数に引数として渡す。
/// すべての依存が明示的になり、テストではインメモリ実装に差し替えられる。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub members: Arc<dyn MemberRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub bookings: Arc<dyn BookingStore>,
    pub billing: Arc<dyn BillingStore>,
    pub schedules: Arc<dyn ScheduleRepository>,
    pub staff: Arc<dyn StaffRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub auth: AuthSettings,
}
