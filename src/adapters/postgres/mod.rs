pub mod billing_store;
pub mod booking_store;
pub mod class_repository;
pub mod member_repository;
pub mod plan_repository;
mod rows;
pub mod schedule_repository;
pub mod session_store;
pub mod staff_repository;

// パブリックに型を再エクスポート
pub use billing_store::BillingStore as PostgresBillingStore;
pub use booking_store::BookingStore as PostgresBookingStore;
pub use class_repository::ClassRepository as PostgresClassRepository;
pub use member_repository::MemberRepository as PostgresMemberRepository;
pub use plan_repository::PlanRepository as PostgresPlanRepository;
pub use schedule_repository::ScheduleRepository as PostgresScheduleRepository;
pub use session_store::SessionStore as PostgresSessionStore;
pub use staff_repository::StaffRepository as PostgresStaffRepository;

use crate::application::{AuthSettings, ServiceDependencies};
use sqlx::PgPool;
use std::sync::Arc;

/// すべてのポートをPostgreSQL実装で組み立てる
pub fn service_dependencies(pool: PgPool, auth: AuthSettings) -> ServiceDependencies {
    ServiceDependencies {
        members: Arc::new(PostgresMemberRepository::new(pool.clone())),
        plans: Arc::new(PostgresPlanRepository::new(pool.clone())),
        classes: Arc::new(PostgresClassRepository::new(pool.clone())),
        bookings: Arc::new(PostgresBookingStore::new(pool.clone())),
        billing: Arc::new(PostgresBillingStore::new(pool.clone())),
        schedules: Arc::new(PostgresScheduleRepository::new(pool.clone())),
        staff: Arc::new(PostgresStaffRepository::new(pool.clone())),
        sessions: Arc::new(PostgresSessionStore::new(pool)),
        auth,
    }
}
