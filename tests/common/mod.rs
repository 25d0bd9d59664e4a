#![allow(dead_code)]

pub mod in_memory;

use chrono::{DateTime, Duration, Utc};
use gym_erp::application::{
    ServiceDependencies, membership::create_plan, membership::register_member,
    scheduling::create_class,
};
use gym_erp::domain::{
    gym_class::{GymClass, NewClass},
    member::{Member, NewMember},
    plan::{MembershipPlan, NewPlan},
};
use rust_decimal::Decimal;
use sqlx::PgPool;

/// テスト用データベースプールを作成し、マイグレーションを実行
///
/// DATABASE_URL 環境変数が設定されていない場合は None を返し、
/// PostgreSQL を使うテストはスキップされる。
/// 本番と同じマイグレーションファイルを使用する。
pub async fn create_test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL is not set; skipping PostgreSQL test");
        return None;
    };

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // sqlx migrateでマイグレーションを実行（本番と同じ方法）
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// データベースのクリーンアップ
///
/// テストの独立性を保つため、各テスト前にすべてのデータを削除する。
pub async fn cleanup_database(pool: &PgPool) {
    sqlx::query(
        r#"
        TRUNCATE TABLE
            sessions,
            staff_users,
            member_schedules,
            invoices,
            bookings,
            classes,
            members,
            membership_plans
        RESTART IDENTITY CASCADE
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to truncate tables");
}

/// クラスの予約数をデータベースから直接数える
pub async fn booking_count(pool: &PgPool, class_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE class_id = $1")
        .bind(class_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count bookings")
}

// ============================================================================
// テストデータの作成
// ============================================================================

pub async fn member(deps: &ServiceDependencies, name: &str) -> Member {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let new_member = NewMember::register(name, &email, None, Utc::now()).unwrap();
    register_member(deps, new_member).await.unwrap()
}

/// 明日開始のクラス
pub async fn class_with_capacity(deps: &ServiceDependencies, capacity: i32) -> GymClass {
    class_starting_at(deps, Utc::now() + Duration::days(1), capacity).await
}

pub async fn class_starting_at(
    deps: &ServiceDependencies,
    start: DateTime<Utc>,
    capacity: i32,
) -> GymClass {
    let new_class = NewClass::new(
        "HIIT",
        Some("Coach Kim"),
        start,
        start + Duration::hours(1),
        capacity,
    )
    .unwrap();
    create_class(deps, new_class).await.unwrap()
}

pub async fn plan(deps: &ServiceDependencies, price: i64, duration_days: i32) -> MembershipPlan {
    let new_plan = NewPlan::new("Monthly", Decimal::from(price), duration_days).unwrap();
    create_plan(deps, new_plan).await.unwrap()
}
