use axum::body::Body;
use axum::http::{Request, StatusCode};
use gym_erp::adapters::postgres::service_dependencies;
use gym_erp::api::handlers::AppState;
use gym_erp::api::router::create_router;
use gym_erp::application::{
    ApplicationError, AuthSettings, ServiceDependencies,
    booking::create_booking,
    membership::delete_member,
};
use gym_erp::domain::commands::CreateBooking;
use serde_json::{Value, json};
use serial_test::serial;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// E2Eテスト用のサービス依存関係
///
/// 実際のPostgreSQLデータベースを使用する。
/// 各テストの前にデータベースをクリーンアップする。
async fn setup_deps(pool: &PgPool) -> ServiceDependencies {
    common::cleanup_database(pool).await;

    service_dependencies(
        pool.clone(),
        AuthSettings {
            password_cost: 4,
            session_ttl: chrono::Duration::hours(24),
        },
    )
}

async fn setup_e2e_app(pool: &PgPool) -> axum::Router {
    let service_deps = setup_deps(pool).await;
    create_router(Arc::new(AppState { service_deps }))
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// ============================================================================
// E2Eテスト: 予約
// ============================================================================

#[tokio::test]
#[serial]
async fn test_e2e_booking_capacity_flow() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let app = setup_e2e_app(&pool).await;

    // Step 1: 定員2のクラスと会員3人
    let (status, class) = send(
        &app,
        "POST",
        "/classes",
        Some(json!({
            "title": "HIIT",
            "trainerName": "Coach Kim",
            "startTime": "2030-01-01T10:00:00Z",
            "endTime": "2030-01-01T11:00:00Z",
            "capacity": 2,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let class_id = class["id"].as_i64().unwrap();

    let mut member_ids = Vec::new();
    for name in ["a", "b", "c"] {
        let (status, member) = send(
            &app,
            "POST",
            "/members",
            Some(json!({ "fullName": format!("Member {name}"), "email": format!("{name}@example.com") })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        member_ids.push(member["id"].as_i64().unwrap());
    }

    // Step 2: A・Bは予約できる
    for member_id in &member_ids[..2] {
        let (status, _) = send(
            &app,
            "POST",
            "/bookings",
            Some(json!({ "classId": class_id, "memberId": member_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // Step 3: Cは満席
    let (status, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(json!({ "classId": class_id, "memberId": member_ids[2] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "This class is already full.");

    // Step 4: Aの再予約は重複
    let (status, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(json!({ "classId": class_id, "memberId": member_ids[0] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_BOOKED");

    assert_eq!(common::booking_count(&pool, class_id).await, 2);
}

// 同時予約でも定員を超えない（行ロックで直列化される）
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn test_e2e_concurrent_bookings_respect_capacity() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let deps = Arc::new(setup_deps(&pool).await);
    let class = common::class_with_capacity(&deps, 3).await;

    let mut members = Vec::new();
    for i in 0..10 {
        members.push(common::member(&deps, &format!("Member {i}")).await);
    }

    let class_id = class.id;
    let handles: Vec<_> = members
        .into_iter()
        .map(|member| {
            let deps = deps.clone();
            tokio::spawn(async move {
                create_booking(
                    &deps,
                    CreateBooking {
                        class_id,
                        member_id: member.id,
                        booked_at: chrono::Utc::now(),
                    },
                )
                .await
            })
        })
        .collect();

    let mut booked = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => booked += 1,
            Err(ApplicationError::ClassFull) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(booked, 3);
    assert_eq!(common::booking_count(&pool, class.id.value()).await, 3);
}

// ============================================================================
// E2Eテスト: プランと請求書
// ============================================================================

#[tokio::test]
#[serial]
async fn test_e2e_plan_assignment_flow() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let app = setup_e2e_app(&pool).await;

    let (_, member) = send(
        &app,
        "POST",
        "/members",
        Some(json!({ "fullName": "Ann Lee", "email": "ann@example.com" })),
    )
    .await;
    let member_id = member["id"].as_i64().unwrap();

    let (status, plan) = send(
        &app,
        "POST",
        "/plans",
        Some(json!({ "name": "Monthly", "price": 1000, "durationDays": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let plan_id = plan["id"].as_i64().unwrap();

    // Step 1: 割り当て
    let (status, body) = send(
        &app,
        "POST",
        "/invoices/assign",
        Some(json!({ "memberId": member_id, "planId": plan_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["updatedMember"]["membershipPlanId"], plan_id);
    assert_eq!(body["newInvoice"]["amount"], json!(1000.0));
    assert_eq!(body["newInvoice"]["status"], "Pending");
    let invoice_id = body["newInvoice"]["id"].as_i64().unwrap();

    // Step 2: 存在しないプランでは請求書は作られない
    let (status, _) = send(
        &app,
        "POST",
        "/invoices/assign",
        Some(json!({ "memberId": member_id, "planId": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, invoices) = send(&app, "GET", "/invoices", None).await;
    assert_eq!(invoices.as_array().unwrap().len(), 1);
    assert_eq!(invoices[0]["member"]["fullName"], "Ann Lee");

    // Step 3: 支払い（2回目は何も変えない）
    let (status, first) = send(&app, "PUT", &format!("/invoices/{invoice_id}/pay"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "Paid");
    let (_, second) = send(&app, "PUT", &format!("/invoices/{invoice_id}/pay"), None).await;
    assert_eq!(second["paidAt"], first["paidAt"]);

    // Step 4: プロフィール
    let (status, profile) = send(&app, "GET", &format!("/my-profile/{member_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["kpis"]["pendingInvoicesCount"], 0);
    assert_eq!(profile["kpis"]["totalAmountPaid"], json!(1000.0));
    assert_eq!(profile["kpis"]["daysRemaining"], 29);
}

// 請求書を持つ会員は削除できない
#[tokio::test]
#[serial]
async fn test_e2e_member_with_invoices_cannot_be_deleted() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let deps = setup_deps(&pool).await;
    let member = common::member(&deps, "Ann Lee").await;
    let plan = common::plan(&deps, 1000, 30).await;
    gym_erp::application::billing::assign_plan(
        &deps,
        gym_erp::domain::commands::AssignPlan {
            member_id: member.id,
            plan_id: plan.id,
            assigned_at: chrono::Utc::now(),
        },
    )
    .await
    .unwrap();

    let result = delete_member(&deps, member.id).await;

    assert!(matches!(result, Err(ApplicationError::MemberHasInvoices)));
}

// ============================================================================
// E2Eテスト: 個人スケジュール
// ============================================================================

// 削除済みの会員へのスケジュール作成は外部キー制約で 404 になる
#[tokio::test]
#[serial]
async fn test_e2e_schedule_for_deleted_member() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let deps = setup_deps(&pool).await;
    let member = common::member(&deps, "Ann Lee").await;
    delete_member(&deps, member.id).await.unwrap();
    let app = create_router(Arc::new(AppState { service_deps: deps }));

    let (status, body) = send(
        &app,
        "POST",
        &format!("/schedule/member/{}", member.id),
        Some(json!({
            "title": "Leg day",
            "date": "2026-11-02",
            "startTime": "07:00",
            "endTime": "08:00"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "MEMBER_NOT_FOUND");
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member_schedules")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

// ============================================================================
// E2Eテスト: 認証
// ============================================================================

#[tokio::test]
#[serial]
async fn test_e2e_staff_session_flow() {
    let Some(pool) = common::create_test_pool().await else {
        return;
    };
    let app = setup_e2e_app(&pool).await;
    let credentials = json!({ "email": "desk@gym.com", "password": "s3cret" });

    let (status, _) = send(&app, "POST", "/auth/register", Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", "/auth/register", Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "POST", "/auth/login", Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/auth/session")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
