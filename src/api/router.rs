use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, auth, billing, bookings, classes, members, plans, profile, schedules,
};

/// Creates the API router with all gym management endpoints
///
/// Core transactions:
/// - POST /bookings - Book a class (capacity and duplicate checks)
/// - POST /invoices/assign - Assign a plan and issue a pending invoice
/// - PUT /invoices/:id/pay - Mark an invoice as paid
///
/// Everything else is CRUD over members, classes, plans and personal schedules,
/// plus staff/member authentication.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Bookings and billing
        .route("/bookings", post(bookings::create_booking))
        .route("/invoices", get(billing::list_invoices))
        .route("/invoices/assign", post(billing::assign_plan))
        .route("/invoices/:id/pay", put(billing::pay_invoice))
        // Catalogue
        .route("/classes", get(classes::list_classes).post(classes::create_class))
        .route("/plans", get(plans::list_plans).post(plans::create_plan))
        // Members
        .route("/members", get(members::list_members).post(members::create_member))
        .route(
            "/members/:id",
            put(members::update_member).delete(members::delete_member),
        )
        .route("/my-profile/:member_id", get(profile::get_profile))
        // Personal schedules
        .route(
            "/schedule/member/:member_id",
            get(schedules::list_member_schedules).post(schedules::create_schedule),
        )
        .route(
            "/schedule/member/:member_id/upcoming",
            get(schedules::list_upcoming_schedules),
        )
        .route(
            "/schedule/member/:member_id/range",
            get(schedules::list_schedules_in_range),
        )
        .route(
            "/schedule/:id",
            put(schedules::update_schedule).delete(schedules::delete_schedule),
        )
        // Authentication
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/session", get(auth::current_session))
        .route("/auth/logout", post(auth::logout))
        .route("/member-auth/login", post(auth::login_member))
        .route("/member-auth/set-password", post(auth::set_password))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
