pub mod auth;
pub mod billing;
pub mod bookings;
pub mod classes;
pub mod members;
pub mod plans;
pub mod profile;
pub mod schedules;

use crate::application::ServiceDependencies;

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}
