pub mod billing_store;
pub mod booking_store;
pub mod class_repository;
pub mod member_repository;
pub mod plan_repository;
pub mod schedule_repository;
pub mod session_store;
pub mod staff_repository;

pub use billing_store::*;
pub use booking_store::*;
pub use class_repository::*;
pub use member_repository::*;
pub use plan_repository::*;
pub use schedule_repository::*;
pub use session_store::*;
pub use staff_repository::*;

/// ポート共通の Result型
///
/// 永続化層の失敗はアプリケーション層で StoreError として扱う。
/// 業務的に意味のある失敗（一意制約違反など）は各ポートの戻り値の列挙型で表現する。
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
