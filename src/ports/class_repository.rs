use crate::domain::{
    ClassId,
    gym_class::{GymClass, NewClass},
};
use async_trait::async_trait;

use super::Result;

/// クラスリポジトリポート
#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn insert(&self, class: NewClass) -> Result<GymClass>;

    /// 全クラス（開始時刻順）
    async fn list(&self) -> Result<Vec<GymClass>>;

    async fn get_by_id(&self, class_id: ClassId) -> Result<Option<GymClass>>;
}
