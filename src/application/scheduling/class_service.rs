use crate::domain::gym_class::{GymClass, NewClass};
use tracing::info;

use crate::application::{ApplicationError, Result, ServiceDependencies};

/// クラスを作成する
pub async fn create_class(deps: &ServiceDependencies, new_class: NewClass) -> Result<GymClass> {
    let class = deps
        .classes
        .insert(new_class)
        .await
        .map_err(ApplicationError::StoreError)?;

    info!(
        class_id = %class.id,
        title = %class.title,
        capacity = class.capacity.value(),
        "Class created"
    );
    Ok(class)
}

/// 全クラスを開始時刻順に取得する
pub async fn list_classes(deps: &ServiceDependencies) -> Result<Vec<GymClass>> {
    deps.classes
        .list()
        .await
        .map_err(ApplicationError::StoreError)
}
