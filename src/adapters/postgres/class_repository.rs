use crate::domain::{
    ClassId,
    gym_class::{GymClass, NewClass},
};
use crate::ports::{ClassRepository as ClassRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::map_row_to_class;

/// ClassRepositoryのPostgreSQL実装
pub struct ClassRepository {
    pool: PgPool,
}

impl ClassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassRepositoryTrait for ClassRepository {
    async fn insert(&self, class: NewClass) -> Result<GymClass> {
        let row = sqlx::query(
            r#"
            INSERT INTO classes (title, trainer_name, start_time, end_time, capacity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, trainer_name, start_time, end_time, capacity
            "#,
        )
        .bind(&class.title)
        .bind(&class.trainer_name)
        .bind(class.start_time)
        .bind(class.end_time)
        .bind(class.capacity.value())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_class(&row, "id")
    }

    async fn list(&self) -> Result<Vec<GymClass>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, trainer_name, start_time, end_time, capacity
            FROM classes
            ORDER BY start_time ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| map_row_to_class(row, "id")).collect()
    }

    async fn get_by_id(&self, class_id: ClassId) -> Result<Option<GymClass>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, trainer_name, start_time, end_time, capacity
            FROM classes
            WHERE id = $1
            "#,
        )
        .bind(class_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(|row| map_row_to_class(row, "id")).transpose()
    }
}
