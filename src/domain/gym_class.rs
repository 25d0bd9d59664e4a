use chrono::{DateTime, Utc};

use super::{Capacity, ClassId, DomainValidationError, required_text};

/// クラス（トレーナーが担当する定員付きのレッスン枠）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GymClass {
    pub id: ClassId,
    pub title: String,
    pub trainer_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: Capacity,
}

/// 新規クラス（永続化前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClass {
    pub title: String,
    pub trainer_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: Capacity,
}

impl NewClass {
    /// クラス作成の入力を検証する
    ///
    /// ビジネスルール：
    /// - タイトル必須
    /// - 終了時刻は開始時刻より後
    /// - 定員は1以上
    pub fn new(
        title: &str,
        trainer_name: Option<&str>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        capacity: i32,
    ) -> Result<Self, DomainValidationError> {
        let title = required_text("Title", title)?;
        if end_time <= start_time {
            return Err(DomainValidationError::EndBeforeStart);
        }

        Ok(Self {
            title,
            trainer_name: trainer_name
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            start_time,
            end_time,
            capacity: Capacity::new(capacity)?,
        })
    }
}
