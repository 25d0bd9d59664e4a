use crate::application::AuthSettings;
use std::{env, fmt::Display, str::FromStr};
use thiserror::Error;
use tracing::debug;

/// ログフィルタの既定値（RUST_LOG 未設定時）
pub const DEFAULT_LOG_FILTER: &str = "gym_erp=debug,tower_http=debug";

/// セッション有効期間の上限（1年）
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// 設定読み込みのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// アプリケーション設定
///
/// すべて環境変数から読み込み、未設定の項目は既定値を使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub database_max_connections: u32,
    pub bcrypt_cost: u32,
    pub session_ttl_hours: i64,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bcrypt_cost: u32 = try_load(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                message: format!("{bcrypt_cost} is outside 4..=31"),
            });
        }

        let session_ttl_hours: i64 = try_load(&lookup, "SESSION_TTL_HOURS", 24)?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(ConfigError::Invalid {
                key: "SESSION_TTL_HOURS",
                message: format!("{session_ttl_hours} is outside 1..={MAX_SESSION_TTL_HOURS}"),
            });
        }

        let database_max_connections: u32 = try_load(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            database_url: try_load(&lookup, "DATABASE_URL", "postgres://localhost/gym_erp".to_string())?,
            port: try_load(&lookup, "PORT", 5000)?,
            database_max_connections,
            bcrypt_cost,
            session_ttl_hours,
            log_filter: try_load(&lookup, "RUST_LOG", DEFAULT_LOG_FILTER.to_string())?,
        })
    }

    /// session_ttl_hours は from_lookup で範囲を検証済み
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            password_cost: self.bcrypt_cost,
            session_ttl: chrono::Duration::hours(self.session_ttl_hours),
        }
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
        None => {
            debug!("{key} not set, using default");
            Ok(default)
        }
    }
}
