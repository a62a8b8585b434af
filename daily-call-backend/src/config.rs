// src/config.rs
use chrono::FixedOffset;
use dotenvy::dotenv;
use std::env;
use thiserror::Error;

/// 業務タイムゾーンの既定値 (Asia/Manila)
pub const DEFAULT_UTC_OFFSET: &str = "+08:00";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid UTC offset '{0}', expected +HH:MM or -HH:MM")]
    InvalidOffset(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_schema: Option<String>,
    pub utc_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let db_schema = env::var("DB_SCHEMA")
            .ok()
            .map(|schema| schema.trim().to_string())
            .filter(|schema| !schema.is_empty());
        let utc_offset = parse_utc_offset(
            &env::var("DAILY_CALL_UTC_OFFSET").unwrap_or_else(|_| DEFAULT_UTC_OFFSET.to_string()),
        )?;

        Ok(Config {
            database_url,
            server_addr,
            db_schema,
            utc_offset,
        })
    }
}

/// "+08:00" / "-05:30" / "Z" をパース
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).ok_or_else(|| ConfigError::InvalidOffset(value.into()));
    }

    value
        .parse::<FixedOffset>()
        .map_err(|_| ConfigError::InvalidOffset(value.to_string()))
}
