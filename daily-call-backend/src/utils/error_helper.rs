// src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー

use crate::error::AppError;
use tracing::warn;

/// 単一のバリデーションエラーメッセージを生成
pub fn validation_error(field: &str, message: &str) -> AppError {
    warn!(field = %field, message = %message, "Validation failed");
    AppError::ValidationError(format!("{}: {}", field, message))
}
