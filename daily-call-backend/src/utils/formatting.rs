// src/utils/formatting.rs

//! 表示用の整形ヘルパー。
//!
//! どの関数も不正な入力で失敗せず、プレースホルダー文字列に落とす。

use crate::domain::calendar::local_date;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// 値が無い・読めない場合の表示
pub const PLACEHOLDER: &str = "—";

// タイムゾーン付きの表記（Postgres のテキスト出力を含む）
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

// タイムゾーンなしの日時はローカル時刻として扱う
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// 前後の空白を除いて小文字化
pub fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 空文字を「無し」とみなして最初の値を返す
pub fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| !value.is_empty())
}

/// 0 を「無し」とみなして最初の値を返す
pub fn first_nonzero(candidates: &[Option<f64>]) -> f64 {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| *value != 0.0 && !value.is_nan())
        .unwrap_or(0.0)
}

/// 文字列を業務タイムゾーンでの暦日として解釈する
pub fn parse_display_date(value: &str, offset: FixedOffset) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(local_date(instant.with_timezone(&Utc), offset));
    }

    for format in OFFSET_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(value, format) {
            return Some(local_date(instant.with_timezone(&Utc), offset));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(value, format) {
            return Some(local.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// "Jan 6, 2025" 形式
pub fn format_day(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_date(value: Option<&str>, offset: FixedOffset) -> String {
    value
        .and_then(|value| parse_display_date(value, offset))
        .map_or_else(|| PLACEHOLDER.to_string(), format_day)
}

pub fn format_timestamp(value: Option<DateTime<FixedOffset>>, offset: FixedOffset) -> String {
    value.map_or_else(
        || PLACEHOLDER.to_string(),
        |instant| format_day(local_date(instant.with_timezone(&Utc), offset)),
    )
}

/// コード文字列と日付を "CODE (Jan 6, 2025)" の形にまとめる
pub fn format_code_date(
    code_text: Option<&str>,
    code_date: Option<&str>,
    offset: FixedOffset,
) -> String {
    let trimmed_text = code_text.unwrap_or_default().trim();
    let formatted_date = code_date.and_then(|value| parse_display_date(value, offset));

    match (trimmed_text.is_empty(), formatted_date) {
        (false, Some(date)) => format!("{} ({})", trimmed_text, format_day(date)),
        (false, None) => trimmed_text.to_string(),
        (true, Some(date)) => format_day(date),
        (true, None) => PLACEHOLDER.to_string(),
    }
}
