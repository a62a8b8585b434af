// src/domain/call_channel.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// 通話ログの連絡手段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallChannel {
    Call,
    Text,
}

impl CallChannel {
    /// `text` 以外はすべて通話として扱う
    pub fn from_db(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("text") {
            Self::Text
        } else {
            Self::Call
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Text => "text",
        }
    }

    /// 同じ日に通話が1件でもあれば `Call`
    pub fn dominant(self, other: Self) -> Self {
        if self == Self::Call || other == Self::Call {
            Self::Call
        } else {
            Self::Text
        }
    }
}

impl fmt::Display for CallChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
