// src/domain/customer_status.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// 顧客の状態（contacts.status に保存される値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerStatus {
    Active,
    Inactive,
    Prospective,
    Blacklisted,
}

impl CustomerStatus {
    /// 文字列からCustomerStatusに変換（大文字小文字は区別しない）
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "prospective" => Some(Self::Prospective),
            "blacklisted" => Some(Self::Blacklisted),
            _ => None,
        }
    }

    /// データベースに保存されている表記
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Prospective => "Prospective",
            Self::Blacklisted => "Blacklisted",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// デイリーコール画面の状態フィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DailyCallFilterStatus {
    #[default]
    All,
    Active,
    Inactive,
    Prospective,
}

impl DailyCallFilterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Prospective => "prospective",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::All, Self::Active, Self::Inactive, Self::Prospective]
    }

    /// 取得元で適用する状態。`All` は絞り込みなし。
    pub fn to_customer_status(self) -> Option<CustomerStatus> {
        match self {
            Self::All => None,
            Self::Active => Some(CustomerStatus::Active),
            Self::Inactive => Some(CustomerStatus::Inactive),
            Self::Prospective => Some(CustomerStatus::Prospective),
        }
    }
}

impl fmt::Display for DailyCallFilterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DailyCallFilterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "prospective" => Ok(Self::Prospective),
            _ => Err(format!(
                "Invalid status filter: '{}'. Valid filters are: {}",
                s,
                Self::all()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}
