// src/api/dto/daily_call_dto.rs

use crate::domain::customer_status::DailyCallFilterStatus;
use crate::domain::daily_activity::DailyActivityRecord;
use crate::domain::{lbc_rto_record_model, sales_return_model};
use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// パイプラインへの入力。どちらも省略時は無制限
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyCallFilterParams {
    pub status: DailyCallFilterStatus,
    pub search: String,
}

impl DailyCallFilterParams {
    pub fn new(status: DailyCallFilterStatus, search: impl Into<String>) -> Self {
        Self {
            status,
            search: search.into(),
        }
    }
}

/// GET /daily-call/customers のクエリ
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct DailyCallCustomerQuery {
    pub status: Option<String>,
    #[validate(length(max = 200, message = "Search text must be at most 200 characters"))]
    pub search: Option<String>,
}

impl DailyCallCustomerQuery {
    pub fn into_filter(self) -> Result<DailyCallFilterParams, AppError> {
        self.validate()?;

        let status = self
            .status
            .as_deref()
            .unwrap_or_default()
            .parse::<DailyCallFilterStatus>()
            .map_err(AppError::BadRequest)?;

        Ok(DailyCallFilterParams {
            status,
            search: self.search.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WeeklyRangeQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DailyActivityQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// モニタリング表の1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCallCustomerRow {
    pub id: Uuid,
    pub source: String,
    pub assigned_to: String,
    pub assigned_date: String,
    pub client_since: String,
    pub city: String,
    pub shop_name: String,
    pub contact_number: String,
    pub code_date: String,
    pub ishinomoto_dealer_since: String,
    pub ishinomoto_signage_since: String,
    pub quota: f64,
    pub mode_of_payment: String,
    pub courier: String,
    pub status: Option<String>,
    pub outstanding_balance: f64,
    pub average_monthly_order: f64,
    pub monthly_order: f64,
    /// 週範囲と同じ順・同じ長さ
    pub weekly_range_totals: Vec<f64>,
    pub daily_activity: Vec<DailyActivityRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RtoStatus {
    Pending,
    Resolved,
    Cancelled,
}

impl RtoStatus {
    /// lbc_rto_records.status の値。未知の値は pending
    pub fn from_record_status(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "resolved" => Self::Resolved,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    /// sales_returns.status の値を RTO の状態に読み替える
    pub fn from_return_status(status: Option<&str>) -> Self {
        match status {
            Some("processed") => Self::Resolved,
            Some("cancelled") => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

pub const DEFAULT_RTO_REASON: &str = "Return to origin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LbcRtoRecord {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub date: Option<NaiveDate>,
    pub tracking_number: String,
    pub reason: String,
    pub status: RtoStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<lbc_rto_record_model::Model> for LbcRtoRecord {
    fn from(model: lbc_rto_record_model::Model) -> Self {
        Self {
            id: model.id,
            contact_id: model.contact_id,
            date: Some(model.date),
            tracking_number: model.tracking_number,
            reason: model.reason,
            status: RtoStatus::from_record_status(&model.status),
            notes: model.notes,
        }
    }
}

impl From<sales_return_model::Model> for LbcRtoRecord {
    fn from(model: sales_return_model::Model) -> Self {
        let short_id: String = model.id.simple().to_string().chars().take(8).collect();

        Self {
            id: model.id,
            contact_id: model.contact_id,
            date: model.return_date,
            tracking_number: format!("RTO-{}", short_id.to_uppercase()),
            reason: model
                .reason
                .filter(|reason| !reason.is_empty())
                .unwrap_or_else(|| DEFAULT_RTO_REASON.to_string()),
            status: RtoStatus::from_return_status(model.status.as_deref()),
            notes: model.notes,
        }
    }
}

/// データベース Webhook の通知本体
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseChangePayload {
    #[serde(rename = "type")]
    pub event_type: String,
    pub table: String,
    #[serde(default)]
    pub schema: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeAcceptedDto {
    pub table: String,
    pub kind: String,
    /// 監視対象の表かどうか
    pub watched: bool,
    /// 通知を受け取った購読者数
    pub receivers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}
