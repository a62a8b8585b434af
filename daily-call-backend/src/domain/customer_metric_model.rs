// src/domain/customer_metric_model.rs
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 顧客ごとの事前計算済み指標（顧客あたり最大1行、無い場合は0扱い）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_metrics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub contact_id: Uuid,
    #[sea_orm(column_type = "Double", nullable)]
    pub outstanding_balance: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub average_monthly_purchase: Option<f64>,
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
