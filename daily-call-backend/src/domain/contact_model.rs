// src/domain/contact_model.rs
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 顧客（contacts）。列名はフロントエンド由来のキャメルケース。
///
/// 日付系の文字列項目（`customer_since` など）は入力形式が揃っていないため
/// テキストのまま保持し、表示時に寛容にパースする。
#[derive(Clone, Debug, Default, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company: String,
    #[sea_orm(nullable)]
    pub name: Option<String>,
    #[sea_orm(nullable)]
    pub city: Option<String>,
    #[sea_orm(nullable)]
    pub province: Option<String>,
    #[sea_orm(nullable)]
    pub phone: Option<String>,
    #[sea_orm(nullable)]
    pub mobile: Option<String>,
    #[sea_orm(nullable)]
    pub salesman: Option<String>,
    #[sea_orm(column_name = "assignedAgent", nullable)]
    pub assigned_agent: Option<String>,
    #[sea_orm(column_name = "deliveryAddress", nullable)]
    pub delivery_address: Option<String>,
    #[sea_orm(column_name = "referBy", nullable)]
    pub refer_by: Option<String>,
    #[sea_orm(nullable)]
    pub terms: Option<String>,
    #[sea_orm(column_name = "priceGroup", nullable)]
    pub price_group: Option<String>,
    #[sea_orm(column_name = "dealershipTerms", nullable)]
    pub dealership_terms: Option<String>,
    #[sea_orm(column_name = "dealershipSince", nullable)]
    pub dealership_since: Option<String>,
    #[sea_orm(column_name = "dealershipQuota", column_type = "Double", nullable)]
    pub dealership_quota: Option<f64>,
    #[sea_orm(column_name = "customerSince", nullable)]
    pub customer_since: Option<String>,
    #[sea_orm(column_name = "ishinomotoDealerSince", nullable)]
    pub ishinomoto_dealer_since: Option<String>,
    #[sea_orm(column_name = "ishinomotoSignageSince", nullable)]
    pub ishinomoto_signage_since: Option<String>,
    #[sea_orm(column_name = "signageSince", nullable)]
    pub signage_since: Option<String>,
    #[sea_orm(column_name = "codeText", nullable)]
    pub code_text: Option<String>,
    #[sea_orm(column_name = "codeDate", nullable)]
    pub code_date: Option<String>,
    #[sea_orm(nullable)]
    pub status: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub balance: Option<f64>,
    pub is_deleted: bool,
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,
    #[sea_orm(nullable)]
    pub created_at: Option<DateTimeWithTimeZone>,
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
