// src/domain/purchase_history_model.rs
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 購入履歴。集計（合計）にのみ使い、個別には表に出さない。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contact_id: Uuid,
    #[sea_orm(column_type = "Double", nullable)]
    pub total_amount: Option<f64>,
    // 日付が無い行はどの集計にも含めない
    #[sea_orm(nullable)]
    pub purchase_date: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
