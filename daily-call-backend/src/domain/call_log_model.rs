// src/domain/call_log_model.rs
use crate::domain::call_channel::CallChannel;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "call_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contact_id: Uuid,
    pub occurred_at: DateTimeWithTimeZone,
    pub channel: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
}

impl Model {
    pub fn channel(&self) -> CallChannel {
        CallChannel::from_db(&self.channel)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
