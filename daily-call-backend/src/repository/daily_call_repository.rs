// src/repository/daily_call_repository.rs
use crate::domain::calendar::DateRange;
use crate::domain::customer_status::CustomerStatus;
use crate::domain::{
    call_log_model::{self, Entity as CallLogEntity},
    contact_model::{self, Entity as ContactEntity},
    customer_metric_model::{self, Entity as CustomerMetricEntity},
    lbc_rto_record_model::{self, Entity as LbcRtoRecordEntity},
    purchase_history_model::{self, Entity as PurchaseHistoryEntity},
    sales_return_model::{self, Entity as SalesReturnEntity},
};
use crate::repository::daily_call_source::DailyCallSource;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

/// `DailyCallSource` の Postgres 実装。
/// スキーマは接続プール側の search_path で決まる。
#[derive(Clone)]
pub struct DailyCallRepository {
    db: DbConn,
}

impl DailyCallRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DailyCallSource for DailyCallRepository {
    async fn find_customers(
        &self,
        status: Option<CustomerStatus>,
    ) -> Result<Vec<contact_model::Model>, DbErr> {
        let mut conditions = Condition::all().add(contact_model::Column::IsDeleted.eq(false));

        // ステータスフィルタ
        if let Some(status) = status {
            conditions = conditions.add(contact_model::Column::Status.eq(status.as_str()));
        }

        ContactEntity::find()
            .filter(conditions)
            .order_by_asc(contact_model::Column::Company)
            .all(&self.db)
            .await
    }

    async fn find_purchases(
        &self,
        contact_ids: &[Uuid],
    ) -> Result<Vec<purchase_history_model::Model>, DbErr> {
        if contact_ids.is_empty() {
            return Ok(Vec::new());
        }

        PurchaseHistoryEntity::find()
            .filter(purchase_history_model::Column::ContactId.is_in(contact_ids.iter().copied()))
            .all(&self.db)
            .await
    }

    async fn find_metrics(
        &self,
        contact_ids: &[Uuid],
    ) -> Result<Vec<customer_metric_model::Model>, DbErr> {
        if contact_ids.is_empty() {
            return Ok(Vec::new());
        }

        CustomerMetricEntity::find()
            .filter(customer_metric_model::Column::ContactId.is_in(contact_ids.iter().copied()))
            .all(&self.db)
            .await
    }

    async fn find_call_logs(
        &self,
        contact_ids: &[Uuid],
        range: &DateRange,
    ) -> Result<Vec<call_log_model::Model>, DbErr> {
        if contact_ids.is_empty() {
            return Ok(Vec::new());
        }

        CallLogEntity::find()
            .filter(
                Condition::all()
                    .add(call_log_model::Column::ContactId.is_in(contact_ids.iter().copied()))
                    .add(call_log_model::Column::OccurredAt.gte(range.from))
                    .add(call_log_model::Column::OccurredAt.lte(range.to)),
            )
            .order_by_desc(call_log_model::Column::OccurredAt)
            .all(&self.db)
            .await
    }

    async fn find_lbc_rto_records(
        &self,
        contact_id: Uuid,
    ) -> Result<Vec<lbc_rto_record_model::Model>, DbErr> {
        LbcRtoRecordEntity::find()
            .filter(lbc_rto_record_model::Column::ContactId.eq(contact_id))
            .order_by_desc(lbc_rto_record_model::Column::Date)
            .all(&self.db)
            .await
    }

    async fn find_sales_returns(
        &self,
        contact_id: Uuid,
    ) -> Result<Vec<sales_return_model::Model>, DbErr> {
        SalesReturnEntity::find()
            .filter(sales_return_model::Column::ContactId.eq(contact_id))
            .order_by_desc(sales_return_model::Column::ReturnDate)
            .all(&self.db)
            .await
    }
}
