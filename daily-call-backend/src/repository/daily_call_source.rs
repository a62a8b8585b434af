// src/repository/daily_call_source.rs

use crate::domain::calendar::DateRange;
use crate::domain::customer_status::CustomerStatus;
use crate::domain::{
    call_log_model, contact_model, customer_metric_model, lbc_rto_record_model,
    purchase_history_model, sales_return_model,
};
use async_trait::async_trait;
use sea_orm::DbErr;
use uuid::Uuid;

/// 日次コールモニタリングが読む表へのアクセス。
///
/// 集計パイプラインはこのトレイト越しにのみデータを取得する。
/// テストではインメモリ実装に差し替える。
#[async_trait]
pub trait DailyCallSource: Send + Sync {
    /// 削除されていない顧客。`status` 指定時はその状態のみ
    async fn find_customers(
        &self,
        status: Option<CustomerStatus>,
    ) -> Result<Vec<contact_model::Model>, DbErr>;

    async fn find_purchases(
        &self,
        contact_ids: &[Uuid],
    ) -> Result<Vec<purchase_history_model::Model>, DbErr>;

    async fn find_metrics(
        &self,
        contact_ids: &[Uuid],
    ) -> Result<Vec<customer_metric_model::Model>, DbErr>;

    /// `range` の両端を含む期間の通話ログ。新しい順
    async fn find_call_logs(
        &self,
        contact_ids: &[Uuid],
        range: &DateRange,
    ) -> Result<Vec<call_log_model::Model>, DbErr>;

    /// LBC の RTO 記録。新しい順
    async fn find_lbc_rto_records(
        &self,
        contact_id: Uuid,
    ) -> Result<Vec<lbc_rto_record_model::Model>, DbErr>;

    /// 返品記録。新しい順
    async fn find_sales_returns(
        &self,
        contact_id: Uuid,
    ) -> Result<Vec<sales_return_model::Model>, DbErr>;
}
