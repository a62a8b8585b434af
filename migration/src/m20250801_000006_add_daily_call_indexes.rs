use super::m20250801_000001_create_contacts_table::Contacts;
use super::m20250801_000002_create_purchase_history_table::PurchaseHistory;
use super::m20250801_000004_create_call_logs_table::CallLogs;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // status での絞り込み用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Contacts::Table)
                    .name("idx_contacts_status")
                    .col(Contacts::Status)
                    .to_owned(),
            )
            .await?;

        // contact_id IN (...) での一括取得用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(PurchaseHistory::Table)
                    .name("idx_purchase_history_contact_id")
                    .col(PurchaseHistory::ContactId)
                    .to_owned(),
            )
            .await?;

        // 月範囲の通話ログ取得用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(CallLogs::Table)
                    .name("idx_call_logs_contact_id_occurred_at")
                    .col(CallLogs::ContactId)
                    .col(CallLogs::OccurredAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(CallLogs::Table)
                    .name("idx_call_logs_contact_id_occurred_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(PurchaseHistory::Table)
                    .name("idx_purchase_history_contact_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Contacts::Table)
                    .name("idx_contacts_status")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
