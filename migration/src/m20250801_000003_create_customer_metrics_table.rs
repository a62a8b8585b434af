use super::m20250801_000001_create_contacts_table::Contacts;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 顧客ごとに最大1行（contact_id を主キーにする）
        manager
            .create_table(
                Table::create()
                    .table(CustomerMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerMetrics::ContactId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomerMetrics::OutstandingBalance).double())
                    .col(ColumnDef::new(CustomerMetrics::AverageMonthlyPurchase).double())
                    .col(
                        ColumnDef::new(CustomerMetrics::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_metrics_contact_id")
                            .from(CustomerMetrics::Table, CustomerMetrics::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerMetrics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CustomerMetrics {
    Table,
    ContactId,
    OutstandingBalance,
    AverageMonthlyPurchase,
    UpdatedAt,
}
