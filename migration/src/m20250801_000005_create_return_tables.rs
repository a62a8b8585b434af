use super::m20250801_000001_create_contacts_table::Contacts;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 返品（sales_returns）
        manager
            .create_table(
                Table::create()
                    .table(SalesReturns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SalesReturns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SalesReturns::ContactId).uuid().not_null())
                    .col(ColumnDef::new(SalesReturns::ReturnDate).date())
                    .col(ColumnDef::new(SalesReturns::Reason).text())
                    .col(ColumnDef::new(SalesReturns::Status).string())
                    .col(ColumnDef::new(SalesReturns::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_returns_contact_id")
                            .from(SalesReturns::Table, SalesReturns::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // LBC の RTO（return to origin）記録
        manager
            .create_table(
                Table::create()
                    .table(LbcRtoRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LbcRtoRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LbcRtoRecords::ContactId).uuid().not_null())
                    .col(ColumnDef::new(LbcRtoRecords::Date).date().not_null())
                    .col(ColumnDef::new(LbcRtoRecords::TrackingNumber).string().not_null())
                    .col(ColumnDef::new(LbcRtoRecords::Reason).text().not_null())
                    .col(
                        ColumnDef::new(LbcRtoRecords::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(LbcRtoRecords::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lbc_rto_records_contact_id")
                            .from(LbcRtoRecords::Table, LbcRtoRecords::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LbcRtoRecords::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SalesReturns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SalesReturns {
    Table,
    Id,
    ContactId,
    ReturnDate,
    Reason,
    Status,
    Notes,
}

#[derive(DeriveIden)]
enum LbcRtoRecords {
    Table,
    Id,
    ContactId,
    Date,
    TrackingNumber,
    Reason,
    Status,
    Notes,
}
