use super::m20250801_000001_create_contacts_table::Contacts;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PurchaseHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseHistory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PurchaseHistory::ContactId).uuid().not_null())
                    .col(ColumnDef::new(PurchaseHistory::TotalAmount).double())
                    .col(ColumnDef::new(PurchaseHistory::PurchaseDate).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_history_contact_id")
                            .from(PurchaseHistory::Table, PurchaseHistory::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PurchaseHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PurchaseHistory {
    Table,
    Id,
    ContactId,
    TotalAmount,
    PurchaseDate,
}
