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
                    .table(CallLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CallLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CallLogs::ContactId).uuid().not_null())
                    .col(
                        ColumnDef::new(CallLogs::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CallLogs::Channel)
                            .string()
                            .not_null()
                            .default("call"), // call / text
                    )
                    .col(ColumnDef::new(CallLogs::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_call_logs_contact_id")
                            .from(CallLogs::Table, CallLogs::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CallLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CallLogs {
    Table,
    Id,
    ContactId,
    OccurredAt,
    Channel,
    Notes,
}
