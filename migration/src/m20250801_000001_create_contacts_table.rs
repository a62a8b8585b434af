use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contacts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contacts::Company).text().not_null())
                    .col(ColumnDef::new(Contacts::Name).text())
                    .col(ColumnDef::new(Contacts::City).text())
                    .col(ColumnDef::new(Contacts::Province).text())
                    .col(ColumnDef::new(Contacts::Phone).text())
                    .col(ColumnDef::new(Contacts::Mobile).text())
                    .col(ColumnDef::new(Contacts::Salesman).text())
                    .col(ColumnDef::new(Contacts::AssignedAgent).text())
                    .col(ColumnDef::new(Contacts::DeliveryAddress).text())
                    .col(ColumnDef::new(Contacts::ReferBy).text())
                    .col(ColumnDef::new(Contacts::Terms).text())
                    .col(ColumnDef::new(Contacts::PriceGroup).text())
                    .col(ColumnDef::new(Contacts::DealershipTerms).text())
                    // 日付系の項目は入力がまちまちなのでテキストで保持する
                    .col(ColumnDef::new(Contacts::DealershipSince).text())
                    .col(ColumnDef::new(Contacts::DealershipQuota).double())
                    .col(ColumnDef::new(Contacts::CustomerSince).text())
                    .col(ColumnDef::new(Contacts::IshinomotoDealerSince).text())
                    .col(ColumnDef::new(Contacts::IshinomotoSignageSince).text())
                    .col(ColumnDef::new(Contacts::SignageSince).text())
                    .col(ColumnDef::new(Contacts::CodeText).text())
                    .col(ColumnDef::new(Contacts::CodeDate).text())
                    .col(ColumnDef::new(Contacts::Status).string())
                    .col(ColumnDef::new(Contacts::Balance).double())
                    .col(
                        ColumnDef::new(Contacts::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Contacts::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Contacts::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Contacts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await
    }
}

/// contacts テーブルはフロントエンド由来のキャメルケース列名を持つ
#[derive(DeriveIden)]
pub enum Contacts {
    Table,
    Id,
    Company,
    Name,
    City,
    Province,
    Phone,
    Mobile,
    Salesman,
    #[sea_orm(iden = "assignedAgent")]
    AssignedAgent,
    #[sea_orm(iden = "deliveryAddress")]
    DeliveryAddress,
    #[sea_orm(iden = "referBy")]
    ReferBy,
    Terms,
    #[sea_orm(iden = "priceGroup")]
    PriceGroup,
    #[sea_orm(iden = "dealershipTerms")]
    DealershipTerms,
    #[sea_orm(iden = "dealershipSince")]
    DealershipSince,
    #[sea_orm(iden = "dealershipQuota")]
    DealershipQuota,
    #[sea_orm(iden = "customerSince")]
    CustomerSince,
    #[sea_orm(iden = "ishinomotoDealerSince")]
    IshinomotoDealerSince,
    #[sea_orm(iden = "ishinomotoSignageSince")]
    IshinomotoSignageSince,
    #[sea_orm(iden = "signageSince")]
    SignageSince,
    #[sea_orm(iden = "codeText")]
    CodeText,
    #[sea_orm(iden = "codeDate")]
    CodeDate,
    Status,
    Balance,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
