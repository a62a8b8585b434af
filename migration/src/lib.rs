// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 顧客マスタ
mod m20250801_000001_create_contacts_table;

// 顧客に紐づく取引・指標・通話ログ
mod m20250801_000002_create_purchase_history_table;
mod m20250801_000003_create_customer_metrics_table;
mod m20250801_000004_create_call_logs_table;

// 返品・RTO
mod m20250801_000005_create_return_tables;

// デイリーコール集計用インデックス
mod m20250801_000006_add_daily_call_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成（依存関係なし）
            Box::new(m20250801_000001_create_contacts_table::Migration),
            // 2. contacts に依存するテーブル
            Box::new(m20250801_000002_create_purchase_history_table::Migration),
            Box::new(m20250801_000003_create_customer_metrics_table::Migration),
            Box::new(m20250801_000004_create_call_logs_table::Migration),
            Box::new(m20250801_000005_create_return_tables::Migration),
            // 3. インデックス追加
            Box::new(m20250801_000006_add_daily_call_indexes::Migration),
        ]
    }
}
