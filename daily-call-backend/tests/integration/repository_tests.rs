// tests/integration/repository_tests.rs
//
// Docker 上の Postgres が必要なため既定では実行しない:
//   cargo test -p daily-call-backend --test integration -- --ignored

use daily_call_backend::domain::calendar::DateRange;
use daily_call_backend::domain::customer_status::CustomerStatus;
use daily_call_backend::domain::{
    call_log_model, contact_model, customer_metric_model, lbc_rto_record_model,
    purchase_history_model, sales_return_model,
};
use daily_call_backend::repository::daily_call_repository::DailyCallRepository;
use daily_call_backend::repository::daily_call_source::DailyCallSource;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel};

use crate::common::db::TestDatabase;
use crate::common::init_test_env;
use crate::common::test_data::*;

async fn insert_contact(db: &DatabaseConnection, contact: contact_model::Model) {
    contact.into_active_model().insert(db).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_find_customers_excludes_deleted_and_filters_status() {
    init_test_env();
    let db = TestDatabase::new().await;
    let repo = DailyCallRepository::new(db.connection.clone());

    let active = create_test_contact_with_status("Golden Bakery", "Active");
    let inactive = create_test_contact_with_status("Silver Hardware", "Inactive");
    let mut deleted = create_test_contact_with_status("Closed Store", "Active");
    deleted.is_deleted = true;
    let active_id = active.id;

    insert_contact(&db.connection, active).await;
    insert_contact(&db.connection, inactive).await;
    insert_contact(&db.connection, deleted).await;

    let all = repo.find_customers(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let only_active = repo
        .find_customers(Some(CustomerStatus::Active))
        .await
        .unwrap();
    assert_eq!(only_active.len(), 1);
    assert_eq!(only_active[0].id, active_id);
}

#[tokio::test]
#[ignore]
async fn test_child_tables_scoped_by_contact_ids() {
    init_test_env();
    let db = TestDatabase::new().await;
    let repo = DailyCallRepository::new(db.connection.clone());

    let first = create_test_contact("First");
    let second = create_test_contact("Second");
    let (first_id, second_id) = (first.id, second.id);
    insert_contact(&db.connection, first).await;
    insert_contact(&db.connection, second).await;

    for purchase in [
        create_test_purchase(first_id, 100.0, local_at(2025, 1, 2, 10, 0)),
        create_test_purchase(second_id, 200.0, local_at(2025, 1, 3, 10, 0)),
    ] {
        purchase.into_active_model().insert(&db.connection).await.unwrap();
    }
    create_test_metric(first_id, 10.0, 20.0)
        .into_active_model()
        .insert(&db.connection)
        .await
        .unwrap();

    let purchases: Vec<purchase_history_model::Model> =
        repo.find_purchases(&[first_id]).await.unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].total_amount, Some(100.0));

    let metrics: Vec<customer_metric_model::Model> = repo
        .find_metrics(&[first_id, second_id])
        .await
        .unwrap();
    assert_eq!(metrics.len(), 1);

    assert!(repo.find_purchases(&[]).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_call_logs_within_inclusive_range_newest_first() {
    init_test_env();
    let db = TestDatabase::new().await;
    let repo = DailyCallRepository::new(db.connection.clone());

    let contact = create_test_contact("Golden Bakery");
    let id = contact.id;
    insert_contact(&db.connection, contact).await;

    for log in [
        create_test_call_log(id, local_at(2025, 1, 1, 0, 0), "call", None),
        create_test_call_log(id, local_at(2025, 1, 15, 12, 0), "text", Some("hi")),
        create_test_call_log(id, local_at(2025, 1, 31, 23, 59), "call", None),
        create_test_call_log(id, local_at(2025, 2, 1, 0, 0), "call", None),
    ] {
        log.into_active_model().insert(&db.connection).await.unwrap();
    }

    let range = DateRange::month_of(utc_at(2025, 1, 10, 12, 0), manila()).unwrap();
    let logs: Vec<call_log_model::Model> = repo.find_call_logs(&[id], &range).await.unwrap();

    assert_eq!(logs.len(), 3);
    assert!(logs
        .windows(2)
        .all(|pair| pair[0].occurred_at >= pair[1].occurred_at));
}

#[tokio::test]
#[ignore]
async fn test_rto_and_returns_newest_first() {
    init_test_env();
    let db = TestDatabase::new().await;
    let repo = DailyCallRepository::new(db.connection.clone());

    let contact = create_test_contact("Golden Bakery");
    let id = contact.id;
    insert_contact(&db.connection, contact).await;

    for record in [
        create_test_rto_record(id, ymd(2025, 1, 3), "LBC-001"),
        create_test_rto_record(id, ymd(2025, 2, 3), "LBC-002"),
    ] {
        record.into_active_model().insert(&db.connection).await.unwrap();
    }
    for sales_return in [
        create_test_sales_return(id, ymd(2025, 1, 9), Some("processed")),
        create_test_sales_return(id, ymd(2025, 3, 9), None),
    ] {
        sales_return
            .into_active_model()
            .insert(&db.connection)
            .await
            .unwrap();
    }

    let records: Vec<lbc_rto_record_model::Model> = repo.find_lbc_rto_records(id).await.unwrap();
    assert_eq!(records[0].tracking_number, "LBC-002");

    let returns: Vec<sales_return_model::Model> = repo.find_sales_returns(id).await.unwrap();
    assert_eq!(returns[0].return_date, Some(ymd(2025, 3, 9)));
}
