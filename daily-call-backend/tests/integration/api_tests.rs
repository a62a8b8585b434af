// tests/integration/api_tests.rs

use axum::http::StatusCode;
use axum::Router;
use daily_call_backend::api::AppState;
use daily_call_backend::app_router;
use daily_call_backend::service::change_notification_service::{
    ChangeNotificationService, DailyCallChangeCallbacks,
};
use daily_call_backend::service::daily_call_service::DailyCallService;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::fake_source::{FakeDailyCallSource, FakeTable};
use crate::common::init_test_env;
use crate::common::request::{body_json, get_request, json_request};
use crate::common::test_data::*;

fn setup_app(source: FakeDailyCallSource) -> (Router, Arc<DailyCallService>, Arc<ChangeNotificationService>) {
    init_test_env();
    let service = Arc::new(DailyCallService::new(Arc::new(source), manila()));
    let hub = Arc::new(ChangeNotificationService::new(16));
    let app = app_router(AppState::new(service.clone(), hub.clone()));
    (app, service, hub)
}

#[tokio::test]
async fn test_health() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new());

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_list_customers() {
    let (app, service, _) = setup_app(FakeDailyCallSource::new().with_customers(vec![
        create_test_contact("Zeta Store"),
        create_test_contact("alpha Trading"),
    ]));

    let response = app
        .oneshot(get_request("/daily-call/customers"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["meta"]["count"], 2);

    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows[0]["shopName"], "alpha Trading");
    assert_eq!(rows[1]["shopName"], "Zeta Store");
    assert_eq!(rows[0]["assignedTo"], "Unassigned");
    assert_eq!(
        rows[0]["weeklyRangeTotals"].as_array().unwrap().len(),
        service.weekly_range_buckets(None).len()
    );
}

#[tokio::test]
async fn test_list_customers_with_search_and_status() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new().with_customers(vec![
        create_test_contact_with_status("Golden Bakery", "Active"),
        create_test_contact_with_status("Golden Hardware", "Inactive"),
        create_test_contact_with_status("Silver Bakery", "Active"),
    ]));

    let response = app
        .oneshot(get_request(
            "/daily-call/customers?status=active&search=golden",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["shopName"], "Golden Bakery");
}

#[tokio::test]
async fn test_list_customers_unknown_status() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new());

    let response = app
        .oneshot(get_request("/daily-call/customers?status=vip"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "bad_request");
}

#[tokio::test]
async fn test_list_customers_failure_renders_empty_list() {
    let (app, _, _) = setup_app(
        FakeDailyCallSource::new()
            .with_customers(vec![create_test_contact("Golden Bakery")])
            .failing_on(FakeTable::Purchases),
    );

    let response = app
        .oneshot(get_request("/daily-call/customers"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_request_id_is_echoed_in_meta() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new());

    let request = axum::http::Request::builder()
        .uri("/daily-call/customers")
        .header("x-request-id", "req-from-client")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["meta"]["request_id"], "req-from-client");
}

#[tokio::test]
async fn test_weekly_ranges_for_date() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new());

    let response = app
        .oneshot(get_request("/daily-call/weekly-ranges?date=2025-01-01"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let buckets = body["data"].as_array().unwrap();
    let labels: Vec<&str> = buckets
        .iter()
        .map(|bucket| bucket["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec![
            "JANUARY 1-4",
            "JANUARY 6-11",
            "JANUARY 13-18",
            "JANUARY 20-25",
            "JANUARY 27-31"
        ]
    );
    assert_eq!(buckets[0]["startDay"], 1);
    assert_eq!(buckets[0]["endDay"], 4);
    assert_eq!(buckets[0]["month"], 1);
    assert_eq!(buckets[0]["year"], 2025);
}

#[tokio::test]
async fn test_weekly_ranges_invalid_date() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new());

    let response = app
        .oneshot(get_request("/daily-call/weekly-ranges?date=01/2025"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_customer_activity() {
    let contact = create_test_contact("Golden Bakery");
    let id = contact.id;
    let (app, _, _) = setup_app(FakeDailyCallSource::new().with_call_logs(vec![
        create_test_call_log(id, local_at(2025, 1, 6, 9, 0), "call", Some("Follow-up")),
        create_test_call_log(id, local_at(2025, 1, 6, 10, 0), "text", None),
        create_test_call_log(id, local_at(2025, 1, 20, 10, 0), "text", None),
    ]));

    let response = app
        .oneshot(get_request(&format!(
            "/daily-call/customers/{}/activity?from=2025-01-01&to=2025-01-10",
            id
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["activity_date"], "2025-01-06");
    assert_eq!(records[0]["activity_type"], "call");
    assert_eq!(records[0]["activity_count"], 2);
    assert_eq!(records[0]["notes"], "Follow-up");
}

#[tokio::test]
async fn test_customer_activity_rejects_reversed_range() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new());

    let response = app
        .oneshot(get_request(&format!(
            "/daily-call/customers/{}/activity?from=2025-01-10&to=2025-01-01",
            Uuid::new_v4()
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn test_customer_activity_rejects_unrepresentable_dates() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new());

    // +08:00 では最小日の始まりが UTC に変換できない
    let response = app
        .oneshot(get_request(&format!(
            "/daily-call/customers/{}/activity?from=-262143-01-01&to=2025-01-01",
            Uuid::new_v4()
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_type"], "validation_error");
    assert!(body["message"].as_str().unwrap().starts_with("from:"));

    // 西側オフセットでは最大日の終わりが UTC に変換できない
    let new_york = chrono::FixedOffset::west_opt(5 * 3600).unwrap();
    let service = Arc::new(DailyCallService::new(
        Arc::new(FakeDailyCallSource::new()),
        new_york,
    ));
    let hub = Arc::new(ChangeNotificationService::new(16));
    let app = app_router(AppState::new(service, hub));

    let response = app
        .oneshot(get_request(&format!(
            "/daily-call/customers/{}/activity?from=2025-01-01&to=%2B262142-12-31",
            Uuid::new_v4()
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().starts_with("to:"));
}

#[tokio::test]
async fn test_customer_activity_rejects_invalid_uuid() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new());

    let response = app
        .oneshot(get_request("/daily-call/customers/not-a-uuid/activity"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_type"], "bad_request");
}

#[tokio::test]
async fn test_customer_rto_fallback() {
    let contact = create_test_contact("Golden Bakery");
    let id = contact.id;
    let (app, _, _) = setup_app(
        FakeDailyCallSource::new()
            .with_sales_returns(vec![create_test_sales_return(
                id,
                ymd(2025, 1, 8),
                Some("processed"),
            )])
            .failing_on(FakeTable::LbcRtoRecords),
    );

    let response = app
        .oneshot(get_request(&format!("/daily-call/customers/{}/rto", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["status"], "resolved");
    assert_eq!(records[0]["date"], "2025-01-08");
    assert!(records[0]["tracking_number"]
        .as_str()
        .unwrap()
        .starts_with("RTO-"));
}

#[tokio::test]
async fn test_publish_change_reaches_subscriber() {
    let (app, _, hub) = setup_app(FakeDailyCallSource::new());

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let _subscription =
        hub.subscribe(DailyCallChangeCallbacks::new().on_insert(move || {
            let _ = tx.send("insert");
        }));

    let response = app
        .oneshot(json_request(
            "POST",
            "/daily-call/changes",
            &json!({ "type": "INSERT", "table": "call_logs", "schema": "public" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["table"], "call_logs");
    assert_eq!(body["data"]["kind"], "INSERT");
    assert_eq!(body["data"]["watched"], true);
    assert_eq!(body["data"]["receivers"], 1);

    let event = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
        .await
        .unwrap();
    assert_eq!(event, Some("insert"));
}

#[tokio::test]
async fn test_publish_change_unwatched_table() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new());

    let response = app
        .oneshot(json_request(
            "POST",
            "/daily-call/changes",
            &json!({ "type": "update", "table": "sales_orders" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["watched"], false);
    assert_eq!(body["data"]["receivers"], 0);
}

#[tokio::test]
async fn test_publish_change_from_other_schema_is_not_watched() {
    let (app, _, hub) = setup_app(FakeDailyCallSource::new());

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let _subscription =
        hub.subscribe(DailyCallChangeCallbacks::new().on_any_change(move || {
            let _ = tx.send("changed");
        }));

    let response = app
        .oneshot(json_request(
            "POST",
            "/daily-call/changes",
            &json!({ "type": "INSERT", "table": "contacts", "schema": "archive" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["watched"], false);

    let event = tokio::time::timeout(std::time::Duration::from_millis(200), rx.recv()).await;
    assert!(event.is_err());
}

#[tokio::test]
async fn test_publish_change_rejects_unknown_type() {
    let (app, _, _) = setup_app(FakeDailyCallSource::new());

    let response = app
        .oneshot(json_request(
            "POST",
            "/daily-call/changes",
            &json!({ "type": "TRUNCATE", "table": "contacts" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
