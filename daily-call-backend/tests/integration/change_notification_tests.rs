// tests/integration/change_notification_tests.rs

use daily_call_backend::service::change_notification_service::{
    ChangeKind, ChangeNotificationService, ChangeSubscriptionError, DailyCallChangeCallbacks,
    TableChange,
};
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::timeout;

use crate::common::init_test_env;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Insert,
    Update,
    Delete,
    Error(ChangeSubscriptionError),
}

fn recording_callbacks() -> (DailyCallChangeCallbacks, UnboundedReceiver<Event>) {
    init_test_env();
    let (tx, rx) = unbounded_channel();
    let (insert_tx, update_tx, delete_tx, error_tx) = (tx.clone(), tx.clone(), tx.clone(), tx);

    let callbacks = DailyCallChangeCallbacks::new()
        .on_insert(move || {
            let _ = insert_tx.send(Event::Insert);
        })
        .on_update(move || {
            let _ = update_tx.send(Event::Update);
        })
        .on_delete(move || {
            let _ = delete_tx.send(Event::Delete);
        })
        .on_error(move |e| {
            let _ = error_tx.send(Event::Error(e));
        });

    (callbacks, rx)
}

async fn next_event(rx: &mut UnboundedReceiver<Event>) -> Option<Event> {
    timeout(Duration::from_secs(1), rx.recv()).await.ok().flatten()
}

#[tokio::test]
async fn test_dispatches_by_change_kind() {
    let hub = ChangeNotificationService::new(16);
    let (callbacks, mut rx) = recording_callbacks();
    let _subscription = hub.subscribe(callbacks);

    hub.publish(TableChange::new("contacts", ChangeKind::Insert));
    hub.publish(TableChange::new("purchase_history", ChangeKind::Update));
    hub.publish(TableChange::new("sales_returns", ChangeKind::Delete));

    assert_eq!(next_event(&mut rx).await, Some(Event::Insert));
    assert_eq!(next_event(&mut rx).await, Some(Event::Update));
    assert_eq!(next_event(&mut rx).await, Some(Event::Delete));
}

#[tokio::test]
async fn test_ignores_unwatched_tables() {
    let hub = ChangeNotificationService::new(16);
    let (callbacks, mut rx) = recording_callbacks();
    let _subscription = hub.subscribe(callbacks);

    hub.publish(TableChange::new("lbc_rto_records", ChangeKind::Insert));
    hub.publish(TableChange::new("users", ChangeKind::Update));
    hub.publish(TableChange::new("call_logs", ChangeKind::Delete));

    // 監視対象の変更だけが届く
    assert_eq!(next_event(&mut rx).await, Some(Event::Delete));
}

#[tokio::test]
async fn test_ignores_changes_from_other_schemas() {
    let hub = ChangeNotificationService::new(16).with_schema("tenant_a");
    let (callbacks, mut rx) = recording_callbacks();
    let _subscription = hub.subscribe(callbacks);

    hub.publish(TableChange::new("contacts", ChangeKind::Insert).in_schema("public"));
    hub.publish(TableChange::new("call_logs", ChangeKind::Update).in_schema("tenant_b"));
    hub.publish(TableChange::new("contacts", ChangeKind::Delete).in_schema("tenant_a"));

    // 設定スキーマの変更だけが届く
    assert_eq!(next_event(&mut rx).await, Some(Event::Delete));

    // スキーマなしの通知は設定スキーマのものとして扱う
    hub.publish(TableChange::new("purchase_history", ChangeKind::Update));
    assert_eq!(next_event(&mut rx).await, Some(Event::Update));
}

#[tokio::test]
async fn test_every_subscriber_receives_changes() {
    let hub = ChangeNotificationService::new(16);
    let (first_callbacks, mut first_rx) = recording_callbacks();
    let (second_callbacks, mut second_rx) = recording_callbacks();
    let _first = hub.subscribe(first_callbacks);
    let _second = hub.subscribe(second_callbacks);

    assert_eq!(hub.subscriber_count(), 2);
    assert_eq!(
        hub.publish(TableChange::new("customer_metrics", ChangeKind::Update)),
        2
    );

    assert_eq!(next_event(&mut first_rx).await, Some(Event::Update));
    assert_eq!(next_event(&mut second_rx).await, Some(Event::Update));
}

#[tokio::test]
async fn test_lag_is_reported_and_listener_continues() {
    let hub = ChangeNotificationService::new(2);
    let (callbacks, mut rx) = recording_callbacks();
    let _subscription = hub.subscribe(callbacks);

    // リスナーが動く前にバッファを溢れさせる
    for _ in 0..4 {
        hub.publish(TableChange::new("contacts", ChangeKind::Insert));
    }

    assert_eq!(
        next_event(&mut rx).await,
        Some(Event::Error(ChangeSubscriptionError::Lagged(2)))
    );
    assert_eq!(next_event(&mut rx).await, Some(Event::Insert));
    assert_eq!(next_event(&mut rx).await, Some(Event::Insert));
}

#[tokio::test]
async fn test_closed_channel_is_reported() {
    let hub = ChangeNotificationService::new(4);
    let (callbacks, mut rx) = recording_callbacks();
    let subscription = hub.subscribe(callbacks);

    drop(hub);

    assert_eq!(
        next_event(&mut rx).await,
        Some(Event::Error(ChangeSubscriptionError::Closed))
    );
    // 終了後はコールバックが破棄される
    assert_eq!(next_event(&mut rx).await, None);
    assert!(!subscription.is_active());
}

#[tokio::test]
async fn test_unsubscribe_stops_callbacks() {
    let hub = ChangeNotificationService::new(16);
    let (callbacks, mut rx) = recording_callbacks();
    let subscription = hub.subscribe(callbacks);

    subscription.unsubscribe();
    hub.publish(TableChange::new("contacts", ChangeKind::Insert));

    assert_eq!(next_event(&mut rx).await, None);
}

#[tokio::test]
async fn test_any_change_callback() {
    let hub = ChangeNotificationService::new(16);
    let (tx, mut rx) = unbounded_channel();
    let _subscription = hub.subscribe(DailyCallChangeCallbacks::new().on_any_change(move || {
        let _ = tx.send(Event::Update);
    }));

    hub.publish(TableChange::new("contacts", ChangeKind::Insert));
    hub.publish(TableChange::new("contacts", ChangeKind::Delete));

    assert_eq!(next_event(&mut rx).await, Some(Event::Update));
    assert_eq!(next_event(&mut rx).await, Some(Event::Update));
}
