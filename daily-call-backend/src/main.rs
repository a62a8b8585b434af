// src/main.rs
use daily_call_backend::api::AppState;
use daily_call_backend::app_router;
use daily_call_backend::config::Config;
use daily_call_backend::db;
use daily_call_backend::logging::init_tracing;
use daily_call_backend::service::change_notification_service::{
    ChangeNotificationService, DailyCallChangeCallbacks, DEFAULT_SCHEMA,
};
use daily_call_backend::service::daily_call_service::DailyCallService;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    init_tracing();

    tracing::info!("Starting Daily Call Backend server...");

    // 設定を読み込む
    let app_config = Config::from_env()?;
    tracing::info!(
        server_addr = %app_config.server_addr,
        schema = ?app_config.db_schema,
        utc_offset = %app_config.utc_offset,
        "Configuration loaded"
    );

    // データベース接続を作成（スキーマ指定時は存在確認と作成も行う）
    let db_pool = db::connect(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    let daily_call_service = Arc::new(DailyCallService::from_pool(
        db_pool,
        app_config.utc_offset,
    ));
    // 接続先スキーマの変更だけを監視する
    let watched_schema = app_config
        .db_schema
        .clone()
        .unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
    let change_notification_service =
        Arc::new(ChangeNotificationService::default().with_schema(watched_schema));

    // 受け取った変更通知をログに残す購読者
    let _change_log_subscription = change_notification_service.subscribe(
        DailyCallChangeCallbacks::new()
            .on_any_change(|| tracing::debug!("Daily call data changed, clients should refresh"))
            .on_error(|e| tracing::warn!(error = %e, "Daily call change subscription error")),
    );

    let app_router = app_router(AppState::new(
        daily_call_service,
        change_notification_service,
    ));

    // サーバーの起動
    tracing::info!(
        "Router configured. Server listening on {}",
        app_config.server_addr
    );

    let listener = TcpListener::bind(&app_config.server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
