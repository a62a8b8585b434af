// src/service/change_notification_service.rs

//! 元テーブルの変更通知をプロセス内の購読者へ配る。
//!
//! 購読者は通知を受けたら集計を丸ごとやり直す。差分更新はしない。

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 既定のバッファ長
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// スキーマ指定がない場合に監視するスキーマ
pub const DEFAULT_SCHEMA: &str = "public";

/// モニタリング表の再計算が必要になる表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTable {
    Contacts,
    CallLogs,
    PurchaseHistory,
    CustomerMetrics,
    SalesReturns,
}

pub const WATCHED_TABLES: [SourceTable; 5] = [
    SourceTable::Contacts,
    SourceTable::CallLogs,
    SourceTable::PurchaseHistory,
    SourceTable::CustomerMetrics,
    SourceTable::SalesReturns,
];

impl SourceTable {
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::CallLogs => "call_logs",
            Self::PurchaseHistory => "purchase_history",
            Self::CustomerMetrics => "customer_metrics",
            Self::SalesReturns => "sales_returns",
        }
    }

    pub fn from_table_name(name: &str) -> Option<Self> {
        WATCHED_TABLES
            .into_iter()
            .find(|table| table.table_name() == name)
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INSERT" => Ok(Self::Insert),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            _ => Err(format!(
                "Invalid change type: '{}'. Valid types are: INSERT, UPDATE, DELETE",
                s
            )),
        }
    }
}

/// 1件の変更通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableChange {
    pub table: String,
    pub kind: ChangeKind,
    pub schema: Option<String>,
}

impl TableChange {
    pub fn new(table: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            table: table.into(),
            kind,
            schema: None,
        }
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn source_table(&self) -> Option<SourceTable> {
        SourceTable::from_table_name(&self.table)
    }

    /// 監視対象の表で、スキーマが付いていれば `schema` と一致するもの
    pub fn is_watched(&self, schema: &str) -> bool {
        let same_schema = match self.schema.as_deref() {
            Some(changed) => changed == schema,
            None => true,
        };
        same_schema && self.source_table().is_some()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChangeSubscriptionError {
    #[error("Daily call change listener skipped {0} notifications")]
    Lagged(u64),

    #[error("Daily call change channel closed")]
    Closed,
}

type ChangeCallback = Arc<dyn Fn() + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(ChangeSubscriptionError) + Send + Sync>;

/// 変更種別ごとのコールバック。未設定のものは呼ばれない。
#[derive(Clone, Default)]
pub struct DailyCallChangeCallbacks {
    on_insert: Option<ChangeCallback>,
    on_update: Option<ChangeCallback>,
    on_delete: Option<ChangeCallback>,
    on_error: Option<ErrorCallback>,
}

impl DailyCallChangeCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_insert(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_insert = Some(Arc::new(callback));
        self
    }

    pub fn on_update(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_update = Some(Arc::new(callback));
        self
    }

    pub fn on_delete(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_delete = Some(Arc::new(callback));
        self
    }

    pub fn on_error(
        mut self,
        callback: impl Fn(ChangeSubscriptionError) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }

    /// 同じ操作を3種類すべてに割り当てる
    pub fn on_any_change(self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        let callback: ChangeCallback = Arc::new(callback);
        Self {
            on_insert: Some(callback.clone()),
            on_update: Some(callback.clone()),
            on_delete: Some(callback),
            ..self
        }
    }

    fn dispatch(&self, kind: ChangeKind) {
        let callback = match kind {
            ChangeKind::Insert => &self.on_insert,
            ChangeKind::Update => &self.on_update,
            ChangeKind::Delete => &self.on_delete,
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    fn report(&self, error: ChangeSubscriptionError) {
        if let Some(callback) = &self.on_error {
            callback(error);
        }
    }
}

/// 購読の解除ハンドル。drop でも解除される
pub struct DailyCallSubscription {
    listener: JoinHandle<()>,
}

impl DailyCallSubscription {
    pub fn unsubscribe(self) {
        // Drop で止まる
    }

    pub fn is_active(&self) -> bool {
        !self.listener.is_finished()
    }
}

impl Drop for DailyCallSubscription {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

#[derive(Clone)]
pub struct ChangeNotificationService {
    sender: broadcast::Sender<TableChange>,
    schema: String,
}

impl Default for ChangeNotificationService {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl ChangeNotificationService {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            schema: DEFAULT_SCHEMA.to_string(),
        }
    }

    /// 監視するスキーマを差し替える
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// この通知で購読者が再計算するか
    pub fn watches(&self, change: &TableChange) -> bool {
        change.is_watched(&self.schema)
    }

    /// 通知を配信し、受け取った購読者数を返す
    pub fn publish(&self, change: TableChange) -> usize {
        debug!(table = %change.table, kind = %change.kind, "Publishing table change");
        // 購読者がいない場合は送信エラーになるが、通知は捨ててよい
        self.sender.send(change).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// 監視対象の表の変更でコールバックを呼ぶリスナーを起動する
    pub fn subscribe(&self, callbacks: DailyCallChangeCallbacks) -> DailyCallSubscription {
        let mut receiver = self.sender.subscribe();
        let schema = self.schema.clone();

        let listener = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(change) => {
                        if !change.is_watched(&schema) {
                            continue;
                        }
                        debug!(
                            table = %change.table,
                            kind = %change.kind,
                            "Daily call change received"
                        );
                        callbacks.dispatch(change.kind);
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Daily call change listener lagged behind");
                        callbacks.report(ChangeSubscriptionError::Lagged(skipped));
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        info!("Daily call change channel closed");
                        callbacks.report(ChangeSubscriptionError::Closed);
                        break;
                    }
                }
            }
        });

        DailyCallSubscription { listener }
    }
}
