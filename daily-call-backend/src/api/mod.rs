// src/api/mod.rs
use crate::service::{
    change_notification_service::ChangeNotificationService, daily_call_service::DailyCallService,
};
use std::sync::Arc;

pub mod dto;
pub mod handlers;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub daily_call_service: Arc<DailyCallService>,
    pub change_notification_service: Arc<ChangeNotificationService>,
}

impl AppState {
    pub fn new(
        daily_call_service: Arc<DailyCallService>,
        change_notification_service: Arc<ChangeNotificationService>,
    ) -> Self {
        Self {
            daily_call_service,
            change_notification_service,
        }
    }
}
