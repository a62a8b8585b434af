// src/service/mod.rs
pub mod change_notification_service;
pub mod daily_call_service;
