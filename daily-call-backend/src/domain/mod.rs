// src/domain/mod.rs
pub mod calendar;
pub mod call_channel;
pub mod call_log_model;
pub mod contact_model;
pub mod customer_metric_model;
pub mod customer_status;
pub mod daily_activity;
pub mod lbc_rto_record_model;
pub mod purchase_history_model;
pub mod sales_return_model;
pub mod weekly_range;
