// tests/integration/main.rs

#[path = "../common/mod.rs"]
mod common;

mod api_tests;
mod change_notification_tests;
mod repository_tests;
