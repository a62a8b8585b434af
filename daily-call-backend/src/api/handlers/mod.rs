// src/api/handlers/mod.rs
pub mod daily_call_handler;
