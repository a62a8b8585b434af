// src/repository/mod.rs
pub mod daily_call_repository;
pub mod daily_call_source;
