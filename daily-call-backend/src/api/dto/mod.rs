// src/api/dto/mod.rs
pub mod daily_call_dto;
