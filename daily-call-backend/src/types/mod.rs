// src/types/mod.rs

pub mod response;

pub use response::ApiResponse;
