// src/extractors/mod.rs

pub mod uuid;

pub use uuid::ValidatedUuid;
