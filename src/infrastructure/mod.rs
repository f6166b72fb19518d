//! Adapters for observability and on-disk datasets

pub mod observability;
pub mod persistence;
