// src/lib.rs

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod identity;
pub mod merge;
pub mod report;
pub mod store;
pub mod table;
