//! Cache module for storing daily menu snapshots on disk
//!
//! This module provides a cache manager that keeps one snapshot per calendar
//! day and opportunistically prunes snapshots past the retention window. The
//! on-disk format is a versioned JSON schema.

mod manager;
pub mod schema;

pub use manager::{entry_file_name, parse_entry_date, MenuCache, DEFAULT_RETENTION_DAYS};
pub use schema::CacheDecodeError;
