//! Warehouse column types and the storage-type lookup.

mod storage;
mod types;

pub use storage::{storage_type, storage_types, LookupGapError};
pub use types::ColumnType;
