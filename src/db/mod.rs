mod models;
mod client;

pub use models::{ColumnInfo, ResultRow, SchemaSnapshot, SqlValue, TableInfo};
pub use client::Database;
