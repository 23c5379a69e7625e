use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

#[derive(Debug, Clone)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

/// Full catalog captured once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SchemaSnapshot {
    pub tables: Vec<TableInfo>,
}

impl SchemaSnapshot {
    /// Renders the catalog as the plain-text block embedded in the model
    /// prompt, one paragraph per table:
    ///
    /// ```text
    /// TABLE name (
    ///   - column type
    /// )
    /// ```
    pub fn to_prompt_text(&self) -> String {
        let mut text = String::new();
        for table in &self.tables {
            text.push_str(&format!("TABLE {} (\n", table.name));
            for col in &table.columns {
                text.push_str(&format!("  - {} {}\n", col.name, col.data_type));
            }
            text.push_str(")\n\n");
        }
        text
    }
}

/// A single result cell, decoded from whatever runtime type the driver
/// reports.
#[derive(Debug, Clone)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(uuid::Uuid),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

/// One result row: column name to decoded value, in driver column order.
pub type ResultRow = serde_json::Map<String, serde_json::Value>;

impl SqlValue {
    /// Decodes a cell by trying the supported PostgreSQL types in order.
    /// A cell that matches none of them (including SQL NULL) decodes as Null.
    pub fn from_row(row: &Row, idx: usize) -> Self {
        // String/text types
        if let Ok(val) = row.try_get::<_, String>(idx) {
            return SqlValue::Text(val);
        }

        // Integer types
        if let Ok(val) = row.try_get::<_, i32>(idx) {
            return SqlValue::Int(val as i64);
        }
        if let Ok(val) = row.try_get::<_, i64>(idx) {
            return SqlValue::Int(val);
        }
        if let Ok(val) = row.try_get::<_, i16>(idx) {
            return SqlValue::Int(val as i64);
        }

        // Floating point types
        if let Ok(val) = row.try_get::<_, f32>(idx) {
            return SqlValue::Float(val as f64);
        }
        if let Ok(val) = row.try_get::<_, f64>(idx) {
            return SqlValue::Float(val);
        }

        // Boolean
        if let Ok(val) = row.try_get::<_, bool>(idx) {
            return SqlValue::Bool(val);
        }

        // UUID
        if let Ok(val) = row.try_get::<_, uuid::Uuid>(idx) {
            return SqlValue::Uuid(val);
        }

        // Timestamp types
        if let Ok(val) = row.try_get::<_, NaiveDateTime>(idx) {
            return SqlValue::Timestamp(val);
        }
        if let Ok(val) = row.try_get::<_, DateTime<Utc>>(idx) {
            return SqlValue::TimestampTz(val);
        }

        // JSON types
        if let Ok(val) = row.try_get::<_, serde_json::Value>(idx) {
            return SqlValue::Json(val);
        }

        // Byte arrays
        if let Ok(val) = row.try_get::<_, Vec<u8>>(idx) {
            return SqlValue::Bytes(val);
        }

        SqlValue::Null
    }

    pub fn into_json(self) -> serde_json::Value {
        match self {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Bool(b) => serde_json::Value::Bool(b),
            SqlValue::Int(i) => serde_json::Value::from(i),
            SqlValue::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            SqlValue::Text(s) => serde_json::Value::String(s),
            SqlValue::Uuid(u) => serde_json::Value::String(u.to_string()),
            SqlValue::Timestamp(t) => serde_json::Value::String(t.to_string()),
            SqlValue::TimestampTz(t) => serde_json::Value::String(t.to_string()),
            SqlValue::Json(v) => v,
            SqlValue::Bytes(b) => serde_json::Value::String(format!("<{} bytes>", b.len())),
        }
    }
}
