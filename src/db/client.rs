use anyhow::Result;
use tokio_postgres::{Client, NoTls};

use crate::db::{ColumnInfo, ResultRow, SchemaSnapshot, SqlValue, TableInfo};

pub struct Database {
    client: Client,
}

impl Database {
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

        // Keep connection alive in background task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("Database connection error: {}", e);
            }
        });

        Ok(Database { client })
    }

    /// Enumerates every user table with its columns in declared order.
    /// Ordered by (schema, table, ordinal position) so the snapshot is
    /// identical run-to-run against an unchanged database.
    pub async fn capture_schema(&self) -> Result<SchemaSnapshot> {
        let rows = self
            .client
            .query(
                "SELECT
                    t.table_schema,
                    t.table_name,
                    c.column_name,
                    CASE
                        WHEN c.character_maximum_length IS NOT NULL THEN c.data_type || '(' || c.character_maximum_length || ')'
                        WHEN c.numeric_precision IS NOT NULL AND c.numeric_scale IS NOT NULL THEN c.data_type || '(' || c.numeric_precision || ',' || c.numeric_scale || ')'
                        WHEN c.datetime_precision IS NOT NULL AND c.datetime_precision != 6 THEN c.udt_name || '(' || c.datetime_precision || ')'
                        WHEN c.datetime_precision IS NOT NULL AND c.datetime_precision = 6 THEN c.udt_name || '(6)'
                        ELSE c.udt_name
                    END as full_data_type
                 FROM information_schema.tables t
                 JOIN information_schema.columns c
                     ON c.table_schema = t.table_schema
                     AND c.table_name = t.table_name
                 WHERE t.table_schema NOT IN ('pg_catalog', 'information_schema', 'pg_toast')
                     AND t.table_type = 'BASE TABLE'
                 ORDER BY t.table_schema, t.table_name, c.ordinal_position",
                &[],
            )
            .await?;

        let mut tables: Vec<TableInfo> = Vec::new();
        let mut current: Option<(String, String)> = None;

        for row in rows {
            let schema: String = row.get(0);
            let table: String = row.get(1);
            let column: String = row.get(2);
            let data_type: String = row.get(3);

            if current.as_ref() != Some(&(schema.clone(), table.clone())) {
                // Tables outside public keep their schema qualifier
                let name = if schema == "public" {
                    table.clone()
                } else {
                    format!("{}.{}", schema, table)
                };
                tables.push(TableInfo {
                    name,
                    columns: vec![],
                });
                current = Some((schema, table));
            }

            if let Some(info) = tables.last_mut() {
                info.columns.push(ColumnInfo {
                    name: column,
                    data_type,
                });
            }
        }

        Ok(SchemaSnapshot { tables })
    }

    /// Executes the given text as a single statement and materializes every
    /// row. No restriction on the statement is applied here.
    pub async fn execute_query(&self, query: &str) -> Result<Vec<ResultRow>> {
        let rows = self.client.query(query, &[]).await?;

        let results: Vec<ResultRow> = rows
            .iter()
            .map(|row| {
                let mut record = ResultRow::new();
                for (idx, col) in row.columns().iter().enumerate() {
                    record.insert(
                        col.name().to_string(),
                        SqlValue::from_row(row, idx).into_json(),
                    );
                }
                record
            })
            .collect();

        Ok(results)
    }
}
