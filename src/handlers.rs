use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::{Database, ResultRow};
use crate::error::{AppError, AppResult};
use crate::llm::{build_sql_prompt, GeminiClient};

pub struct AppState {
    /// Rendered once at startup from the captured catalog
    pub schema_text: String,
    pub llm: GeminiClient,
    pub model: String,
    pub database_url: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub natural_query: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub sql: String,
    pub results: Vec<ResultRow>,
}

#[post("/sql_from_nl")]
pub async fn sql_from_nl(
    state: web::Data<AppState>,
    request: web::Json<QueryRequest>,
) -> AppResult<HttpResponse> {
    let prompt = build_sql_prompt(&request.natural_query, &state.schema_text);
    let sql = state.llm.generate_text(&state.model, &prompt).await?;
    tracing::info!("Generated SQL: {}", sql);

    // Fresh session per request, released on every exit path
    let results = run_sql(&state.database_url, &sql)
        .await
        .map_err(|e| AppError::SqlExecution(e.to_string()))?;

    Ok(HttpResponse::Ok().json(QueryResponse { sql, results }))
}

async fn run_sql(database_url: &str, sql: &str) -> anyhow::Result<Vec<ResultRow>> {
    let db = Database::connect(database_url).await?;
    db.execute_query(sql).await
}
