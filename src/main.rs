mod config;
mod db;
mod error;
mod handlers;
mod llm;

use actix_web::{web, App, HttpServer};
use tracing::info;

use config::Config;
use db::Database;
use handlers::AppState;
use llm::GeminiClient;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!("Loaded configuration, model {}", config.model);

    // Capture the catalog once; every request reuses the rendered text
    let database = Database::connect(&config.database_url).await?;
    let snapshot = database.capture_schema().await?;
    info!("Captured schema for {} tables", snapshot.tables.len());

    let state = web::Data::new(AppState {
        schema_text: snapshot.to_prompt_text(),
        llm: GeminiClient::new(config.google_api_key.clone())?,
        model: config.model.clone(),
        database_url: config.database_url.clone(),
    });

    info!("Starting nl2sql server at http://0.0.0.0:{}", config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(handlers::sql_from_nl)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await?;

    Ok(())
}
