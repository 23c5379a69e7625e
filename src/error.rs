use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Error ejecutando SQL: {0}")]
    SqlExecution(String),
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse {
            detail: self.to_string(),
        };

        match self {
            AppError::SqlExecution(_) => HttpResponse::BadRequest().json(body),
            AppError::Config(_) | AppError::Llm(_) => {
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[actix_rt::test]
    async fn sql_execution_error_maps_to_400_with_detail() {
        let err = AppError::SqlExecution("db error: ERROR: syntax error".to_string());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["detail"],
            "Error ejecutando SQL: db error: ERROR: syntax error"
        );
    }

    #[test]
    fn generation_error_maps_to_500() {
        let err = AppError::Llm(LlmError::EmptyResponse);
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn config_error_maps_to_500() {
        let err = AppError::Config("DATABASE_URL is not set".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
