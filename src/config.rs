use crate::error::AppError;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_PORT: u16 = 8000;

/// Process configuration, read from the environment once at startup and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub google_api_key: String,
    pub model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = get("DATABASE_URL")
            .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))?;

        let google_api_key = get("GOOGLE_API_KEY")
            .ok_or_else(|| AppError::Config("GOOGLE_API_KEY is not set".to_string()))?;

        let model = get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            google_api_key,
            model,
            port,
        })
    }
}
