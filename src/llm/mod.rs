//! Google Gemini API client, wire types, and the SQL-generation prompt.

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::GeminiClient;
pub use error::LlmError;
pub use prompt::build_sql_prompt;
