use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("Menu catalog not found for {0}")]
    CatalogNotFound(NaiveDate),

    #[error("Menu not found: {0}")]
    MenuNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
