use thiserror::Error;

use crate::adapters::ingest::IngestionError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
    #[error("ingestion job failed: {0}")]
    Ingestion(#[source] IngestionError),
}

impl AppError {
    pub fn logging_init<E: std::fmt::Display>(error: E) -> Self {
        Self::LoggingInit(error.to_string())
    }

    pub fn ingestion(error: IngestionError) -> Self {
        Self::Ingestion(error)
    }
}
