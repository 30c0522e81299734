use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")] Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")] Snapshot(#[from] serde_json::Error),

    #[error("Not found: {0}")] NotFound(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
