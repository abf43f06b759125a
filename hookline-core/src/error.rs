use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid activity record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, ActivityError>;
