use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanteenError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Menu not found: {0}")]
    MenuNotFound(String),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Menu already exists: {0}")]
    DuplicateMenu(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CanteenError>;
