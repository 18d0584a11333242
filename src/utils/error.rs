use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReactionError {
    #[error("Element not found: {element}")]
    ElementNotFound { element: String },

    #[error("Invalid count: {text:?} does not start with a non-negative integer")]
    InvalidCount { text: String },

    #[error("Notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notification rejected by server with status {status}")]
    NotificationRejected { status: u16 },

    #[error("Notification task aborted: {message}")]
    NotificationAborted { message: String },

    #[error("No tokio runtime to run the notification on: {message}")]
    RuntimeUnavailable { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ReactionError {
    pub fn element_not_found(element: impl Into<String>) -> Self {
        Self::ElementNotFound {
            element: element.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReactionError>;
