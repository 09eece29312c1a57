use thiserror::Error;

use crate::forms::FormErrors;

#[derive(Error, Debug)]
pub enum OrkestraError {
    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrkestraError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<FormErrors> for OrkestraError {
    fn from(errors: FormErrors) -> Self {
        Self::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, OrkestraError>;
