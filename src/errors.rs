//! Error types for the flag editor

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Please select a product.")]
    MissingProduct,

    #[error("Failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file {path}: {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode form field '{field}': {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode form body: {0}")]
    FormBody(#[from] serde_urlencoded::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EditorError {
    /// Errors the user can fix from inside the editor
    pub fn is_validation(&self) -> bool {
        matches!(self, EditorError::MissingProduct)
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
