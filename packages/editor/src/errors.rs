//! Error types for the editor

use sitebuilder_model::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Invalid document key: {0}")]
    InvalidKey(String),

    #[error("Malformed page manifest: {0}")]
    Manifest(#[source] serde_json::Error),
}

pub type EditorResult<T> = Result<T, EditorError>;
