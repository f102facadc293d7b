use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised while loading a saved page tree
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Document must contain exactly one top-level root, found {0} top-level elements")]
    UnexpectedTopLevel(usize),

    #[error("Root element must be a container")]
    RootNotContainer,

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),
}

impl DocumentError {
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }
}
