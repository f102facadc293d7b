use sitebuilder_model::DocumentError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reading a page document from disk
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
