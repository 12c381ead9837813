use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("duplicate object: {0}")]
    Duplicate(String),
}
