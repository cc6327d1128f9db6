use thiserror::Error;

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("image descriptor has zero {0}")]
    ZeroDimension(&'static str),

    #[error("image format is empty")]
    EmptyFormat,
}

pub type Result<T> = std::result::Result<T, ModelError>;
