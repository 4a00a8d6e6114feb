// crates/upconv-core/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UpconvError>;

#[derive(Debug, Error)]
pub enum UpconvError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("input contract error: {0}")]
    InputContract(String),

    #[error("truncated input: {codes} codes is not a multiple of {group} codes per byte")]
    TruncatedInput { codes: usize, group: usize },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
