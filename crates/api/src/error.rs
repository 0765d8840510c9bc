use crate::models::SymbolId;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unknown search scope: {0}")]
    UnknownScope(SymbolId),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
