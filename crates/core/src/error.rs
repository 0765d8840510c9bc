use crate::dictionary::NameId;
use symscope_api::{ApiError, SymbolId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymscopeError {
    #[error("unknown name id {0:?}")]
    UnknownName(NameId),
    #[error("unknown search scope: {0}")]
    UnknownScope(SymbolId),
    #[error("empty qualified name path")]
    EmptyNamePath,
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<SymscopeError> for ApiError {
    fn from(err: SymscopeError) -> Self {
        match err {
            SymscopeError::UnknownScope(id) => ApiError::UnknownScope(id),
            SymscopeError::EmptyNamePath => {
                ApiError::InvalidArgument("empty qualified name path".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SymscopeError>;
