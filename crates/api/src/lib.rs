pub mod discovery;
pub mod error;
pub mod models;
pub mod search;

// Re-export commonly used types
pub use discovery::ParseEventSink;
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use search::SymbolSearch;
