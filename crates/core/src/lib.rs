pub mod config;
pub mod dictionary;
pub mod error;
pub mod logging;

pub mod search;
pub mod storage;

pub use config::{ScoringWeights, SearchConfig};
pub use dictionary::{Dictionary, NameId};
pub use error::{Result, SymscopeError};
pub use search::{NodeId, SearchIndex, SearchMatch, SearchResults};
pub use storage::Storage;
