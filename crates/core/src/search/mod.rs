//! Hierarchical fuzzy search over qualified symbol names.

pub mod index;
pub mod result;

mod matcher;
mod node;
mod walker;

pub use index::SearchIndex;
pub use node::NodeId;
pub use result::{SearchMatch, SearchResults};
