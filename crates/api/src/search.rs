use crate::error::ApiResult;
use crate::models::{SearchHit, SymbolId};

/// Interactive symbol lookup over everything a sink has recorded.
///
/// Queries are fuzzy: each query character must appear in order somewhere
/// in a matched name, and cheaper placements (contiguous runs, word
/// boundaries, exact case) rank first.
pub trait SymbolSearch {
    /// Run `query` against the indexed names, optionally restricted to the
    /// subtree below `scope`. Hits come back best-first, at most
    /// `max_results` of them.
    fn search(
        &self,
        query: &str,
        scope: Option<SymbolId>,
        max_results: usize,
    ) -> ApiResult<Vec<SearchHit>>;
}
