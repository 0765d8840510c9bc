//! Owner of the search trie and the public query entry points.

use crate::config::SearchConfig;
use crate::dictionary::Dictionary;
use crate::error::{Result, SymscopeError};
use crate::search::node::{NodeArena, NodeId};
use crate::search::result::{SearchMatch, SearchResults};
use crate::search::walker::FuzzyWalker;
use std::collections::HashMap;
use std::time::Instant;
use symscope_api::SymbolId;
use tracing::{debug, trace};

/// Fuzzy symbol index over qualified name paths.
///
/// Symbols are externally identified by [`SymbolId`]; the index maps each
/// one to the trie node spelling its qualified name. Symbols sharing a
/// name (overloads) share a node, and symbols sharing a prefix share the
/// prefix nodes. Queries never mutate the index.
pub struct SearchIndex {
    dictionary: Dictionary,
    arena: NodeArena,
    symbol_nodes: HashMap<SymbolId, NodeId>,
    config: SearchConfig,
    /// Bumped on every mutation; lets cached results prove they are still
    /// talking about the same tree.
    revision: u64,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            dictionary: Dictionary::new(),
            arena: NodeArena::new(),
            symbol_nodes: HashMap::new(),
            config,
            revision: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Node count excluding the hidden root.
    pub fn node_count(&self) -> usize {
        self.arena.node_count()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbol_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_nodes.is_empty()
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.symbol_nodes.contains_key(&id)
    }

    /// Qualified name the symbol is currently indexed under.
    pub fn qualified_name(&self, id: SymbolId) -> Result<String> {
        let node = self
            .symbol_nodes
            .get(&id)
            .copied()
            .ok_or(SymscopeError::UnknownScope(id))?;
        self.arena
            .full_name(node, &self.dictionary, &self.config.separator)
    }

    // ---- Mutation ----

    /// Index `id` under the given name path. Empty segments are dropped;
    /// a path with nothing left is an error. Re-adding the same id under
    /// the same path is a no-op, under a different path a move.
    pub fn add<I, S>(&mut self, path: I, id: SymbolId) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments = Vec::new();
        for segment in path {
            let segment = segment.as_ref();
            if segment.is_empty() {
                continue;
            }
            segments.push(self.dictionary.intern(segment));
        }
        if segments.is_empty() {
            return Err(SymscopeError::EmptyNamePath);
        }

        if let Some(&existing) = self.symbol_nodes.get(&id) {
            if self.arena.find_path(&segments) == Some(existing) {
                trace!(%id, "symbol already indexed at this path");
                return Ok(());
            }
            self.arena.remove_symbol(existing, id);
            self.symbol_nodes.remove(&id);
        }

        let node = self.arena.add_path(&segments);
        self.arena.attach_symbol(node, id);
        self.symbol_nodes.insert(id, node);
        self.revision += 1;
        trace!(%id, node_count = self.arena.node_count(), "symbol indexed");
        Ok(())
    }

    /// Drop `id` from the index, pruning name nodes nothing else uses.
    /// Returns false for ids the index does not know.
    pub fn remove(&mut self, id: SymbolId) -> bool {
        let Some(node) = self.symbol_nodes.remove(&id) else {
            trace!(%id, "remove of unindexed symbol ignored");
            return false;
        };
        let removed = self.arena.remove_symbol(node, id);
        debug_assert!(removed);
        self.revision += 1;
        trace!(%id, node_count = self.arena.node_count(), "symbol removed");
        true
    }

    // ---- Queries ----

    /// Fuzzy-match `query` against every indexed name.
    pub fn search(&self, query: &str) -> Result<SearchResults> {
        self.search_from(self.arena.root(), None, query)
    }

    /// Fuzzy-match `query` against names below `scope` only. The query is
    /// relative to the scope; returned names stay absolute.
    pub fn search_scoped(&self, query: &str, scope: SymbolId) -> Result<SearchResults> {
        let node = self
            .symbol_nodes
            .get(&scope)
            .copied()
            .ok_or(SymscopeError::UnknownScope(scope))?;
        self.search_from(node, Some(scope), query)
    }

    /// Incremental variant for interactive typing: when `query` extends
    /// `previous.query()` and the index has not changed since, only the
    /// previous matches' root paths and subtrees are re-walked, starting
    /// from the scope `previous` was computed under. Results are identical
    /// to rerunning that search with the longer query; anything that
    /// invalidates the shortcut silently falls back to a full walk.
    pub fn search_cached(&self, query: &str, previous: &SearchResults) -> Result<SearchResults> {
        if previous.revision() != self.revision || !query.starts_with(previous.query()) {
            trace!(query, "previous results not reusable, running full search");
            return match previous.scope() {
                Some(scope) => self.search_scoped(query, scope),
                None => self.search(query),
            };
        }

        let start = match previous.scope() {
            Some(scope) => self
                .symbol_nodes
                .get(&scope)
                .copied()
                .ok_or(SymscopeError::UnknownScope(scope))?,
            None => self.arena.root(),
        };

        let started = Instant::now();
        let walker = self.walker(query);
        let candidates = walker.run_pruned(start, previous.hint_nodes())?;
        let candidate_count = candidates.len();
        let results = self.collect(start, previous.scope(), query, candidates, &walker)?;
        debug!(
            query,
            candidates = candidate_count,
            matches = results.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "fuzzy search (pruned)"
        );
        Ok(results)
    }

    fn walker<'a>(&'a self, query: &str) -> FuzzyWalker<'a> {
        FuzzyWalker::new(
            &self.arena,
            &self.dictionary,
            &self.config.weights,
            &self.config.separator,
            query,
        )
    }

    fn search_from(
        &self,
        start: NodeId,
        scope: Option<SymbolId>,
        query: &str,
    ) -> Result<SearchResults> {
        let started = Instant::now();
        let walker = self.walker(query);
        let candidates = walker.run(start)?;
        let candidate_count = candidates.len();
        let results = self.collect(start, scope, query, candidates, &walker)?;
        debug!(
            query,
            candidates = candidate_count,
            matches = results.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "fuzzy search"
        );
        Ok(results)
    }

    fn collect(
        &self,
        start: NodeId,
        scope: Option<SymbolId>,
        query: &str,
        candidates: Vec<(usize, NodeId)>,
        walker: &FuzzyWalker,
    ) -> Result<SearchResults> {
        // Scoped matches render absolute names; the scope prefix shifts
        // every highlight offset.
        let base_offset = if start == self.arena.root() {
            0
        } else {
            let prefix = self
                .arena
                .full_name(start, &self.dictionary, &self.config.separator)?;
            prefix.chars().count() + self.config.separator.chars().count()
        };

        let mut matches = Vec::new();
        for (weight, node) in candidates {
            let Some(n) = self.arena.get(node) else {
                continue;
            };
            // Only nodes carrying symbols are answers; bare path nodes
            // still guided the walk but have nothing to report.
            if !n.has_symbols() {
                continue;
            }
            let data = walker.match_data(start, node, base_offset)?;
            debug_assert_eq!(data.weight, weight);
            let full_name = self
                .arena
                .full_name(node, &self.dictionary, &self.config.separator)?;
            matches.push(SearchMatch {
                node,
                full_name,
                symbol_ids: n.symbol_ids().iter().copied().collect(),
                indices: data.indices,
                weight,
            });
        }

        Ok(SearchResults::new(
            query,
            self.revision,
            scope,
            matches,
            self.config.max_results,
        ))
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}
