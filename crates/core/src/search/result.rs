//! Ranked search answers.

use crate::search::node::NodeId;
use std::cmp::Ordering;
use symscope_api::SymbolId;

/// One matched trie node. Several symbols can share it (overloads under
/// the same qualified name), so `symbol_ids` is a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub node: NodeId,
    pub full_name: String,
    /// Ascending, never empty.
    pub symbol_ids: Vec<SymbolId>,
    /// Char offsets into `full_name`, one per query character.
    pub indices: Vec<usize>,
    pub weight: usize,
}

impl SearchMatch {
    /// Cheapest first; among equals the shortest full name, then lexical
    /// order, so an exactly typed name beats its superstrings.
    fn rank(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.full_name.len().cmp(&other.full_name.len()))
            .then_with(|| self.full_name.cmp(&other.full_name))
    }
}

/// Immutable outcome of one query, ordered best-first and capped at the
/// configured maximum. Carries enough provenance (query text, walk scope,
/// index revision) for the index to decide whether a follow-up query may
/// reuse it as a pruning hint.
#[derive(Debug, Clone)]
pub struct SearchResults {
    query: String,
    revision: u64,
    /// Scope the walk started from, `None` for the whole tree.
    scope: Option<SymbolId>,
    matches: Vec<SearchMatch>,
    /// Every matched node, kept past truncation: a follow-up query may
    /// only hit below nodes that matched here, including ones the result
    /// cap hid, so pruning hints must not be capped.
    hint_nodes: Vec<NodeId>,
}

impl SearchResults {
    pub(crate) fn new(
        query: &str,
        revision: u64,
        scope: Option<SymbolId>,
        mut matches: Vec<SearchMatch>,
        max_results: usize,
    ) -> Self {
        matches.sort_by(SearchMatch::rank);
        let hint_nodes = matches.iter().map(|m| m.node).collect();
        matches.truncate(max_results);
        Self {
            query: query.to_string(),
            revision,
            scope,
            matches,
            hint_nodes,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    /// Scope the producing search was restricted to, if any.
    pub fn scope(&self) -> Option<SymbolId> {
        self.scope
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn best(&self) -> Option<&SearchMatch> {
        self.matches.first()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchMatch> {
        self.matches.iter()
    }

    pub(crate) fn hint_nodes(&self) -> &[NodeId] {
        &self.hint_nodes
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a SearchMatch;
    type IntoIter = std::slice::Iter<'a, SearchMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::search::node::NodeArena;

    fn sample(arena: &mut NodeArena, dictionary: &mut Dictionary, name: &str, weight: usize) -> SearchMatch {
        let segments: Vec<_> = name.split("::").map(|s| dictionary.intern(s)).collect();
        let node = arena.add_path(&segments);
        SearchMatch {
            node,
            full_name: name.to_string(),
            symbol_ids: vec![SymbolId(0)],
            indices: Vec::new(),
            weight,
        }
    }

    #[test]
    fn test_ordering_weight_then_length_then_lexical() {
        let mut arena = NodeArena::new();
        let mut dictionary = Dictionary::new();
        let matches = vec![
            sample(&mut arena, &mut dictionary, "beta", 2),
            sample(&mut arena, &mut dictionary, "alpha::beta", 0),
            sample(&mut arena, &mut dictionary, "zz", 0),
            sample(&mut arena, &mut dictionary, "ab", 0),
        ];

        let results = SearchResults::new("q", 0, None, matches, 10);
        let names: Vec<_> = results.iter().map(|m| m.full_name.as_str()).collect();
        assert_eq!(names, vec!["ab", "zz", "alpha::beta", "beta"]);
        assert_eq!(results.best().unwrap().full_name, "ab");
    }

    #[test]
    fn test_truncates_to_max_results() {
        let mut arena = NodeArena::new();
        let mut dictionary = Dictionary::new();
        let matches = vec![
            sample(&mut arena, &mut dictionary, "a", 3),
            sample(&mut arena, &mut dictionary, "b", 1),
            sample(&mut arena, &mut dictionary, "c", 2),
        ];

        let results = SearchResults::new("q", 0, None, matches, 2);
        assert_eq!(results.len(), 2);
        let names: Vec<_> = results.iter().map(|m| m.full_name.as_str()).collect();
        // The cheapest two survive the cap.
        assert_eq!(names, vec!["b", "c"]);
    }
}
