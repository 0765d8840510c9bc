//! Recursive fuzzy walk over the trie.
//!
//! The walk carries the query position into every child: whatever a parent
//! segment consumed, the child continues from there, which is how a query
//! can span segment boundaries ("netConnopen"). Separator characters in
//! the query are consumed for free while stepping into a child, so typing
//! a full qualified name costs exactly zero.

use crate::config::ScoringWeights;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::search::matcher;
use crate::search::node::{NodeArena, NodeId};
use std::collections::HashSet;

/// Weight plus highlight offsets for one finished candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchData {
    pub weight: usize,
    /// Char offsets into the rendered full name, one per query character.
    pub indices: Vec<usize>,
}

/// Subtree filter used by cached re-walks: descend freely inside any
/// previous match's subtree, and otherwise only along their root paths.
struct PruneFilter {
    allowed: HashSet<NodeId>,
    subtree_roots: HashSet<NodeId>,
}

/// Borrowed-context walker; one instance per query.
pub struct FuzzyWalker<'a> {
    arena: &'a NodeArena,
    dictionary: &'a Dictionary,
    weights: &'a ScoringWeights,
    separator: Vec<char>,
    query: Vec<char>,
}

impl<'a> FuzzyWalker<'a> {
    pub fn new(
        arena: &'a NodeArena,
        dictionary: &'a Dictionary,
        weights: &'a ScoringWeights,
        separator: &str,
        query: &str,
    ) -> Self {
        Self {
            arena,
            dictionary,
            weights,
            separator: separator.chars().collect(),
            query: query.chars().collect(),
        }
    }

    /// Walk the whole subtree under `start`, returning every node at which
    /// the query is fully consumed, with its accumulated weight. One node
    /// can appear at most once; `start` itself is never a candidate.
    pub fn run(&self, start: NodeId) -> Result<Vec<(usize, NodeId)>> {
        self.run_filtered(start, None)
    }

    /// Like [`run`](Self::run), but restricted to the root paths and
    /// subtrees of `previous` candidates. Exact for any query that extends
    /// the one `previous` was computed for: a longer query can only be
    /// consumed at or below a node that consumed the shorter one.
    pub fn run_pruned(&self, start: NodeId, previous: &[NodeId]) -> Result<Vec<(usize, NodeId)>> {
        let mut filter = PruneFilter {
            allowed: HashSet::new(),
            subtree_roots: HashSet::new(),
        };
        for &node in previous {
            if self.arena.get(node).is_none() {
                continue;
            }
            filter.subtree_roots.insert(node);
            let mut current = Some(node);
            while let Some(id) = current {
                if !filter.allowed.insert(id) {
                    break;
                }
                current = self.arena.get(id).and_then(|n| n.parent());
            }
        }
        self.run_filtered(start, Some(&filter))
    }

    fn run_filtered(
        &self,
        start: NodeId,
        filter: Option<&PruneFilter>,
    ) -> Result<Vec<(usize, NodeId)>> {
        let mut candidates = Vec::new();
        let Some(start_node) = self.arena.get(start) else {
            return Ok(candidates);
        };
        for &child in start_node.children().values() {
            self.descend(child, 0, 0, false, filter, false, &mut candidates)?;
        }
        Ok(candidates)
    }

    #[allow(clippy::too_many_arguments)]
    fn descend(
        &self,
        node: NodeId,
        pos: usize,
        weight: usize,
        expect_separator: bool,
        filter: Option<&PruneFilter>,
        unrestricted: bool,
        out: &mut Vec<(usize, NodeId)>,
    ) -> Result<()> {
        let Some(n) = self.arena.get(node) else {
            return Ok(());
        };

        let mut unrestricted = unrestricted;
        if let Some(filter) = filter {
            if !unrestricted {
                unrestricted = filter.subtree_roots.contains(&node);
            }
            if !unrestricted && !filter.allowed.contains(&node) {
                return Ok(());
            }
        }

        let mut pos = pos;
        if expect_separator {
            let mut k = 0;
            while pos < self.query.len()
                && k < self.separator.len()
                && self.query[pos] == self.separator[k]
            {
                pos += 1;
                k += 1;
            }
        }

        let Some(name) = n.name() else {
            return Ok(());
        };
        let segment: Vec<char> = self.dictionary.resolve(name)?.chars().collect();
        let matched = matcher::match_segment(&segment, &self.query[pos..], 0, self.weights, None);
        let pos = pos + matched.consumed;
        let weight = weight + matched.weight;

        if pos == self.query.len() {
            out.push((weight, node));
        }
        for &child in n.children().values() {
            self.descend(child, pos, weight, true, filter, unrestricted, out)?;
        }
        Ok(())
    }

    /// Recompute weight plus highlight offsets for a candidate by
    /// re-running the match down its chain below `top`. `base_offset` is
    /// the rendered char offset at which that chain starts (non-zero for
    /// scoped searches, where the scope prefix is displayed but not
    /// matched).
    pub fn match_data(&self, top: NodeId, node: NodeId, base_offset: usize) -> Result<MatchData> {
        let chain = self.arena.chain_below(top, node);
        let mut pos = 0;
        let mut weight = 0;
        let mut offset = base_offset;
        let mut indices = Vec::new();

        for (depth, &link) in chain.iter().enumerate() {
            if depth > 0 {
                let mut k = 0;
                while pos < self.query.len()
                    && k < self.separator.len()
                    && self.query[pos] == self.separator[k]
                {
                    indices.push(offset + k);
                    pos += 1;
                    k += 1;
                }
                offset += self.separator.len();
            }

            let Some(n) = self.arena.get(link) else {
                break;
            };
            let Some(name) = n.name() else {
                break;
            };
            let segment: Vec<char> = self.dictionary.resolve(name)?.chars().collect();
            let mut segment_indices = Vec::new();
            let matched = matcher::match_segment(
                &segment,
                &self.query[pos..],
                0,
                self.weights,
                Some(&mut segment_indices),
            );
            indices.extend(segment_indices.into_iter().map(|p| offset + p));
            pos += matched.consumed;
            weight += matched.weight;
            offset += segment.len();
        }

        debug_assert_eq!(
            pos,
            self.query.len(),
            "match data requested for a node that does not consume the query"
        );
        Ok(MatchData { weight, indices })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> (NodeArena, Dictionary) {
        let mut dictionary = Dictionary::new();
        let mut arena = NodeArena::new();
        for name in [
            "network::Connection::open",
            "network::Connection::close",
            "netlink::Socket",
        ] {
            let segments: Vec<_> = name.split("::").map(|s| dictionary.intern(s)).collect();
            arena.add_path(&segments);
        }
        (arena, dictionary)
    }

    fn names_of(
        candidates: &[(usize, NodeId)],
        arena: &NodeArena,
        dictionary: &Dictionary,
    ) -> Vec<String> {
        candidates
            .iter()
            .map(|&(_, node)| arena.full_name(node, dictionary, "::").unwrap())
            .collect()
    }

    #[test]
    fn test_full_qualified_query_costs_zero() {
        let (arena, dictionary) = build();
        let weights = ScoringWeights::default();
        let walker = FuzzyWalker::new(
            &arena,
            &dictionary,
            &weights,
            "::",
            "network::Connection::open",
        );
        let candidates = walker.run(arena.root()).unwrap();
        let names = names_of(&candidates, &arena, &dictionary);
        assert!(names.contains(&"network::Connection::open".to_string()));
        for &(weight, node) in &candidates {
            if arena.full_name(node, &dictionary, "::").unwrap() == "network::Connection::open" {
                assert_eq!(weight, 0);
            }
        }
    }

    #[test]
    fn test_candidates_include_descendants_of_consuming_node() {
        let (arena, dictionary) = build();
        let weights = ScoringWeights::default();
        let walker = FuzzyWalker::new(&arena, &dictionary, &weights, "::", "network");
        let candidates = walker.run(arena.root()).unwrap();
        let names = names_of(&candidates, &arena, &dictionary);
        // The consuming node itself plus everything below it.
        assert!(names.contains(&"network".to_string()));
        assert!(names.contains(&"network::Connection".to_string()));
        assert!(names.contains(&"network::Connection::open".to_string()));
        assert!(!names.contains(&"netlink".to_string()));
    }

    #[test]
    fn test_pruned_walk_matches_full_walk_for_extended_query() {
        let (arena, dictionary) = build();
        let weights = ScoringWeights::default();

        let first = FuzzyWalker::new(&arena, &dictionary, &weights, "::", "net");
        let previous: Vec<NodeId> = first
            .run(arena.root())
            .unwrap()
            .into_iter()
            .map(|(_, node)| node)
            .collect();

        let second = FuzzyWalker::new(&arena, &dictionary, &weights, "::", "netCo");
        let mut full = second.run(arena.root()).unwrap();
        let mut pruned = second.run_pruned(arena.root(), &previous).unwrap();
        full.sort();
        pruned.sort();
        assert_eq!(full, pruned);
        assert!(!full.is_empty());
    }

    #[test]
    fn test_match_data_covers_every_query_char() {
        let (arena, dictionary) = build();
        let weights = ScoringWeights::default();
        let query = "netConnopen";
        let walker = FuzzyWalker::new(&arena, &dictionary, &weights, "::", query);
        let candidates = walker.run(arena.root()).unwrap();

        let (weight, node) = candidates
            .iter()
            .copied()
            .find(|&(_, node)| {
                arena.full_name(node, &dictionary, "::").unwrap() == "network::Connection::open"
            })
            .unwrap();

        let data = walker.match_data(arena.root(), node, 0).unwrap();
        assert_eq!(data.weight, weight);
        assert_eq!(data.indices.len(), query.chars().count());
        // net -> 0..3, Conn -> 9..13, its second 'o' -> 17, pen -> 22..25
        assert_eq!(data.indices, vec![0, 1, 2, 9, 10, 11, 12, 17, 22, 23, 24]);
    }
}
