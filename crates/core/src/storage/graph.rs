//! Containment graph over recorded symbols.
//!
//! Pure topology: node weights are bare [`SymbolId`]s and all symbol data
//! stays in the storage tables. Membership edges point from a scope to the
//! symbols declared directly inside it.

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use std::collections::HashMap;
use symscope_api::SymbolId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Member,
}

#[derive(Debug, Default)]
pub struct SymbolGraph {
    topology: StableDiGraph<SymbolId, EdgeKind>,
    indices: HashMap<SymbolId, NodeIndex>,
}

impl SymbolGraph {
    pub fn new() -> Self {
        Self {
            topology: StableDiGraph::new(),
            indices: HashMap::new(),
        }
    }

    pub fn ensure_node(&mut self, id: SymbolId) -> NodeIndex {
        if let Some(&idx) = self.indices.get(&id) {
            return idx;
        }
        let idx = self.topology.add_node(id);
        self.indices.insert(id, idx);
        idx
    }

    /// Record that `child` is declared directly inside `parent`.
    /// Duplicate links are ignored.
    pub fn link_member(&mut self, parent: SymbolId, child: SymbolId) {
        let from = self.ensure_node(parent);
        let to = self.ensure_node(child);

        let already_exists = self
            .topology
            .edges_connecting(from, to)
            .any(|e| *e.weight() == EdgeKind::Member);
        if !already_exists {
            self.topology.add_edge(from, to, EdgeKind::Member);
        }
    }

    /// Drop the symbol and every edge touching it.
    pub fn remove(&mut self, id: SymbolId) -> bool {
        match self.indices.remove(&id) {
            Some(idx) => self.topology.remove_node(idx).is_some(),
            None => false,
        }
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.indices.contains_key(&id)
    }

    /// Direct members of `id`, ascending by symbol id.
    pub fn members_of(&self, id: SymbolId) -> Vec<SymbolId> {
        let Some(&idx) = self.indices.get(&id) else {
            return Vec::new();
        };
        let mut members: Vec<SymbolId> = self
            .topology
            .neighbors_directed(idx, Direction::Outgoing)
            .filter_map(|n| self.topology.node_weight(n).copied())
            .collect();
        members.sort();
        members
    }

    /// The scope `id` is declared in, when one has been recorded.
    pub fn parent_of(&self, id: SymbolId) -> Option<SymbolId> {
        let &idx = self.indices.get(&id)?;
        self.topology
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .and_then(|n| self.topology.node_weight(n).copied())
    }

    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }
}
