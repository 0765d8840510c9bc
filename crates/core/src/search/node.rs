//! Name trie storage.
//!
//! One node per qualified-name segment, so `network::Connection::open` and
//! `network::Connection::close` share the `network` and `Connection` nodes.
//! Nodes live in an id-keyed arena owned by the index; parent links are
//! plain ids resolved through the arena, never owning references, so the
//! hierarchy cannot form a reference cycle.

use crate::dictionary::{Dictionary, NameId};
use crate::error::Result;
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};
use symscope_api::SymbolId;

/// Handle for a live trie node. Stale handles (kept across a removal) are
/// detectable: the arena simply no longer knows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// One segment of a qualified name, plus the symbols whose name ends here.
#[derive(Debug)]
pub struct SearchNode {
    /// None only for the hidden root.
    name: Option<NameId>,
    parent: Option<NodeId>,
    /// Insertion-ordered so repeated walks visit children deterministically.
    children: IndexMap<NameId, NodeId>,
    symbol_ids: BTreeSet<SymbolId>,
}

impl SearchNode {
    fn root() -> Self {
        Self {
            name: None,
            parent: None,
            children: IndexMap::new(),
            symbol_ids: BTreeSet::new(),
        }
    }

    fn new(name: NameId, parent: NodeId) -> Self {
        Self {
            name: Some(name),
            parent: Some(parent),
            children: IndexMap::new(),
            symbol_ids: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> Option<NameId> {
        self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &IndexMap<NameId, NodeId> {
        &self.children
    }

    pub fn symbol_ids(&self) -> &BTreeSet<SymbolId> {
        &self.symbol_ids
    }

    pub fn has_symbols(&self) -> bool {
        !self.symbol_ids.is_empty()
    }
}

/// Owner of every node. All structural mutation goes through here, which is
/// what keeps the trie invariants local to this file.
#[derive(Debug)]
pub struct NodeArena {
    nodes: HashMap<NodeId, SearchNode>,
    root: NodeId,
    next_id: u32,
}

impl NodeArena {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, SearchNode::root());
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(&id)
    }

    /// Node count excluding the hidden root.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    fn node(&self, id: NodeId) -> &SearchNode {
        self.nodes.get(&id).expect("node id out of arena")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut SearchNode {
        self.nodes.get_mut(&id).expect("node id out of arena")
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    // ---- Mutation ----

    /// Walk `segments` from the root, creating only the missing tail.
    /// Returns the node for the last segment.
    pub fn add_path(&mut self, segments: &[NameId]) -> NodeId {
        let mut current = self.root;
        for &segment in segments {
            let existing = self.node(current).children.get(&segment).copied();
            current = match existing {
                Some(child) => child,
                None => {
                    let id = self.alloc();
                    self.nodes.insert(id, SearchNode::new(segment, current));
                    self.node_mut(current).children.insert(segment, id);
                    id
                }
            };
        }
        current
    }

    pub fn find_path(&self, segments: &[NameId]) -> Option<NodeId> {
        let mut current = self.root;
        for &segment in segments {
            current = self.nodes.get(&current)?.children.get(&segment).copied()?;
        }
        Some(current)
    }

    /// Returns false when the symbol was already attached.
    pub fn attach_symbol(&mut self, node: NodeId, id: SymbolId) -> bool {
        self.node_mut(node).symbol_ids.insert(id)
    }

    /// Detach `id` from `node`, then prune upward: every node left with no
    /// symbols and no children is destroyed, up to (never including) the
    /// root. Returns false when the symbol was not attached there.
    pub fn remove_symbol(&mut self, node: NodeId, id: SymbolId) -> bool {
        let Some(n) = self.nodes.get_mut(&node) else {
            return false;
        };
        if !n.symbol_ids.remove(&id) {
            return false;
        }
        self.prune_upward(node);
        true
    }

    fn prune_upward(&mut self, from: NodeId) {
        let mut current = from;
        while current != self.root {
            let n = self.node(current);
            if !n.children.is_empty() || n.has_symbols() {
                break;
            }
            let parent = n.parent.expect("non-root node has a parent");
            let name = n.name.expect("non-root node has a name");
            self.nodes.remove(&current);
            let detached = self.node_mut(parent).children.shift_remove(&name);
            debug_assert_eq!(detached, Some(current));
            current = parent;
        }
    }

    // ---- Rendering ----

    /// Segment names from the root down to `node`, borrowed from the
    /// dictionary. Empty for the root itself.
    pub fn name_hierarchy<'a>(
        &self,
        node: NodeId,
        dictionary: &'a Dictionary,
    ) -> Result<Vec<&'a str>> {
        let mut segments = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let n = self.node(id);
            if let Some(name) = n.name {
                segments.push(dictionary.resolve(name)?);
            }
            current = n.parent;
        }
        segments.reverse();
        Ok(segments)
    }

    pub fn full_name(
        &self,
        node: NodeId,
        dictionary: &Dictionary,
        separator: &str,
    ) -> Result<String> {
        Ok(self.name_hierarchy(node, dictionary)?.join(separator))
    }

    /// Nodes strictly below `top` on the path to `node`, ordered top-down
    /// and ending with `node` itself.
    pub fn chain_below(&self, top: NodeId, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == top {
                break;
            }
            chain.push(id);
            current = self.node(id).parent;
        }
        debug_assert_eq!(current, Some(top), "node is not below the given top");
        chain.reverse();
        chain
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}
