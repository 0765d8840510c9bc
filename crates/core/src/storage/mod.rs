//! Parse-event facade over the search engine.
//!
//! A parser front end drives [`ParseEventSink`]; this module allocates the
//! symbol ids, splits qualified names through the configured
//! [`NamingConvention`], keeps the per-symbol records and the containment
//! graph, and feeds the search index. Interactive lookups come back out
//! through [`SymbolSearch`].

pub mod graph;

use crate::config::SearchConfig;
use crate::search::SearchIndex;
use graph::SymbolGraph;
use smol_str::SmolStr;
use std::collections::HashMap;
use symscope_api::{
    Abstraction, Access, ApiError, ApiResult, ColonPathConvention, FunctionSignature,
    NamingConvention, ParseEventSink, ParseLocation, ParsedVariable, SearchHit, SymbolId,
    SymbolKind, SymbolRecord, SymbolSearch,
};
use tracing::{debug, trace};

pub struct Storage {
    index: SearchIndex,
    records: HashMap<SymbolId, SymbolRecord>,
    /// Qualified name -> ids recorded under it, in recording order.
    by_name: HashMap<String, Vec<SymbolId>>,
    /// Children seen before their enclosing scope, keyed by the scope's
    /// qualified name. Adopted when the scope shows up.
    pending_members: HashMap<String, Vec<SymbolId>>,
    graph: SymbolGraph,
    convention: Box<dyn NamingConvention>,
    next_id: u32,
}

impl Storage {
    pub fn new() -> Self {
        Self::with_convention(Box::new(ColonPathConvention))
    }

    pub fn with_convention(convention: Box<dyn NamingConvention>) -> Self {
        Self::with_config(SearchConfig::default(), convention)
    }

    pub fn with_config(mut config: SearchConfig, convention: Box<dyn NamingConvention>) -> Self {
        // Rendered names must use the same separator the convention
        // splits on, whatever the provided config says.
        config.separator = convention.separator().to_string();
        Self {
            index: SearchIndex::with_config(config),
            records: HashMap::new(),
            by_name: HashMap::new(),
            pending_members: HashMap::new(),
            graph: SymbolGraph::new(),
            convention,
            next_id: 1,
        }
    }

    // ---- Read access ----

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&SymbolRecord> {
        self.records.get(&id)
    }

    pub fn symbol_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All ids recorded under a qualified name (overloads share one).
    pub fn symbols_named(&self, qualified: &str) -> Vec<SymbolId> {
        self.by_name.get(qualified).cloned().unwrap_or_default()
    }

    /// Symbols declared directly inside `id`, ascending.
    pub fn members_of(&self, id: SymbolId) -> Vec<SymbolId> {
        self.graph.members_of(id)
    }

    pub fn parent_of(&self, id: SymbolId) -> Option<SymbolId> {
        self.graph.parent_of(id)
    }

    // ---- Recording ----

    fn record_symbol(
        &mut self,
        kind: SymbolKind,
        location: ParseLocation,
        full_name: &str,
        access: Option<Access>,
        type_name: Option<String>,
        signature: Option<FunctionSignature>,
    ) -> ApiResult<SymbolId> {
        let segments = self.convention.split(full_name);
        let Some(&last) = segments.last() else {
            return Err(ApiError::InvalidArgument(format!(
                "empty symbol name: {full_name:?}"
            )));
        };

        let id = SymbolId(self.next_id);
        self.next_id += 1;
        self.index.add(&segments, id)?;

        let qualified = self.convention.join(&segments);
        self.graph.ensure_node(id);
        if segments.len() > 1 {
            let parent_name = self.convention.join(&segments[..segments.len() - 1]);
            let parent = self
                .by_name
                .get(&parent_name)
                .and_then(|ids| ids.iter().min().copied());
            match parent {
                Some(parent) => self.graph.link_member(parent, id),
                None => self
                    .pending_members
                    .entry(parent_name)
                    .or_default()
                    .push(id),
            }
        }
        if let Some(waiting) = self.pending_members.remove(&qualified) {
            for child in waiting {
                if self.records.contains_key(&child) && self.graph.parent_of(child).is_none() {
                    self.graph.link_member(id, child);
                }
            }
        }

        let name = SmolStr::new(last);
        trace!(%id, kind = %kind, name = %qualified, "symbol recorded");
        self.by_name.entry(qualified.clone()).or_default().push(id);
        self.records.insert(
            id,
            SymbolRecord {
                id,
                kind,
                name,
                qualified_name: qualified,
                location,
                access,
                type_name,
                signature,
            },
        );
        Ok(id)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseEventSink for Storage {
    fn on_namespace_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
    ) -> ApiResult<SymbolId> {
        self.record_symbol(SymbolKind::Namespace, location, full_name, None, None, None)
    }

    fn on_class_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
        access: Option<Access>,
    ) -> ApiResult<SymbolId> {
        self.record_symbol(SymbolKind::Class, location, full_name, access, None, None)
    }

    fn on_struct_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
        access: Option<Access>,
    ) -> ApiResult<SymbolId> {
        self.record_symbol(SymbolKind::Struct, location, full_name, access, None, None)
    }

    fn on_global_variable_parsed(
        &mut self,
        location: ParseLocation,
        variable: ParsedVariable,
    ) -> ApiResult<SymbolId> {
        let ParsedVariable {
            type_name, name, ..
        } = variable;
        self.record_symbol(
            SymbolKind::GlobalVariable,
            location,
            &name,
            None,
            Some(type_name),
            None,
        )
    }

    fn on_field_parsed(
        &mut self,
        location: ParseLocation,
        variable: ParsedVariable,
        access: Option<Access>,
    ) -> ApiResult<SymbolId> {
        let ParsedVariable {
            type_name, name, ..
        } = variable;
        self.record_symbol(
            SymbolKind::Field,
            location,
            &name,
            access,
            Some(type_name),
            None,
        )
    }

    fn on_function_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
        return_type: &str,
        parameters: Vec<ParsedVariable>,
    ) -> ApiResult<SymbolId> {
        self.record_symbol(
            SymbolKind::Function,
            location,
            full_name,
            None,
            None,
            Some(FunctionSignature::function(return_type, parameters)),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn on_method_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
        return_type: &str,
        parameters: Vec<ParsedVariable>,
        access: Option<Access>,
        abstraction: Option<Abstraction>,
        is_const: bool,
        is_static: bool,
    ) -> ApiResult<SymbolId> {
        self.record_symbol(
            SymbolKind::Method,
            location,
            full_name,
            access,
            None,
            Some(FunctionSignature {
                return_type: return_type.to_string(),
                parameters,
                abstraction,
                is_const,
                is_static,
            }),
        )
    }

    fn on_enum_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
        access: Option<Access>,
    ) -> ApiResult<SymbolId> {
        self.record_symbol(SymbolKind::Enum, location, full_name, access, None, None)
    }

    fn on_enum_field_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
    ) -> ApiResult<SymbolId> {
        self.record_symbol(SymbolKind::EnumField, location, full_name, None, None, None)
    }

    fn on_symbol_removed(&mut self, id: SymbolId) -> bool {
        let Some(record) = self.records.remove(&id) else {
            trace!(%id, "removal of unknown symbol ignored");
            return false;
        };

        let removed = self.index.remove(id);
        debug_assert!(removed);
        self.graph.remove(id);

        if let Some(ids) = self.by_name.get_mut(&record.qualified_name) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.by_name.remove(&record.qualified_name);
            }
        }
        let segments = self.convention.split(&record.qualified_name);
        if segments.len() > 1 {
            let parent_name = self.convention.join(&segments[..segments.len() - 1]);
            if let Some(waiting) = self.pending_members.get_mut(&parent_name) {
                waiting.retain(|&child| child != id);
                if waiting.is_empty() {
                    self.pending_members.remove(&parent_name);
                }
            }
        }

        debug!(%id, name = %record.qualified_name, "symbol removed");
        true
    }
}

impl SymbolSearch for Storage {
    fn search(
        &self,
        query: &str,
        scope: Option<SymbolId>,
        max_results: usize,
    ) -> ApiResult<Vec<SearchHit>> {
        let results = match scope {
            Some(scope) => self.index.search_scoped(query, scope),
            None => self.index.search(query),
        }?;

        let mut hits = Vec::new();
        'matches: for m in results.matches() {
            for &symbol_id in &m.symbol_ids {
                if hits.len() == max_results {
                    break 'matches;
                }
                hits.push(SearchHit {
                    symbol_id,
                    full_name: m.full_name.clone(),
                    matched_indices: m.indices.clone(),
                    score: m.weight,
                });
            }
        }
        Ok(hits)
    }
}
