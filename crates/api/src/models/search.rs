use super::symbol::SymbolId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entry of a ranked search answer, flattened for transport: a symbol
/// id, the display name, and the character offsets the query landed on so
/// a UI can highlight them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct SearchHit {
    pub symbol_id: SymbolId,
    pub full_name: String,
    /// Char offsets into `full_name` hit by the query, in query order.
    pub matched_indices: Vec<usize>,
    /// Accumulated match cost. Lower is better; 0 is an exact match.
    pub score: usize,
}
