use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use std::path::PathBuf;

/// Stable identifier a recorded symbol keeps for its whole lifetime.
///
/// Ids are allocated by the storage layer and never reused, so a stale id
/// is always detectable as "not found" rather than silently pointing at a
/// different symbol.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "symbol#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Range {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

/// Where a parse event came from in the analyzed sources.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ParseLocation {
    pub path: PathBuf,
    pub range: Range,
}

impl ParseLocation {
    pub fn new(path: impl Into<PathBuf>, range: Range) -> Self {
        Self {
            path: path.into(),
            range,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Namespace,
    Class,
    Struct,
    GlobalVariable,
    Field,
    Function,
    Method,
    Enum,
    EnumField,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Class => "class",
            SymbolKind::Struct => "struct",
            SymbolKind::GlobalVariable => "global_variable",
            SymbolKind::Field => "field",
            SymbolKind::Function => "function",
            SymbolKind::Method => "method",
            SymbolKind::Enum => "enum",
            SymbolKind::EnumField => "enum_field",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Public,
    Protected,
    Private,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Abstraction {
    Virtual,
    PureVirtual,
}

/// A typed variable as reported by a parser front end. Used both for
/// globals/fields (where `name` is the qualified name) and for parameter
/// lists (where `name` is the bare parameter name).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ParsedVariable {
    pub type_name: String,
    pub name: String,
    pub is_static: bool,
}

impl ParsedVariable {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>, is_static: bool) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            is_static,
        }
    }
}

/// Callable shape shared by free functions and methods. The method-only
/// qualifiers stay at their defaults for free functions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct FunctionSignature {
    pub return_type: String,
    pub parameters: Vec<ParsedVariable>,
    pub abstraction: Option<Abstraction>,
    pub is_const: bool,
    pub is_static: bool,
}

impl FunctionSignature {
    pub fn function(return_type: impl Into<String>, parameters: Vec<ParsedVariable>) -> Self {
        Self {
            return_type: return_type.into(),
            parameters,
            abstraction: None,
            is_const: false,
            is_static: false,
        }
    }
}

/// Everything the storage layer keeps about one discovered symbol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct SymbolRecord {
    pub id: SymbolId,
    pub kind: SymbolKind,
    /// Last segment of the qualified name.
    #[schemars(with = "String")]
    pub name: SmolStr,
    pub qualified_name: String,
    pub location: ParseLocation,
    pub access: Option<Access>,
    pub type_name: Option<String>,
    pub signature: Option<FunctionSignature>,
}
