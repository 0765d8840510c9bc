use crate::error::ApiResult;
use crate::models::{Abstraction, Access, ParseLocation, ParsedVariable, SymbolId};

/// Callback surface a parser front end drives while walking sources.
///
/// Every `on_*_parsed` call records one symbol and returns the id assigned
/// to it. The sink owns id allocation; front ends only hand over names and
/// locations. Calls may arrive in any order, so a member can show up before
/// its enclosing scope and still end up attached to it.
pub trait ParseEventSink {
    fn on_namespace_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
    ) -> ApiResult<SymbolId>;

    fn on_class_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
        access: Option<Access>,
    ) -> ApiResult<SymbolId>;

    fn on_struct_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
        access: Option<Access>,
    ) -> ApiResult<SymbolId>;

    /// `variable.name` carries the qualified name of the global.
    fn on_global_variable_parsed(
        &mut self,
        location: ParseLocation,
        variable: ParsedVariable,
    ) -> ApiResult<SymbolId>;

    /// `variable.name` carries the qualified name of the field.
    fn on_field_parsed(
        &mut self,
        location: ParseLocation,
        variable: ParsedVariable,
        access: Option<Access>,
    ) -> ApiResult<SymbolId>;

    fn on_function_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
        return_type: &str,
        parameters: Vec<ParsedVariable>,
    ) -> ApiResult<SymbolId>;

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
    ) -> ApiResult<SymbolId>;

    fn on_enum_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
        access: Option<Access>,
    ) -> ApiResult<SymbolId>;

    fn on_enum_field_parsed(
        &mut self,
        location: ParseLocation,
        full_name: &str,
    ) -> ApiResult<SymbolId>;

    /// Forget a previously recorded symbol, e.g. when its file is re-parsed.
    /// Returns false when the id was never recorded (or already removed).
    fn on_symbol_removed(&mut self, id: SymbolId) -> bool;
}
