use symscope_api::{
    Access, ApiError, DotPathConvention, ParseEventSink, ParseLocation, ParsedVariable, Range,
    SymbolId, SymbolKind, SymbolSearch,
};
use symscope_core::Storage;

fn loc(line: usize) -> ParseLocation {
    ParseLocation::new("src/net.cpp", Range::new(line, 1, line, 40))
}

fn sample_storage() -> (Storage, SymbolId, SymbolId, SymbolId) {
    let mut storage = Storage::new();
    let ns = storage.on_namespace_parsed(loc(1), "network").unwrap();
    let class = storage
        .on_class_parsed(loc(3), "network::Connection", Some(Access::Public))
        .unwrap();
    let method = storage
        .on_method_parsed(
            loc(7),
            "network::Connection::open",
            "bool",
            vec![ParsedVariable::new("int", "port", false)],
            Some(Access::Public),
            None,
            false,
            false,
        )
        .unwrap();
    (storage, ns, class, method)
}

#[test]
fn test_parse_events_become_searchable() {
    let (storage, _, _, method) = sample_storage();

    let hits = storage.search("netConnopen", None, 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].symbol_id, method);
    assert_eq!(hits[0].full_name, "network::Connection::open");
    assert_eq!(hits[0].matched_indices.len(), "netConnopen".len());

    // A fully typed name is a perfect hit.
    let exact = storage.search("network::Connection::open", None, 10).unwrap();
    assert_eq!(exact[0].score, 0);
}

#[test]
fn test_records_keep_parse_details() {
    let (storage, ns, class, method) = sample_storage();

    let record = storage.symbol(method).unwrap();
    assert_eq!(record.kind, SymbolKind::Method);
    assert_eq!(record.name, "open");
    assert_eq!(record.qualified_name, "network::Connection::open");
    assert_eq!(record.access, Some(Access::Public));
    assert_eq!(record.location.range.start_line, 7);
    let signature = record.signature.as_ref().unwrap();
    assert_eq!(signature.return_type, "bool");
    assert_eq!(signature.parameters[0].name, "port");

    assert_eq!(storage.symbol(ns).unwrap().kind, SymbolKind::Namespace);
    assert_eq!(storage.symbol(class).unwrap().kind, SymbolKind::Class);
    assert_eq!(storage.symbol_count(), 3);
}

#[test]
fn test_field_and_enum_events() {
    let mut storage = Storage::new();
    let field = storage
        .on_field_parsed(
            loc(4),
            ParsedVariable::new("size_t", "network::Connection::m_port", false),
            Some(Access::Private),
        )
        .unwrap();
    let state = storage
        .on_enum_parsed(loc(9), "network::State", None)
        .unwrap();
    let idle = storage
        .on_enum_field_parsed(loc(10), "network::State::Idle")
        .unwrap();

    let record = storage.symbol(field).unwrap();
    assert_eq!(record.kind, SymbolKind::Field);
    assert_eq!(record.name, "m_port");
    assert_eq!(record.type_name.as_deref(), Some("size_t"));
    assert_eq!(record.access, Some(Access::Private));

    assert_eq!(storage.symbol(state).unwrap().kind, SymbolKind::Enum);
    assert_eq!(storage.symbol(idle).unwrap().kind, SymbolKind::EnumField);
    assert_eq!(storage.members_of(state), vec![idle]);
}

#[test]
fn test_overloads_share_a_qualified_name() {
    let mut storage = Storage::new();
    let first = storage
        .on_function_parsed(loc(1), "util::parse", "int", vec![])
        .unwrap();
    let second = storage
        .on_function_parsed(
            loc(2),
            "util::parse",
            "int",
            vec![ParsedVariable::new("const char *", "input", false)],
        )
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(storage.symbols_named("util::parse"), vec![first, second]);

    let hits = storage.search("util::parse", None, 10).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].full_name, hits[1].full_name);
}

#[test]
fn test_members_adopt_children_seen_first() {
    let mut storage = Storage::new();
    // The method arrives before its class, the class before its namespace.
    let show = storage
        .on_method_parsed(loc(5), "gui::Window::show", "void", vec![], None, None, false, false)
        .unwrap();
    let window = storage
        .on_class_parsed(loc(2), "gui::Window", None)
        .unwrap();
    let gui = storage.on_namespace_parsed(loc(1), "gui").unwrap();

    assert_eq!(storage.members_of(window), vec![show]);
    assert_eq!(storage.parent_of(show), Some(window));
    assert_eq!(storage.members_of(gui), vec![window]);
    assert_eq!(storage.parent_of(gui), None);
}

#[test]
fn test_symbol_removal_cleans_every_table() {
    let (mut storage, _, class, method) = sample_storage();
    let nodes_before = storage.index().node_count();

    assert!(storage.on_symbol_removed(method));

    assert!(storage.symbol(method).is_none());
    assert!(storage.symbols_named("network::Connection::open").is_empty());
    assert!(storage.members_of(class).is_empty());
    assert!(storage.search("open", None, 10).unwrap().is_empty());
    assert_eq!(storage.index().node_count(), nodes_before - 1);
    assert_eq!(storage.symbol_count(), 2);

    assert!(!storage.on_symbol_removed(method));
}

#[test]
fn test_scoped_search_through_the_trait() {
    let (mut storage, _, class, method) = sample_storage();
    let stray = storage
        .on_function_parsed(loc(20), "datalink::open", "void", vec![])
        .unwrap();

    let hits = storage.search("open", Some(class), 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].symbol_id, method);

    let unscoped = storage.search("open", None, 10).unwrap();
    let ids: Vec<SymbolId> = unscoped.iter().map(|h| h.symbol_id).collect();
    assert!(ids.contains(&method));
    assert!(ids.contains(&stray));

    let err = storage.search("open", Some(SymbolId(77)), 10).unwrap_err();
    assert!(matches!(err, ApiError::UnknownScope(SymbolId(77))));
}

#[test]
fn test_max_results_caps_hits() {
    let (storage, _, _, _) = sample_storage();
    let hits = storage.search("", None, 2).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(storage.search("", None, 0).unwrap().is_empty());
}

#[test]
fn test_dot_convention_renders_dotted_names() {
    let mut storage = Storage::with_convention(Box::new(DotPathConvention));
    let widget = storage
        .on_class_parsed(loc(1), "com.example.Widget", None)
        .unwrap();

    let hits = storage.search("com.example.Widget", None, 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].symbol_id, widget);
    assert_eq!(hits[0].full_name, "com.example.Widget");
    assert_eq!(hits[0].score, 0);

    let fuzzy = storage.search("exWid", None, 10).unwrap();
    assert_eq!(fuzzy[0].full_name, "com.example.Widget");
}

#[test]
fn test_empty_name_is_rejected() {
    let mut storage = Storage::new();
    let err = storage.on_namespace_parsed(loc(1), "").unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
    assert!(storage.is_empty());
}
