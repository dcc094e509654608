use super::*;
use crate::cache::TypeIdCache;
use crate::classify::DeclKind;
use crate::model::TypeInfo;
use symlens_host::{EntityRef, FixtureHost, Host, SourcePos, TypeRef};

fn builder<'a>(host: &'a FixtureHost, cache: &'a TypeIdCache) -> SnapshotBuilder<'a, FixtureHost> {
    SnapshotBuilder::new(host, cache)
}

#[test]
fn test_type_info_for_missing_type_is_nil() {
    let host = FixtureHost::new();
    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);

    for t in [TypeRef::NONE, TypeRef(9999)] {
        let info = b.type_info(t);
        assert_eq!(info.name(), "NA");
        assert_eq!(info.type_id(), -1);
        assert_eq!(info.decl_kind(), DeclKind::Nothing);
        assert!(info.is_nil());
    }
    assert!(cache.is_empty());
}

#[test]
fn test_type_info_ids_are_stable_across_calls() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let class = host.add_class(root, "Parser");
    let t = host.entity_type(class);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let first = b.type_info(t);
    let second = b.type_info(t);
    assert_eq!(first.type_id(), second.type_id());
}

#[test]
fn test_named_type_info_fields() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let pkg = host.add_package(root, "a");
    let list = host.add_class(pkg, "List");
    host.set_position(list, SourcePos(42));
    let int = host.add_class_type(pkg, "Int");
    let list_int = host.named_type(list, &[int]);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let info = b.type_info(list_int);

    let TypeInfo::Named(named) = info else {
        panic!("expected a named type snapshot");
    };
    assert_eq!(named.name, "List");
    assert_eq!(named.full_name, "a.List");
    assert_eq!(named.decl_kind, DeclKind::Class);
    assert_eq!(named.pos, SourcePos(42));
    assert_eq!(named.type_args.len(), 1);
    assert_eq!(named.type_args[0].name(), "Int");
    assert!(named.outer_type_id.is_none());
    assert!(named.members.is_empty());
}

#[test]
fn test_existential_collapses_to_its_bound() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let list = host.add_class(root, "List");
    let int = host.add_class_type(root, "Int");
    let list_int = host.named_type(list, &[int]);
    let exist = host.existential_type(list_int);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let info = b.type_info(exist);
    assert_eq!(info.name(), "List");
    // The collapsed snapshot is cached under the underlying bound.
    assert_eq!(info.type_id(), b.type_info(list_int).type_id());
}

#[test]
fn test_arrow_type_info_has_no_kind_and_renders_signature() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let int = host.add_class_type(root, "Int");
    let str_t = host.add_class_type(root, "Str");
    let arrow = host.arrow_type(&[int], str_t);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let info = b.type_info(arrow);

    let TypeInfo::Arrow(arrow_info) = info else {
        panic!("expected an arrow type snapshot");
    };
    assert_eq!(arrow_info.name, "(Int) => Str");
    assert_eq!(arrow_info.result_type.name(), "Str");
    assert_eq!(arrow_info.param_types.len(), 1);
    assert_eq!(arrow_info.param_types[0].name(), "Int");
}

#[test]
fn test_nested_type_reports_outer_type_id() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let outer = host.add_class(root, "Outer");
    let inner = host.add_class(outer, "Inner");

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let info = b.type_info(host.entity_type(inner));

    let TypeInfo::Named(named) = info else {
        panic!("expected a named type snapshot");
    };
    let outer_id = b.id_for(host.entity_type(outer));
    assert_eq!(named.outer_type_id, Some(outer_id));
    assert_eq!(named.full_name, "Outer$Inner");
}

#[test]
fn test_failed_outer_probe_means_not_nested() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let outer = host.add_class(root, "Outer");
    let inner = host.add_class(outer, "Inner");
    host.poison_outer_probe(inner);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let TypeInfo::Named(named) = b.type_info(host.entity_type(inner)) else {
        panic!("expected a named type snapshot");
    };
    assert!(named.outer_type_id.is_none());
}

#[test]
fn test_symbol_info_for_method() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let int = host.add_class_type(root, "Int");
    let arrow = host.arrow_type(&[int], int);
    let method = host.add_method(root, "incr", arrow);
    host.set_position(method, SourcePos(7));

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let info = b.symbol_info(method);
    assert_eq!(info.name, "incr");
    assert_eq!(info.decl_pos, SourcePos(7));
    assert!(info.is_callable);
    assert_eq!(info.tpe.name(), "(Int) => Int");
}

#[test]
fn test_symbol_info_for_missing_is_nil() {
    let host = FixtureHost::new();
    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let info = b.symbol_info(EntityRef(9999));
    assert_eq!(info.name, "NA");
    assert!(!info.is_callable);
}

#[test]
fn test_symbol_info_light_uses_signature_and_id() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let int = host.add_class_type(root, "Int");
    let field = host.add_field(root, "limit", int, false);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let light = b.symbol_info_light(field, None);
    assert_eq!(light.name, "limit");
    assert_eq!(light.type_sig, "Int");
    assert_eq!(light.type_id, b.id_for(int));
    assert!(!light.is_callable);
}

#[test]
fn test_symbol_info_light_accepts_an_override_type() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let int = host.add_class_type(root, "Int");
    let str_t = host.add_class_type(root, "Str");
    let field = host.add_field(root, "limit", int, false);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let light = b.symbol_info_light(field, Some(str_t));
    assert_eq!(light.type_sig, "Str");
    assert_eq!(light.type_id, b.id_for(str_t));
}

#[test]
fn test_member_infos_light_skip_synthetic_and_constructors() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let class = host.add_class(root, "Parser");
    let class_t = host.entity_type(class);
    let int = host.add_class_type(root, "Int");
    host.add_field(class, "limit", int, false);
    let parse_t = host.arrow_type(&[], int);
    host.add_method(class, "parse", parse_t);
    let ctor_t = host.arrow_type(&[int], class_t);
    host.add_constructor(class, ctor_t);
    let hidden = host.add_field(class, "bitmap$0", int, false);
    host.set_synthetic(hidden);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let members = b.member_infos_light(class);
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["limit", "parse"]);
    assert_eq!(members[0].type_sig, "Int");
    assert!(members[1].is_callable);
    assert!(b.member_infos_light(EntityRef(9999)).is_empty());
}

#[test]
fn test_companion_symmetry() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let class = host.add_class(root, "Parser");
    let module = host.add_module(root, "Parser");
    host.link_companions(class, module);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    assert_eq!(b.companion_type(class), Some(host.entity_type(module)));
    assert_eq!(b.companion_type(module), Some(host.entity_type(class)));
}

#[test]
fn test_companion_absent_or_type_identical_is_none() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let loner = host.add_class(root, "Loner");
    let twin = host.add_class(root, "Twin");
    // A degenerate link where both forms share one type.
    host.link_companions(twin, twin);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    assert_eq!(b.companion_type(loner), None);
    assert_eq!(b.companion_type(twin), None);
    assert_eq!(b.companion_type_id(EntityRef::NONE), None);
}

#[test]
fn test_constructor_synonyms_from_both_sides() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let class = host.add_class(root, "Parser");
    let module = host.add_module(root, "Parser");
    host.link_companions(class, module);

    let class_t = host.entity_type(class);
    let int = host.add_class_type(root, "Int");
    let ctor = host.arrow_type(&[int], class_t);
    host.add_constructor(class, ctor);
    let field = host.add_field(root, "limit", int, false);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);

    // Asking the class lists its own constructors.
    let from_class = b.constructor_synonyms(class);
    assert_eq!(from_class.len(), 1);
    assert_eq!(from_class[0].type_sig, "(Int) => Parser");

    // Asking the module routes through the companion class.
    let from_module = b.constructor_synonyms(module);
    assert_eq!(from_module.len(), 1);
    assert_eq!(from_module[0].type_sig, "(Int) => Parser");

    // A field has no constructors.
    assert!(b.constructor_synonyms(field).is_empty());
}

#[test]
fn test_apply_synonyms_from_both_sides() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let class = host.add_class(root, "Parser");
    let module = host.add_module(root, "Parser");
    host.link_companions(class, module);

    let class_t = host.entity_type(class);
    let str_t = host.add_class_type(root, "Str");
    let factory = host.arrow_type(&[str_t], class_t);
    host.add_method(module, "apply", factory);
    host.add_method(module, "other", factory);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);

    let from_module = b.apply_synonyms(module);
    assert_eq!(from_module.len(), 1);
    assert_eq!(from_module[0].name, "apply");

    let from_class = b.apply_synonyms(class);
    assert_eq!(from_class.len(), 1);
    assert_eq!(from_class[0].type_sig, "(Str) => Parser");
}

#[test]
fn test_call_completion_info_for_arrow() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let int = host.add_class_type(root, "Int");
    let str_t = host.add_class_type(root, "Str");
    let arrow = host.arrow_type(&[int, str_t], int);
    host.set_param_names(arrow, &["count", "label"]);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let info = b.call_completion_info(arrow);
    assert_eq!(info.result_type.name(), "Int");
    assert_eq!(info.param_types.len(), 2);
    assert_eq!(info.param_names, vec!["count", "label"]);
}

#[test]
fn test_call_completion_pads_unnamed_parameters() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let int = host.add_class_type(root, "Int");
    let str_t = host.add_class_type(root, "Str");
    let arrow = host.arrow_type(&[int, str_t], int);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let info = b.call_completion_info(arrow);
    assert_eq!(info.param_names, vec![String::new(), String::new()]);
}

#[test]
fn test_call_completion_info_for_non_callable_is_nil() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let int = host.add_class_type(root, "Int");

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let info = b.call_completion_info(int);
    assert_eq!(info.result_type.type_id(), -1);
    assert!(info.param_types.is_empty());
    assert!(info.param_names.is_empty());

    assert!(b.call_completion_info(TypeRef::NONE).param_names.is_empty());
}

#[test]
fn test_decl_kind_normalizes_before_classifying() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let module = host.add_module(root, "Util");
    let impl_class = host.module_class_of(module);
    let int = host.add_class_type(root, "Int");
    let arrow = host.arrow_type(&[], int);
    let method = host.add_method(root, "run", arrow);

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    assert_eq!(b.decl_kind(impl_class), DeclKind::Module);
    assert_eq!(b.decl_kind(method), DeclKind::Method);
    // Sentinels normalize to the root package, which presents as a class.
    assert_eq!(b.decl_kind(EntityRef::NONE), DeclKind::Class);
}

#[test]
fn test_builder_exposes_cache_operations() {
    let mut host = FixtureHost::new();
    let root = host.root_package();
    let int = host.add_class_type(root, "Int");

    let cache = TypeIdCache::new();
    let b = builder(&host, &cache);
    let id = b.id_for(int);
    assert_eq!(b.lookup(id), Some(int));
    b.reset();
    assert_eq!(b.lookup(id), None);
}
