use super::*;
use symlens_host::TypeRef;

#[test]
fn test_ids_start_at_one_and_grow() {
    let cache = TypeIdCache::new();
    assert_eq!(cache.id_for(TypeRef(0)), 1);
    assert_eq!(cache.id_for(TypeRef(1)), 2);
    assert_eq!(cache.id_for(TypeRef(2)), 3);
}

#[test]
fn test_same_descriptor_same_id() {
    let cache = TypeIdCache::new();
    let first = cache.id_for(TypeRef(7));
    let second = cache.id_for(TypeRef(7));
    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_distinct_descriptors_distinct_ids() {
    let cache = TypeIdCache::new();
    let a = cache.id_for(TypeRef(1));
    let b = cache.id_for(TypeRef(2));
    assert_ne!(a, b);
}

#[test]
fn test_lookup_is_the_exact_inverse() {
    let cache = TypeIdCache::new();
    for raw in 0..10u32 {
        let id = cache.id_for(TypeRef(raw));
        assert_eq!(cache.lookup(id), Some(TypeRef(raw)));
    }
    assert_eq!(cache.lookup(999), None);
    assert_eq!(cache.lookup(NIL_TYPE_ID), None);
}

#[test]
fn test_none_descriptor_gets_nil_id_without_caching() {
    let cache = TypeIdCache::new();
    assert_eq!(cache.id_for(TypeRef::NONE), NIL_TYPE_ID);
    assert!(cache.is_empty());
}

#[test]
fn test_reset_starts_a_new_generation() {
    let cache = TypeIdCache::new();
    cache.id_for(TypeRef(1));
    let old = cache.id_for(TypeRef(2));

    cache.reset();
    assert!(cache.is_empty());
    assert_eq!(cache.lookup(old), None);

    // A previously seen descriptor may receive a different id now.
    let fresh = cache.id_for(TypeRef(2));
    assert_eq!(fresh, 1);
}
