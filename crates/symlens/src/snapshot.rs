//! Snapshot factories.
//!
//! `SnapshotBuilder` borrows a host and a type identity cache and turns
//! raw host handles into the DTOs of [`crate::model`]. Every factory is
//! total: absent or unrepresentable inputs produce the sentinel DTO for
//! the requested kind, never an error.

use symlens_host::{EntityRef, Host, TypeRef, TypeShape};

use crate::cache::TypeIdCache;
use crate::classify::{DeclKind, classify, normalize};
use crate::model::{
    ArrowTypeInfo, CallCompletionInfo, NamedTypeInfo, NamedTypeMemberInfo,
    NamedTypeMemberInfoLight, SymbolInfo, SymbolInfoLight, TypeInfo,
};
use crate::names::{display_signature, qualified_name, short_name};

/// Builds snapshot DTOs from host handles.
///
/// Holds no state of its own beyond the borrowed cache; construct one per
/// query, or keep one around for a batch of queries against the same
/// host generation.
pub struct SnapshotBuilder<'a, H: Host> {
    host: &'a H,
    cache: &'a TypeIdCache,
}

impl<'a, H: Host> SnapshotBuilder<'a, H> {
    /// Create a builder over a host and a cache.
    pub fn new(host: &'a H, cache: &'a TypeIdCache) -> Self {
        Self { host, cache }
    }

    /// The borrowed host.
    pub fn host(&self) -> &'a H {
        self.host
    }

    /// The ID for a descriptor (see [`TypeIdCache::id_for`]).
    pub fn id_for(&self, t: TypeRef) -> i32 {
        self.cache.id_for(t)
    }

    /// Reverse ID lookup (see [`TypeIdCache::lookup`]).
    pub fn lookup(&self, id: i32) -> Option<TypeRef> {
        self.cache.lookup(id)
    }

    /// Reset the cache generation (see [`TypeIdCache::reset`]).
    pub fn reset(&self) {
        self.cache.reset();
    }

    /// Build a type snapshot for a descriptor.
    pub fn type_info(&self, t: TypeRef) -> TypeInfo {
        self.type_info_with_members(t, Vec::new())
    }

    /// Build a type snapshot carrying a pre-built member list (used by
    /// type inspection for the defining-ancestor groups).
    pub(crate) fn type_info_with_members(
        &self,
        t: TypeRef,
        members: Vec<NamedTypeMemberInfo>,
    ) -> TypeInfo {
        if t.is_none() {
            return TypeInfo::nil();
        }
        match self.host.type_shape(t) {
            // Existential quantification collapses to its bound before
            // anything else looks at the shape.
            TypeShape::Existential { underlying } => {
                self.type_info_with_members(underlying, members)
            }
            TypeShape::Arrow { params, result } => TypeInfo::Arrow(ArrowTypeInfo {
                name: display_signature(self.host, t),
                type_id: self.cache.id_for(t),
                result_type: Box::new(self.type_info(result)),
                param_types: params.iter().map(|&p| self.type_info(p)).collect(),
            }),
            TypeShape::Named { args } => {
                let entity = normalize(self.host, self.host.type_entity(t));
                if entity.is_none() || self.host.is_missing(entity) {
                    return TypeInfo::nil();
                }
                // The outer probe can fail inside the host for certain
                // built-ins; a failed probe means "not nested".
                let outer_type_id = self
                    .host
                    .outer_type_of(entity)
                    .ok()
                    .flatten()
                    .map(|outer| self.cache.id_for(outer));
                TypeInfo::Named(NamedTypeInfo {
                    name: short_name(self.host, t),
                    type_id: self.cache.id_for(t),
                    decl_kind: classify(self.host, entity),
                    full_name: qualified_name(self.host, entity),
                    type_args: args.iter().map(|&a| self.type_info(a)).collect(),
                    members,
                    pos: self.host.position_of(entity),
                    outer_type_id,
                })
            }
            TypeShape::Missing => TypeInfo::nil(),
        }
    }

    /// Build a full symbol snapshot for an entity.
    pub fn symbol_info(&self, e: EntityRef) -> SymbolInfo {
        if e.is_none() || self.host.is_missing(e) {
            return SymbolInfo::nil();
        }
        let e = normalize(self.host, e);
        SymbolInfo {
            name: self.host.entity_name(e),
            decl_pos: self.host.position_of(e),
            tpe: self.type_info(self.host.entity_type(e)),
            is_callable: self.host.is_method(e),
        }
    }

    /// Build a light symbol snapshot for an entity, optionally with a
    /// type other than the entity's declared one (e.g. a type already
    /// instantiated at a call site).
    pub fn symbol_info_light(&self, e: EntityRef, tpe: Option<TypeRef>) -> SymbolInfoLight {
        if e.is_none() || self.host.is_missing(e) {
            return SymbolInfoLight::nil();
        }
        let e = normalize(self.host, e);
        let t = tpe.unwrap_or_else(|| self.host.entity_type(e));
        SymbolInfoLight {
            name: self.host.entity_name(e),
            type_sig: display_signature(self.host, t),
            type_id: self.cache.id_for(t),
            is_callable: self.host.is_method(e),
        }
    }

    /// Light summaries of an entity's directly declared members, for
    /// completion-style listings. Synthetic members and constructors
    /// are left out.
    pub fn member_infos_light(&self, e: EntityRef) -> Vec<NamedTypeMemberInfoLight> {
        if e.is_none() || self.host.is_missing(e) {
            return Vec::new();
        }
        let e = normalize(self.host, e);
        self.host
            .members_of(e)
            .into_iter()
            .filter(|&m| !self.host.is_synthetic(m) && !self.host.is_constructor(m))
            .map(|m| {
                let t = self.host.entity_type(m);
                NamedTypeMemberInfoLight {
                    name: self.host.entity_name(m),
                    type_sig: display_signature(self.host, t),
                    type_id: self.cache.id_for(t),
                    is_callable: self.host.is_method(m),
                }
            })
            .collect()
    }

    /// Build one inspected-member snapshot.
    pub(crate) fn member_info(&self, e: EntityRef) -> NamedTypeMemberInfo {
        NamedTypeMemberInfo {
            name: self.host.entity_name(e),
            tpe: self.type_info(self.host.entity_type(e)),
            pos: self.host.position_of(e),
            decl_kind: classify(self.host, e),
        }
    }

    /// The type of an entity's type-distinct companion: a module's
    /// like-named class, or a class/trait's like-named module. `None`
    /// when absent or when the two forms share a type.
    pub fn companion_type(&self, e: EntityRef) -> Option<TypeRef> {
        if e.is_none() || self.host.is_missing(e) {
            return None;
        }
        let e = normalize(self.host, e);
        let companion = self.host.companion_of(e);
        if companion.is_none() || self.host.is_missing(companion) {
            return None;
        }
        let companion_type = self.host.entity_type(companion);
        if companion_type.is_none() || companion_type == self.host.entity_type(e) {
            return None;
        }
        Some(companion_type)
    }

    /// The cache ID of an entity's companion type, if any.
    pub fn companion_type_id(&self, e: EntityRef) -> Option<i32> {
        self.companion_type(e).map(|t| self.cache.id_for(t))
    }

    /// Constructors reachable from an entity, as light summaries.
    ///
    /// Constructors live on the class side: a class/trait lists its own
    /// declared constructors, a module lists its companion class's.
    pub fn constructor_synonyms(&self, e: EntityRef) -> Vec<SymbolInfoLight> {
        let e = normalize(self.host, e);
        let owner = if self.host.is_class(e) || self.host.is_trait(e) {
            e
        } else if self.host.is_module(e) {
            self.host.companion_of(e)
        } else {
            EntityRef::NONE
        };
        self.callable_members(owner, |m| self.host.is_constructor(m))
    }

    /// Factory-style `apply` members reachable from an entity, as light
    /// summaries.
    ///
    /// `apply` factories conventionally live on the module side: a module
    /// lists its own, a class/trait lists its companion module's.
    pub fn apply_synonyms(&self, e: EntityRef) -> Vec<SymbolInfoLight> {
        let e = normalize(self.host, e);
        let owner = if self.host.is_module(e) {
            e
        } else if self.host.is_class(e) || self.host.is_trait(e) {
            self.host.companion_of(e)
        } else {
            EntityRef::NONE
        };
        self.callable_members(owner, |m| {
            self.host.is_method(m)
                && !self.host.is_constructor(m)
                && self.host.entity_name(m) == "apply"
        })
    }

    fn callable_members(
        &self,
        owner: EntityRef,
        keep: impl Fn(EntityRef) -> bool,
    ) -> Vec<SymbolInfoLight> {
        if owner.is_none() || self.host.is_missing(owner) {
            return Vec::new();
        }
        self.host
            .members_of(owner)
            .into_iter()
            .filter(|&m| keep(m))
            .map(|m| self.symbol_info_light(m, None))
            .collect()
    }

    /// Build a call-completion summary for a callable type. Non-arrow
    /// shapes produce the sentinel summary.
    pub fn call_completion_info(&self, t: TypeRef) -> CallCompletionInfo {
        if t.is_none() {
            return CallCompletionInfo::nil();
        }
        match self.host.type_shape(t) {
            TypeShape::Existential { underlying } => self.call_completion_info(underlying),
            TypeShape::Arrow { params, result } => {
                // The host may have recorded fewer names than the arrow
                // declares; pad so names stay parallel to the types.
                let mut param_names = self.host.parameter_names(t);
                param_names.resize(self.host.declared_params_arity(t), String::new());
                CallCompletionInfo {
                    result_type: self.type_info(result),
                    param_types: params.iter().map(|&p| self.type_info(p)).collect(),
                    param_names,
                }
            }
            TypeShape::Named { .. } | TypeShape::Missing => CallCompletionInfo::nil(),
        }
    }

    /// Declared kind of an entity, after normalization.
    pub fn decl_kind(&self, e: EntityRef) -> DeclKind {
        classify(self.host, normalize(self.host, e))
    }
}

#[cfg(test)]
#[path = "../tests/snapshot_tests.rs"]
mod snapshot_tests;
