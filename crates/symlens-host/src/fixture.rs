//! An in-memory reference host.
//!
//! `FixtureHost` is a small arena-backed symbol table implementing the
//! `Host` trait. It exists for tests (both in this workspace and for
//! downstream consumers of the snapshot layer) and doubles as a reference
//! for what each `Host` operation is expected to return.
//!
//! Type descriptors are interned: building the same structural shape twice
//! yields the same `TypeRef`, which is the equality contract `Host`
//! requires.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::handle::{EntityRef, SourcePos, TypeRef};
use crate::shape::TypeShape;
use crate::{Host, HostError};

#[derive(Debug, Clone)]
struct EntityData {
    name: String,
    owner: EntityRef,
    tpe: TypeRef,
    pos: SourcePos,
    members: Vec<EntityRef>,
    is_method: bool,
    is_trait: bool,
    is_module: bool,
    is_module_class: bool,
    is_class: bool,
    is_package: bool,
    is_package_class: bool,
    is_package_object: bool,
    is_field: bool,
    is_mutable_field: bool,
    is_constructor: bool,
    is_synthetic: bool,
    is_empty_package: bool,
    is_top_object_sentinel: bool,
    companion: EntityRef,
    module_form: EntityRef,
    module_class: EntityRef,
    package_object_module: EntityRef,
    outer: Option<TypeRef>,
    poisoned_outer: bool,
}

impl EntityData {
    fn new(name: &str, owner: EntityRef) -> Self {
        Self {
            name: name.to_string(),
            owner,
            tpe: TypeRef::NONE,
            pos: SourcePos::NONE,
            members: Vec::new(),
            is_method: false,
            is_trait: false,
            is_module: false,
            is_module_class: false,
            is_class: false,
            is_package: false,
            is_package_class: false,
            is_package_object: false,
            is_field: false,
            is_mutable_field: false,
            is_constructor: false,
            is_synthetic: false,
            is_empty_package: false,
            is_top_object_sentinel: false,
            companion: EntityRef::NONE,
            module_form: EntityRef::NONE,
            module_class: EntityRef::NONE,
            package_object_module: EntityRef::NONE,
            outer: None,
            poisoned_outer: false,
        }
    }
}

#[derive(Debug, Clone)]
enum TypeData {
    Named {
        entity: EntityRef,
        args: Vec<TypeRef>,
    },
    Arrow {
        params: Vec<TypeRef>,
        result: TypeRef,
        param_names: Vec<String>,
    },
    Existential {
        underlying: TypeRef,
    },
}

/// Structural interning key. Parameter names are display metadata and do
/// not participate in type identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TypeKey {
    Named(EntityRef, Vec<TypeRef>),
    Arrow(Vec<TypeRef>, TypeRef),
    Existential(TypeRef),
}

/// A raw predicate flag, for building entities whose predicates overlap
/// the way a real host's do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFlag {
    /// `is_method`
    Method,
    /// `is_trait`
    Trait,
    /// `is_module`
    Module,
    /// `is_module_class`
    ModuleClass,
    /// `is_class`
    Class,
    /// `is_package`
    Package,
    /// `is_package_class`
    PackageClass,
    /// `is_field`
    Field,
    /// `is_mutable_field`
    MutableField,
}

/// An in-memory symbol table implementing [`Host`].
pub struct FixtureHost {
    entities: Vec<EntityData>,
    types: Vec<TypeData>,
    interned: IndexMap<TypeKey, TypeRef>,
    /// Direct supertype edges; `is_subtype` takes the reflexive
    /// transitive closure.
    supers: FxHashMap<TypeRef, Vec<TypeRef>>,
    root: EntityRef,
    placeholder: EntityRef,
    empty_package: EntityRef,
    base_ref: EntityRef,
}

impl FixtureHost {
    /// Create a host with the distinguished entities pre-registered: the
    /// root package, the placeholder ("no package") package, the
    /// empty-package sentinel, and a `Base` class standing in for the
    /// universal base reference type.
    pub fn new() -> Self {
        let mut host = Self {
            entities: Vec::new(),
            types: Vec::new(),
            interned: IndexMap::new(),
            supers: FxHashMap::default(),
            root: EntityRef::NONE,
            placeholder: EntityRef::NONE,
            empty_package: EntityRef::NONE,
            base_ref: EntityRef::NONE,
        };

        let mut root = EntityData::new("_root_", EntityRef::NONE);
        root.is_package = true;
        host.root = host.push(root);

        let mut placeholder = EntityData::new("_empty_", EntityRef::NONE);
        placeholder.is_package = true;
        host.placeholder = host.push(placeholder);

        let mut empty = EntityData::new("<empty>", EntityRef::NONE);
        empty.is_package = true;
        empty.is_empty_package = true;
        host.empty_package = host.push(empty);

        let root = host.root;
        host.base_ref = host.add_class(root, "Base");
        host
    }

    fn push(&mut self, data: EntityData) -> EntityRef {
        let e = EntityRef(self.entities.len() as u32);
        self.entities.push(data);
        e
    }

    fn push_member(&mut self, owner: EntityRef, member: EntityRef) {
        if let Some(data) = self.entities.get_mut(owner.index()) {
            data.members.push(member);
        }
    }

    fn entity(&self, e: EntityRef) -> Option<&EntityData> {
        if e.is_none() {
            return None;
        }
        self.entities.get(e.index())
    }

    fn entity_mut(&mut self, e: EntityRef) -> Option<&mut EntityData> {
        if e.is_none() {
            return None;
        }
        self.entities.get_mut(e.index())
    }

    /// The type a lexically nested declaration should report as outer:
    /// the owner's own type when the owner is type-like.
    fn outer_for(&self, owner: EntityRef) -> Option<TypeRef> {
        let data = self.entity(owner)?;
        if data.is_class || data.is_trait || data.is_module {
            if data.tpe.is_none() { None } else { Some(data.tpe) }
        } else {
            None
        }
    }

    // --- Declarations -----------------------------------------------------

    /// Add a package under `owner`.
    pub fn add_package(&mut self, owner: EntityRef, name: &str) -> EntityRef {
        let mut data = EntityData::new(name, owner);
        data.is_package = true;
        let e = self.push(data);
        self.push_member(owner, e);
        e
    }

    /// Add a class under `owner`, with a fresh zero-argument named type.
    pub fn add_class(&mut self, owner: EntityRef, name: &str) -> EntityRef {
        let mut data = EntityData::new(name, owner);
        data.is_class = true;
        data.outer = self.outer_for(owner);
        let e = self.push(data);
        self.push_member(owner, e);
        let t = self.named_type(e, &[]);
        if let Some(d) = self.entity_mut(e) {
            d.tpe = t;
        }
        e
    }

    /// Add a class under `owner` and return its zero-argument named type
    /// directly. Convenience for fixtures that only need the type handle.
    pub fn add_class_type(&mut self, owner: EntityRef, name: &str) -> TypeRef {
        let e = self.add_class(owner, name);
        self.entity_type(e)
    }

    /// Add a trait under `owner`, with a fresh zero-argument named type.
    pub fn add_trait(&mut self, owner: EntityRef, name: &str) -> EntityRef {
        let e = self.add_class(owner, name);
        if let Some(d) = self.entity_mut(e) {
            d.is_class = false;
            d.is_trait = true;
        }
        e
    }

    /// Add a module under `owner`.
    ///
    /// Also registers the module's synthetic implementation class
    /// (`name$`, flagged synthetic) as a sibling member, the way a host
    /// compiler's member tables carry both forms.
    pub fn add_module(&mut self, owner: EntityRef, name: &str) -> EntityRef {
        let mut data = EntityData::new(name, owner);
        data.is_module = true;
        data.outer = self.outer_for(owner);
        let module = self.push(data);
        self.push_member(owner, module);
        let t = self.named_type(module, &[]);
        if let Some(d) = self.entity_mut(module) {
            d.tpe = t;
        }

        let impl_name = format!("{name}$");
        let mut impl_data = EntityData::new(&impl_name, owner);
        impl_data.is_module_class = true;
        impl_data.is_synthetic = true;
        impl_data.module_form = module;
        impl_data.tpe = t;
        let impl_class = self.push(impl_data);
        self.push_member(owner, impl_class);
        if let Some(d) = self.entity_mut(module) {
            d.module_class = impl_class;
        }
        module
    }

    /// Add a package object wrapper for `pkg`, backed by `module`.
    pub fn add_package_object(&mut self, pkg: EntityRef, module: EntityRef) -> EntityRef {
        let mut data = EntityData::new("package", pkg);
        data.is_package_object = true;
        data.is_synthetic = true;
        data.package_object_module = module;
        let e = self.push(data);
        self.push_member(pkg, e);
        e
    }

    /// Add a method under `owner` with the given (arrow) type.
    pub fn add_method(&mut self, owner: EntityRef, name: &str, tpe: TypeRef) -> EntityRef {
        let mut data = EntityData::new(name, owner);
        data.is_method = true;
        data.tpe = tpe;
        let e = self.push(data);
        self.push_member(owner, e);
        e
    }

    /// Add a constructor under `owner` with the given (arrow) type.
    pub fn add_constructor(&mut self, owner: EntityRef, tpe: TypeRef) -> EntityRef {
        let e = self.add_method(owner, "this", tpe);
        if let Some(d) = self.entity_mut(e) {
            d.is_constructor = true;
        }
        e
    }

    /// Add a field under `owner`.
    pub fn add_field(&mut self, owner: EntityRef, name: &str, tpe: TypeRef, mutable: bool) -> EntityRef {
        let mut data = EntityData::new(name, owner);
        data.is_field = true;
        data.is_mutable_field = mutable;
        data.tpe = tpe;
        let e = self.push(data);
        self.push_member(owner, e);
        e
    }

    /// Add a bare entity with no predicate flags and no type. Tests use
    /// this together with [`FixtureHost::add_raw_flags`] to reproduce the
    /// overlapping raw predicates a real host reports.
    pub fn add_entity(&mut self, owner: EntityRef, name: &str) -> EntityRef {
        let data = EntityData::new(name, owner);
        let e = self.push(data);
        self.push_member(owner, e);
        e
    }

    /// Set additional raw predicate flags on an entity.
    ///
    /// A host compiler's raw predicates overlap: a module's entity can
    /// simultaneously satisfy module, class, and field predicates. The
    /// classifier's priority ordering exists for exactly these entities,
    /// and its tests build them through here.
    pub fn add_raw_flags(&mut self, e: EntityRef, flags: &[RawFlag]) {
        let Some(d) = self.entity_mut(e) else {
            return;
        };
        for flag in flags {
            match flag {
                RawFlag::Method => d.is_method = true,
                RawFlag::Trait => d.is_trait = true,
                RawFlag::Module => d.is_module = true,
                RawFlag::ModuleClass => d.is_module_class = true,
                RawFlag::Class => d.is_class = true,
                RawFlag::Package => d.is_package = true,
                RawFlag::PackageClass => d.is_package_class = true,
                RawFlag::Field => d.is_field = true,
                RawFlag::MutableField => d.is_mutable_field = true,
            }
        }
    }

    /// Add one of the host's top-object sentinels.
    pub fn add_top_object_sentinel(&mut self, name: &str) -> EntityRef {
        let mut data = EntityData::new(name, self.root);
        data.is_top_object_sentinel = true;
        data.is_synthetic = true;
        self.push(data)
    }

    // --- Types ------------------------------------------------------------

    /// Intern a named type for `entity` with the given arguments.
    pub fn named_type(&mut self, entity: EntityRef, args: &[TypeRef]) -> TypeRef {
        let key = TypeKey::Named(entity, args.to_vec());
        if let Some(&t) = self.interned.get(&key) {
            return t;
        }
        let t = TypeRef(self.types.len() as u32);
        self.types.push(TypeData::Named {
            entity,
            args: args.to_vec(),
        });
        self.interned.insert(key, t);
        t
    }

    /// Intern an arrow type.
    pub fn arrow_type(&mut self, params: &[TypeRef], result: TypeRef) -> TypeRef {
        let key = TypeKey::Arrow(params.to_vec(), result);
        if let Some(&t) = self.interned.get(&key) {
            return t;
        }
        let t = TypeRef(self.types.len() as u32);
        self.types.push(TypeData::Arrow {
            params: params.to_vec(),
            result,
            param_names: Vec::new(),
        });
        self.interned.insert(key, t);
        t
    }

    /// Intern an existential type over `underlying`.
    pub fn existential_type(&mut self, underlying: TypeRef) -> TypeRef {
        let key = TypeKey::Existential(underlying);
        if let Some(&t) = self.interned.get(&key) {
            return t;
        }
        let t = TypeRef(self.types.len() as u32);
        self.types.push(TypeData::Existential { underlying });
        self.interned.insert(key, t);
        t
    }

    /// Record a direct subtype edge: `sub <: sup`.
    pub fn add_subtype(&mut self, sub: TypeRef, sup: TypeRef) {
        self.supers.entry(sub).or_default().push(sup);
    }

    /// Attach parameter names to an arrow type.
    pub fn set_param_names(&mut self, t: TypeRef, names: &[&str]) {
        if let Some(TypeData::Arrow { param_names, .. }) = self.types.get_mut(t.index()) {
            *param_names = names.iter().map(|s| s.to_string()).collect();
        }
    }

    // --- Tweaks used by tests ---------------------------------------------

    /// Link a class/trait and a module as companions of each other.
    pub fn link_companions(&mut self, class: EntityRef, module: EntityRef) {
        if let Some(d) = self.entity_mut(class) {
            d.companion = module;
        }
        if let Some(d) = self.entity_mut(module) {
            d.companion = class;
        }
    }

    /// Set an entity's declaration position.
    pub fn set_position(&mut self, e: EntityRef, pos: SourcePos) {
        if let Some(d) = self.entity_mut(e) {
            d.pos = pos;
        }
    }

    /// Flag an entity as synthetic.
    pub fn set_synthetic(&mut self, e: EntityRef) {
        if let Some(d) = self.entity_mut(e) {
            d.is_synthetic = true;
        }
    }

    /// Make the outer-type probe fail for this entity, the way the real
    /// host fails it for certain built-ins.
    pub fn poison_outer_probe(&mut self, e: EntityRef) {
        if let Some(d) = self.entity_mut(e) {
            d.poisoned_outer = true;
        }
    }

    /// The empty-package sentinel, for normalization tests.
    pub fn empty_package(&self) -> EntityRef {
        self.empty_package
    }

    /// The synthetic implementation class registered for a module.
    pub fn module_class_of(&self, module: EntityRef) -> EntityRef {
        self.entity(module)
            .map(|d| d.module_class)
            .unwrap_or(EntityRef::NONE)
    }
}

impl Default for FixtureHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for FixtureHost {
    fn root_package(&self) -> EntityRef {
        self.root
    }

    fn placeholder_package(&self) -> EntityRef {
        self.placeholder
    }

    fn base_ref_entity(&self) -> EntityRef {
        self.base_ref
    }

    fn entity_name(&self, e: EntityRef) -> String {
        self.entity(e).map(|d| d.name.clone()).unwrap_or_default()
    }

    fn owner_of(&self, e: EntityRef) -> EntityRef {
        self.entity(e).map(|d| d.owner).unwrap_or(EntityRef::NONE)
    }

    fn entity_type(&self, e: EntityRef) -> TypeRef {
        self.entity(e).map(|d| d.tpe).unwrap_or(TypeRef::NONE)
    }

    fn position_of(&self, e: EntityRef) -> SourcePos {
        self.entity(e).map(|d| d.pos).unwrap_or(SourcePos::NONE)
    }

    fn members_of(&self, e: EntityRef) -> Vec<EntityRef> {
        self.entity(e).map(|d| d.members.clone()).unwrap_or_default()
    }

    fn member_named(&self, e: EntityRef, name: &str) -> EntityRef {
        let Some(data) = self.entity(e) else {
            return EntityRef::NONE;
        };
        for &m in &data.members {
            if let Some(member) = self.entity(m)
                && member.name == name
            {
                return m;
            }
        }
        EntityRef::NONE
    }

    fn is_missing(&self, e: EntityRef) -> bool {
        self.entity(e).is_none()
    }

    fn is_empty_package(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_empty_package)
    }

    fn is_top_object_sentinel(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_top_object_sentinel)
    }

    fn is_method(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_method)
    }

    fn is_trait(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_trait)
    }

    fn is_module(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_module)
    }

    fn is_module_class(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_module_class)
    }

    fn is_class(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_class)
    }

    fn is_package(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_package)
    }

    fn is_package_class(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_package_class)
    }

    fn is_package_object(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_package_object)
    }

    fn is_field(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_field)
    }

    fn is_mutable_field(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_mutable_field)
    }

    fn is_constructor(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_constructor)
    }

    fn is_synthetic(&self, e: EntityRef) -> bool {
        self.entity(e).is_some_and(|d| d.is_synthetic)
    }

    fn module_form(&self, e: EntityRef) -> EntityRef {
        self.entity(e).map(|d| d.module_form).unwrap_or(EntityRef::NONE)
    }

    fn package_object_module(&self, e: EntityRef) -> EntityRef {
        self.entity(e)
            .map(|d| d.package_object_module)
            .unwrap_or(EntityRef::NONE)
    }

    fn companion_of(&self, e: EntityRef) -> EntityRef {
        self.entity(e).map(|d| d.companion).unwrap_or(EntityRef::NONE)
    }

    fn type_entity(&self, t: TypeRef) -> EntityRef {
        match self.types.get(t.index()) {
            Some(TypeData::Named { entity, .. }) => *entity,
            _ => EntityRef::NONE,
        }
    }

    fn type_shape(&self, t: TypeRef) -> TypeShape {
        match self.types.get(t.index()) {
            Some(TypeData::Named { args, .. }) => TypeShape::Named { args: args.clone() },
            Some(TypeData::Arrow { params, result, .. }) => TypeShape::Arrow {
                params: params.clone(),
                result: *result,
            },
            Some(TypeData::Existential { underlying }) => TypeShape::Existential {
                underlying: *underlying,
            },
            None => TypeShape::Missing,
        }
    }

    fn type_name(&self, t: TypeRef) -> String {
        match self.types.get(t.index()) {
            Some(TypeData::Named { entity, .. }) => self.entity_name(*entity),
            Some(TypeData::Existential { underlying }) => self.type_name(*underlying),
            _ => String::new(),
        }
    }

    fn is_subtype(&self, sub: TypeRef, sup: TypeRef) -> bool {
        if sub == sup {
            return true;
        }
        let mut stack = vec![sub];
        let mut seen = vec![sub];
        while let Some(t) = stack.pop() {
            if let Some(direct) = self.supers.get(&t) {
                for &s in direct {
                    if s == sup {
                        return true;
                    }
                    if !seen.contains(&s) {
                        seen.push(s);
                        stack.push(s);
                    }
                }
            }
        }
        false
    }

    fn parameter_names(&self, t: TypeRef) -> Vec<String> {
        match self.types.get(t.index()) {
            Some(TypeData::Arrow { param_names, .. }) => param_names.clone(),
            _ => Vec::new(),
        }
    }

    fn declared_params_arity(&self, t: TypeRef) -> usize {
        match self.types.get(t.index()) {
            Some(TypeData::Arrow { params, .. }) => params.len(),
            _ => 0,
        }
    }

    fn outer_type_of(&self, e: EntityRef) -> Result<Option<TypeRef>, HostError> {
        let Some(data) = self.entity(e) else {
            return Ok(None);
        };
        if data.poisoned_outer {
            return Err(HostError::Internal(format!(
                "outer class resolution failed for `{}`",
                data.name
            )));
        }
        Ok(data.outer)
    }
}

#[cfg(test)]
#[path = "../tests/fixture_tests.rs"]
mod fixture_tests;
