//! Host-compiler facade for the symlens snapshot layer.
//!
//! This crate defines the narrow interface the snapshot layer consumes:
//! - Opaque handles (`EntityRef`, `TypeRef`, `SourcePos`)
//! - The closed `TypeShape` variant set
//! - The `Host` trait: entity lookup, predicates, and type-descriptor
//!   operations provided by the host compiler
//! - `FixtureHost`: an in-memory reference host for tests
//!
//! Parsing, name resolution, and type checking all live behind `Host`;
//! nothing in this crate mutates host state.

pub mod fixture;
pub mod handle;
pub mod shape;

pub use fixture::{FixtureHost, RawFlag};
pub use handle::{EntityRef, SourcePos, TypeRef};
pub use shape::TypeShape;

/// Error raised by fallible host introspection probes.
///
/// Only a small number of host operations can fail this way (notably
/// outer-class resolution for certain built-in or synthetic entities).
/// Callers in the snapshot layer catch it locally and treat the probe as
/// having produced no value; it never reaches the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A low-level internal error inside the host compiler.
    #[error("host introspection failed: {0}")]
    Internal(String),
}

/// The operations the snapshot layer consumes from the host compiler.
///
/// Every method is a read: the host's symbol table is never mutated
/// through this trait. `TypeRef`s handed out by an implementation must be
/// interned, so that handle equality coincides with the host's type
/// equality.
pub trait Host {
    // --- Distinguished entities -------------------------------------------

    /// The root package.
    fn root_package(&self) -> EntityRef;

    /// The host-internal placeholder package that hosts declarations with
    /// no declared package.
    fn placeholder_package(&self) -> EntityRef;

    /// The universal base reference type's entity; the host's top-object
    /// sentinels normalize to this.
    fn base_ref_entity(&self) -> EntityRef;

    // --- Entity data ------------------------------------------------------

    /// The bare declared name of an entity.
    fn entity_name(&self, e: EntityRef) -> String;

    /// The owning entity (enclosing package, class, trait, or module).
    /// `EntityRef::NONE` for the root.
    fn owner_of(&self, e: EntityRef) -> EntityRef;

    /// The type of an entity's declaration.
    fn entity_type(&self, e: EntityRef) -> TypeRef;

    /// The declaration position of an entity.
    fn position_of(&self, e: EntityRef) -> SourcePos;

    /// The direct members of an entity, in the host's declaration order.
    fn members_of(&self, e: EntityRef) -> Vec<EntityRef>;

    /// A direct member by name, or `EntityRef::NONE`.
    fn member_named(&self, e: EntityRef, name: &str) -> EntityRef;

    // --- Entity predicates ------------------------------------------------

    /// Whether the handle denotes nothing (the host's "no symbol" value).
    fn is_missing(&self, e: EntityRef) -> bool;

    /// Whether this is the host's empty-package sentinel.
    fn is_empty_package(&self, e: EntityRef) -> bool;

    /// Whether this is one of the host's top-object sentinels.
    fn is_top_object_sentinel(&self, e: EntityRef) -> bool;

    /// Whether the entity is a method.
    fn is_method(&self, e: EntityRef) -> bool;

    /// Whether the entity is a trait or interface.
    fn is_trait(&self, e: EntityRef) -> bool;

    /// Whether the entity is a singleton module (value-level form).
    fn is_module(&self, e: EntityRef) -> bool;

    /// Whether the entity is a module's implementation class.
    fn is_module_class(&self, e: EntityRef) -> bool;

    /// Whether the entity is an ordinary class.
    fn is_class(&self, e: EntityRef) -> bool;

    /// Whether the entity is a package.
    fn is_package(&self, e: EntityRef) -> bool;

    /// Whether the entity is a package's class-level form.
    fn is_package_class(&self, e: EntityRef) -> bool;

    /// Whether the entity is a package's synthetic "package object"
    /// wrapper.
    fn is_package_object(&self, e: EntityRef) -> bool;

    /// Whether the entity is field-like (value or variable).
    fn is_field(&self, e: EntityRef) -> bool;

    /// Whether the entity is a mutable field (variable).
    fn is_mutable_field(&self, e: EntityRef) -> bool;

    /// Whether the entity is a constructor.
    fn is_constructor(&self, e: EntityRef) -> bool;

    /// Whether the entity carries a host-internal flag and should be
    /// hidden from listings.
    fn is_synthetic(&self, e: EntityRef) -> bool;

    // --- Canonical-form helpers -------------------------------------------

    /// For a module's implementation class, its value-level module form;
    /// `EntityRef::NONE` otherwise.
    fn module_form(&self, e: EntityRef) -> EntityRef;

    /// For a package object, its underlying module; `EntityRef::NONE`
    /// otherwise.
    fn package_object_module(&self, e: EntityRef) -> EntityRef;

    /// The like-named dual form of an entity: a module's companion class
    /// or a class/trait's companion module. `EntityRef::NONE` when absent.
    fn companion_of(&self, e: EntityRef) -> EntityRef;

    // --- Type-descriptor operations ---------------------------------------

    /// The entity a named type descriptor refers to; `EntityRef::NONE`
    /// for shapes that name nothing (arrows, missing types).
    fn type_entity(&self, t: TypeRef) -> EntityRef;

    /// The structural shape of a type descriptor.
    fn type_shape(&self, t: TypeRef) -> TypeShape;

    /// The host's own raw rendering of a descriptor's name, without
    /// normalization. Fallback for named shapes whose entity cannot be
    /// resolved (e.g. error types that still print); empty when the host
    /// has nothing to say.
    fn type_name(&self, t: TypeRef) -> String;

    /// Whether `sub` is a subtype of `sup` (reflexive).
    fn is_subtype(&self, sub: TypeRef, sup: TypeRef) -> bool;

    /// Parameter names of an arrow-shaped descriptor, in declaration
    /// order; empty for other shapes. May be shorter than the declared
    /// arity when the host did not record names.
    fn parameter_names(&self, t: TypeRef) -> Vec<String>;

    /// Number of parameters an arrow-shaped descriptor declares; zero
    /// for other shapes.
    fn declared_params_arity(&self, t: TypeRef) -> usize;

    /// The type this entity is lexically nested inside, if any.
    ///
    /// This probe may fail with an internal host error for certain
    /// built-in or synthetic entities; callers must treat `Err` as
    /// "not nested".
    fn outer_type_of(&self, e: EntityRef) -> Result<Option<TypeRef>, HostError>;
}
