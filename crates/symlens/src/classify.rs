//! Symbol classification and canonicalization.
//!
//! The host hands back several raw forms for what is conceptually one
//! entity (a module vs. its implementation class, a package vs. its
//! package object, assorted sentinels). `normalize` collapses every raw
//! form to one canonical handle before any ID assignment or display, and
//! `classify` maps a canonical handle into the closed set of declaration
//! kinds the DTOs carry.

use symlens_host::{EntityRef, Host};

/// Declaration kind of a snapshot entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// An ordinary class (including package-as-class forms).
    Class,
    /// A trait or interface.
    Trait,
    /// A singleton module.
    Module,
    /// A method.
    Method,
    /// A value or variable.
    Field,
    /// No meaningful kind (sentinels, arrow types).
    Nothing,
}

/// Classify an entity into a [`DeclKind`].
///
/// The predicates are evaluated as an ordered decision list, and the
/// order is load-bearing: a module's raw entity can satisfy the class and
/// field predicates at the same time, so module must win over class and
/// both must be checked before field. Callable wins over everything.
pub fn classify<H: Host>(host: &H, e: EntityRef) -> DeclKind {
    if e.is_none() || host.is_missing(e) {
        DeclKind::Nothing
    } else if host.is_method(e) {
        DeclKind::Method
    } else if host.is_trait(e) {
        DeclKind::Trait
    } else if host.is_module(e) || host.is_module_class(e) {
        DeclKind::Module
    } else if host.is_class(e) || host.is_package(e) || host.is_package_class(e) {
        DeclKind::Class
    } else if host.is_field(e) || host.is_mutable_field(e) {
        DeclKind::Field
    } else {
        DeclKind::Nothing
    }
}

/// Collapse an entity handle to its canonical form.
///
/// Applies the canonicalization rules until a fixed point:
/// - missing / empty-package / "no symbol" sentinels become the root
///   package;
/// - the host's top-object sentinels become the universal base reference
///   entity;
/// - a module's implementation class becomes its value-level module;
/// - a package object becomes its underlying module.
///
/// Idempotent: `normalize(normalize(e)) == normalize(e)`.
pub fn normalize<H: Host>(host: &H, e: EntityRef) -> EntityRef {
    let mut current = e;
    loop {
        let next = normalize_step(host, current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_step<H: Host>(host: &H, e: EntityRef) -> EntityRef {
    if e.is_none() || host.is_missing(e) || host.is_empty_package(e) {
        return host.root_package();
    }
    if host.is_top_object_sentinel(e) {
        return host.base_ref_entity();
    }
    if host.is_module_class(e) {
        let module = host.module_form(e);
        if !module.is_none() {
            return module;
        }
    }
    if host.is_package_object(e) {
        let module = host.package_object_module(e);
        if !module.is_none() {
            return module;
        }
    }
    e
}

#[cfg(test)]
#[path = "../tests/classify_tests.rs"]
mod classify_tests;
