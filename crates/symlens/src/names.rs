//! Display-name computation.
//!
//! Three name forms are produced for snapshots: the bare short name
//! (modules carry a trailing `$` marker so they can be told apart from a
//! same-named class), the fully qualified name (packages joined with `.`,
//! lexically nested declarations joined with `$`), and the display
//! signature (arrow types rendered as `(P1, P2) => R`, named types with a
//! bracketed type-argument list).

use symlens_host::{EntityRef, Host, TypeRef, TypeShape};

use crate::classify::normalize;

/// The name carried by every sentinel ("not available") snapshot.
pub const NIL_NAME: &str = "NA";

/// The bare declaration name of an entity, with the module marker.
pub fn decorated_name<H: Host>(host: &H, e: EntityRef) -> String {
    if e.is_none() || host.is_missing(e) {
        return NIL_NAME.to_string();
    }
    let mut name = host.entity_name(e);
    if host.is_module(e) {
        name.push('$');
    }
    name
}

/// The short display name of a type: the declaring entity's decorated
/// name, or the display signature for shapes that name nothing.
pub fn short_name<H: Host>(host: &H, t: TypeRef) -> String {
    if t.is_none() {
        return NIL_NAME.to_string();
    }
    match host.type_shape(t) {
        TypeShape::Named { .. } => {
            let e = host.type_entity(t);
            if e.is_none() || host.is_missing(e) {
                // Named shapes without a resolvable entity (error types)
                // still print whatever the host calls them.
                let raw = host.type_name(t);
                if raw.is_empty() {
                    NIL_NAME.to_string()
                } else {
                    raw
                }
            } else {
                decorated_name(host, normalize(host, e))
            }
        }
        TypeShape::Arrow { .. } => display_signature(host, t),
        TypeShape::Existential { underlying } => short_name(host, underlying),
        TypeShape::Missing => NIL_NAME.to_string(),
    }
}

/// The fully qualified name of an entity.
///
/// Nested declarations are joined to their lexical outer declaration with
/// `$` (recursively; nesting depth is unbounded), then prefixed with the
/// enclosing package path joined with `.`. The root and placeholder
/// packages contribute no prefix.
pub fn qualified_name<H: Host>(host: &H, e: EntityRef) -> String {
    if e.is_none() || host.is_missing(e) {
        return NIL_NAME.to_string();
    }
    let e = normalize(host, e);

    let mut name = decorated_name(host, e);
    let mut owner = host.owner_of(e);

    // Join lexically enclosing declarations with `$` (outermost first),
    // then prefix the enclosing package path.
    while !owner.is_none()
        && !host.is_missing(owner)
        && !host.is_package(owner)
        && !host.is_package_class(owner)
    {
        let canonical = normalize(host, owner);
        name = format!("{}${}", host.entity_name(canonical), name);
        let next = host.owner_of(canonical);
        if next == canonical {
            break;
        }
        owner = next;
    }

    prefix_packages(host, owner, &mut name);
    name
}

/// The dotted path of a package entity (empty for the root and the
/// placeholder package).
pub fn package_path<H: Host>(host: &H, pkg: EntityRef) -> String {
    let mut segments = Vec::new();
    let mut current = pkg;
    while !current.is_none()
        && !host.is_missing(current)
        && current != host.root_package()
        && current != host.placeholder_package()
    {
        segments.push(host.entity_name(current));
        current = host.owner_of(current);
    }
    segments.reverse();
    segments.join(".")
}

/// The display signature of a type.
///
/// Arrow shapes render as `(P1, P2) => R`, recursively; zero-parameter
/// arrows as `() => R`. Named shapes render their short name plus a
/// bracketed type-argument list when arguments are present. Existentials
/// render as their underlying bound.
pub fn display_signature<H: Host>(host: &H, t: TypeRef) -> String {
    if t.is_none() {
        return NIL_NAME.to_string();
    }
    match host.type_shape(t) {
        TypeShape::Arrow { params, result } => {
            let rendered: Vec<String> = params
                .iter()
                .map(|&p| display_signature(host, p))
                .collect();
            format!(
                "({}) => {}",
                rendered.join(", "),
                display_signature(host, result)
            )
        }
        TypeShape::Named { args } => {
            let base = short_name(host, t);
            if args.is_empty() {
                base
            } else {
                let rendered: Vec<String> =
                    args.iter().map(|&a| display_signature(host, a)).collect();
                format!("{}[{}]", base, rendered.join(", "))
            }
        }
        TypeShape::Existential { underlying } => display_signature(host, underlying),
        TypeShape::Missing => NIL_NAME.to_string(),
    }
}

fn prefix_packages<H: Host>(host: &H, owner: EntityRef, name: &mut String) {
    let path = if owner.is_none() || host.is_missing(owner) {
        String::new()
    } else {
        package_path(host, owner)
    };
    if !path.is_empty() {
        *name = format!("{path}.{name}");
    }
}

#[cfg(test)]
#[path = "../tests/names_tests.rs"]
mod names_tests;
