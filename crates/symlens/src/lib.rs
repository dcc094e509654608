//! Snapshot/projection layer over a host compiler's symbol graph.
//!
//! A host compiler exposes a live, mutable, identity-based graph of named
//! entities and type descriptors. Consumers outside the compiler (an
//! editor, a protocol server, a cache) need stable, acyclic, serializable
//! snapshots of that information, addressable by small integer handles.
//! This crate is the projection layer in between:
//!
//! - [`cache::TypeIdCache`] — stable integer IDs for type descriptors
//! - [`classify`] — canonicalization and declaration-kind classification
//! - [`names`] — short, qualified, and signature display names
//! - [`model`] — the serializable snapshot DTOs
//! - [`snapshot::SnapshotBuilder`] — the factories populating them
//! - [`inspect`] — member grouping for the "inspect type" use case
//! - [`packages`] — package tree reconstruction
//!
//! The host itself is consumed through the narrow `symlens_host::Host`
//! trait; parsing, name resolution, and type checking stay on the host's
//! side of that boundary.

pub mod cache;
pub mod classify;
pub mod inspect;
pub mod model;
pub mod names;
pub mod packages;
pub mod snapshot;

pub use cache::{NIL_TYPE_ID, TypeIdCache};
pub use classify::{DeclKind, classify, normalize};
pub use inspect::ResolvedMember;
pub use model::{
    ArrowTypeInfo, CallCompletionInfo, EntityInfo, InterfaceInfo, NamedTypeInfo,
    NamedTypeMemberInfo, NamedTypeMemberInfoLight, PackageInfo, SymbolInfo, SymbolInfoLight,
    TypeInfo, TypeInspectInfo,
};
pub use names::{NIL_NAME, display_signature, qualified_name, short_name};
pub use snapshot::SnapshotBuilder;
