//! Type inspection: grouping a type's visible members by defining
//! ancestor.
//!
//! The host's member-resolution machinery hands over a flat list of
//! visible members, each tagged with the ancestor type that defines it
//! and, optionally, the extension mechanism (e.g. an implicit view) that
//! contributed it. This module buckets that list into presentation-ready
//! `InterfaceInfo` groups.

use std::cmp::Reverse;

use rustc_hash::FxHashMap;
use symlens_host::{EntityRef, Host, TypeRef};

use crate::classify::{DeclKind, classify, normalize};
use crate::model::{InterfaceInfo, TypeInspectInfo};
use crate::names::qualified_name;
use crate::snapshot::SnapshotBuilder;

/// One pre-resolved visible member, as produced by the host's member
/// resolution for the inspected type.
#[derive(Debug, Clone)]
pub struct ResolvedMember {
    /// The member entity.
    pub entity: EntityRef,
    /// The ancestor type that defines the member.
    pub owner_type: TypeRef,
    /// Whether the member is visible at the inspection site.
    pub visible: bool,
    /// The extension mechanism that contributed the member, if any.
    pub via_view: Option<EntityRef>,
}

impl<H: Host> SnapshotBuilder<'_, H> {
    /// Inspect a type: its snapshot, its companion's type ID, and its
    /// visible members grouped by defining ancestor.
    pub fn type_inspect_info(
        &self,
        subject: EntityRef,
        members: Vec<ResolvedMember>,
    ) -> TypeInspectInfo {
        if subject.is_none() || self.host().is_missing(subject) {
            return TypeInspectInfo::nil();
        }
        let subject = normalize(self.host(), subject);
        TypeInspectInfo {
            tpe: self.type_info(self.host().entity_type(subject)),
            companion_id: self.companion_type_id(subject),
            interfaces: self.grouped_interfaces(members),
        }
    }

    /// Group visible members by their defining ancestor type.
    ///
    /// Groups are ordered most-specific-first: each owner is keyed by
    /// how many of the other present owners it is a subtype of, and
    /// higher counts sort earlier. Subtyping is transitive, so a
    /// subtype always counts strictly more present supertypes than any
    /// of its supertypes and lands strictly before all of them; owners
    /// with equal counts fall back to qualified name, so the output is
    /// deterministic. Within a group, members sort by name and are then
    /// partitioned into the fixed bucket order [nested types, fields,
    /// constructors, methods].
    pub fn grouped_interfaces(&self, members: Vec<ResolvedMember>) -> Vec<InterfaceInfo> {
        let host = self.host();

        let mut groups: FxHashMap<TypeRef, Vec<ResolvedMember>> = FxHashMap::default();
        for member in members {
            if !member.visible || member.owner_type.is_none() {
                continue;
            }
            groups.entry(member.owner_type).or_default().push(member);
        }

        let mut owners: Vec<(Reverse<usize>, String, TypeRef)> = groups
            .keys()
            .map(|&owner| {
                let supers_present = groups
                    .keys()
                    .filter(|&&other| other != owner && host.is_subtype(owner, other))
                    .count();
                let name = qualified_name(host, host.type_entity(owner));
                (Reverse(supers_present), name, owner)
            })
            .collect();
        owners.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        owners
            .into_iter()
            .map(|(_, _, owner)| {
                let mut group = groups.remove(&owner).unwrap_or_default();
                let via_view = shared_view(host, &group);
                group.sort_by(|a, b| {
                    let rank_a = bucket_rank(host, a.entity);
                    let rank_b = bucket_rank(host, b.entity);
                    rank_a
                        .cmp(&rank_b)
                        .then_with(|| host.entity_name(a.entity).cmp(&host.entity_name(b.entity)))
                });
                let member_infos = group
                    .iter()
                    .map(|m| self.member_info(m.entity))
                    .collect();
                InterfaceInfo {
                    tpe: self.type_info_with_members(owner, member_infos),
                    via_view,
                }
            })
            .collect()
    }
}

/// The name of the view every member of the group came through, when
/// they all share the same non-absent one.
fn shared_view<H: Host>(host: &H, group: &[ResolvedMember]) -> Option<String> {
    let first = group.first()?.via_view?;
    for member in &group[1..] {
        if member.via_view != Some(first) {
            return None;
        }
    }
    Some(host.entity_name(first))
}

/// Fixed presentation bucket of a member: nested types, then fields,
/// then constructors, then ordinary methods.
fn bucket_rank<H: Host>(host: &H, e: EntityRef) -> u8 {
    if host.is_constructor(e) {
        return 2;
    }
    match classify(host, e) {
        DeclKind::Class | DeclKind::Trait | DeclKind::Module => 0,
        DeclKind::Field => 1,
        DeclKind::Method => 3,
        DeclKind::Nothing => 3,
    }
}

#[cfg(test)]
#[path = "../tests/inspect_tests.rs"]
mod inspect_tests;
