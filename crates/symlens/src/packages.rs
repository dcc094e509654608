//! Package tree reconstruction.
//!
//! The host stores package membership as flat member tables; these
//! builders re-derive a navigable `PackageInfo` tree on demand, filtering
//! out synthetic and host-internal entries. Nothing is cached: every call
//! reflects the host's member tables as of the call.

use symlens_host::{EntityRef, Host};
use tracing::debug;

use crate::classify::{DeclKind, classify, normalize};
use crate::model::{EntityInfo, PackageInfo};
use crate::names::package_path;
use crate::snapshot::SnapshotBuilder;

impl<H: Host> SnapshotBuilder<'_, H> {
    /// Resolve a dotted package path to a package snapshot.
    ///
    /// Each segment is resolved against the current package's direct
    /// members; resolution stops at the first segment with no match and
    /// falls back to the last package that did resolve. A path whose
    /// first segment already fails yields the sentinel package.
    pub fn package_info_from_path(&self, path: &str) -> PackageInfo {
        let host = self.host();
        let mut current = host.root_package();
        let mut resolved = EntityRef::NONE;

        for segment in path.split('.') {
            let next = self.package_member_named(current, segment);
            if next.is_none() {
                break;
            }
            resolved = next;
            current = next;
        }

        if resolved.is_none() {
            debug!(path, "package path did not resolve");
            return PackageInfo::nil();
        }
        self.package_info(resolved)
    }

    /// Build the package snapshot for an entity.
    ///
    /// The entity is normalized first; non-package entities yield the
    /// sentinel. At the root, the true root's members are merged with the
    /// placeholder package's, since some top-level declarations are
    /// hosted under the host-internal placeholder.
    pub fn package_info(&self, e: EntityRef) -> PackageInfo {
        let host = self.host();
        let e = normalize(host, e);
        if !host.is_package(e) && !host.is_package_class(e) {
            return PackageInfo::nil();
        }

        let is_root = e == host.root_package();
        let mut raw = host.members_of(e);
        if is_root {
            raw.extend(host.members_of(host.placeholder_package()));
        }

        let mut members: Vec<EntityInfo> = Vec::new();
        for m in raw {
            if !self.listed_in(e, m, is_root) {
                continue;
            }
            if host.is_package(m) {
                members.push(EntityInfo::Package(self.package_info(m)));
            } else {
                match classify(host, m) {
                    DeclKind::Class | DeclKind::Trait | DeclKind::Module => {
                        members.push(EntityInfo::Type(self.type_info(host.entity_type(m))));
                    }
                    _ => {}
                }
            }
        }
        members.sort_by(|a, b| a.name().cmp(b.name()));

        let name = if is_root {
            String::new()
        } else {
            host.entity_name(e)
        };
        PackageInfo {
            name,
            full_name: package_path(host, e),
            members,
        }
    }

    /// Whether a member belongs in a package listing.
    ///
    /// Filters host-internal entries (synthetic flags, `$`-marked
    /// names), type-level members with no usable type, and members not
    /// directly owned by the listed package (inherited listings).
    fn listed_in(&self, pkg: EntityRef, m: EntityRef, is_root: bool) -> bool {
        let host = self.host();
        if m.is_none() || host.is_missing(m) || host.is_synthetic(m) {
            return false;
        }
        if host.entity_name(m).contains('$') {
            return false;
        }
        let owner = host.owner_of(m);
        let directly_owned =
            owner == pkg || (is_root && owner == host.placeholder_package());
        if !directly_owned {
            return false;
        }
        if !host.is_package(m) && host.entity_type(m).is_none() {
            return false;
        }
        true
    }

    /// A direct member package by name, looking through the placeholder
    /// merge at the root.
    fn package_member_named(&self, pkg: EntityRef, name: &str) -> EntityRef {
        let host = self.host();
        let found = host.member_named(pkg, name);
        if !found.is_none() && host.is_package(found) {
            return found;
        }
        if pkg == host.root_package() {
            let found = host.member_named(host.placeholder_package(), name);
            if !found.is_none() && host.is_package(found) {
                return found;
            }
        }
        EntityRef::NONE
    }
}

#[cfg(test)]
#[path = "../tests/packages_tests.rs"]
mod packages_tests;
