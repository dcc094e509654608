//! Opaque handles into the host compiler's symbol and type tables.
//!
//! Handles are small `Copy` indices in the style of an arena index. The
//! host is expected to intern type descriptors, so two `TypeRef`s compare
//! equal exactly when the host considers the underlying types equal. That
//! contract is what lets the snapshot layer use plain hash maps for
//! identity caching instead of calling back into the host per comparison.

/// A handle to a named declaration (class, trait, module, method, field,
/// package) in the host's symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EntityRef(pub u32);

impl EntityRef {
    /// The "no entity" sentinel.
    pub const NONE: Self = Self(u32::MAX);

    /// Whether this is the "no entity" sentinel.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// The arena index of this handle.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A handle to an interned type descriptor.
///
/// Handle equality is the host's type equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TypeRef(pub u32);

impl TypeRef {
    /// The "no type" sentinel.
    pub const NONE: Self = Self(u32::MAX);

    /// Whether this is the "no type" sentinel.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// The arena index of this handle.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An opaque source position handle.
///
/// The snapshot layer never interprets positions; it only copies them into
/// DTOs for the protocol layer to resolve against the host's file tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SourcePos(pub u64);

impl SourcePos {
    /// The "no position" sentinel (e.g. for synthesized entities and
    /// arrow types, which carry no position of their own).
    pub const NONE: Self = Self(u64::MAX);

    /// Whether this is the "no position" sentinel.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}
