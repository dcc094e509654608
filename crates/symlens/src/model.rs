//! The snapshot model: serializable DTOs describing entities and types.
//!
//! Everything here is plain data, copied out of the host at construction
//! time. No DTO holds a reference back into the host's live symbol table,
//! so snapshots stay valid (if stale) across recompilations. Wire field
//! names are `camelCase`; the protocol layer serializes these directly.
//!
//! Every DTO kind has a `nil()` sentinel (name `"NA"`, ID `-1`, empty
//! members, kind `nothing`) used for error paths and absent companions.
//! The protocol layer treats sentinels as "information unavailable".

use symlens_host::SourcePos;

use crate::cache::NIL_TYPE_ID;
use crate::classify::DeclKind;
use crate::names::NIL_NAME;

/// A node in a package's member list: either a child package or a
/// top-level type.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "entity", rename_all = "camelCase")]
pub enum EntityInfo {
    /// A nested package.
    Package(PackageInfo),
    /// A type declared in the package.
    Type(TypeInfo),
}

impl EntityInfo {
    /// The display name of this node.
    pub fn name(&self) -> &str {
        match self {
            Self::Package(p) => &p.name,
            Self::Type(t) => t.name(),
        }
    }
}

/// One package, with its direct child packages and top-level types.
///
/// Built fresh per query from the host's current member tables; never
/// cached across calls.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    /// The bare package name.
    pub name: String,
    /// The dotted path from the root.
    pub full_name: String,
    /// Child packages and top-level types, sorted by name.
    pub members: Vec<EntityInfo>,
}

impl PackageInfo {
    /// The sentinel package.
    pub fn nil() -> Self {
        Self {
            name: NIL_NAME.to_string(),
            full_name: NIL_NAME.to_string(),
            members: Vec::new(),
        }
    }
}

/// A type snapshot: either a named type or an arrow (callable) type.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum TypeInfo {
    /// A named type with arguments and (for inspection) members.
    Named(NamedTypeInfo),
    /// A callable/polymorphic shape.
    Arrow(ArrowTypeInfo),
}

impl TypeInfo {
    /// The sentinel type snapshot.
    pub fn nil() -> Self {
        Self::Named(NamedTypeInfo::nil())
    }

    /// The display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Named(t) => &t.name,
            Self::Arrow(t) => &t.name,
        }
    }

    /// The stable cache ID.
    pub fn type_id(&self) -> i32 {
        match self {
            Self::Named(t) => t.type_id,
            Self::Arrow(t) => t.type_id,
        }
    }

    /// The declaration kind; always [`DeclKind::Nothing`] for arrows.
    pub fn decl_kind(&self) -> DeclKind {
        match self {
            Self::Named(t) => t.decl_kind,
            Self::Arrow(_) => DeclKind::Nothing,
        }
    }

    /// The fully qualified display name.
    pub fn full_name(&self) -> &str {
        match self {
            Self::Named(t) => &t.full_name,
            Self::Arrow(t) => &t.name,
        }
    }

    /// Whether this is the sentinel snapshot.
    pub fn is_nil(&self) -> bool {
        self.type_id() == NIL_TYPE_ID
    }
}

/// A named type with its arguments and, when produced for inspection,
/// its grouped members.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedTypeInfo {
    /// Short display name (modules carry a trailing `$`).
    pub name: String,
    /// Stable ID from the type identity cache.
    pub type_id: i32,
    /// Kind of the declaring entity.
    pub decl_kind: DeclKind,
    /// Fully qualified name.
    pub full_name: String,
    /// Type arguments, in declaration order.
    pub type_args: Vec<TypeInfo>,
    /// Members, when this snapshot was built for type inspection;
    /// empty otherwise.
    pub members: Vec<NamedTypeMemberInfo>,
    /// Declaration position of the declaring entity.
    pub pos: SourcePos,
    /// ID of the lexically enclosing type, when nested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_type_id: Option<i32>,
}

impl NamedTypeInfo {
    /// The sentinel named type.
    pub fn nil() -> Self {
        Self {
            name: NIL_NAME.to_string(),
            type_id: NIL_TYPE_ID,
            decl_kind: DeclKind::Nothing,
            full_name: NIL_NAME.to_string(),
            type_args: Vec::new(),
            members: Vec::new(),
            pos: SourcePos::NONE,
            outer_type_id: None,
        }
    }
}

/// A callable/polymorphic type shape.
///
/// Arrows have no declaration kind, no type arguments, and no source
/// position of their own; their display name is the rendered signature.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowTypeInfo {
    /// The rendered signature, e.g. `(A, B) => C`.
    pub name: String,
    /// Stable ID from the type identity cache.
    pub type_id: i32,
    /// The result type.
    pub result_type: Box<TypeInfo>,
    /// Parameter types, in declaration order.
    pub param_types: Vec<TypeInfo>,
}

impl ArrowTypeInfo {
    /// The sentinel arrow type.
    pub fn nil() -> Self {
        Self {
            name: NIL_NAME.to_string(),
            type_id: NIL_TYPE_ID,
            result_type: Box::new(TypeInfo::nil()),
            param_types: Vec::new(),
        }
    }
}

/// A full snapshot of one named entity, for detailed display.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    /// The entity's name.
    pub name: String,
    /// Declaration position.
    pub decl_pos: SourcePos,
    /// The entity's type.
    pub tpe: TypeInfo,
    /// Whether the entity can be called.
    pub is_callable: bool,
}

impl SymbolInfo {
    /// The sentinel symbol.
    pub fn nil() -> Self {
        Self {
            name: NIL_NAME.to_string(),
            decl_pos: SourcePos::NONE,
            tpe: TypeInfo::nil(),
            is_callable: false,
        }
    }
}

/// A cheap symbol summary for completion-style listings, carrying a
/// rendered signature and a type ID instead of a full type tree.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfoLight {
    /// The entity's name.
    pub name: String,
    /// Rendered display signature of the entity's type.
    pub type_sig: String,
    /// Stable ID of the entity's type.
    pub type_id: i32,
    /// Whether the entity can be called.
    pub is_callable: bool,
}

impl SymbolInfoLight {
    /// The sentinel light symbol.
    pub fn nil() -> Self {
        Self {
            name: NIL_NAME.to_string(),
            type_sig: NIL_NAME.to_string(),
            type_id: NIL_TYPE_ID,
            is_callable: false,
        }
    }
}

/// One member of a named type (field, method, or nested type). Leaf
/// node: members of members are never populated.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedTypeMemberInfo {
    /// The member's name.
    pub name: String,
    /// The member's type.
    pub tpe: TypeInfo,
    /// Declaration position.
    pub pos: SourcePos,
    /// Declared kind of the member.
    pub decl_kind: DeclKind,
}

impl NamedTypeMemberInfo {
    /// The sentinel member.
    pub fn nil() -> Self {
        Self {
            name: NIL_NAME.to_string(),
            tpe: TypeInfo::nil(),
            pos: SourcePos::NONE,
            decl_kind: DeclKind::Nothing,
        }
    }
}

/// Light variant of [`NamedTypeMemberInfo`] for listings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedTypeMemberInfoLight {
    /// The member's name.
    pub name: String,
    /// Rendered display signature of the member's type.
    pub type_sig: String,
    /// Stable ID of the member's type.
    pub type_id: i32,
    /// Whether the member can be called.
    pub is_callable: bool,
}

impl NamedTypeMemberInfoLight {
    /// The sentinel light member.
    pub fn nil() -> Self {
        Self {
            name: NIL_NAME.to_string(),
            type_sig: NIL_NAME.to_string(),
            type_id: NIL_TYPE_ID,
            is_callable: false,
        }
    }
}

/// One group of inspected members: the ancestor type that defines them
/// (carrying the grouped member list), plus the extension mechanism that
/// contributed the whole group, if a single one did.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceInfo {
    /// The defining ancestor type; its `members` hold the group.
    pub tpe: TypeInfo,
    /// Name of the extension mechanism every member of the group came
    /// through, when they all share one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via_view: Option<String>,
}

/// The result of inspecting a type: the subject, its companion's type
/// ID, and its members grouped by defining ancestor.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInspectInfo {
    /// The inspected type.
    pub tpe: TypeInfo,
    /// ID of the companion's type, when a type-distinct companion exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companion_id: Option<i32>,
    /// Member groups, most-specific defining ancestor first.
    pub interfaces: Vec<InterfaceInfo>,
}

impl TypeInspectInfo {
    /// The sentinel inspection result.
    pub fn nil() -> Self {
        Self {
            tpe: TypeInfo::nil(),
            companion_id: None,
            interfaces: Vec::new(),
        }
    }
}

/// Signature summary for completing a call to an arrow-typed entity.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallCompletionInfo {
    /// The call's result type.
    pub result_type: TypeInfo,
    /// Parameter types, in declaration order.
    pub param_types: Vec<TypeInfo>,
    /// Parameter names, parallel to `param_types`.
    pub param_names: Vec<String>,
}

impl CallCompletionInfo {
    /// The sentinel call summary.
    pub fn nil() -> Self {
        Self {
            result_type: TypeInfo::nil(),
            param_types: Vec::new(),
            param_names: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/model_tests.rs"]
mod model_tests;
