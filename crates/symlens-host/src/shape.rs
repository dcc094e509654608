//! The closed set of type shapes the snapshot layer understands.

use crate::handle::TypeRef;

/// Structural shape of a type descriptor.
///
/// The set is deliberately closed: the snapshot layer only needs the
/// shapes that matter for developer-tooling presentation, and exhaustive
/// matching over this enum catches any future addition at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// A named type with its (possibly empty) type-argument list.
    Named {
        /// Type arguments, in declaration order.
        args: Vec<TypeRef>,
    },
    /// A callable or polymorphic shape: a parameter list and a result.
    /// Covers both plain method signatures and polymorphic quantifiers.
    Arrow {
        /// Parameter types, in declaration order.
        params: Vec<TypeRef>,
        /// The result type.
        result: TypeRef,
    },
    /// An existential shape; presented as its underlying bound.
    Existential {
        /// The underlying type the quantification is collapsed to.
        underlying: TypeRef,
    },
    /// No usable shape (error types, absent descriptors).
    Missing,
}
