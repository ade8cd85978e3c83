use weaver_core::PathError;

use crate::graph::{NamespaceId, TypeId};

/// Fatal compilation errors.
///
/// These indicate an inconsistent graph or an internal contract violation and
/// abort the run. Problems in the user's schema that still allow emission are
/// reported through [`crate::Diagnostics`] instead.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the first namespace must be the global namespace (no parent)")]
    MissingGlobalNamespace,

    #[error("{0} does not exist")]
    UnknownType(TypeId),

    #[error("{0} does not exist")]
    UnknownNamespace(NamespaceId),

    #[error("{0} is used as an operation container but is not an interface")]
    NotAnInterface(TypeId),

    #[error("namespace `{0}` is not reachable from the global namespace")]
    DetachedNamespace(String),

    #[error("declaration {0} has neither a name nor an alternative name")]
    AnonymousWithoutName(TypeId),

    #[error("declaration `{name}` ({id}) has no namespace")]
    MissingNamespace { id: TypeId, name: String },

    #[error("literal type {0} used where a type is expected")]
    LiteralType(TypeId),

    #[error("{id} is a {kind}, which cannot be declared on its own")]
    NotADeclaration { id: TypeId, kind: &'static str },
}

pub type Result<T> = std::result::Result<T, CompileError>;
