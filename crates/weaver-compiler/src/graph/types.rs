//! Node kinds of the type graph.

use serde::{Deserialize, Serialize};

use weaver_core::Case;

use super::{NamespaceId, Span, TypeId};

/// A node of the type graph: one declaration or one structural type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeNode {
    #[serde(flatten)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Scalar(Scalar),
    Record(Record),
    Enum(Enumeration),
    Union(Union),
    Interface(Interface),
    Array { element: TypeId },
    Map { value: TypeId },
    Literal { value: LiteralValue },
    Intrinsic { name: Intrinsic },
}

/// Opaque scalar, possibly refining a base scalar (`scalar petId extends string`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scalar {
    pub name: String,
    pub namespace: NamespaceId,
    #[serde(default)]
    pub base: Option<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Absent for anonymous records (inline object literals).
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub namespace: Option<NamespaceId>,
    /// Names of template arguments for template instances (`Page<Pet>`).
    #[serde(default)]
    pub template_args: Vec<String>,
    /// Overrides the composed template instance name.
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Marks the record as an error shape for return type splitting.
    #[serde(default)]
    pub error: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeId,
    #[serde(default)]
    pub optional: bool,
    /// Name on the wire when it differs from `name`.
    #[serde(default)]
    pub wire_name: Option<String>,
    #[serde(default)]
    pub encoding: Option<Encoding>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub span: Option<Span>,
}

/// Wire encoding of a field (`@encode("unixTimestamp", int32)`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enumeration {
    pub name: String,
    pub namespace: NamespaceId,
    pub members: Vec<EnumMember>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    #[serde(default)]
    pub value: Option<LiteralValue>,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Union {
    /// Absent for anonymous unions (`string | Pet` inline).
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub namespace: Option<NamespaceId>,
    pub variants: Vec<UnionVariant>,
    /// Property carrying the variant name for internally tagged unions.
    #[serde(default)]
    pub discriminator: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnionVariant {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub namespace: NamespaceId,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Field>,
    pub return_type: TypeId,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intrinsic {
    Never,
    Void,
    Null,
    Unknown,
    ErrorType,
}

impl TypeNode {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            doc: None,
            span: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl TypeKind {
    /// Namespace the declaration belongs to, if it is a declaration with one.
    pub fn namespace(&self) -> Option<NamespaceId> {
        match self {
            TypeKind::Scalar(s) => Some(s.namespace),
            TypeKind::Record(r) => r.namespace,
            TypeKind::Enum(e) => Some(e.namespace),
            TypeKind::Union(u) => u.namespace,
            TypeKind::Interface(i) => Some(i.namespace),
            _ => None,
        }
    }

    /// Declared name, composed with template arguments for template instances.
    ///
    /// `None` for anonymous records and unions and for structural types. An
    /// empty record or union name counts as anonymous.
    pub fn declared_name(&self) -> Option<Case> {
        match self {
            TypeKind::Scalar(s) => Some(Case::parse(&s.name)),
            TypeKind::Record(r) => {
                if let Some(friendly) = r.friendly_name.as_deref().filter(|n| !n.is_empty()) {
                    return Some(Case::parse(friendly));
                }
                let name = r.name.as_deref().filter(|n| !n.is_empty())?;
                Some(Case::from_components(
                    std::iter::once(name).chain(r.template_args.iter().map(String::as_str)),
                ))
            }
            TypeKind::Enum(e) => Some(Case::parse(&e.name)),
            TypeKind::Union(u) => u.name.as_deref().filter(|n| !n.is_empty()).map(Case::parse),
            TypeKind::Interface(i) => Some(Case::parse(&i.name)),
            _ => None,
        }
    }

    /// Whether this kind produces its own declaration (as opposed to a structural spelling).
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            TypeKind::Scalar(_)
                | TypeKind::Record(_)
                | TypeKind::Enum(_)
                | TypeKind::Union(_)
                | TypeKind::Interface(_)
        )
    }

    /// Literal value types, including `null`, which have no type of their own.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            TypeKind::Literal { .. }
                | TypeKind::Intrinsic {
                    name: Intrinsic::Null
                }
        )
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            TypeKind::Scalar(_) => "scalar",
            TypeKind::Record(_) => "record",
            TypeKind::Enum(_) => "enum",
            TypeKind::Union(_) => "union",
            TypeKind::Interface(_) => "interface",
            TypeKind::Array { .. } => "array",
            TypeKind::Map { .. } => "map",
            TypeKind::Literal { .. } => "literal",
            TypeKind::Intrinsic { .. } => "intrinsic",
        }
    }
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            wire_name: None,
            encoding: None,
            doc: None,
            span: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn wire_name(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.name)
    }
}

impl LiteralValue {
    /// Rust literal syntax for this value.
    pub fn to_rust(&self) -> String {
        match self {
            LiteralValue::Bool(b) => b.to_string(),
            LiteralValue::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{n:.0}"),
            LiteralValue::Number(n) => format!("{n:?}"),
            LiteralValue::String(s) => format!("{s:?}"),
        }
    }

    /// Value as it appears on the wire and in `Display` output.
    pub fn to_wire(&self) -> String {
        match self {
            LiteralValue::String(s) => s.clone(),
            LiteralValue::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{n:.0}"),
            other => other.to_rust(),
        }
    }
}
