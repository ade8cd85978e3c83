//! The type graph consumed by the compiler.
//!
//! Namespaces and types live in two arenas addressed by [`NamespaceId`] and
//! [`TypeId`]. Cycles between types are ordinary (a record field may refer back
//! to its own record), so all edges are handles, never references.
//!
//! Graphs are either built programmatically (`add_namespace`/`add_type`) or
//! read from JSON with [`Schema::from_json`], which validates every handle
//! before the compiler sees the graph.

mod service;
mod types;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use service::{
    ApiKeyLocation, AuthKind, AuthScheme, Container, HttpOperation, HttpParameter, HttpResponse,
    HttpService, OperationRef, ParameterLocation, Service, StatusCode, Verb,
};
pub use types::{
    EnumMember, Encoding, Enumeration, Field, Interface, Intrinsic, LiteralValue, Operation,
    Record, Scalar, TypeKind, TypeNode, Union, UnionVariant,
};

use crate::error::{CompileError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl NamespaceId {
    /// The unnamed root namespace every other namespace descends from.
    pub const GLOBAL: NamespaceId = NamespaceId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "namespace#{}", self.0)
    }
}

/// Byte range into the schema source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub parent: Option<NamespaceId>,
    #[serde(default)]
    pub doc: Option<String>,
    /// Operations declared directly in the namespace (outside any interface).
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(skip)]
    children: Vec<NamespaceId>,
    #[serde(skip)]
    declarations: Vec<TypeId>,
}

impl Namespace {
    pub fn new(name: impl Into<String>, parent: Option<NamespaceId>) -> Self {
        Self {
            name: name.into(),
            parent,
            doc: None,
            operations: Vec::new(),
            children: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn children(&self) -> &[NamespaceId] {
        &self.children
    }

    /// Named declarations owned by this namespace, in graph order.
    pub fn declarations(&self) -> &[TypeId] {
        &self.declarations
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeGraph {
    namespaces: Vec<Namespace>,
    #[serde(default)]
    types: Vec<TypeNode>,
}

impl Default for TypeGraph {
    fn default() -> Self {
        Self {
            namespaces: vec![Namespace::new("", None)],
            types: Vec::new(),
        }
    }
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_namespace(&mut self, name: impl Into<String>, parent: NamespaceId) -> NamespaceId {
        let id = NamespaceId(self.namespaces.len() as u32);
        self.namespaces.push(Namespace::new(name, Some(parent)));
        self.namespaces[parent.index()].children.push(id);
        id
    }

    pub fn add_type(&mut self, node: TypeNode) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        if let Some(namespace) = declaration_namespace(&node.kind) {
            self.namespaces[namespace.index()].declarations.push(id);
        }
        self.types.push(node);
        id
    }

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.index()]
    }

    pub fn namespace_mut(&mut self, id: NamespaceId) -> &mut Namespace {
        &mut self.namespaces[id.index()]
    }

    pub fn ty(&self, id: TypeId) -> &TypeNode {
        &self.types[id.index()]
    }

    /// Mutable access to a node. Call [`TypeGraph::link`] again after changing
    /// a declaration's name or namespace.
    pub fn ty_mut(&mut self, id: TypeId) -> &mut TypeNode {
        &mut self.types[id.index()]
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.types.get(id.index())
    }

    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.ty(id).kind
    }

    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeNode)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, node)| (TypeId(i as u32), node))
    }

    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Names from the global namespace (exclusive) down to `id` (inclusive).
    pub fn namespace_path(&self, id: NamespaceId) -> Result<Vec<&str>> {
        let mut names = Vec::new();
        let mut current = id;
        // A chain longer than the arena must contain a cycle.
        for _ in 0..self.namespaces.len() {
            if current == NamespaceId::GLOBAL {
                names.reverse();
                return Ok(names);
            }
            let namespace = self.namespace(current);
            names.push(namespace.name.as_str());
            match namespace.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Err(CompileError::DetachedNamespace(self.namespace(id).name.clone()))
    }

    /// Dotted name of a namespace (`Pets.Store`); empty for the global namespace.
    pub fn qualified_namespace(&self, id: NamespaceId) -> Result<String> {
        Ok(self.namespace_path(id)?.join("."))
    }

    /// Dotted name of a declaration as written in the schema (`TypeSpec.int32`).
    pub fn qualified_name(&self, id: TypeId) -> Option<String> {
        let kind = self.kind(id);
        let name = match kind {
            TypeKind::Scalar(s) => s.name.as_str(),
            TypeKind::Record(r) => r.name.as_deref()?,
            TypeKind::Enum(e) => e.name.as_str(),
            TypeKind::Union(u) => u.name.as_deref()?,
            TypeKind::Interface(i) => i.name.as_str(),
            _ => return None,
        };
        let mut path = self.namespace_path(kind.namespace()?).ok()?;
        path.push(name);
        Some(path.join("."))
    }

    pub fn record(&self, id: TypeId) -> Option<&Record> {
        match self.kind(id) {
            TypeKind::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_error_record(&self, id: TypeId) -> bool {
        self.record(id).is_some_and(|r| r.error)
    }

    /// Operations of an interface or a namespace.
    pub fn operations(&self, container: Container) -> &[Operation] {
        match container {
            Container::Namespace { id } => &self.namespace(id).operations,
            Container::Interface { id } => match self.kind(id) {
                TypeKind::Interface(interface) => &interface.operations,
                _ => &[],
            },
        }
    }

    pub fn operation(&self, reference: &OperationRef) -> Option<&Operation> {
        self.operations(reference.container)
            .iter()
            .find(|op| op.name == reference.name)
    }

    /// Validate every handle and rebuild the namespace indexes.
    pub fn link(&mut self) -> Result<()> {
        match self.namespaces.first() {
            Some(global) if global.parent.is_none() => {}
            _ => return Err(CompileError::MissingGlobalNamespace),
        }

        for namespace in &mut self.namespaces {
            namespace.children.clear();
            namespace.declarations.clear();
        }

        for i in 1..self.namespaces.len() {
            let id = NamespaceId(i as u32);
            let parent = self.namespaces[i]
                .parent
                .ok_or_else(|| CompileError::DetachedNamespace(self.namespaces[i].name.clone()))?;
            self.check_namespace(parent)?;
            self.namespaces[parent.index()].children.push(id);
        }

        for namespace in &self.namespaces {
            for operation in &namespace.operations {
                self.check_operation(operation)?;
            }
        }

        for i in 0..self.types.len() {
            self.check_node(&self.types[i].kind)?;
            if let Some(namespace) = declaration_namespace(&self.types[i].kind) {
                self.namespaces[namespace.index()]
                    .declarations
                    .push(TypeId(i as u32));
            }
        }

        Ok(())
    }

    pub(crate) fn check_type(&self, id: TypeId) -> Result<()> {
        if id.index() < self.types.len() {
            Ok(())
        } else {
            Err(CompileError::UnknownType(id))
        }
    }

    pub(crate) fn check_namespace(&self, id: NamespaceId) -> Result<()> {
        if id.index() < self.namespaces.len() {
            Ok(())
        } else {
            Err(CompileError::UnknownNamespace(id))
        }
    }

    fn check_field(&self, field: &Field) -> Result<()> {
        self.check_type(field.ty)?;
        if let Some(encoding) = &field.encoding {
            self.check_type(encoding.ty)?;
        }
        Ok(())
    }

    fn check_operation(&self, operation: &Operation) -> Result<()> {
        self.check_type(operation.return_type)?;
        operation
            .parameters
            .iter()
            .try_for_each(|p| self.check_field(p))
    }

    fn check_node(&self, kind: &TypeKind) -> Result<()> {
        if let Some(namespace) = kind.namespace() {
            self.check_namespace(namespace)?;
        }
        match kind {
            TypeKind::Scalar(scalar) => match scalar.base {
                Some(base) => self.check_type(base),
                None => Ok(()),
            },
            TypeKind::Record(record) => record.fields.iter().try_for_each(|f| self.check_field(f)),
            TypeKind::Union(union) => union
                .variants
                .iter()
                .try_for_each(|v| self.check_type(v.ty)),
            TypeKind::Interface(interface) => interface
                .operations
                .iter()
                .try_for_each(|op| self.check_operation(op)),
            TypeKind::Array { element } => self.check_type(*element),
            TypeKind::Map { value } => self.check_type(*value),
            TypeKind::Enum(_) | TypeKind::Literal { .. } | TypeKind::Intrinsic { .. } => Ok(()),
        }
    }
}

/// Namespace that lists `kind` among its declarations, if any.
fn declaration_namespace(kind: &TypeKind) -> Option<NamespaceId> {
    if kind.is_declaration() && kind.declared_name().is_some() {
        kind.namespace()
    } else {
        None
    }
}

/// A type graph plus the service to compile from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(flatten)]
    pub graph: TypeGraph,
    pub service: Service,
}

impl Schema {
    pub fn new(mut graph: TypeGraph, service: Service) -> Result<Self> {
        graph.link()?;
        let schema = Self { graph, service };
        schema.check_service()?;
        Ok(schema)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let Schema { graph, service } = serde_json::from_str(text)?;
        Self::new(graph, service)
    }

    fn check_service(&self) -> Result<()> {
        self.graph.check_namespace(self.service.namespace)?;
        let Some(http) = &self.service.http else {
            return Ok(());
        };
        for endpoint in &http.operations {
            match endpoint.operation.container {
                Container::Namespace { id } => self.graph.check_namespace(id)?,
                Container::Interface { id } => {
                    self.graph.check_type(id)?;
                    if !matches!(self.graph.kind(id), TypeKind::Interface(_)) {
                        return Err(CompileError::NotAnInterface(id));
                    }
                }
            }
            for parameter in &endpoint.parameters {
                self.graph.check_type(parameter.ty)?;
            }
            for response in &endpoint.responses {
                if let Some(body) = response.body {
                    self.graph.check_type(body)?;
                }
            }
        }
        Ok(())
    }
}
