//! Namespace modules and namespace traversal.

use crate::error::{CompileError, Result};
use crate::graph::{Container, NamespaceId, TypeId, TypeKind};
use crate::module::{ModuleId, Visibility};
use crate::names;

use super::session::{DeclarationRef, Session};

/// Trait name for operations declared directly in the global namespace.
pub(crate) const GLOBAL_OPERATIONS_TRAIT: &str = "GlobalOperations";

impl Session<'_> {
    /// Module a namespace renders into, created (with its ancestors) on first use.
    pub(crate) fn module_for_namespace(&mut self, namespace: NamespaceId) -> Result<ModuleId> {
        if let Some(&module) = self.namespace_modules.get(&namespace) {
            return Ok(module);
        }

        // Rejects parent cycles before recursing.
        self.graph.namespace_path(namespace)?;

        let ns = self.graph.namespace(namespace);
        let parent = ns
            .parent
            .ok_or_else(|| CompileError::DetachedNamespace(ns.name.clone()))?;
        let parent_module = self.module_for_namespace(parent)?;

        let module = self.modules.add_child(
            parent_module,
            names::value_name(&ns.name),
            Visibility::Public,
            false,
        );
        let entry = self.modules.module_mut(module);
        entry.namespace = Some(namespace);
        entry.doc = ns.doc.clone();

        tracing::trace!(
            namespace = %self.graph.qualified_namespace(namespace)?,
            "namespace module created"
        );
        self.namespace_modules.insert(namespace, module);
        Ok(module)
    }

    /// Module that declares the operations of `container`.
    pub(crate) fn container_module(&mut self, container: Container) -> Result<ModuleId> {
        match container {
            Container::Namespace { id } => self.module_for_namespace(id),
            Container::Interface { id } => {
                let namespace = self.owning_namespace(id)?;
                self.module_for_namespace(namespace)
            }
        }
    }

    /// Trait that holds the operations declared directly in `namespace`.
    pub(crate) fn operations_trait_name(&self, namespace: NamespaceId) -> String {
        let name = names::type_name(&self.graph.namespace(namespace).name);
        if name.is_empty() {
            GLOBAL_OPERATIONS_TRAIT.to_string()
        } else {
            name
        }
    }

    pub(crate) fn owning_namespace(&self, id: TypeId) -> Result<NamespaceId> {
        let kind = self.graph.kind(id);
        kind.namespace().ok_or_else(|| CompileError::MissingNamespace {
            id,
            name: kind
                .declared_name()
                .map(|name| name.pascal_case())
                .unwrap_or_default(),
        })
    }

    /// Enqueue every declaration of `namespace` and its descendants.
    pub(super) fn visit_namespace(&mut self, namespace: NamespaceId) {
        let graph = self.graph;
        let ns = graph.namespace(namespace);

        for &id in ns.declarations() {
            // Standard scalars are spelled inline and never declared.
            if matches!(graph.kind(id), TypeKind::Scalar(_)) && self.scalars.get(id).is_some() {
                continue;
            }
            self.declarations.add(DeclarationRef::Type(id));
        }
        if !ns.operations.is_empty() {
            self.declarations.add(DeclarationRef::Operations(namespace));
        }

        for &child in ns.children() {
            self.visit_namespace(child);
        }
    }

    /// Enqueue only the operation containers below `namespace`; everything
    /// else is discovered through references.
    pub(super) fn visit_operations(&mut self, namespace: NamespaceId) {
        let graph = self.graph;
        let ns = graph.namespace(namespace);

        for &id in ns.declarations() {
            if matches!(graph.kind(id), TypeKind::Interface(_)) {
                self.declarations.add(DeclarationRef::Type(id));
            }
        }
        if !ns.operations.is_empty() {
            self.declarations.add(DeclarationRef::Operations(namespace));
        }

        for &child in ns.children() {
            self.visit_operations(child);
        }
    }
}
