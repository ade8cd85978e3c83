//! Declaration graph driver.
//!
//! Emission is a fixpoint: rendering a declaration resolves the types it
//! mentions, which enqueues further declarations and synthetic requests.
//! [`Session::drain`] alternates between the two queues until both are empty.

use crate::error::{CompileError, Result};
use crate::graph::{Container, TypeId, TypeKind};
use crate::module::ModuleId;
use crate::names;

use super::session::{DeclarationRef, Session, Synthetic};

impl Session<'_> {
    /// Emit every declaration of the service (and the HTTP surface, if enabled).
    pub fn run(&mut self) -> Result<()> {
        let span = tracing::debug_span!("emit", service = %self.service.namespace);
        let _enter = span.enter();

        let service_namespace = self.service.namespace;
        let service_module = self.module_for_namespace(service_namespace)?;

        if self.config.omit_unreachable_types {
            self.visit_operations(service_namespace);
        } else {
            self.visit_namespace(service_namespace);
        }
        self.drain()?;

        let service = self.service;
        if self.config.http
            && let Some(http) = &service.http
        {
            self.emit_http(http)?;
            self.drain()?;
        }

        self.finish_root(service_module)?;
        tracing::debug!(
            modules = self.modules.len(),
            diagnostics = self.diagnostics.len(),
            "emission finished"
        );
        Ok(())
    }

    /// Render queued declarations and synthetics until nothing is pending.
    pub fn drain(&mut self) -> Result<()> {
        loop {
            if let Some(declaration) = self.declarations.take() {
                self.emit_declaration(declaration)?;
            } else if let Some(synthetic) = self.synthetics.pop_front() {
                self.emit_synthetic(synthetic)?;
            } else {
                return Ok(());
            }
        }
    }

    /// Rust identifier of a named declaration.
    pub(crate) fn declaration_name(&self, id: TypeId) -> Result<String> {
        let name = self
            .graph
            .kind(id)
            .declared_name()
            .filter(|name| !name.is_empty())
            .ok_or(CompileError::AnonymousWithoutName(id))?;
        Ok(names::escape_keyword(&name.pascal_case()))
    }

    fn emit_declaration(&mut self, declaration: DeclarationRef) -> Result<()> {
        match declaration {
            DeclarationRef::Type(id) => self.emit_type_declaration(id),
            DeclarationRef::Operations(namespace) => {
                let module = self.module_for_namespace(namespace)?;
                let cursor = self.cursor(module);
                let name = self.operations_trait_name(namespace);
                let text =
                    self.render_trait(Container::Namespace { id: namespace }, &name, None, &cursor)?;
                tracing::debug!(trait_name = %name, "namespace operations emitted");
                self.modules.push_text(module, text);
                Ok(())
            }
        }
    }

    fn emit_type_declaration(&mut self, id: TypeId) -> Result<()> {
        let name = self.declaration_name(id)?;
        let namespace = self.owning_namespace(id)?;
        let module = self.module_for_namespace(namespace)?;
        let cursor = self.cursor(module);

        let graph = self.graph;
        let doc = graph.ty(id).doc.as_deref();
        let text = match graph.kind(id) {
            TypeKind::Record(_) => self.render_record(id, &name, &cursor)?,
            TypeKind::Enum(_) => self.render_enum(id, &name)?,
            TypeKind::Union(_) => self.render_union(id, None, &name, &cursor)?,
            TypeKind::Interface(_) => {
                self.render_trait(Container::Interface { id }, &name, doc, &cursor)?
            }
            TypeKind::Scalar(_) => self.render_scalar(id, &name),
            other => {
                return Err(CompileError::NotADeclaration {
                    id,
                    kind: other.short_name(),
                });
            }
        };

        tracing::debug!(declaration = %name, module = %cursor, "declaration emitted");
        self.modules.push_text(module, text);
        Ok(())
    }

    fn emit_synthetic(&mut self, synthetic: Synthetic) -> Result<()> {
        if !self.synthesized.insert(synthetic.key()) {
            return Ok(());
        }

        let cursor = self.synthetic_cursor();
        let graph = self.graph;
        let text = match &synthetic {
            Synthetic::Anonymous { name, underlying } => match graph.kind(*underlying) {
                TypeKind::Record(_) => self.render_record(*underlying, name, &cursor)?,
                TypeKind::Union(_) => self.render_union(*underlying, None, name, &cursor)?,
                other => {
                    return Err(CompileError::NotADeclaration {
                        id: *underlying,
                        kind: other.short_name(),
                    });
                }
            },
            Synthetic::PartialUnion {
                name,
                union,
                variants,
            } => self.render_union(*union, Some(variants), name, &cursor)?,
        };

        tracing::debug!(synthetic = ?synthetic, "synthetic emitted");
        self.modules.push_text(self.synthetic, text);
        Ok(())
    }

    /// Document the root module and re-export the service namespace from it.
    fn finish_root(&mut self, service_module: ModuleId) -> Result<()> {
        let target = self.cursor(service_module);
        let reexport = weaver_core::PathCursor::root().path_to(&target, None)?;
        self.modules.push_text(
            ModuleId::ROOT,
            format!("#[allow(unused_imports)]\npub use {reexport}::*;"),
        );

        let doc = match (&self.service.title, &self.service.version) {
            (Some(title), Some(version)) => Some(format!("{title} (version {version})")),
            (Some(title), None) => Some(title.clone()),
            (None, Some(version)) => Some(format!("Version {version}")),
            (None, None) => None,
        };
        self.modules.module_mut(ModuleId::ROOT).doc = doc;
        Ok(())
    }
}
