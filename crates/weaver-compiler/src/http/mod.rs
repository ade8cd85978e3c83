//! HTTP surface of the service.
//!
//! Emits the `http` module: an `auth` module for the declared credentials,
//! a `router` that maps method and path to an endpoint, an `operations`
//! module with response types, status classification and client calls per
//! endpoint, and a `server` that dispatches requests onto the operation
//! traits.

mod auth;
mod client;
mod operations;
mod route;
mod router;
mod server;

#[cfg(test)]
mod route_tests;

use std::collections::BTreeSet;

use weaver_core::Case;

pub use route::{
    LiteralEdge, ParameterEdge, Route, RouteMatch, RouteMiss, RouteNode, RouteSegment, RouteTree,
    Terminal, parse_template,
};

use crate::diagnostics::DiagnosticKind;
use crate::emit::{DeclarationRef, Session};
use crate::error::Result;
use crate::graph::{Container, HttpOperation, HttpService, Operation, TypeGraph};
use crate::module::{ModuleId, Visibility};

/// An HTTP operation whose operation was found in the graph.
pub(crate) struct Endpoint<'g> {
    /// Unique among endpoints: container name followed by operation name
    pub(crate) name: Case,
    pub(crate) http: &'g HttpOperation,
    pub(crate) operation: &'g Operation,
}

impl Endpoint<'_> {
    pub(crate) fn type_name(&self) -> String {
        crate::names::escape_keyword(&self.name.pascal_case())
    }

    pub(crate) fn module_name(&self) -> String {
        crate::names::escape_keyword(&self.name.snake_case())
    }
}

/// Route tree over every endpoint of `http`, indexed like `http.operations`.
pub fn service_routes(http: &HttpService) -> RouteTree {
    RouteTree::build(
        http.operations
            .iter()
            .enumerate()
            .map(|(i, endpoint)| Route::new(i, endpoint.verb, &endpoint.path))
            .collect(),
    )
}

impl<'g> Session<'g> {
    pub(crate) fn emit_http(&mut self, http: &'g HttpService) -> Result<()> {
        let span = tracing::debug_span!("http", endpoints = http.operations.len());
        let _enter = span.enter();

        let module = self
            .modules
            .add_child(ModuleId::ROOT, "http", Visibility::Public, false);
        self.modules.module_mut(module).doc =
            Some("HTTP routing, endpoint metadata and credentials.".to_string());

        let endpoints = self.collect_endpoints(http);
        for endpoint in &endpoints {
            let declaration = match endpoint.http.operation.container {
                Container::Namespace { id } => DeclarationRef::Operations(id),
                Container::Interface { id } => DeclarationRef::Type(id),
            };
            self.declarations.add(declaration);
        }

        self.emit_auth(module, &http.auth);

        let tree = RouteTree::build(
            endpoints
                .iter()
                .enumerate()
                .map(|(i, endpoint)| Route::new(i, endpoint.http.verb, &endpoint.http.path))
                .collect(),
        );
        self.emit_router(module, &endpoints, &tree);
        self.emit_operations(module, &endpoints)?;
        self.emit_server(module, &endpoints)?;

        Ok(())
    }

    /// Pair each HTTP operation with its graph operation; report the ones that do not exist.
    fn collect_endpoints(&mut self, http: &'g HttpService) -> Vec<Endpoint<'g>> {
        let graph = self.graph;
        let mut taken = BTreeSet::new();
        let mut endpoints = Vec::new();

        for endpoint in &http.operations {
            let Some(operation) = graph.operation(&endpoint.operation) else {
                self.diagnostics
                    .report(DiagnosticKind::UnknownOperation, endpoint.span)
                    .message(&endpoint.operation.name)
                    .emit();
                continue;
            };

            let base = container_name(graph, endpoint.operation.container)
                .join(&Case::parse(&operation.name));
            let mut name = base.clone();
            let mut counter = 2;
            while !taken.insert(name.snake_case()) {
                name = base.clone().join(&Case::parse(&counter.to_string()));
                counter += 1;
            }

            endpoints.push(Endpoint {
                name,
                http: endpoint,
                operation,
            });
        }

        endpoints
    }
}

fn container_name(graph: &TypeGraph, container: Container) -> Case {
    match container {
        Container::Namespace { id } => Case::parse(&graph.namespace(id).name),
        Container::Interface { id } => graph.kind(id).declared_name().unwrap_or_default(),
    }
}
