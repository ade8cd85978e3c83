//! Server emission.
//!
//! `http::server` holds one struct generic over an implementation of every
//! operation container that has endpoints. Its `dispatch` routes a request
//! with `router::route`, extracts the endpoint's `Parameters` through the
//! host crate's `server` module, calls the trait method and turns the
//! result into a response.

use std::fmt::Write;

use indexmap::IndexMap;
use weaver_core::{Case, PathCursor};

use crate::diagnostics::DiagnosticKind;
use crate::emit::{Session, SplitReturn};
use crate::error::Result;
use crate::graph::{
    Container, HttpParameter, Intrinsic, ParameterLocation, StatusCode, TypeKind,
};
use crate::module::{ModuleId, Visibility};
use crate::names::{self, NameScope};
use crate::scalar::Disposition;

use super::Endpoint;
use super::router::{binding, path_fields};

const INDENT: &str = "    ";

/// An operation container the server struct delegates to.
struct Backend {
    /// Type parameter of the server struct
    generic: String,
    field: String,
    /// Trait path, spelled from the server module
    bound: String,
    /// Prefix of the trait's options structs
    trait_name: String,
    /// Module declaring the trait
    module: PathCursor,
}

impl Session<'_> {
    pub(super) fn emit_server(
        &mut self,
        http_module: ModuleId,
        endpoints: &[Endpoint<'_>],
    ) -> Result<()> {
        if endpoints.is_empty() {
            return Ok(());
        }

        let module = self
            .modules
            .add_child(http_module, "server", Visibility::Public, false);
        self.modules.module_mut(module).doc =
            Some("Request dispatch onto the service's operation traits.".to_string());
        let cursor = self.cursor(module);
        let http_cursor = self.cursor(http_module);
        let host = self.config.host("server");

        let mut backends: IndexMap<Container, Backend> = IndexMap::new();
        let mut scope = NameScope::new();
        // Request type parameter of `dispatch` and the serve methods.
        scope.claim("R");
        for endpoint in endpoints {
            let container = endpoint.http.operation.container;
            if backends.contains_key(&container) {
                continue;
            }
            let backend = self.backend(container, &cursor, &mut scope)?;
            backends.insert(container, backend);
        }

        let name = self.server_name();
        let generics = backends
            .values()
            .map(|backend| backend.generic.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = String::new();
        out.push_str("/// Serves every endpoint by calling the operation traits.\n");
        out.push_str("#[derive(Debug, Clone)]\n");
        let _ = writeln!(out, "pub struct {name}<{generics}> {{");
        for backend in backends.values() {
            let _ = writeln!(out, "{INDENT}pub {}: {},", backend.field, backend.generic);
        }
        out.push_str("}\n\n");

        let _ = writeln!(out, "impl<{generics}> {name}<{generics}>");
        out.push_str("where\n");
        for backend in backends.values() {
            let _ = writeln!(out, "{INDENT}{}: {},", backend.generic, backend.bound);
        }
        out.push_str("{\n");

        let arguments = backends
            .values()
            .map(|backend| format!("{}: {}", backend.field, backend.generic))
            .collect::<Vec<_>>()
            .join(", ");
        let fields = backends
            .values()
            .map(|backend| backend.field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "{INDENT}pub fn new({arguments}) -> Self {{");
        let _ = writeln!(out, "{INDENT}{INDENT}Self {{ {fields} }}");
        let _ = writeln!(out, "{INDENT}}}");
        out.push('\n');
        out.push_str(&render_dispatch(&host, endpoints));

        for endpoint in endpoints {
            let backend = &backends[&endpoint.http.operation.container];
            let operations =
                http_cursor.enter(["operations".to_string(), endpoint.module_name()]);
            out.push('\n');
            out.push_str(&self.render_serve(endpoint, backend, &cursor, &operations, &host)?);
        }
        out.push_str("}\n");

        self.modules.push_text(module, out);
        tracing::debug!(server = %name, backends = backends.len(), "server emitted");
        Ok(())
    }

    fn server_name(&self) -> String {
        let service = names::type_name(&self.graph.namespace(self.service.namespace).name);
        format!("{service}Server")
    }

    fn backend(
        &mut self,
        container: Container,
        cursor: &PathCursor,
        scope: &mut NameScope,
    ) -> Result<Backend> {
        let trait_name = match container {
            Container::Namespace { id } => self.operations_trait_name(id),
            Container::Interface { id } => self.declaration_name(id)?,
        };
        let module = self.container_module(container)?;
        let module = self.cursor(module);
        let bound = cursor.path_to(&module, Some(&trait_name))?;
        let generic = scope.claim(trait_name.trim_start_matches("r#"));
        Ok(Backend {
            field: names::value_name(&generic),
            generic,
            bound,
            trait_name,
            module,
        })
    }

    /// `serve_*` method of one endpoint: extract, call, respond.
    fn render_serve(
        &mut self,
        endpoint: &Endpoint<'_>,
        backend: &Backend,
        cursor: &PathCursor,
        operations: &PathCursor,
        host: &str,
    ) -> Result<String> {
        let graph = self.graph;
        let http = endpoint.http;
        let operation = endpoint.operation;
        let fields = path_fields(endpoint);
        let body = INDENT.repeat(2);

        let mut out = String::new();
        let _ = writeln!(out, "{INDENT}/// `{} {}`", http.verb, http.path);
        let _ = writeln!(out, "{INDENT}#[allow(unused_variables)]");
        let captures: String = fields
            .iter()
            .map(|field| format!(", {}: &str", binding(field)))
            .collect();
        let _ = writeln!(
            out,
            "{INDENT}async fn {}<R>(&mut self, request: &R{captures}) -> ::core::result::Result<{host}::Response, {host}::ExtractError>",
            serve_name(endpoint)
        );
        let _ = writeln!(out, "{INDENT}where");
        let _ = writeln!(out, "{INDENT}{INDENT}R: {host}::Request,");
        let _ = writeln!(out, "{INDENT}{{");

        let parameters_path = cursor.path_to(operations, Some("Parameters"))?;
        let extracted: Vec<String> = http
            .parameters
            .iter()
            .filter(|parameter| !graph.kind(parameter.ty).is_value())
            .map(|parameter| {
                format!(
                    "{}: {},",
                    names::value_name(&parameter.name),
                    extract(parameter, &fields, host)
                )
            })
            .collect();
        if extracted.is_empty() {
            let _ = writeln!(out, "{body}let parameters = {parameters_path} {{}};");
        } else {
            let _ = writeln!(out, "{body}let parameters = {parameters_path} {{");
            for line in extracted {
                let _ = writeln!(out, "{body}{INDENT}{line}");
            }
            let _ = writeln!(out, "{body}}};");
        }

        let op = Case::parse(&operation.name);
        let mut required = Vec::new();
        let mut optional = Vec::new();
        for parameter in &operation.parameters {
            if graph.kind(parameter.ty).is_value() {
                continue;
            }
            let ident = names::value_name(&parameter.name);
            let Some(bound) = http
                .parameters
                .iter()
                .find(|p| p.name == parameter.name && !graph.kind(p.ty).is_value())
            else {
                self.diagnostics
                    .report(DiagnosticKind::UnboundParameter, http.span)
                    .message(&parameter.name)
                    .hint(format!("`{}` serves `{} {}`", operation.name, http.verb, http.path))
                    .emit();
                let _ = writeln!(
                    out,
                    "{body}Err({host}::ExtractError::missing({:?}))",
                    parameter.name
                );
                let _ = writeln!(out, "{INDENT}}}");
                return Ok(out);
            };

            let value = format!("parameters.{ident}");
            if parameter.optional {
                let value = if bound.optional { value } else { format!("Some({value})") };
                optional.push(format!("{ident}: {value}"));
                continue;
            }

            let mut value = if bound.optional {
                format!("{host}::required({value}, {:?})?", parameter.name)
            } else {
                value
            };
            let preferred = format!(
                "{}{}",
                op.pascal_case(),
                Case::parse(&parameter.name).pascal_case()
            );
            let spelled = self.resolve(
                parameter.ty,
                parameter.span,
                Disposition::Param,
                &backend.module,
                &preferred,
            )?;
            if spelled.starts_with('&') {
                value = format!("&{value}");
            }
            required.push(value);
        }

        let method = names::escape_keyword(&op.snake_case());
        let call = if optional.is_empty() {
            format!("{method}({})", required.join(", "))
        } else {
            let options = cursor.path_to(
                &backend.module,
                Some(&format!("{}{}Options", backend.trait_name, op.pascal_case())),
            )?;
            let with_options =
                names::escape_keyword(&format!("{}_with_options", op.snake_case()));
            let mut arguments = required;
            arguments.push(format!("{options} {{ {} }}", optional.join(", ")));
            format!("{with_options}({})", arguments.join(", "))
        };
        let _ = writeln!(out, "{body}let result = self.{}.{call}.await;", backend.field);

        let split = self.split_return_type(http.operation.container, operation)?;
        let success = http
            .responses
            .iter()
            .find(|response| !self.is_error_response(response));
        let void = match &split.success {
            SplitReturn::Type { ty, .. } => matches!(
                graph.kind(*ty),
                TypeKind::Intrinsic {
                    name: Intrinsic::Void
                }
            ),
            SplitReturn::Infallible | SplitReturn::Union(_) => false,
        };
        let status = match success.map(|response| response.status) {
            Some(StatusCode::Exact { code }) => code,
            Some(StatusCode::Range { start, .. }) => start,
            Some(StatusCode::Default) | None if void => 204,
            Some(StatusCode::Default) | None => 200,
        };

        let _ = writeln!(out, "{body}Ok(match result {{");
        let arm = format!("{body}{INDENT}");
        match split.success {
            SplitReturn::Infallible => {
                let _ = writeln!(out, "{arm}Ok(value) => match value {{}},");
            }
            _ if void || success.is_some_and(|response| response.body.is_none()) => {
                let _ = writeln!(out, "{arm}Ok(_) => {host}::Response::empty({status}),");
            }
            _ => {
                let _ = writeln!(out, "{arm}Ok(value) => {host}::Response::json({status}, &value),");
            }
        }
        let _ = writeln!(out, "{arm}Err(error) => {host}::Response::operation_error(&error),");
        let _ = writeln!(out, "{body}}})");
        let _ = writeln!(out, "{INDENT}}}");
        Ok(out)
    }
}

fn serve_name(endpoint: &Endpoint<'_>) -> String {
    format!("serve_{}", endpoint.module_name().trim_start_matches("r#"))
}

/// Expression reading one HTTP parameter from the request.
fn extract(parameter: &HttpParameter, fields: &[String], host: &str) -> String {
    let name = &parameter.name;
    let raw = match parameter.location {
        ParameterLocation::Path => {
            let ident = names::value_name(name);
            let captured = fields.contains(&ident);
            return match (captured, parameter.optional) {
                (true, false) => format!("{host}::path_param({}, {name:?})?", binding(&ident)),
                (true, true) => format!("Some({host}::path_param({}, {name:?})?)", binding(&ident)),
                (false, false) => format!("{host}::required(None, {name:?})?"),
                (false, true) => "None".to_string(),
            };
        }
        ParameterLocation::Query => format!("{host}::query_param(request, {name:?})?"),
        ParameterLocation::Header => format!("{host}::header_param(request, {name:?})?"),
        ParameterLocation::Body => format!("{host}::body(request)?"),
    };
    if parameter.optional {
        raw
    } else {
        format!("{host}::required({raw}, {name:?})?")
    }
}

fn render_dispatch(host: &str, endpoints: &[Endpoint<'_>]) -> String {
    let body = INDENT.repeat(2);
    let arm = INDENT.repeat(3);

    let mut out = String::new();
    let _ = writeln!(out, "{INDENT}/// Route `request` to its endpoint and serve it.");
    let _ = writeln!(
        out,
        "{INDENT}pub async fn dispatch<R>(&mut self, request: &R) -> {host}::Response"
    );
    let _ = writeln!(out, "{INDENT}where");
    let _ = writeln!(out, "{INDENT}{INDENT}R: {host}::Request,");
    let _ = writeln!(out, "{INDENT}{{");
    let _ = writeln!(
        out,
        "{body}let route = match super::router::route(request.method(), request.path()) {{"
    );
    let _ = writeln!(out, "{arm}Ok(route) => route,");
    let _ = writeln!(
        out,
        "{arm}Err(super::router::RouteError::NotFound) => return {host}::Response::not_found(),"
    );
    let _ = writeln!(out, "{arm}Err(super::router::RouteError::MethodNotAllowed) => {{");
    let _ = writeln!(out, "{arm}{INDENT}return {host}::Response::method_not_allowed();");
    let _ = writeln!(out, "{arm}}}");
    let _ = writeln!(out, "{body}}};");

    let _ = writeln!(out, "{body}let served = match route {{");
    for endpoint in endpoints {
        let fields = path_fields(endpoint);
        let pattern = if fields.is_empty() {
            String::new()
        } else {
            let bindings = fields
                .iter()
                .map(|field| format!("{field}: {}", binding(field)))
                .collect::<Vec<_>>()
                .join(", ");
            format!(" {{ {bindings} }}")
        };
        let captures: String = fields
            .iter()
            .map(|field| format!(", {}", binding(field)))
            .collect();
        let _ = writeln!(
            out,
            "{arm}super::router::RouteMatch::{}{pattern} => {{",
            endpoint.type_name()
        );
        let _ = writeln!(
            out,
            "{arm}{INDENT}self.{}(request{captures}).await",
            serve_name(endpoint)
        );
        let _ = writeln!(out, "{arm}}}");
    }
    let _ = writeln!(out, "{body}}};");
    let _ = writeln!(out, "{body}served.unwrap_or_else({host}::Response::bad_request)");
    let _ = writeln!(out, "{INDENT}}}");
    out
}
