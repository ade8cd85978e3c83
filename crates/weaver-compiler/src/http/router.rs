//! Router emission.
//!
//! The route trie is unrolled into one nested `if` expression: an empty
//! remaining path dispatches on the method, each literal edge is an
//! `else if let Some(path) = path.strip_prefix(..)` branch, and the capture
//! edge takes everything up to the next `/`.

use std::fmt::Write;

use indexmap::IndexSet;

use crate::diagnostics::DiagnosticKind;
use crate::emit::Session;
use crate::graph::Verb;
use crate::module::{ModuleId, Visibility};
use crate::names;

use super::route::{RouteNode, RouteSegment, RouteTree, parse_template};
use super::Endpoint;

const INDENT: &str = "    ";

impl Session<'_> {
    pub(super) fn emit_router(
        &mut self,
        http_module: ModuleId,
        endpoints: &[Endpoint<'_>],
        tree: &RouteTree,
    ) {
        let module = self
            .modules
            .add_child(http_module, "router", Visibility::Public, false);
        self.modules.module_mut(module).doc =
            Some("Maps a request method and path to the endpoint serving it.".to_string());

        for (kept, shadowed) in tree.duplicate_terminals() {
            let endpoint = &endpoints[shadowed.endpoint];
            self.diagnostics
                .report(DiagnosticKind::DuplicateRoute, endpoint.http.span)
                .message(format!("{} {}", endpoint.http.verb, endpoint.http.path))
                .hint(format!(
                    "`{}` is served by `{}`",
                    endpoint.http.path,
                    endpoints[kept.endpoint].operation.name
                ))
                .emit();
        }

        let fields: Vec<Vec<String>> = endpoints.iter().map(path_fields).collect();
        let borrows = fields.iter().any(|f| !f.is_empty());
        let lifetime = if borrows { "<'p>" } else { "" };

        let mut out = String::new();
        out.push_str("/// Endpoint matched by [`route`], with its path parameters.\n");
        out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n");
        let _ = writeln!(out, "pub enum RouteMatch{lifetime} {{");
        for (endpoint, fields) in endpoints.iter().zip(&fields) {
            let variant = endpoint.type_name();
            let _ = writeln!(out, "{INDENT}/// `{} {}`", endpoint.http.verb, endpoint.http.path);
            if fields.is_empty() {
                let _ = writeln!(out, "{INDENT}{variant},");
            } else {
                let fields: Vec<String> = fields.iter().map(|f| format!("{f}: &'p str")).collect();
                let _ = writeln!(out, "{INDENT}{variant} {{ {} }},", fields.join(", "));
            }
        }
        out.push_str("}\n");
        self.modules.push_text(module, out);

        self.modules.push_text(
            module,
            "#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n\
             pub enum RouteError {\n\
             \x20   /// No endpoint serves the path.\n\
             \x20   NotFound,\n\
             \x20   /// The path exists, but not for the request method.\n\
             \x20   MethodNotAllowed,\n\
             }\n",
        );

        let (path_lifetime, signature) = if borrows {
            ("'p ", "pub fn route<'p>")
        } else {
            ("", "pub fn route")
        };
        let mut out = String::new();
        out.push_str("/// Resolve `method` and `path` (without query string) to an endpoint.\n");
        out.push_str("#[allow(unused_variables)]\n");
        let _ = writeln!(
            out,
            "{signature}(method: &str, path: &{path_lifetime}str) -> Result<RouteMatch{lifetime}, RouteError> {{"
        );
        write_node(&mut out, &tree.root, endpoints, &fields, 1);
        out.push_str("}\n");
        self.modules.push_text(module, out);
    }
}

/// Field identifiers of an endpoint's path parameters, in template order.
pub(super) fn path_fields(endpoint: &Endpoint<'_>) -> Vec<String> {
    let fields: IndexSet<String> = parse_template(&endpoint.http.path)
        .into_iter()
        .filter_map(|segment| match segment {
            RouteSegment::Parameter(name) => Some(names::value_name(&name)),
            RouteSegment::Literal(_) => None,
        })
        .collect();
    fields.into_iter().collect()
}

/// Local variable holding a captured parameter (never shadows `path` or `method`).
pub(super) fn binding(field: &str) -> String {
    format!("param_{}", field.trim_start_matches("r#"))
}

fn write_node(
    out: &mut String,
    node: &RouteNode,
    endpoints: &[Endpoint<'_>],
    fields: &[Vec<String>],
    depth: usize,
) {
    let indent = INDENT.repeat(depth);

    let _ = writeln!(out, "{indent}if path.is_empty() {{");
    write_dispatch(out, node, endpoints, fields, depth + 1);

    for edge in &node.literals {
        let _ = writeln!(
            out,
            "{indent}}} else if let Some(path) = path.strip_prefix({:?}) {{",
            edge.prefix
        );
        write_node(out, &edge.node, endpoints, fields, depth + 1);
    }

    let _ = writeln!(out, "{indent}}} else {{");
    match &node.parameter {
        Some(edge) => {
            let inner = INDENT.repeat(depth + 1);
            let _ = writeln!(
                out,
                "{inner}let (captured, path) = path.split_at(path.find('/').unwrap_or(path.len()));"
            );
            let _ = writeln!(out, "{inner}if captured.is_empty() {{");
            let _ = writeln!(out, "{inner}{INDENT}Err(RouteError::NotFound)");
            let _ = writeln!(out, "{inner}}} else {{");
            for name in &edge.names {
                let field = names::value_name(name);
                let _ = writeln!(out, "{inner}{INDENT}let {} = captured;", binding(&field));
            }
            write_node(out, &edge.node, endpoints, fields, depth + 2);
            let _ = writeln!(out, "{inner}}}");
        }
        None => {
            let _ = writeln!(out, "{indent}{INDENT}Err(RouteError::NotFound)");
        }
    }
    let _ = writeln!(out, "{indent}}}");
}

fn write_dispatch(
    out: &mut String,
    node: &RouteNode,
    endpoints: &[Endpoint<'_>],
    fields: &[Vec<String>],
    depth: usize,
) {
    let indent = INDENT.repeat(depth);
    if node.terminals.is_empty() {
        let _ = writeln!(out, "{indent}Err(RouteError::NotFound)");
        return;
    }

    let mut seen: Vec<Verb> = Vec::new();
    let _ = writeln!(out, "{indent}match method {{");
    for terminal in &node.terminals {
        if seen.contains(&terminal.verb) {
            continue;
        }
        seen.push(terminal.verb);

        let endpoint = &endpoints[terminal.endpoint];
        let fields = &fields[terminal.endpoint];
        let value = if fields.is_empty() {
            format!("RouteMatch::{}", endpoint.type_name())
        } else {
            let fields: Vec<String> = fields
                .iter()
                .map(|f| format!("{f}: {}", binding(f)))
                .collect();
            format!("RouteMatch::{} {{ {} }}", endpoint.type_name(), fields.join(", "))
        };
        let _ = writeln!(out, "{indent}{INDENT}{:?} => Ok({value}),", terminal.verb.as_str());
    }
    let _ = writeln!(out, "{indent}{INDENT}_ => Err(RouteError::MethodNotAllowed),");
    let _ = writeln!(out, "{indent}}}");
}
