//! Operation traits for interfaces and namespaces.

use std::fmt::Write;

use weaver_core::{Case, PathCursor};

use crate::error::Result;
use crate::graph::Container;
use crate::names;
use crate::scalar::Disposition;

use super::documentation::push_doc;
use super::session::Session;

const ERROR_BOUND: &str = "::std::error::Error + Send + Sync + 'static";

struct OptionalParameter<'a> {
    ident: String,
    ty: String,
    doc: Option<&'a str>,
}

impl Session<'_> {
    /// Trait with one method per operation of `container`.
    ///
    /// Each method returns the host crate's `OperationFuture` over the success
    /// side of the return type and `Self::Error` over the error side.
    /// Operations with optional parameters also get an options struct and a
    /// `_with_options` method that the plain method forwards to.
    pub(super) fn render_trait(
        &mut self,
        container: Container,
        name: &str,
        doc: Option<&str>,
        cursor: &PathCursor,
    ) -> Result<String> {
        let graph = self.graph;
        let future = self.config.host("OperationFuture");

        let mut options_structs = Vec::new();
        let mut methods = vec![format!(
            "    type Error<OperationError>: {ERROR_BOUND};\n"
        )];

        for operation in graph.operations(container) {
            let split = self.split_return_type(container, operation)?;
            let success = self.render_split(&split.success, cursor)?;
            let error = self.render_split(&split.error, cursor)?;
            let returns = format!("impl {future}<{success}, Self::Error<{error}>>");

            let op = Case::parse(&operation.name);
            let method = names::escape_keyword(&op.snake_case());

            let mut required = Vec::new();
            let mut optional = Vec::new();
            for parameter in &operation.parameters {
                // Single-value parameters carry no information.
                if graph.kind(parameter.ty).is_value() {
                    continue;
                }
                let ident = names::value_name(&parameter.name);
                let preferred = format!(
                    "{}{}",
                    op.pascal_case(),
                    Case::parse(&parameter.name).pascal_case()
                );
                if parameter.optional {
                    let ty = self.resolve(
                        parameter.ty,
                        parameter.span,
                        Disposition::Owned,
                        cursor,
                        &preferred,
                    )?;
                    optional.push(OptionalParameter {
                        ident,
                        ty,
                        doc: parameter.doc.as_deref(),
                    });
                } else {
                    let ty = self.resolve(
                        parameter.ty,
                        parameter.span,
                        Disposition::Param,
                        cursor,
                        &preferred,
                    )?;
                    required.push((ident, ty));
                }
            }

            let params: String = required
                .iter()
                .map(|(ident, ty)| format!(", {ident}: {ty}"))
                .collect();

            let mut text = String::new();
            push_doc(&mut text, "    ", operation.doc.as_deref());

            if optional.is_empty() {
                let _ = writeln!(text, "    fn {method}(&mut self{params}) -> {returns};");
                methods.push(text);
                continue;
            }

            let options = format!("{name}{}Options", op.pascal_case());
            let with_options = names::escape_keyword(&format!("{}_with_options", op.snake_case()));
            options_structs.push(render_options(&options, &method, &optional));

            let forwarded: String = required
                .iter()
                .map(|(ident, _)| format!("{ident}, "))
                .collect();
            let _ = writeln!(text, "    fn {method}(&mut self{params}) -> {returns} {{");
            let _ = writeln!(
                text,
                "        self.{with_options}({forwarded}Default::default())"
            );
            let _ = writeln!(text, "    }}");
            let _ = writeln!(text);
            let _ = writeln!(
                text,
                "    fn {with_options}(&mut self{params}, options: {options}) -> {returns};"
            );
            methods.push(text);
        }

        let mut out = String::new();
        for options in options_structs {
            out.push_str(&options);
            out.push('\n');
        }
        push_doc(&mut out, "", doc);
        let _ = writeln!(out, "pub trait {name} {{");
        out.push_str(&methods.join("\n"));
        out.push_str("}\n");

        tracing::trace!(trait_name = name, methods = methods.len() - 1, "trait rendered");
        Ok(out)
    }
}

fn render_options(name: &str, method: &str, parameters: &[OptionalParameter<'_>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "/// Optional parameters of `{method}`.");
    out.push_str("#[derive(Debug, Clone, Default)]\n");
    let _ = writeln!(out, "pub struct {name} {{");
    for parameter in parameters {
        push_doc(&mut out, "    ", parameter.doc);
        let _ = writeln!(out, "    pub {}: Option<{}>,", parameter.ident, parameter.ty);
    }
    out.push_str("}\n");
    out
}
