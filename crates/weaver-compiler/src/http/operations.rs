//! Per-endpoint operation modules.
//!
//! Each endpoint gets an inline module under `http::operations` holding its
//! `Response` and `Error` types, its `Parameters`, a `classify` function
//! mapping a status code to the success or error side, and the client's
//! `request` and `decode` functions. An endpoint is
//! expected to declare exactly one success shape and at most one error
//! shape; anything else is reported, and `classify` still covers every
//! declared status.

use std::fmt::Write;

use indexmap::IndexSet;
use weaver_core::Case;

use crate::diagnostics::DiagnosticKind;
use crate::emit::Session;
use crate::error::Result;
use crate::graph::{HttpResponse, StatusCode};
use crate::module::{ModuleId, Visibility};
use crate::names;
use crate::scalar::Disposition;

use super::Endpoint;

const OUTCOME: &str = "\
/// Side of an operation a response status belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}
";

impl Session<'_> {
    pub(super) fn emit_operations(
        &mut self,
        http_module: ModuleId,
        endpoints: &[Endpoint<'_>],
    ) -> Result<()> {
        let module = self
            .modules
            .add_child(http_module, "operations", Visibility::Public, false);
        self.modules.module_mut(module).doc =
            Some("Response types, status classification and client calls for each endpoint.".to_string());
        self.modules.push_text(module, OUTCOME);

        for endpoint in endpoints {
            self.emit_operation(module, endpoint)?;
        }
        Ok(())
    }

    fn emit_operation(&mut self, parent: ModuleId, endpoint: &Endpoint<'_>) -> Result<()> {
        let http = endpoint.http;
        let operation = endpoint.operation;

        let module = self.modules.add_child(
            parent,
            endpoint.module_name(),
            Visibility::Public,
            true,
        );
        let mut doc = format!("`{} {}`", http.verb, http.path);
        if let Some(operation_doc) = &operation.doc {
            doc.push_str("\n\n");
            doc.push_str(operation_doc);
        }
        self.modules.module_mut(module).doc = Some(doc);
        let cursor = self.cursor(module);

        let split = self.split_return_type(http.operation.container, operation)?;
        let response = self.render_split(&split.success, &cursor)?;
        let error = self.render_split(&split.error, &cursor)?;
        self.modules.push_text(
            module,
            format!("pub type Response = {response};\npub type Error = {error};"),
        );

        let mut parameters = String::new();
        let prefix = endpoint.name.pascal_case();
        for parameter in &http.parameters {
            if self.graph.kind(parameter.ty).is_value() {
                continue;
            }
            let preferred = format!("{prefix}{}", Case::parse(&parameter.name).pascal_case());
            let mut ty =
                self.resolve(parameter.ty, None, Disposition::Owned, &cursor, &preferred)?;
            if parameter.optional {
                ty = format!("Option<{ty}>");
            }
            let _ = writeln!(
                parameters,
                "    /// {} parameter `{}`",
                capitalize(parameter.location.as_str()),
                parameter.name
            );
            let _ = writeln!(parameters, "    pub {}: {ty},", names::value_name(&parameter.name));
        }
        let mut text = String::from("#[derive(Debug, Clone)]\n");
        if parameters.is_empty() {
            text.push_str("pub struct Parameters {}\n");
        } else {
            let _ = write!(text, "pub struct Parameters {{\n{parameters}}}\n");
        }
        self.modules.push_text(module, text);

        let outcomes: Vec<(&HttpResponse, bool)> = http
            .responses
            .iter()
            .map(|response| (response, self.is_error_response(response)))
            .collect();
        self.modules.push_text(module, render_classify(&outcomes));
        let client = self.render_client(endpoint, &response, &error);
        self.modules.push_text(module, client);

        self.check_response_shapes(endpoint, &outcomes);
        tracing::trace!(endpoint = %endpoint.name.snake_case(), "operation module emitted");
        Ok(())
    }

    pub(super) fn is_error_response(&self, response: &HttpResponse) -> bool {
        response
            .body
            .is_some_and(|body| self.graph.is_error_record(body))
            || response.status.is_error()
    }

    fn check_response_shapes(
        &mut self,
        endpoint: &Endpoint<'_>,
        outcomes: &[(&HttpResponse, bool)],
    ) {
        if outcomes.is_empty() {
            return;
        }

        let mut successes = IndexSet::new();
        let mut errors = IndexSet::new();
        for (response, is_error) in outcomes {
            if *is_error {
                errors.insert(response.body);
            } else {
                successes.insert(response.body);
            }
        }

        if successes.len() != 1 || errors.len() > 1 {
            self.diagnostics
                .report(DiagnosticKind::MultipleResponseShapes, endpoint.http.span)
                .message(format!(
                    "`{}` has {} success and {} error shapes",
                    endpoint.operation.name,
                    successes.len(),
                    errors.len()
                ))
                .emit();
        }
    }
}

/// `classify(status)`: exact codes first, then ranges, then the default response.
fn render_classify(outcomes: &[(&HttpResponse, bool)]) -> String {
    let outcome = |is_error: bool| {
        if is_error {
            "Some(super::Outcome::Error)"
        } else {
            "Some(super::Outcome::Success)"
        }
    };

    let mut arms = Vec::new();
    let mut exact = Vec::new();
    for (response, is_error) in outcomes {
        if let StatusCode::Exact { code } = response.status
            && !exact.contains(&code)
        {
            exact.push(code);
            arms.push(format!("{code} => {},", outcome(*is_error)));
        }
    }
    for (response, is_error) in outcomes {
        if let StatusCode::Range { start, end } = response.status {
            arms.push(format!("{start}..={end} => {},", outcome(*is_error)));
        }
    }
    let default = outcomes
        .iter()
        .find(|(response, _)| response.status == StatusCode::Default)
        .map_or("None", |(_, is_error)| outcome(*is_error));
    arms.push(format!("_ => {default},"));

    let mut out = String::new();
    out.push_str("pub fn classify(status: u16) -> Option<super::Outcome> {\n");
    out.push_str("    match status {\n");
    for arm in arms {
        let _ = writeln!(out, "        {arm}");
    }
    out.push_str("    }\n}\n");
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
