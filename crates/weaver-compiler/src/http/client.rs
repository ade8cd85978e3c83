//! Client emission.
//!
//! Each endpoint module gets `request`, which encodes its `Parameters`
//! through the host crate's `client` module, and `decode`, which reads a
//! response body into the side `classify` assigns to its status.

use std::fmt::Write;

use crate::emit::Session;
use crate::graph::{HttpParameter, ParameterLocation, TypeKind};
use crate::names;

use super::Endpoint;
use super::route::{RouteSegment, parse_template};

const INFALLIBLE: &str = "::core::convert::Infallible";

impl Session<'_> {
    /// `request` and `decode` for one endpoint whose module aliases
    /// `Response` to `response` and `Error` to `error`.
    pub(super) fn render_client(
        &self,
        endpoint: &Endpoint<'_>,
        response: &str,
        error: &str,
    ) -> String {
        let client = self.config.host("client");
        let mut out = self.render_request(endpoint, &client);
        out.push('\n');
        out.push_str(&render_decode(&client, response, error));
        out
    }

    fn render_request(&self, endpoint: &Endpoint<'_>, client: &str) -> String {
        let graph = self.graph;
        let http = endpoint.http;

        let mut raw = String::new();
        let mut template = String::new();
        let mut segments = Vec::new();
        for segment in parse_template(&http.path) {
            let name = match segment {
                RouteSegment::Literal(text) => {
                    raw.push_str(&text);
                    template.push_str(&escape_braces(&text));
                    continue;
                }
                RouteSegment::Parameter(name) => name,
            };
            let parameter = http
                .parameters
                .iter()
                .find(|p| p.name == name && p.location == ParameterLocation::Path);
            match parameter.map(|p| graph.kind(p.ty)) {
                Some(TypeKind::Literal { value }) => {
                    let wire = value.to_wire();
                    raw.push_str(&wire);
                    template.push_str(&escape_braces(&wire));
                }
                Some(kind) if kind.is_value() => {}
                Some(_) => {
                    raw.push_str("{}");
                    template.push_str("{}");
                    segments.push(format!(
                        "{client}::path_segment(&parameters.{})?",
                        names::value_name(&name)
                    ));
                }
                None => {
                    let unbound = format!("{{{name}}}");
                    raw.push_str(&unbound);
                    template.push_str(&escape_braces(&unbound));
                }
            }
        }

        let mut encoded = String::new();
        for parameter in &http.parameters {
            if let Some(line) = encode(parameter, graph.kind(parameter.ty)) {
                encoded.push_str(&line);
            }
        }

        let uses_parameters = !segments.is_empty() || encoded.contains("parameters.");
        let mut out = String::new();
        out.push_str("/// Request for this endpoint, built from its parameters.\n");
        if !uses_parameters {
            out.push_str("#[allow(unused_variables)]\n");
        }
        let _ = writeln!(
            out,
            "pub fn request(parameters: &Parameters) -> Result<{client}::Request, {client}::EncodeError> {{"
        );
        if segments.is_empty() {
            let _ = writeln!(out, "    let path = String::from({raw:?});");
        } else {
            let _ = writeln!(
                out,
                "    let path = format!({template:?}, {});",
                segments.join(", ")
            );
        }
        let binding = if encoded.is_empty() { "let" } else { "let mut" };
        let _ = writeln!(
            out,
            "    {binding} request = {client}::Request::new({:?}, path);",
            http.verb.as_str()
        );
        out.push_str(&encoded);
        out.push_str("    Ok(request)\n");
        out.push_str("}\n");
        out
    }
}

/// Statement adding one non-path parameter to `request`.
fn encode(parameter: &HttpParameter, kind: &TypeKind) -> Option<String> {
    let name = &parameter.name;
    let call = |value: &str| match parameter.location {
        ParameterLocation::Query => Some(format!("request.query({name:?}, {value})?;")),
        ParameterLocation::Header => Some(format!("request.header({name:?}, {value})?;")),
        ParameterLocation::Body => Some(format!("request.json_body({value})?;")),
        ParameterLocation::Path => None,
    };

    if let TypeKind::Literal { value } = kind {
        return call(&format!("&{}", value.to_rust())).map(|line| format!("    {line}\n"));
    }
    if kind.is_value() {
        return None;
    }

    let ident = names::value_name(name);
    if parameter.optional {
        let line = call("value")?;
        Some(format!(
            "    if let Some(value) = &parameters.{ident} {{\n        {line}\n    }}\n"
        ))
    } else {
        let line = call(&format!("&parameters.{ident}"))?;
        Some(format!("    {line}\n"))
    }
}

fn render_decode(client: &str, response: &str, error: &str) -> String {
    let mut arms = String::new();
    for (side, ty, wrap) in [("Success", response, "Ok"), ("Error", error, "Err")] {
        match ty {
            INFALLIBLE | "!" => continue,
            "()" => {
                let _ = writeln!(arms, "        Some(super::Outcome::{side}) => Ok({wrap}(())),");
            }
            _ => {
                let _ = writeln!(
                    arms,
                    "        Some(super::Outcome::{side}) => {client}::json(body).map({wrap}),"
                );
            }
        }
    }

    let mut out = String::new();
    out.push_str("/// Decode a response to this endpoint according to [`classify`].\n");
    if !arms.contains("json(body)") {
        out.push_str("#[allow(unused_variables)]\n");
    }
    let _ = writeln!(
        out,
        "pub fn decode(status: u16, body: &[u8]) -> Result<Result<Response, Error>, {client}::DecodeError> {{"
    );
    out.push_str("    match classify(status) {\n");
    out.push_str(&arms);
    let _ = writeln!(out, "        _ => Err({client}::DecodeError::UnexpectedStatus(status)),");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}
