use std::fmt::Write;
use std::path::PathBuf;

use serde::Serialize;
use weaver_compiler::graph::{HttpService, Verb};
use weaver_compiler::http::service_routes;

use super::CliError;
use super::schema_loader::load_schema;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoutesFormat {
    #[default]
    Tree,
    Json,
}

pub struct RoutesArgs {
    pub schema_path: PathBuf,
    pub format: RoutesFormat,
    pub resolve: Option<String>,
}

#[derive(Serialize)]
struct RouteEntry<'a> {
    method: &'static str,
    path: &'a str,
    operation: &'a str,
}

pub fn run(args: RoutesArgs) -> Result<(), CliError> {
    let loaded = load_schema(&args.schema_path)?;
    let http = loaded
        .schema
        .service
        .http
        .as_ref()
        .ok_or(CliError::NoHttpService)?;

    let output = match (&args.resolve, args.format) {
        (Some(request), _) => resolve_request(http, request)?,
        (None, RoutesFormat::Tree) => render_tree(http),
        (None, RoutesFormat::Json) => render_json(http)?,
    };
    print!("{}", output);
    Ok(())
}

/// The route trie with each endpoint labelled by its operation name.
pub fn render_tree(http: &HttpService) -> String {
    service_routes(http).dump(|endpoint| http.operations[endpoint].operation.name.clone())
}

/// Endpoints in declaration order as a JSON array.
pub fn render_json(http: &HttpService) -> Result<String, CliError> {
    let entries: Vec<RouteEntry<'_>> = http
        .operations
        .iter()
        .map(|endpoint| RouteEntry {
            method: endpoint.verb.as_str(),
            path: &endpoint.path,
            operation: &endpoint.operation.name,
        })
        .collect();

    let mut json = serde_json::to_string_pretty(&entries)?;
    json.push('\n');
    Ok(json)
}

/// Match a `METHOD /path` request against the route trie.
pub fn resolve_request(http: &HttpService, request: &str) -> Result<String, CliError> {
    let invalid = || CliError::InvalidRequest(request.to_string());
    let (method, path) = request.trim().split_once(' ').ok_or_else(invalid)?;
    let verb = parse_verb(method).ok_or_else(invalid)?;

    let found = service_routes(http)
        .resolve(verb, path.trim())
        .map_err(|miss| CliError::NoRoute {
            request: request.trim().to_string(),
            miss,
        })?;

    let mut out = String::new();
    let _ = writeln!(out, "{}", http.operations[found.endpoint].operation.name);
    for (name, value) in &found.bindings {
        let _ = writeln!(out, "  {} = {}", name, value);
    }
    Ok(out)
}

fn parse_verb(method: &str) -> Option<Verb> {
    let verb = match method.to_ascii_uppercase().as_str() {
        "GET" => Verb::Get,
        "PUT" => Verb::Put,
        "POST" => Verb::Post,
        "PATCH" => Verb::Patch,
        "DELETE" => Verb::Delete,
        "HEAD" => Verb::Head,
        _ => return None,
    };
    Some(verb)
}
