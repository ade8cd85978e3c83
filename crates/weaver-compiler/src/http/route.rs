//! Route trie compilation.
//!
//! Route templates are split into literal text and `{parameter}` segments.
//! Routes are merged into a trie whose literal edges are keyed by the longest
//! prefix their routes share; all parameters at the same position become one
//! capture edge that binds every name used there. The emitted router walks
//! the same trie, and [`RouteTree::resolve`] interprets it the same way.

use std::fmt::{self, Write};

use crate::graph::Verb;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RouteSegment {
    Literal(String),
    Parameter(String),
}

/// Split a path template into segments.
///
/// `/pets/{petId}/toys` gives `"/pets/"`, `petId`, `"/toys"`. Slashes carry
/// no meaning here; they are just literal text. An unterminated `{` turns the
/// rest of the template into a parameter name.
pub fn parse_template(template: &str) -> Vec<RouteSegment> {
    let mut segments = Vec::new();
    let mut rest = template;

    while !rest.is_empty() {
        let Some(open) = rest.find('{') else {
            segments.push(RouteSegment::Literal(rest.to_string()));
            break;
        };
        if open > 0 {
            segments.push(RouteSegment::Literal(rest[..open].to_string()));
        }

        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                segments.push(RouteSegment::Parameter(after[..close].to_string()));
                rest = &after[close + 1..];
            }
            None => {
                segments.push(RouteSegment::Parameter(after.to_string()));
                break;
            }
        }
    }

    segments
}

/// An endpoint's route, identified by its position in the endpoint list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub endpoint: usize,
    pub verb: Verb,
    pub segments: Vec<RouteSegment>,
}

impl Route {
    pub fn new(endpoint: usize, verb: Verb, template: &str) -> Self {
        Self {
            endpoint,
            verb,
            segments: parse_template(template),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Terminal {
    pub endpoint: usize,
    pub verb: Verb,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralEdge {
    pub prefix: String,
    pub node: RouteNode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterEdge {
    /// Every parameter name used at this position, first-seen order.
    pub names: Vec<String>,
    pub node: Box<RouteNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteNode {
    /// Endpoints whose route ends here.
    pub terminals: Vec<Terminal>,
    /// Literal edges; no two share a first character.
    pub literals: Vec<LiteralEdge>,
    pub parameter: Option<ParameterEdge>,
}

/// Successful [`RouteTree::resolve`]: the endpoint plus captured parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub endpoint: usize,
    pub bindings: Vec<(String, String)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteMiss {
    #[error("no route matches the path")]
    NotFound,
    #[error("the path exists but not for this method")]
    MethodNotAllowed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteTree {
    pub root: RouteNode,
}

impl RouteTree {
    pub fn build(routes: Vec<Route>) -> Self {
        let count = routes.len();
        let root = build_node(routes);
        tracing::debug!(routes = count, "route tree built");
        Self { root }
    }

    /// Match `path` for `verb`, taking the first literal edge that matches
    /// and falling back to the capture edge. There is no backtracking.
    pub fn resolve(&self, verb: Verb, path: &str) -> Result<RouteMatch, RouteMiss> {
        let mut bindings = Vec::new();
        resolve_node(&self.root, verb, path, &mut bindings)
    }

    /// Pairs of `(kept, shadowed)` terminals that end at the same node with the same verb.
    pub fn duplicate_terminals(&self) -> Vec<(Terminal, Terminal)> {
        let mut duplicates = Vec::new();
        collect_duplicates(&self.root, &mut duplicates);
        duplicates
    }

    /// Indented listing of the trie; `label` names an endpoint.
    pub fn dump(&self, label: impl Fn(usize) -> String) -> String {
        let mut out = String::new();
        dump_node(&self.root, 0, &label, &mut out);
        out
    }
}

impl fmt::Display for RouteTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump(|endpoint| format!("#{endpoint}")))
    }
}

fn build_node(routes: Vec<Route>) -> RouteNode {
    let mut node = RouteNode::default();
    let mut groups: Vec<(String, Vec<Route>)> = Vec::new();
    let mut parameter: Option<(Vec<String>, Vec<Route>)> = None;

    for mut route in routes {
        let Some(first) = route.segments.first().cloned() else {
            node.terminals.push(Terminal {
                endpoint: route.endpoint,
                verb: route.verb,
            });
            continue;
        };

        match first {
            RouteSegment::Literal(literal) => {
                let shared = groups
                    .iter()
                    .position(|(key, _)| common_prefix_len(key, &literal) > 0);
                match shared {
                    Some(i) => {
                        let (key, members) = &mut groups[i];
                        let len = common_prefix_len(key, &literal);
                        key.truncate(len);
                        members.push(route);
                    }
                    None => groups.push((literal, vec![route])),
                }
            }
            RouteSegment::Parameter(name) => {
                let (names, members) = parameter.get_or_insert_with(Default::default);
                if !names.contains(&name) {
                    names.push(name);
                }
                route.segments.remove(0);
                members.push(route);
            }
        }
    }

    node.literals = groups
        .into_iter()
        .map(|(prefix, members)| {
            let members = members
                .into_iter()
                .map(|route| strip_prefix(route, &prefix))
                .collect();
            LiteralEdge {
                node: build_node(members),
                prefix,
            }
        })
        .collect();

    node.parameter = parameter.map(|(names, members)| ParameterEdge {
        names,
        node: Box::new(build_node(members)),
    });

    node
}

/// Remove `prefix` from the route's leading literal, dropping it when consumed.
fn strip_prefix(mut route: Route, prefix: &str) -> Route {
    if let Some(RouteSegment::Literal(literal)) = route.segments.first_mut() {
        if literal.len() == prefix.len() {
            route.segments.remove(0);
        } else {
            *literal = literal[prefix.len()..].to_string();
        }
    }
    route
}

/// Byte length of the longest common prefix, on character boundaries.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map_or(0, |((i, c), _)| i + c.len_utf8())
}

fn resolve_node(
    node: &RouteNode,
    verb: Verb,
    path: &str,
    bindings: &mut Vec<(String, String)>,
) -> Result<RouteMatch, RouteMiss> {
    if path.is_empty() {
        if node.terminals.is_empty() {
            return Err(RouteMiss::NotFound);
        }
        return node
            .terminals
            .iter()
            .find(|terminal| terminal.verb == verb)
            .map(|terminal| RouteMatch {
                endpoint: terminal.endpoint,
                bindings: bindings.clone(),
            })
            .ok_or(RouteMiss::MethodNotAllowed);
    }

    for edge in &node.literals {
        if let Some(rest) = path.strip_prefix(edge.prefix.as_str()) {
            return resolve_node(&edge.node, verb, rest, bindings);
        }
    }

    let Some(edge) = &node.parameter else {
        return Err(RouteMiss::NotFound);
    };
    let (captured, rest) = path.split_at(path.find('/').unwrap_or(path.len()));
    if captured.is_empty() {
        return Err(RouteMiss::NotFound);
    }
    for name in &edge.names {
        bindings.push((name.clone(), captured.to_string()));
    }
    resolve_node(&edge.node, verb, rest, bindings)
}

fn collect_duplicates(node: &RouteNode, out: &mut Vec<(Terminal, Terminal)>) {
    for (i, terminal) in node.terminals.iter().enumerate() {
        if let Some(kept) = node.terminals[..i].iter().find(|t| t.verb == terminal.verb) {
            out.push((*kept, *terminal));
        }
    }
    for edge in &node.literals {
        collect_duplicates(&edge.node, out);
    }
    if let Some(edge) = &node.parameter {
        collect_duplicates(&edge.node, out);
    }
}

fn dump_node(node: &RouteNode, depth: usize, label: &dyn Fn(usize) -> String, out: &mut String) {
    let indent = "  ".repeat(depth);
    for terminal in &node.terminals {
        let _ = writeln!(out, "{indent}{} {}", terminal.verb, label(terminal.endpoint));
    }
    for edge in &node.literals {
        let _ = writeln!(out, "{indent}{:?}", edge.prefix);
        dump_node(&edge.node, depth + 1, label, out);
    }
    if let Some(edge) = &node.parameter {
        let _ = writeln!(out, "{indent}{{{}}}", edge.names.join("|"));
        dump_node(&edge.node, depth + 1, label, out);
    }
}
