//! Rust-specific naming: keyword escaping and derived names.

use std::collections::BTreeSet;

use weaver_core::Case;

/// Keywords that need a raw identifier (`r#type`).
const KEYWORDS: &[&str] = &[
    // strict
    "as", "break", "const", "continue", "else", "enum", "extern", "false", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static",
    "struct", "trait", "true", "type", "unsafe", "use", "where", "while", "async", "await", "dyn",
    // reserved
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "typeof", "unsized",
    "virtual", "yield", "try", "gen",
];

/// Keywords that cannot be raw identifiers.
const PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Escape `name` so it is a valid identifier.
pub fn escape_keyword(name: &str) -> String {
    if PATH_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

/// `snake_case` identifier for fields, functions and modules.
pub fn value_name(name: &str) -> String {
    escape_keyword(&Case::parse(name).snake_case())
}

/// `PascalCase` identifier for types and variants.
pub fn type_name(name: &str) -> String {
    escape_keyword(&Case::parse(name).pascal_case())
}

/// `SCREAMING_SNAKE_CASE` identifier for constants.
pub fn const_name(name: &str) -> String {
    escape_keyword(&Case::parse(name).upper_snake_case())
}

/// Name for the element type of an array named `name` (`Pets` → `Pet`).
pub fn element_name(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "xes", "ches", "shes"] {
        if name.ends_with(suffix) {
            return name[..name.len() - 2].to_string();
        }
    }
    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with(['s', 'u']) => stem.to_string(),
        _ => format!("{name}Item"),
    }
}

/// Name for the value type of a map named `name`.
pub fn map_value_name(name: &str) -> String {
    format!("{name}Value")
}

/// Identifiers taken in one scope (an enum's variants, a module's items).
///
/// A name claimed twice gets a numeric suffix, starting at `2`.
#[derive(Debug, Default)]
pub struct NameScope {
    taken: BTreeSet<String>,
}

impl NameScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `base`, or the first free `{base}{n}`.
    pub fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }

        let mut counter = 2;
        loop {
            let name = format!("{base}{counter}");
            if self.taken.insert(name.clone()) {
                return name;
            }
            counter += 1;
        }
    }
}
