//! Identifier decomposition and re-rendering.
//!
//! Schema identifiers arrive in whatever convention their authors used
//! (`petId`, `HTTPResponse`, `x-rate-limit`, `Pet.Store`). [`Case::parse`]
//! splits them into lowercase components once; [`Case::render`] turns the
//! components back into any target convention.
//!
//! Splitting rules:
//! - separators (`:`, `_`, `-`, `.`, `/`, whitespace) end a component and are dropped
//! - a lowercase-to-uppercase transition starts a new component
//! - inside an uppercase run (acronym), an uppercase letter followed by a
//!   lowercase one starts a new component: `HTTPResponse` → `http`, `response`
//! - digits never start a component
//!
//! # Examples
//! ```
//! use weaver_core::naming::{Case, Convention};
//! let case = Case::parse("OpenAIContext");
//! assert_eq!(case.components(), ["open", "ai", "context"]);
//! assert_eq!(case.render(Convention::Snake), "open_ai_context");
//! assert_eq!(case.render_upper(Convention::Snake), "OPEN_AI_CONTEXT");
//! ```

use std::fmt;

/// Target naming convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Convention {
    /// `FooBar`
    Pascal,
    /// `fooBar`
    Camel,
    /// `foo_bar`
    Snake,
    /// `foo-bar`
    Kebab,
    /// `foo.bar`
    Dot,
    /// `foo/bar`
    Path,
    /// `foo::bar`
    Scope,
    /// `foo bar`
    Space,
}

impl Convention {
    fn separator(self) -> &'static str {
        match self {
            Convention::Pascal | Convention::Camel => "",
            Convention::Snake => "_",
            Convention::Kebab => "-",
            Convention::Dot => ".",
            Convention::Path => "/",
            Convention::Scope => "::",
            Convention::Space => " ",
        }
    }
}

/// An identifier decomposed into lowercase components.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Case {
    components: Vec<String>,
}

impl Case {
    /// Decompose an identifier written in any convention.
    pub fn parse(identifier: &str) -> Self {
        let chars: Vec<char> = identifier.chars().collect();
        let mut components = Vec::new();
        let mut current = String::new();
        let mut in_acronym = false;

        for (i, &c) in chars.iter().enumerate() {
            if is_separator(c) {
                flush(&mut current, &mut components);
                in_acronym = false;
                continue;
            }

            if c.is_uppercase() {
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                if !in_acronym || next_is_lower {
                    flush(&mut current, &mut components);
                }
                in_acronym = true;
                current.extend(c.to_lowercase());
            } else {
                in_acronym = false;
                current.extend(c.to_lowercase());
            }
        }
        flush(&mut current, &mut components);

        Self { components }
    }

    /// Build a case directly from already-split components.
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for component in components {
            parsed.extend(Case::parse(component.as_ref()).components);
        }
        Self { components: parsed }
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Append the components of another identifier.
    pub fn join(mut self, other: &Case) -> Self {
        self.components.extend(other.components.iter().cloned());
        self
    }

    pub fn render(&self, convention: Convention) -> String {
        let separator = convention.separator();
        let mut out = String::new();
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            match convention {
                Convention::Pascal => out.push_str(&capitalize(component)),
                Convention::Camel if i > 0 => out.push_str(&capitalize(component)),
                _ => out.push_str(component),
            }
        }
        out
    }

    /// Render, then upper-case every character (`SCREAMING_SNAKE` for [`Convention::Snake`]).
    pub fn render_upper(&self, convention: Convention) -> String {
        self.render(convention).to_uppercase()
    }

    pub fn pascal_case(&self) -> String {
        self.render(Convention::Pascal)
    }

    pub fn camel_case(&self) -> String {
        self.render(Convention::Camel)
    }

    pub fn snake_case(&self) -> String {
        self.render(Convention::Snake)
    }

    pub fn kebab_case(&self) -> String {
        self.render(Convention::Kebab)
    }

    pub fn upper_snake_case(&self) -> String {
        self.render_upper(Convention::Snake)
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Convention::Space))
    }
}

impl From<&str> for Case {
    fn from(identifier: &str) -> Self {
        Case::parse(identifier)
    }
}

/// Shorthand for `Case::parse(s).pascal_case()`.
pub fn pascal_case(identifier: &str) -> String {
    Case::parse(identifier).pascal_case()
}

/// Shorthand for `Case::parse(s).snake_case()`.
pub fn snake_case(identifier: &str) -> String {
    Case::parse(identifier).snake_case()
}

/// Shorthand for `Case::parse(s).upper_snake_case()`.
pub fn upper_snake_case(identifier: &str) -> String {
    Case::parse(identifier).upper_snake_case()
}

fn is_separator(c: char) -> bool {
    matches!(c, ':' | '_' | '-' | '.' | '/') || c.is_whitespace()
}

fn flush(current: &mut String, components: &mut Vec<String>) {
    if !current.is_empty() {
        components.push(std::mem::take(current));
    }
}

fn capitalize(component: &str) -> String {
    let mut chars = component.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
