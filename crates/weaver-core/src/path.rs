//! Module path algebra.
//!
//! A [`PathCursor`] names a module by its component path from the crate root.
//! Cursors are immutable: [`PathCursor::enter`] returns a new cursor, so a
//! cursor captured while emitting one declaration stays valid while others
//! are emitted.
//!
//! References are written relative to the module they appear in, with
//! `super` to ascend and `::` between components.

use std::fmt;

pub const SEPARATOR: &str = "::";
pub const ASCEND: &str = "super";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("resolved empty module path from `{from}` to `{to}`")]
    EmptyPath { from: String, to: String },

    #[error("reference `{reference}` ascends above the crate root (from `{from}`)")]
    AscendAboveRoot { reference: String, from: String },

    #[error("reference `{reference}` does not name an item")]
    MissingItem { reference: String },
}

pub type Result<T> = std::result::Result<T, PathError>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathCursor {
    path: Vec<String>,
}

/// A module location plus the name of an item declared in it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemPath {
    pub cursor: PathCursor,
    pub item: String,
}

impl PathCursor {
    /// The crate root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Cursor of a descendant module.
    pub fn enter<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = self.path.clone();
        path.extend(names.into_iter().map(Into::into));
        Self { path }
    }

    /// Cursor of the parent module, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.path.split_last()?;
        Some(Self {
            path: rest.to_vec(),
        })
    }

    /// Relative reference from this module to `other`, optionally naming an item in it.
    ///
    /// The common prefix is dropped, one `super` is emitted per remaining
    /// component of `self`, followed by the remaining components of `other`.
    pub fn path_to(&self, other: &PathCursor, item: Option<&str>) -> Result<String> {
        let common = self
            .path
            .iter()
            .zip(&other.path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = Vec::new();
        parts.extend(std::iter::repeat_n(ASCEND, self.path.len() - common));
        parts.extend(other.path[common..].iter().map(String::as_str));

        let path = parts.join(SEPARATOR);
        match item {
            Some(item) if path.is_empty() => Ok(item.to_string()),
            Some(item) => Ok(format!("{path}{SEPARATOR}{item}")),
            None if path.is_empty() && self != other => Err(PathError::EmptyPath {
                from: self.to_string(),
                to: other.to_string(),
            }),
            None => Ok(path),
        }
    }

    /// Absolute location named by a reference written relative to this module.
    ///
    /// Inverse of [`PathCursor::path_to`] with an item: `super` pops a
    /// component, any other token pushes one, and the last token is the item.
    pub fn resolve_relative_item_path(&self, reference: &str) -> Result<ItemPath> {
        let mut tokens: Vec<&str> = reference.split(SEPARATOR).collect();
        let item = match tokens.pop() {
            Some(item) if !item.is_empty() && item != ASCEND => item,
            _ => {
                return Err(PathError::MissingItem {
                    reference: reference.to_string(),
                });
            }
        };

        let mut path = self.path.clone();
        for token in tokens {
            if token == ASCEND {
                if path.pop().is_none() {
                    return Err(PathError::AscendAboveRoot {
                        reference: reference.to_string(),
                        from: self.to_string(),
                    });
                }
            } else {
                path.push(token.to_string());
            }
        }

        Ok(ItemPath {
            cursor: PathCursor { path },
            item: item.to_string(),
        })
    }
}

impl fmt::Display for PathCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("crate")?;
        for component in &self.path {
            write!(f, "{SEPARATOR}{component}")?;
        }
        Ok(())
    }
}

impl ItemPath {
    pub fn new(cursor: PathCursor, item: impl Into<String>) -> Self {
        Self {
            cursor,
            item: item.into(),
        }
    }

    /// Reference to this item from the module at `from`.
    pub fn relative_to(&self, from: &PathCursor) -> Result<String> {
        from.path_to(&self.cursor, Some(&self.item))
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.cursor, self.item)
    }
}
