//! Translation of schema scalars into Rust spellings.
//!
//! The table is keyed by fully qualified scalar name and resolved to type
//! identities once per session. Custom scalars (`scalar petId extends string`)
//! are not in the table; the resolver walks their `base` chain until it finds
//! a registered scalar.

use std::collections::HashMap;

use crate::config::Config;
use crate::graph::{TypeGraph, TypeId, TypeKind};

/// How a reference is going to be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Stored by value (fields, return types).
    Owned,
    /// Borrowed from elsewhere (`&str`, `&[T]`).
    Borrowed,
    /// Accepted as a function argument (`impl AsRef<str>`).
    Param,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarSpelling {
    pub owned: String,
    pub borrowed: String,
    pub param: String,
}

impl ScalarSpelling {
    pub fn new(
        owned: impl Into<String>,
        borrowed: impl Into<String>,
        param: impl Into<String>,
    ) -> Self {
        Self {
            owned: owned.into(),
            borrowed: borrowed.into(),
            param: param.into(),
        }
    }

    /// Same spelling in every disposition (`Copy` types).
    pub fn copy(spelling: impl Into<String>) -> Self {
        let spelling = spelling.into();
        Self::new(spelling.clone(), spelling.clone(), spelling)
    }

    pub fn get(&self, disposition: Disposition) -> &str {
        match disposition {
            Disposition::Owned => &self.owned,
            Disposition::Borrowed => &self.borrowed,
            Disposition::Param => &self.param,
        }
    }
}

/// Qualified name prefix of the schema language's standard library.
pub const STANDARD_NAMESPACE: &str = "TypeSpec";

/// `(scalar, owned, borrowed, param)`; `$` expands to the vendored crate root.
const STANDARD_SCALARS: &[(&str, &str, &str, &str)] = &[
    ("bytes", "Vec<u8>", "&[u8]", "impl AsRef<[u8]>"),
    ("boolean", "bool", "bool", "bool"),
    ("string", "String", "&str", "impl AsRef<str>"),
    ("url", "String", "&str", "impl AsRef<str>"),
    ("float", "f64", "f64", "f64"),
    ("float32", "f32", "f32", "f32"),
    ("float64", "f64", "f64", "f64"),
    ("integer", "isize", "isize", "isize"),
    ("safeint", "i64", "i64", "i64"),
    ("int8", "i8", "i8", "i8"),
    ("int16", "i16", "i16", "i16"),
    ("int32", "i32", "i32", "i32"),
    ("int64", "i64", "i64", "i64"),
    ("uint8", "u8", "u8", "u8"),
    ("uint16", "u16", "u16", "u16"),
    ("uint32", "u32", "u32", "u32"),
    ("uint64", "u64", "u64", "u64"),
    (
        "numeric",
        "$::bigdecimal::BigDecimal",
        "&$::bigdecimal::BigDecimal",
        "impl Into<$::bigdecimal::BigDecimal>",
    ),
    (
        "decimal",
        "$::bigdecimal::BigDecimal",
        "&$::bigdecimal::BigDecimal",
        "impl Into<$::bigdecimal::BigDecimal>",
    ),
    (
        "decimal128",
        "$::bigdecimal::BigDecimal",
        "&$::bigdecimal::BigDecimal",
        "impl Into<$::bigdecimal::BigDecimal>",
    ),
    (
        "plainDate",
        "$::chrono::NaiveDate",
        "$::chrono::NaiveDate",
        "$::chrono::NaiveDate",
    ),
    (
        "plainTime",
        "$::chrono::NaiveTime",
        "$::chrono::NaiveTime",
        "$::chrono::NaiveTime",
    ),
    (
        "utcDateTime",
        "$::chrono::DateTime<$::chrono::Utc>",
        "$::chrono::DateTime<$::chrono::Utc>",
        "$::chrono::DateTime<$::chrono::Utc>",
    ),
    (
        "offsetDateTime",
        "$::chrono::DateTime<$::chrono::FixedOffset>",
        "$::chrono::DateTime<$::chrono::FixedOffset>",
        "$::chrono::DateTime<$::chrono::FixedOffset>",
    ),
    (
        "duration",
        "$::chrono::Duration",
        "$::chrono::Duration",
        "$::chrono::Duration",
    ),
];

#[derive(Clone, Debug, Default)]
pub struct ScalarTable {
    spellings: HashMap<TypeId, ScalarSpelling>,
}

impl ScalarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the standard library scalars present in `graph`.
    pub fn standard(graph: &TypeGraph, config: &Config) -> Self {
        let vendored = format!("{}::vendored", config.crate_path);
        let mut table = Self::new();

        for (id, node) in graph.types() {
            if !matches!(node.kind, TypeKind::Scalar(_)) {
                continue;
            }
            let Some(qualified) = graph.qualified_name(id) else {
                continue;
            };
            let Some(name) = qualified
                .strip_prefix(STANDARD_NAMESPACE)
                .and_then(|rest| rest.strip_prefix('.'))
            else {
                continue;
            };
            let Some(&(_, owned, borrowed, param)) =
                STANDARD_SCALARS.iter().find(|(scalar, ..)| *scalar == name)
            else {
                continue;
            };

            table.insert(
                id,
                ScalarSpelling::new(
                    owned.replace('$', &vendored),
                    borrowed.replace('$', &vendored),
                    param.replace('$', &vendored),
                ),
            );
        }

        table
    }

    pub fn insert(&mut self, id: TypeId, spelling: ScalarSpelling) {
        self.spellings.insert(id, spelling);
    }

    pub fn get(&self, id: TypeId) -> Option<&ScalarSpelling> {
        self.spellings.get(&id)
    }

    pub fn len(&self) -> usize {
        self.spellings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spellings.is_empty()
    }
}
