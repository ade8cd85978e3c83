//! Union rendering.
//!
//! A union becomes an enum with one tuple variant per payload type. It is
//! internally tagged when it has a discriminator and every rendered variant
//! is named; otherwise serde tries the variants in order (`untagged`).
//! Partial unions render a subset of the variants under a new name.

use std::fmt::Write;

use weaver_core::PathCursor;

use crate::error::{CompileError, Result};
use crate::graph::{Intrinsic, TypeId, TypeKind, UnionVariant};
use crate::names::{self, NameScope};
use crate::recursion::recursive_variants;
use crate::scalar::Disposition;

use super::documentation::{push_derives, push_doc};
use super::session::Session;

impl Session<'_> {
    pub(super) fn render_union(
        &mut self,
        id: TypeId,
        subset: Option<&[usize]>,
        name: &str,
        cursor: &PathCursor,
    ) -> Result<String> {
        let graph = self.graph;
        let TypeKind::Union(union) = graph.kind(id) else {
            return Err(CompileError::NotADeclaration {
                id,
                kind: graph.kind(id).short_name(),
            });
        };

        let selected: Vec<usize> = match subset {
            Some(subset) => subset.to_vec(),
            None => (0..union.variants.len()).collect(),
        };
        let recursive = recursive_variants(graph, id);
        let discriminator = union
            .discriminator
            .as_deref()
            .filter(|_| selected.iter().all(|&i| union.variants[i].name.is_some()));

        let serde = self.config.vendored("serde");
        let deserialize = format!("{serde}::Deserialize");
        let serialize = format!("{serde}::Serialize");

        let mut out = String::new();
        if subset.is_none() {
            push_doc(&mut out, "", graph.ty(id).doc.as_deref());
        }
        push_derives(
            &mut out,
            &["Debug", "Clone", "PartialEq", &deserialize, &serialize],
            Some(&serde),
        );
        match discriminator {
            Some(tag) => {
                let _ = writeln!(out, "#[serde(tag = {tag:?})]");
            }
            None => out.push_str("#[serde(untagged)]\n"),
        }
        let _ = writeln!(out, "pub enum {name} {{");

        let mut scope = NameScope::new();
        for &index in &selected {
            let variant = &union.variants[index];
            let variant_name = scope.claim(&self.variant_name(index, variant));

            if discriminator.is_some()
                && let Some(key) = &variant.name
                && variant_name.trim_start_matches("r#") != key
            {
                let _ = writeln!(out, "    #[serde(rename = {key:?})]");
            }

            match graph.kind(variant.ty) {
                TypeKind::Intrinsic {
                    name: Intrinsic::Null,
                } => {
                    let with = self.config.host("serialize::null_variant");
                    let _ = writeln!(out, "    #[serde(with = \"{with}\")]");
                    let _ = writeln!(out, "    {variant_name},");
                }
                TypeKind::Literal { value } => {
                    if discriminator.is_none() {
                        let _ = writeln!(out, "    #[serde(rename = {:?})]", value.to_wire());
                    }
                    let _ = writeln!(out, "    {variant_name},");
                }
                _ => {
                    let preferred = format!("{name}{}", variant_name.trim_start_matches("r#"));
                    let mut ty =
                        self.resolve(variant.ty, None, Disposition::Owned, cursor, &preferred)?;
                    if recursive.contains(&index) {
                        ty = format!("Box<{ty}>");
                    }
                    let _ = writeln!(out, "    {variant_name}({ty}),");
                }
            }
        }
        out.push_str("}\n");

        Ok(out)
    }

    /// Variant identifier: explicit name, else derived from the payload type.
    ///
    /// Not unique on its own; the caller claims it in the enum's scope.
    fn variant_name(&self, index: usize, variant: &UnionVariant) -> String {
        if let Some(name) = variant.name.as_deref().map(names::type_name)
            && !name.is_empty()
        {
            return name;
        }

        let graph = self.graph;
        let derived = match graph.kind(variant.ty) {
            TypeKind::Array { element } => graph
                .kind(*element)
                .declared_name()
                .map(|name| format!("{}Array", name.pascal_case())),
            TypeKind::Literal { value } => Some(names::type_name(&value.to_wire())),
            TypeKind::Intrinsic {
                name: Intrinsic::Null,
            } => Some("Null".to_string()),
            kind => kind
                .declared_name()
                .map(|name| names::escape_keyword(&name.pascal_case())),
        };

        derived
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Anonymous{index}"))
    }
}
