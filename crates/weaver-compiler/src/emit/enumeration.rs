use std::fmt::Write;

use crate::error::{CompileError, Result};
use crate::graph::{TypeId, TypeKind};
use crate::names::{self, NameScope};

use super::documentation::{push_derives, push_doc};
use super::session::Session;

impl Session<'_> {
    /// Unit-variant enum with serde renames and a `Display` impl.
    ///
    /// Members without a value use their own name on the wire. Numeric
    /// values are written as strings.
    pub(super) fn render_enum(&mut self, id: TypeId, name: &str) -> Result<String> {
        let graph = self.graph;
        let TypeKind::Enum(enumeration) = graph.kind(id) else {
            return Err(CompileError::NotADeclaration {
                id,
                kind: graph.kind(id).short_name(),
            });
        };

        let serde = self.config.vendored("serde");
        let deserialize = format!("{serde}::Deserialize");
        let serialize = format!("{serde}::Serialize");

        let mut out = String::new();
        push_doc(&mut out, "", graph.ty(id).doc.as_deref());
        push_derives(
            &mut out,
            &[
                "Debug",
                "Clone",
                "Copy",
                "PartialEq",
                "Eq",
                "Hash",
                &deserialize,
                &serialize,
            ],
            Some(&serde),
        );
        let _ = writeln!(out, "pub enum {name} {{");

        let mut arms = String::new();
        let mut scope = NameScope::new();
        for (index, member) in enumeration.members.iter().enumerate() {
            let mut variant = names::type_name(&member.name);
            if variant.is_empty() {
                variant = format!("Member{index}");
            }
            let variant = scope.claim(&variant);
            let wire = member
                .value
                .as_ref()
                .map(|value| value.to_wire())
                .unwrap_or_else(|| member.name.clone());

            push_doc(&mut out, "    ", member.doc.as_deref());
            if variant.trim_start_matches("r#") != wire {
                let _ = writeln!(out, "    #[serde(rename = {wire:?})]");
            }
            let _ = writeln!(out, "    {variant},");
            let _ = writeln!(arms, "            {name}::{variant} => f.write_str({wire:?}),");
        }
        out.push_str("}\n\n");

        let _ = writeln!(out, "impl ::core::fmt::Display for {name} {{");
        let _ = writeln!(
            out,
            "    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {{"
        );
        let _ = writeln!(out, "        match *self {{");
        out.push_str(&arms);
        out.push_str("        }\n    }\n}\n");

        Ok(out)
    }
}
