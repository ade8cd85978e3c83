//! Record rendering.

use std::fmt::Write;

use weaver_core::{Case, PathCursor};

use crate::diagnostics::DiagnosticKind;
use crate::error::{CompileError, Result};
use crate::graph::{Encoding, Field, LiteralValue, TypeId, TypeKind};
use crate::names;
use crate::recursion::recursive_fields;
use crate::scalar::{Disposition, STANDARD_NAMESPACE};

use super::documentation::{push_derives, push_doc};
use super::session::Session;

const INDENT: &str = "    ";

impl Session<'_> {
    /// `pub struct` for a record, plus an `impl` block for its literal fields.
    pub(super) fn render_record(
        &mut self,
        id: TypeId,
        name: &str,
        cursor: &PathCursor,
    ) -> Result<String> {
        let graph = self.graph;
        let record = graph.record(id).ok_or_else(|| CompileError::NotADeclaration {
            id,
            kind: graph.kind(id).short_name(),
        })?;
        let recursive = recursive_fields(graph, id);

        let mut body = String::new();
        let mut constants = String::new();
        let mut derive_default = true;
        let mut serde_as = false;

        for field in &record.fields {
            let field_kind = graph.kind(field.ty);
            if field_kind.is_value() {
                push_doc(&mut constants, INDENT, field.doc.as_deref());
                let _ = writeln!(constants, "{INDENT}{}", literal_constant(field, field_kind));
                continue;
            }

            let ident = names::value_name(&field.name);
            let preferred = format!("{name}{}", Case::parse(&field.name).pascal_case());
            let mut ty = self.resolve(field.ty, field.span, Disposition::Owned, cursor, &preferred)?;
            if recursive.contains(&field.name) {
                ty = format!("Box<{ty}>");
            }
            if field.optional {
                ty = format!("Option<{ty}>");
            }
            derive_default &= field.optional || matches!(field_kind, TypeKind::Array { .. });

            push_doc(&mut body, INDENT, field.doc.as_deref());
            if field.optional {
                let _ = writeln!(
                    body,
                    "{INDENT}#[serde(default, skip_serializing_if = \"Option::is_none\")]"
                );
            }
            if let Some(encoding) = &field.encoding
                && let Some(attribute) = self.encoding_attribute(field, encoding)
            {
                serde_as = true;
                let _ = writeln!(body, "{INDENT}{attribute}");
            }
            let wire = field.wire_name();
            if ident.trim_start_matches("r#") != wire {
                let _ = writeln!(body, "{INDENT}#[serde(rename = {wire:?})]");
            }
            let _ = writeln!(body, "{INDENT}pub {ident}: {ty},");
        }

        let serde = self.config.vendored("serde");
        let deserialize = format!("{serde}::Deserialize");
        let serialize = format!("{serde}::Serialize");
        let mut derives = vec!["Debug", "Clone", "PartialEq"];
        if derive_default {
            derives.push("Default");
        }
        derives.extend([deserialize.as_str(), serialize.as_str()]);

        let mut out = String::new();
        push_doc(&mut out, "", graph.ty(id).doc.as_deref());
        if serde_as {
            let serde_with = self.config.vendored("serde_with");
            let _ = writeln!(out, "#[{serde_with}::serde_as(crate = \"{serde_with}\")]");
        }
        push_derives(&mut out, &derives, Some(&serde));
        if body.is_empty() {
            let _ = writeln!(out, "pub struct {name} {{}}");
        } else {
            let _ = write!(out, "pub struct {name} {{\n{body}}}\n");
        }

        if !constants.is_empty() {
            let _ = write!(out, "\nimpl {name} {{\n{constants}}}\n");
        }

        Ok(out)
    }

    /// `serde_as` attribute for a field with a supported encoding; reports the rest.
    fn encoding_attribute(&mut self, field: &Field, encoding: &Encoding) -> Option<String> {
        let graph = self.graph;
        let target = graph.qualified_name(field.ty);
        let wire = graph.qualified_name(encoding.ty);

        let date_time = format!("{STANDARD_NAMESPACE}.utcDateTime");
        let wire_ok = [
            format!("{STANDARD_NAMESPACE}.int32"),
            format!("{STANDARD_NAMESPACE}.int64"),
        ];
        let supported = target.as_deref() == Some(date_time.as_str())
            && encoding.name == "unixTimestamp"
            && wire.as_ref().is_some_and(|w| wire_ok.contains(w));

        if !supported {
            let detail = format!(
                "`{}` of `{}` as `{}`",
                encoding.name,
                target.unwrap_or_else(|| field.ty.to_string()),
                wire.unwrap_or_else(|| encoding.ty.to_string()),
            );
            self.diagnostics
                .report(DiagnosticKind::UnrecognizedEncoding, field.span)
                .message(detail)
                .emit();
            return None;
        }

        let adapter = self.config.vendored("serde_with::TimestampSeconds<i64>");
        let adapter = if field.optional {
            format!("Option<{adapter}>")
        } else {
            adapter
        };
        Some(format!("#[serde_as(as = \"{adapter}\")]"))
    }
}

/// `pub const` for a field whose type is a single value.
fn literal_constant(field: &Field, kind: &TypeKind) -> String {
    let name = names::const_name(&field.name);
    let (ty, value) = match kind {
        TypeKind::Literal { value } => {
            let ty = match value {
                LiteralValue::String(_) => "&'static str",
                LiteralValue::Bool(_) => "bool",
                LiteralValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                    if *n >= f64::from(i32::MIN) && *n <= f64::from(i32::MAX) {
                        "i32"
                    } else {
                        "i64"
                    }
                }
                LiteralValue::Number(_) => "f64",
            };
            (ty, value.to_rust())
        }
        _ => ("()", "()".to_string()),
    };
    format!("pub const {name}: {ty} = {value};")
}
