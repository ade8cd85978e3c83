//! Doc comment rendering.

use std::fmt::Write;

/// Append `doc` as `///` lines, each prefixed with `indent`.
pub(super) fn push_doc(out: &mut String, indent: &str, doc: Option<&str>) {
    let Some(doc) = doc else {
        return;
    };
    for line in doc.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            let _ = writeln!(out, "{indent}///");
        } else {
            let _ = writeln!(out, "{indent}/// {line}");
        }
    }
}

/// `#[derive(...)]` line followed by the serde crate override when serde is derived.
pub(super) fn push_derives(out: &mut String, derives: &[&str], serde: Option<&str>) {
    let _ = writeln!(out, "#[derive({})]", derives.join(", "));
    if let Some(serde) = serde {
        let _ = writeln!(out, "#[serde(crate = \"{serde}\")]");
    }
}
