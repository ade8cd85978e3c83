use std::fmt::Write;

use crate::diagnostics::DiagnosticKind;
use crate::emit::Session;
use crate::graph::{ApiKeyLocation, AuthKind, AuthScheme};
use crate::module::{ModuleId, Visibility};
use crate::names;

impl Session<'_> {
    /// Credential type for the service's authentication scheme.
    ///
    /// Only a single API key sent in a header is supported.
    pub(super) fn emit_auth(&mut self, http_module: ModuleId, schemes: &[AuthScheme]) {
        let scheme = match schemes {
            [] => return,
            [scheme] => scheme,
            _ => {
                let ids: Vec<String> = schemes.iter().map(|s| format!("`{}`", s.id)).collect();
                self.diagnostics
                    .report(DiagnosticKind::UnsupportedAuthentication, None)
                    .message(format!("more than one scheme ({})", ids.join(", ")))
                    .hint("declare a single API key header scheme")
                    .emit();
                return;
            }
        };

        let AuthKind::ApiKey {
            location: ApiKeyLocation::Header,
            name: header,
        } = &scheme.kind
        else {
            self.diagnostics
                .report(DiagnosticKind::UnsupportedAuthentication, None)
                .message(format!("`{}` ({})", scheme.id, scheme.kind.describe()))
                .emit();
            return;
        };

        let module = self
            .modules
            .add_child(http_module, "auth", Visibility::Public, true);
        self.modules.module_mut(module).doc = Some("Credentials accepted by the service.".to_string());

        let name = match scheme.id.strip_suffix("Auth") {
            Some(stem) if !stem.is_empty() => names::type_name(stem),
            _ => names::type_name(&scheme.id),
        };
        self.modules.push_text(module, render_api_key(&name, header));
        tracing::trace!(scheme = %scheme.id, "authentication emitted");
    }
}

fn render_api_key(name: &str, header: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "/// API key sent in the `{header}` header.");
    out.push_str("#[derive(Clone, PartialEq, Eq)]\n");
    let _ = writeln!(out, "pub struct {name} {{");
    out.push_str("    key: String,\n");
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl {name} {{");
    let _ = writeln!(out, "    pub const HEADER_NAME: &'static str = {header:?};");
    out.push('\n');
    out.push_str("    pub fn new(key: impl Into<String>) -> Self {\n");
    out.push_str("        Self { key: key.into() }\n");
    out.push_str("    }\n\n");
    out.push_str("    pub fn header_name(&self) -> &'static str {\n");
    out.push_str("        Self::HEADER_NAME\n");
    out.push_str("    }\n\n");
    out.push_str("    pub fn as_header_value(&self) -> &str {\n");
    out.push_str("        &self.key\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl ::core::fmt::Debug for {name} {{");
    out.push_str(
        "    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {\n",
    );
    let _ = writeln!(
        out,
        "        f.debug_struct({name:?}).field(\"key\", &\"<redacted>\").finish()"
    );
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}
