use std::fmt::Write;

use crate::graph::TypeId;
use crate::scalar::Disposition;

use super::documentation::push_doc;
use super::session::Session;

impl Session<'_> {
    /// Type alias for a user-declared scalar, spelled as its standard base.
    pub(super) fn render_scalar(&mut self, id: TypeId, name: &str) -> String {
        let spelling = self.resolve_scalar(id, None, Disposition::Owned);

        let mut out = String::new();
        push_doc(&mut out, "", self.graph.ty(id).doc.as_deref());
        let _ = writeln!(out, "pub type {name} = {spelling};");
        out
    }
}
