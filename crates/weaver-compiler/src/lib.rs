//! Weaver compiler: lowers a service type graph into a Rust module tree.
//!
//! Pipeline:
//! - `graph` - the input model (namespaces, types, HTTP service), JSON-readable
//! - `emit` - declaration graph driver and type reference resolution
//! - `recursion` - detection of fields that need boxing
//! - `http` - route trie, router, per-endpoint operations, authentication
//! - `module` - output module tree and file layout
//! - `diagnostics` - recoverable problems in the schema

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod graph;
pub mod http;
pub mod module;
pub mod names;
pub mod recursion;
pub mod scalar;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod module_tests;
#[cfg(test)]
mod names_tests;
#[cfg(test)]
mod recursion_tests;

pub use config::{Config, OutputMode};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use error::{CompileError, Result};
pub use graph::{Schema, Span, TypeGraph};
pub use module::{ModuleTree, OutputFile};

use emit::Session;

/// Output of a successful compilation.
///
/// Holds the rendered module tree plus whatever diagnostics were reported
/// along the way; a compilation with error diagnostics still has output.
#[derive(Debug)]
pub struct Compilation {
    modules: ModuleTree,
    diagnostics: Diagnostics,
    output_mode: OutputMode,
    generator: String,
}

impl Compilation {
    /// Rendered source files, root module first.
    pub fn files(&self) -> Vec<OutputFile> {
        self.modules.render_files(self.output_mode, &self.generator)
    }

    pub fn modules(&self) -> &ModuleTree {
        &self.modules
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

/// Compile `schema` into Rust modules.
pub fn compile(schema: &Schema, config: &Config) -> Result<Compilation> {
    let mut session = Session::new(&schema.graph, &schema.service, config);
    session.run()?;
    let (modules, diagnostics) = session.finish();

    Ok(Compilation {
        modules,
        diagnostics,
        output_mode: config.output_mode,
        generator: config.generator.clone(),
    })
}
