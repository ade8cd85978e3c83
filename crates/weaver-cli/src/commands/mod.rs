pub mod check;
pub mod generate;
pub mod routes;
pub mod schema_loader;

#[cfg(test)]
mod routes_tests;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use weaver_compiler::http::RouteMiss;
use weaver_compiler::{CompileError, Diagnostics, DiagnosticsPrinter};

use schema_loader::LoadedSchema;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("could not compile `{path}` ({errors} errors, {warnings} warnings)")]
    Rejected {
        path: String,
        errors: usize,
        warnings: usize,
    },

    #[error("the schema declares no HTTP service")]
    NoHttpService,

    #[error("invalid request `{0}`, expected a method and a path such as 'GET /pets'")]
    InvalidRequest(String),

    #[error("`{request}`: {miss}")]
    NoRoute { request: String, miss: RouteMiss },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Print `diagnostics` to stderr and fail when they block the command.
pub(crate) fn report_diagnostics(
    diagnostics: &Diagnostics,
    schema: &LoadedSchema,
    color: bool,
    strict: bool,
) -> Result<(), CliError> {
    let path = schema.display_path();
    if !diagnostics.is_empty() {
        let rendered = DiagnosticsPrinter::new(diagnostics)
            .source(&schema.text)
            .path(&path)
            .colored(color)
            .render();
        eprintln!("{}", rendered);
    }

    let blocked = diagnostics.has_errors() || (strict && diagnostics.has_warnings());
    if blocked {
        return Err(CliError::Rejected {
            path,
            errors: diagnostics.error_count(),
            warnings: diagnostics.warning_count(),
        });
    }

    Ok(())
}
