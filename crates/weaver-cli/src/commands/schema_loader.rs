//! Reading schema documents from disk or stdin.

use std::io::Read;
use std::path::{Path, PathBuf};

use weaver_compiler::Schema;

use super::CliError;

/// A parsed schema together with the text its spans point into.
pub struct LoadedSchema {
    pub path: PathBuf,
    pub text: String,
    pub schema: Schema,
}

impl LoadedSchema {
    pub fn display_path(&self) -> String {
        if is_stdin(&self.path) {
            "<stdin>".to_string()
        } else {
            self.path.display().to_string()
        }
    }
}

pub fn load_schema(path: &Path) -> Result<LoadedSchema, CliError> {
    let text = read_text(path)?;
    let schema = Schema::from_json(&text)?;
    tracing::info!(
        path = %path.display(),
        types = schema.graph.type_count(),
        namespaces = schema.graph.namespace_count(),
        "schema loaded"
    );
    Ok(LoadedSchema {
        path: path.to_path_buf(),
        text,
        schema,
    })
}

fn read_text(path: &Path) -> Result<String, CliError> {
    let read_error = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };

    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(read_error)?;
        return Ok(text);
    }

    std::fs::read_to_string(path).map_err(read_error)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
