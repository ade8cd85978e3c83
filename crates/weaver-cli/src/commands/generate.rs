use std::path::{Path, PathBuf};

use weaver_compiler::{Config, OutputFile, OutputMode};

use super::schema_loader::load_schema;
use super::{CliError, report_diagnostics};

pub struct GenerateArgs {
    pub schema_path: PathBuf,
    pub output: Option<PathBuf>,
    pub crate_path: Option<String>,
    pub single_file: bool,
    pub http: bool,
    pub omit_unreachable: bool,
    pub strict: bool,
    pub color: bool,
}

impl GenerateArgs {
    pub fn config(&self) -> Config {
        let output_mode = if self.single_file {
            OutputMode::SingleFile
        } else {
            OutputMode::Directory
        };
        let mut config = Config::new()
            .output_mode(output_mode)
            .http(self.http)
            .omit_unreachable_types(self.omit_unreachable)
            .generator(format!("weaver {}", env!("CARGO_PKG_VERSION")));
        if let Some(path) = &self.crate_path {
            config = config.crate_path(path.clone());
        }
        config
    }
}

pub fn run(args: GenerateArgs) -> Result<(), CliError> {
    let loaded = load_schema(&args.schema_path)?;
    let compilation = weaver_compiler::compile(&loaded.schema, &args.config())?;
    report_diagnostics(compilation.diagnostics(), &loaded, args.color, args.strict)?;

    let files = compilation.files();
    match &args.output {
        Some(dir) => write_files(dir, &files)?,
        None => {
            for file in &files {
                print!("{}", file.text);
            }
        }
    }

    Ok(())
}

/// Write `files` below `dir`, creating intermediate directories.
pub fn write_files(dir: &Path, files: &[OutputFile]) -> Result<(), CliError> {
    for file in files {
        let path = dir.join(&file.path);
        let write_error = |source| CliError::Write {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(&path, &file.text).map_err(write_error)?;
        tracing::debug!(path = %path.display(), bytes = file.text.len(), "wrote module");
    }

    tracing::info!(files = files.len(), dir = %dir.display(), "generated modules");
    Ok(())
}
