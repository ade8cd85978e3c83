use std::path::PathBuf;

use weaver_compiler::Config;

use super::schema_loader::load_schema;
use super::{CliError, report_diagnostics};

pub struct CheckArgs {
    pub schema_path: PathBuf,
    pub http: bool,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) -> Result<(), CliError> {
    let loaded = load_schema(&args.schema_path)?;
    let config = Config::new().http(args.http);
    let compilation = weaver_compiler::compile(&loaded.schema, &config)?;
    report_diagnostics(compilation.diagnostics(), &loaded, args.color, args.strict)?;

    // Silent on success (like cargo check)
    Ok(())
}
