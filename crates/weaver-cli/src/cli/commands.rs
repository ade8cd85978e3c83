//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("weaver")
        .about("Compile service schemas into Rust modules")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(generate_command())
        .subcommand(check_command())
        .subcommand(routes_command())
}

/// Generate Rust modules from a schema.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate Rust modules from a schema")
        .after_help(
            r#"EXAMPLES:
  weaver generate schema.json                   # single file on stdout
  weaver generate schema.json -o src/generated  # module tree on disk
  weaver generate schema.json --no-http         # models only
  weaver generate - < schema.json               # schema from stdin"#,
        )
        .arg(schema_path_arg())
        .arg(output_dir_arg())
        .arg(crate_path_arg())
        .arg(single_file_arg())
        .arg(no_http_arg())
        .arg(omit_unreachable_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Validate a schema without writing anything.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a schema")
        .after_help(
            r#"EXAMPLES:
  weaver check schema.json           # errors only
  weaver check schema.json --strict  # warnings fail too"#,
        )
        .arg(schema_path_arg())
        .arg(no_http_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Show the HTTP route trie of a schema.
pub fn routes_command() -> Command {
    Command::new("routes")
        .about("Show the HTTP routes of a schema")
        .after_help(
            r#"EXAMPLES:
  weaver routes schema.json                       # route trie
  weaver routes schema.json --format json         # flat endpoint list
  weaver routes schema.json --resolve 'GET /pets/7'"#,
        )
        .arg(schema_path_arg())
        .arg(format_arg())
        .arg(resolve_arg())
}
