//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Schema document (positional, `-` reads stdin).
pub fn schema_path_arg() -> Arg {
    Arg::new("schema_path")
        .value_name("SCHEMA")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Schema JSON file (use - for stdin)")
}

/// Output directory (-o/--output).
pub fn output_dir_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Write generated modules under DIR (default: single file on stdout)")
}

/// Host crate path (--crate-path).
pub fn crate_path_arg() -> Arg {
    Arg::new("crate_path")
        .long("crate-path")
        .value_name("PATH")
        .help("Path of the runtime crate in generated code (default: ::weaver_runtime)")
}

/// Inline every module into one file (--single-file).
pub fn single_file_arg() -> Arg {
    Arg::new("single_file")
        .long("single-file")
        .action(ArgAction::SetTrue)
        .help("Inline all modules into a single mod.rs")
}

/// Skip the HTTP module (--no-http).
pub fn no_http_arg() -> Arg {
    Arg::new("no_http")
        .long("no-http")
        .action(ArgAction::SetTrue)
        .help("Don't emit the http module (router, operations, server, auth)")
}

/// Emit only reachable declarations (--omit-unreachable).
pub fn omit_unreachable_arg() -> Arg {
    Arg::new("omit_unreachable")
        .long("omit-unreachable")
        .action(ArgAction::SetTrue)
        .help("Only emit declarations reachable from operations")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Route listing format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("tree")
        .value_parser(["tree", "json"])
        .help("Output format")
}

/// Request to match against the routes (--resolve).
pub fn resolve_arg() -> Arg {
    Arg::new("resolve")
        .long("resolve")
        .value_name("REQUEST")
        .help("Resolve a request such as 'GET /pets/7' instead of listing routes")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for verbose, -vv for very verbose)")
}
