//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::routes::{RoutesArgs, RoutesFormat};

pub struct GenerateParams {
    pub schema_path: PathBuf,
    pub output: Option<PathBuf>,
    pub crate_path: Option<String>,
    pub single_file: bool,
    pub no_http: bool,
    pub omit_unreachable: bool,
    pub strict: bool,
    pub color: ColorChoice,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: schema_path(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            crate_path: m.get_one::<String>("crate_path").cloned(),
            single_file: m.get_flag("single_file"),
            no_http: m.get_flag("no_http"),
            omit_unreachable: m.get_flag("omit_unreachable"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            schema_path: p.schema_path,
            // Without an output directory everything goes to stdout as one file.
            single_file: p.single_file || p.output.is_none(),
            output: p.output,
            crate_path: p.crate_path,
            http: !p.no_http,
            omit_unreachable: p.omit_unreachable,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub schema_path: PathBuf,
    pub no_http: bool,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: schema_path(m),
            no_http: m.get_flag("no_http"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            schema_path: p.schema_path,
            http: !p.no_http,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct RoutesParams {
    pub schema_path: PathBuf,
    pub format: RoutesFormat,
    pub resolve: Option<String>,
}

impl RoutesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let format = match m.get_one::<String>("format").map(|s| s.as_str()) {
            Some("json") => RoutesFormat::Json,
            _ => RoutesFormat::Tree,
        };
        Self {
            schema_path: schema_path(m),
            format,
            resolve: m.get_one::<String>("resolve").cloned(),
        }
    }
}

impl From<RoutesParams> for RoutesArgs {
    fn from(p: RoutesParams) -> Self {
        Self {
            schema_path: p.schema_path,
            format: p.format,
            resolve: p.resolve,
        }
    }
}

fn schema_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("schema_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
