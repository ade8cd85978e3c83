//! Tracing setup for the CLI.
//!
//! Logs go to stderr so generated code on stdout stays clean. `WEAVER_LOG`
//! takes precedence over `-v`, using the usual `EnvFilter` directive syntax.

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const ENV_VAR: &str = "WEAVER_LOG";

/// Filter directive for a `-v` count.
pub fn directive_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "weaver_compiler=info,weaver=info",
        2 => "weaver_compiler=debug,weaver=debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8) {
    let base_filter =
        std::env::var(ENV_VAR).unwrap_or_else(|_| directive_for(verbose).to_string());
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
