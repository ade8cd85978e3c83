//! Configuration for Rust emission.

/// How the module tree is laid out on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One file per non-inline module (`mod.rs` for modules with file children).
    #[default]
    Directory,
    /// Everything inlined into a single root file.
    SingleFile,
}

/// Configuration for Rust emission.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path of the host crate that re-exports serde, chrono and the runtime traits
    pub(crate) crate_path: String,
    /// File layout of the emitted module tree
    pub(crate) output_mode: OutputMode,
    /// Whether to emit the `http` module (router, operations, server, auth)
    pub(crate) http: bool,
    /// Emit only declarations reachable from operations instead of whole namespaces
    pub(crate) omit_unreachable_types: bool,
    /// Name written into the header comment of every file
    pub(crate) generator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crate_path: "::weaver_runtime".to_string(),
            output_mode: OutputMode::default(),
            http: true,
            omit_unreachable_types: false,
            generator: "weaver".to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host crate path (e.g. `::my_runtime` or `crate::runtime`).
    pub fn crate_path(mut self, value: impl Into<String>) -> Self {
        self.crate_path = value.into();
        self
    }

    /// Set the output layout.
    pub fn output_mode(mut self, value: OutputMode) -> Self {
        self.output_mode = value;
        self
    }

    /// Set whether to emit the HTTP module.
    pub fn http(mut self, value: bool) -> Self {
        self.http = value;
        self
    }

    /// Set whether to skip declarations that no operation reaches.
    pub fn omit_unreachable_types(mut self, value: bool) -> Self {
        self.omit_unreachable_types = value;
        self
    }

    /// Set the generator name written into file headers.
    pub fn generator(mut self, value: impl Into<String>) -> Self {
        self.generator = value.into();
        self
    }

    pub(crate) fn host(&self, path: &str) -> String {
        format!("{}::{}", self.crate_path, path)
    }

    pub(crate) fn vendored(&self, path: &str) -> String {
        format!("{}::vendored::{}", self.crate_path, path)
    }
}
