//! Process-wide runtime configuration for hosts embedding Vulpes.

use crate::{logging, profiling};

/// Logging and profiling settings applied once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// `tracing` filter directive. `None` reads `RUST_LOG`.
    pub log_filter: Option<String>,
    pub profiling: profiling::ProfilingBackend,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: None,
            profiling: profiling::ProfilingBackend::Off,
        }
    }
}

impl Config {
    pub fn with_log_filter(mut self, directive: impl Into<String>) -> Self {
        self.log_filter = Some(directive.into());
        self
    }

    pub fn with_profiling(mut self, backend: profiling::ProfilingBackend) -> Self {
        self.profiling = backend;
        self
    }
}

/// Install logging and profiling according to `config`.
pub fn init(config: &Config) {
    match &config.log_filter {
        Some(directive) => logging::init_with_filter(directive),
        None => logging::init(),
    }
    profiling::init_profiling(config.profiling);
}
