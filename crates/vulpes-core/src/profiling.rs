//! Profiling utilities based on the `puffin` crate.

use std::sync::OnceLock;

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Address the puffin HTTP server listens on.
pub const PUFFIN_ADDR: &str = "0.0.0.0:8585";

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingBackend {
    /// Scopes are compiled in but not recorded.
    #[default]
    Off,
    /// Record scopes in-process only (useful with an embedded viewer).
    InProcess,
    /// Send profiling data to puffin_viewer via HTTP.
    PuffinHttp,
}

static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Initialize profiling with the specified backend.
///
/// # Example
/// ```no_run
/// use vulpes_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    match backend {
        ProfilingBackend::Off => puffin::set_scopes_on(false),
        ProfilingBackend::InProcess => puffin::set_scopes_on(true),
        ProfilingBackend::PuffinHttp => {
            puffin::set_scopes_on(true);
            match puffin_http::Server::new(PUFFIN_ADDR) {
                Ok(server) => {
                    tracing::info!("Puffin profiler server started on http://{PUFFIN_ADDR}");
                    let _ = PROFILING_SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server: {}", e);
                }
            }
        }
    }
}

/// Mark the start of a new profiling frame. The canvas calls this once per render.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
