use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

/// The stderr subscriber, installed before any command line is parsed so the
/// parser's own events are visible under `RUST_LOG`.
pub struct Logging {
    handle: Option<reload::Handle<EnvFilter, Registry>>,
    from_env: bool,
}

impl Logging {
    /// Install the subscriber with `RUST_LOG`, or `warn` when it is unset.
    pub fn init() -> Self {
        let env = EnvFilter::try_from_default_env().ok();
        let from_env = env.is_some();
        let (filter, handle) =
            reload::Layer::new(env.unwrap_or_else(|| EnvFilter::new("warn")));
        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .is_ok();
        Self {
            handle: installed.then_some(handle),
            from_env,
        }
    }

    /// No subscriber of its own; commands run in-process by unit tests.
    #[cfg(test)]
    pub fn disabled() -> Self {
        Self {
            handle: None,
            from_env: false,
        }
    }

    /// Raise the filter to `debug` for `--verbose`. `RUST_LOG` wins.
    pub fn set_verbose(&self, verbose: bool) {
        if !verbose || self.from_env {
            return;
        }
        if let Some(handle) = &self.handle {
            if let Err(err) = handle.reload(EnvFilter::new("debug")) {
                tracing::warn!(%err, "failed to raise log level");
            }
        }
    }
}
