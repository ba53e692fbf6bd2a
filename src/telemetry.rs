//! Optional structured tracing to stderr.
//!
//! Compiled in with the `trace` feature. The filter comes from `GO_DOCKER_RUN_LOG`
//! (`tracing_subscriber::EnvFilter` syntax) and defaults to `warn`. Without the feature
//! `init` is a no-op so callers never need their own cfg gates.

#[cfg(feature = "trace")]
use once_cell::sync::OnceCell;

pub const LOG_ENV: &str = "GO_DOCKER_RUN_LOG";

#[cfg(feature = "trace")]
static INIT: OnceCell<()> = OnceCell::new();

#[cfg(feature = "trace")]
pub fn init() {
    use tracing_subscriber::EnvFilter;

    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
        let res = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
        if let Err(e) = res {
            let use_err = crate::color_enabled_stderr();
            crate::log_warn_stderr(
                use_err,
                &format!("go-docker-run: telemetry: subscriber already installed: {e}"),
            );
        }
    });
}

#[cfg(not(feature = "trace"))]
pub fn init() {}
