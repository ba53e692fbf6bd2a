#![allow(clippy::module_name_repetitions)]
//! Mount layout for the toolchain container.

use std::fs;
use std::path::Path;

/// GOPATH source root inside the container.
pub const CONTAINER_SRC_ROOT: &str = "/go/src";

/// Module cache location inside the container.
pub const CONTAINER_MOD_CACHE: &str = "/go/pkg/mod";

/// Where the project is mounted and where the command runs: `/go/src/<module>`.
pub fn container_module_path(module_name: &str) -> String {
    format!("{CONTAINER_SRC_ROOT}/{module_name}")
}

/// `-v<host>:<container>` with no space between flag and value.
pub fn volume_flag(host: &Path, container: &str) -> String {
    format!("-v{}:{container}", host.display())
}

/// Describe why a host mount source looks unusable, if it does.
///
/// Advisory only: the invocation is printed regardless, docker creates missing
/// directories on its own.
pub fn mount_source_problem(host: &Path, purpose: &str) -> Option<String> {
    if !host.is_absolute() {
        return Some(format!(
            "go-docker-run: warning: {} is not an absolute path: {}",
            purpose,
            host.display()
        ));
    }
    match fs::metadata(host) {
        Ok(md) if md.is_dir() => None,
        Ok(_) => Some(format!(
            "go-docker-run: warning: {} is not a directory: {}",
            purpose,
            host.display()
        )),
        Err(e) => Some(format!(
            "go-docker-run: warning: {} is not accessible: {}: {}",
            purpose,
            host.display(),
            e
        )),
    }
}

/// Print a warning to stderr for each unusable mount source.
pub fn warn_unusable_mounts(mounts: &[(&Path, &str)]) {
    let use_err = crate::color_enabled_stderr();
    for (host, purpose) in mounts {
        if let Some(msg) = mount_source_problem(host, purpose) {
            #[cfg(feature = "trace")]
            tracing::warn!(host = %host.display(), purpose, "unusable mount source");
            crate::log_warn_stderr(use_err, &msg);
        }
    }
}
