//! Compose a `docker run` invocation that mounts the current Go module and the host
//! module cache into a toolchain container.
//!
//! Pipeline: resolve the working directory, read the module name from `go.mod`,
//! resolve the module cache, then render [`CommandInfo`]. Nothing is executed.

mod color;
pub mod docker;
pub mod env;
mod errors;
pub mod manifest;
pub mod telemetry;

use std::path::Path;

use anyhow::{Context, Result};

pub use color::*;
pub use docker::{CommandInfo, Payload, PayloadError};
pub use env::{resolve_working_dir, CacheSettings};
pub use errors::*;
pub use manifest::read_module_name;

/// Build the invocation for the module in `working_dir`.
///
/// The manifest is read before the cache path is resolved, so a project without
/// `go.mod` fails without consulting the cache settings.
pub fn compose(
    working_dir: &Path,
    cache: &CacheSettings,
    image: &str,
    payload: Payload,
) -> Result<CommandInfo> {
    let module_name = read_module_name(working_dir).context("could not read module name")?;
    let cache_path = cache.resolve().context("could not get go mod path")?;
    Ok(CommandInfo::new(
        working_dir.to_path_buf(),
        module_name,
        cache_path,
        image.to_string(),
        payload,
    ))
}
