#![allow(clippy::module_name_repetitions)]
//! Working directory and Go module cache resolution.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "trace")]
use tracing::instrument;

use crate::errors::EnvironmentError;

/// Environment variable overriding the host module cache location.
pub const GOMODCACHE_ENV: &str = "GOMODCACHE";

/// Cache location relative to the home directory when no override is set.
pub const DEFAULT_CACHE_SUBDIR: &str = "go/pkg/mod";

/// Snapshot of the inputs used to locate the module cache.
///
/// Captured once from the process environment so resolution itself stays pure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSettings {
    pub gomodcache: Option<String>,
    pub home: Option<PathBuf>,
}

impl CacheSettings {
    pub fn new(gomodcache: Option<String>, home: Option<PathBuf>) -> Self {
        Self { gomodcache, home }
    }

    /// Read `GOMODCACHE` and `HOME`; fall back to the platform home directory when
    /// `HOME` is unset or empty.
    pub fn from_env() -> Self {
        let gomodcache = env::var(GOMODCACHE_ENV).ok();
        let home = env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(home::home_dir);
        Self { gomodcache, home }
    }

    /// Override if set and non-empty (verbatim), else `<home>/go/pkg/mod`.
    #[cfg_attr(feature = "trace", instrument(level = "debug", err, skip(self)))]
    pub fn resolve(&self) -> Result<PathBuf, EnvironmentError> {
        if let Some(v) = self.gomodcache.as_deref() {
            if !v.is_empty() {
                return Ok(PathBuf::from(v));
            }
        }
        match self.home.as_ref() {
            Some(h) if !h.as_os_str().is_empty() => Ok(h.join(DEFAULT_CACHE_SUBDIR)),
            _ => Err(EnvironmentError::CachePath),
        }
    }
}

/// Absolute path of the process's current directory.
///
/// `$PWD` is preferred when it names the same directory, so a checkout entered through
/// a symlink is mounted under the path the user sees.
#[cfg_attr(feature = "trace", instrument(level = "debug", err))]
pub fn resolve_working_dir() -> Result<PathBuf, EnvironmentError> {
    let physical = env::current_dir().map_err(EnvironmentError::WorkingDir)?;
    Ok(prefer_logical_dir(env::var_os("PWD"), physical))
}

/// `pwd` when it is absolute and refers to the same directory as `physical`, else `physical`.
pub fn prefer_logical_dir(pwd: Option<OsString>, physical: PathBuf) -> PathBuf {
    let Some(pwd) = pwd.filter(|p| !p.is_empty()).map(PathBuf::from) else {
        return physical;
    };
    if pwd.is_absolute() && same_dir(&pwd, &physical) {
        pwd
    } else {
        physical
    }
}

#[cfg(unix)]
fn same_dir(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}
