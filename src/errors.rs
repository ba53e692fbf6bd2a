//! Error kinds and user-facing rendering:
//! - EnvironmentError: working directory or module cache path cannot be determined.
//! - ManifestError: go.mod missing, unreadable, or without a module declaration.
//! - Every recoverable error exits with status 1 (`ExitCode::FAILURE`). Closing the
//!   manifest handle is not in this taxonomy; a close failure terminates the process
//!   inside the guard.
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum EnvironmentError {
    WorkingDir(io::Error),
    CachePath,
}

impl fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentError::WorkingDir(_) => write!(f, "could not determine working directory"),
            EnvironmentError::CachePath => write!(
                f,
                "could not find go mod path: GOMODCACHE is unset and no home directory is known"
            ),
        }
    }
}

impl std::error::Error for EnvironmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnvironmentError::WorkingDir(e) => Some(e),
            EnvironmentError::CachePath => None,
        }
    }
}

#[derive(Debug)]
pub enum ManifestError {
    /// go.mod could not be opened.
    NotFound { path: PathBuf, source: io::Error },
    /// I/O failure while scanning lines.
    Read { path: PathBuf, source: io::Error },
    ModuleNotDeclared { path: PathBuf },
}

impl ManifestError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ManifestError::NotFound { path, .. }
            | ManifestError::Read { path, .. }
            | ManifestError::ModuleNotDeclared { path } => path,
        }
    }
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::NotFound { path, .. } => write!(
                f,
                "could not find or open go.mod file for reading: {}",
                path.display()
            ),
            ManifestError::Read { path, .. } => {
                write!(f, "could not read go.mod file: {}", path.display())
            }
            ManifestError::ModuleNotDeclared { path } => write!(
                f,
                "could not find module name in go.mod file: {}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::NotFound { source, .. } | ManifestError::Read { source, .. } => {
                Some(source)
            }
            ManifestError::ModuleNotDeclared { .. } => None,
        }
    }
}

/// Render the full context chain on one line, outermost first.
pub fn display_for_error(e: &anyhow::Error) -> String {
    format!("{e:#}")
}
