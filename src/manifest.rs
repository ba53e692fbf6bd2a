#![allow(clippy::module_name_repetitions)]
//! go.mod module name lookup.
//!
//! Only the `module` directive is consulted; the rest of the manifest is never parsed.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[cfg(feature = "trace")]
use tracing::instrument;

use crate::errors::ManifestError;

pub const MANIFEST_FILE: &str = "go.mod";

const MODULE_PREFIX: &[u8] = b"module ";

/// Scoped owner of the open manifest file.
///
/// The descriptor is released when the guard goes out of scope, on every path.
/// Failing to close it is not recoverable: the process logs and exits.
#[derive(Debug)]
struct ManifestHandle {
    file: Option<File>,
    path: PathBuf,
}

impl ManifestHandle {
    fn open(path: &Path) -> Result<Self, ManifestError> {
        let file = File::open(path).map_err(|e| ManifestError::NotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            file: Some(file),
            path: path.to_path_buf(),
        })
    }

    fn module_name(&self) -> Result<String, ManifestError> {
        match self.file.as_ref() {
            Some(f) => module_name_from_reader(BufReader::new(f), &self.path),
            None => Err(ManifestError::Read {
                path: self.path.clone(),
                source: io::Error::other("manifest handle already released"),
            }),
        }
    }
}

impl Drop for ManifestHandle {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = close_file(file) {
                fatal_release_failure(&self.path, &e);
            }
        }
    }
}

#[cfg(unix)]
fn close_file(file: File) -> io::Result<()> {
    use std::os::unix::io::IntoRawFd;
    nix::unistd::close(file.into_raw_fd()).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn close_file(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}

fn fatal_release_failure(path: &Path, e: &io::Error) -> ! {
    #[cfg(feature = "trace")]
    tracing::error!(path = %path.display(), error = %e, "failed to close manifest");
    let use_err = crate::color_enabled_stderr();
    crate::log_error_stderr(
        use_err,
        &format!(
            "go-docker-run: fatal: could not close {}: {}",
            path.display(),
            e
        ),
    );
    std::process::exit(1);
}

/// Module name declared on a single manifest line, if the line is a `module` directive.
///
/// The remainder after the prefix is returned verbatim; an empty remainder is no declaration.
pub fn parse_module_line(line: &[u8]) -> Option<&[u8]> {
    line.strip_prefix(MODULE_PREFIX).filter(|rest| !rest.is_empty())
}

/// Scan manifest lines and return the name from the first `module ` line.
///
/// Lines are split on `\n` as raw bytes, and one trailing `\r` is dropped, so other
/// lines may hold any bytes. Only the declared name is decoded, lossily. Scanning stops
/// at the first line carrying the prefix.
pub fn module_name_from_reader<R: BufRead>(reader: R, path: &Path) -> Result<String, ManifestError> {
    for line in reader.split(b'\n') {
        let mut line = line.map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.starts_with(MODULE_PREFIX) {
            return parse_module_line(&line)
                .map(|name| String::from_utf8_lossy(name).into_owned())
                .ok_or_else(|| ManifestError::ModuleNotDeclared {
                    path: path.to_path_buf(),
                });
        }
    }
    Err(ManifestError::ModuleNotDeclared {
        path: path.to_path_buf(),
    })
}

/// Open `<dir>/go.mod` and return its declared module name.
#[cfg_attr(
    feature = "trace",
    instrument(level = "debug", err, skip(dir), fields(dir = %dir.display()))
)]
pub fn read_module_name(dir: &Path) -> Result<String, ManifestError> {
    let path = dir.join(MANIFEST_FILE);
    let handle = ManifestHandle::open(&path)?;
    handle.module_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scan(content: &[u8]) -> Result<String, ManifestError> {
        module_name_from_reader(Cursor::new(content.to_vec()), Path::new("go.mod"))
    }

    #[test]
    fn first_module_line_wins() {
        let got = scan(b"// header\nmodule example.com/foo\n\ngo 1.22\nmodule other/thing\n");
        assert_eq!(got.unwrap(), "example.com/foo");
    }

    #[test]
    fn trailing_characters_are_kept() {
        assert_eq!(scan(b"module example.com/foo  \n").unwrap(), "example.com/foo  ");
        assert_eq!(scan(b"module example.com/foo // c").unwrap(), "example.com/foo // c");
    }

    #[test]
    fn crlf_terminator_is_not_part_of_the_name() {
        assert_eq!(
            scan(b"module example.com/foo\r\ngo 1.22\r\n").unwrap(),
            "example.com/foo"
        );
    }

    #[test]
    fn last_line_without_newline() {
        assert_eq!(scan(b"go 1.22\nmodule x/y").unwrap(), "x/y");
    }

    #[test]
    fn prefix_must_start_the_line() {
        let err = scan(b"  module example.com/foo\nmodules a\nmodule\tb\n").unwrap_err();
        assert!(matches!(err, ManifestError::ModuleNotDeclared { .. }));
    }

    #[test]
    fn empty_manifest_declares_nothing() {
        assert!(matches!(
            scan(b"").unwrap_err(),
            ManifestError::ModuleNotDeclared { .. }
        ));
    }

    #[test]
    fn bare_prefix_is_not_a_declaration() {
        let err = scan(b"module \nmodule late/decl\n").unwrap_err();
        assert!(matches!(err, ManifestError::ModuleNotDeclared { .. }));
    }

    #[test]
    fn non_utf8_lines_before_module_are_skipped() {
        assert_eq!(
            scan(b"// caf\xe9\n\xff\xfe\nmodule example.com/foo\n").unwrap(),
            "example.com/foo"
        );
    }

    #[test]
    fn non_utf8_module_name_is_decoded_lossily() {
        assert_eq!(scan(b"module caf\xe9/x\n").unwrap(), "caf\u{fffd}/x");
    }

    #[test]
    fn only_one_carriage_return_is_dropped() {
        assert_eq!(scan(b"module a/b\r\r\n").unwrap(), "a/b\r");
    }

    #[test]
    fn io_failure_while_scanning_is_a_read_error() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk went away"))
            }
        }
        let err = module_name_from_reader(BufReader::new(Broken), Path::new("go.mod")).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }

    #[test]
    fn parse_module_line_cases() {
        assert_eq!(parse_module_line(b"module a/b"), Some(&b"a/b"[..]));
        assert_eq!(parse_module_line(b"module "), None);
        assert_eq!(parse_module_line(b"go 1.22"), None);
    }

    #[test]
    fn read_module_name_from_directory() {
        let td = tempfile::tempdir().expect("tmpdir");
        std::fs::write(td.path().join("go.mod"), "module example.com/foo\n\ngo 1.22\n")
            .expect("write go.mod");
        assert_eq!(read_module_name(td.path()).unwrap(), "example.com/foo");
        // handle was released; reading again yields the same answer
        assert_eq!(read_module_name(td.path()).unwrap(), "example.com/foo");
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let td = tempfile::tempdir().expect("tmpdir");
        let err = read_module_name(td.path()).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
        assert_eq!(err.path(), &td.path().join("go.mod"));
    }

    #[test]
    fn directory_named_go_mod_is_a_read_error_or_not_found() {
        let td = tempfile::tempdir().expect("tmpdir");
        std::fs::create_dir(td.path().join("go.mod")).expect("mkdir");
        let err = read_module_name(td.path()).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::Read { .. } | ManifestError::NotFound { .. }
        ));
    }
}
