#![allow(clippy::module_name_repetitions)]
//! `docker run` invocation for a Go module mounted at its GOPATH location.

use std::fmt;
use std::path::{Path, PathBuf};

use super::mounts::{container_module_path, volume_flag, CONTAINER_MOD_CACHE};

/// User command carried after the image, as ordered tokens.
///
/// A single command string is a one-token payload. Tokens are joined with single
/// spaces and are NOT shell-quoted: `["echo", "a b"]` renders as `echo a b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Vec<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    Empty,
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::Empty => write!(f, "no command given to run inside the container"),
        }
    }
}

impl std::error::Error for PayloadError {}

impl Payload {
    pub fn from_command(command: impl Into<String>) -> Self {
        Payload(vec![command.into()])
    }

    pub fn from_args<I, S>(args: I) -> Result<Self, PayloadError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(PayloadError::Empty);
        }
        Ok(Payload(tokens))
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

/// Everything needed to print one invocation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    working_directory: PathBuf,
    module_name: String,
    cache_path: PathBuf,
    image: String,
    payload: Payload,
}

impl CommandInfo {
    pub fn new(
        working_directory: PathBuf,
        module_name: String,
        cache_path: PathBuf,
        image: String,
        payload: Payload,
    ) -> Self {
        debug_assert!(!module_name.is_empty());
        Self {
            working_directory,
            module_name,
            cache_path,
            image,
            payload,
        }
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Invocation as argv, program first.
    pub fn to_args(&self) -> Vec<String> {
        let module_dir = container_module_path(&self.module_name);
        let mut args: Vec<String> = vec![
            "docker".to_string(),
            "run".to_string(),
            "--rm".to_string(),
            "-t".to_string(),
            "-i".to_string(),
        ];
        args.push(volume_flag(&self.working_directory, &module_dir));
        args.push(volume_flag(&self.cache_path, CONTAINER_MOD_CACHE));
        args.push(format!("-w{module_dir}"));
        args.push(self.image.clone());
        args.extend(self.payload.tokens().iter().cloned());
        args
    }

    /// Invocation as the single line printed to the user.
    pub fn render(&self) -> String {
        self.to_args().join(" ")
    }
}

impl fmt::Display for CommandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
