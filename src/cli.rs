use clap::{ArgGroup, Parser};

use go_docker_run::{Payload, PayloadError};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nbuild: ",
    env!("GO_DOCKER_RUN_BUILD_DATE"),
    "\ntarget: ",
    env!("GO_DOCKER_RUN_BUILD_TARGET"),
    "\nprofile: ",
    env!("GO_DOCKER_RUN_BUILD_PROFILE"),
    "\nrustc: ",
    env!("GO_DOCKER_RUN_BUILD_RUSTC"),
);

#[derive(Parser, Debug)]
#[command(
    name = "go-docker-run",
    version,
    long_version = LONG_VERSION,
    about = "Print a docker run command that builds the current Go module inside a container",
    group(ArgGroup::new("payload").required(true).args(["command", "args"]))
)]
pub(crate) struct Cli {
    /// Docker image to use for running the command
    #[arg(short = 'i', long = "docker-image", value_name = "IMAGE")]
    pub(crate) docker_image: String,

    /// Command to run inside the container, as one string
    #[arg(short = 'c', long = "command", value_name = "CMD", conflicts_with = "args")]
    pub(crate) command: Option<String>,

    /// Command and arguments to run inside the container, joined with spaces (no quoting)
    #[arg(trailing_var_arg = true, value_name = "ARGS")]
    pub(crate) args: Vec<String>,
}

impl Cli {
    /// `--command` becomes a one-token payload; trailing arguments keep their order.
    pub(crate) fn payload(&self) -> Result<Payload, PayloadError> {
        match &self.command {
            Some(c) => Ok(Payload::from_command(c.clone())),
            None => Payload::from_args(self.args.iter().cloned()),
        }
    }
}
