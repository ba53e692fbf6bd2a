#![allow(clippy::module_name_repetitions)]
//! Docker invocation composition.
//!
//! Nothing here runs docker; callers get the invocation as text or argv.

pub(crate) mod mounts;
pub(crate) mod run;

pub use mounts::{
    container_module_path, mount_source_problem, volume_flag, warn_unusable_mounts,
    CONTAINER_MOD_CACHE, CONTAINER_SRC_ROOT,
};
pub use run::{CommandInfo, Payload, PayloadError};
