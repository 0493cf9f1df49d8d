//! Error mapping guide:
//! - Map "not found" (runtime missing from PATH, or spawn NotFound) to exit code 127.
//! - Everything else exits 1.
use std::io;

use thiserror::Error;

use crate::util::exec::RunStatus;

#[derive(Debug, Error)]
pub enum ShimError {
    /// The underlying tool could not be resolved on PATH.
    #[error("{program} not found")]
    RuntimeNotFound { program: String },

    /// `push -a` / `push --all-tags` without an image argument.
    #[error("no image specified")]
    MissingImage,

    #[error("error getting tags: {source}")]
    TagListing {
        #[source]
        source: Box<ShimError>,
    },

    #[error("no tags found for image: {image}")]
    NoTags { image: String },

    #[error("{failed} pushes failed")]
    PushFailures { successful: usize, failed: usize },

    /// A captured invocation ran but exited non-zero.
    #[error("{program} exited with {status}")]
    Exit { program: String, status: RunStatus },

    /// Spawn or wait failure reported by the exec layer.
    #[error(transparent)]
    Exec(#[from] anyhow::Error),
}

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

/// Convert a ShimError to the shim's exit code.
pub fn exit_code_for(e: &ShimError) -> u8 {
    match e {
        ShimError::RuntimeNotFound { .. } => 127,
        ShimError::Exec(err) => err
            .chain()
            .find_map(|cause| cause.downcast_ref::<io::Error>())
            .map(exit_code_for_io_error)
            .unwrap_or(1),
        ShimError::TagListing { source } => match source.as_ref() {
            ShimError::RuntimeNotFound { .. } => 127,
            _ => 1,
        },
        ShimError::MissingImage
        | ShimError::NoTags { .. }
        | ShimError::PushFailures { .. }
        | ShimError::Exit { .. } => 1,
    }
}
