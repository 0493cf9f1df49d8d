#![forbid(unsafe_code)]
//! podman-shim: a transparent wrapper in front of `podman`.
//!
//! Every invocation is passed through unchanged except `push -a` / `push --all-tags`,
//! which podman does not support: the shim lists the image's local tags and pushes
//! each `image:tag` in turn, then reports how many succeeded and failed.

pub mod color;
pub mod config;
pub mod errors;
pub mod push;
pub mod router;
pub mod runtime;
pub mod tags;
pub mod telemetry;
pub mod util;

pub use color::{ColorMode, Reporter};
pub use config::ShimConfig;
pub use errors::{exit_code_for, ShimError};
pub use push::{fully_qualified, FanOutPusher, PushOutcome, PushReport};
pub use router::{Route, Router};
pub use runtime::{runtime_path, Invoker, Runtime};
pub use tags::{parse_tag_listing, TagDiscovery};
pub use util::exec::RunStatus;
