//! Classify one invocation and hand it to passthrough or the all-tags fan-out.

use std::ffi::{OsStr, OsString};

use tracing::debug;

use crate::color::Reporter;
use crate::errors::ShimError;
use crate::push::FanOutPusher;
use crate::runtime::Invoker;
use crate::util::exec::RunStatus;

pub const PUSH_SUBCOMMAND: &str = "push";
pub const ALL_TAGS_SHORT: &str = "-a";
pub const ALL_TAGS_LONG: &str = "--all-tags";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Run the tool with exactly these arguments.
    Passthrough(Vec<OsString>),
    /// `push` with the all-tags flag: emulate by pushing each tag of `image`. `None` when
    /// no usable image token was given.
    PushAllTags { image: Option<String> },
}

fn is_all_tags_flag(arg: &OsStr) -> bool {
    arg == ALL_TAGS_SHORT || arg == ALL_TAGS_LONG
}

fn is_flag(arg: &OsStr) -> bool {
    arg.as_encoded_bytes().first() == Some(&b'-')
}

impl Route {
    /// Decide what to do with `args` (argv without the program name).
    ///
    /// For `push`, the last token not starting with `-` is taken as the image; flag values
    /// count as candidates too, so `push --creds u:p img` still resolves `img`.
    pub fn classify(args: &[OsString]) -> Route {
        let Some((command, rest)) = args.split_first() else {
            return Route::Passthrough(Vec::new());
        };
        if command != PUSH_SUBCOMMAND {
            return Route::Passthrough(args.to_vec());
        }

        let mut all_tags = false;
        let mut image: Option<&OsStr> = None;
        let mut filtered: Vec<OsString> = Vec::with_capacity(args.len());
        filtered.push(command.clone());
        for arg in rest {
            if is_all_tags_flag(arg) {
                all_tags = true;
                continue;
            }
            if !is_flag(arg) {
                image = Some(arg.as_os_str());
            }
            filtered.push(arg.clone());
        }

        if !all_tags {
            return Route::Passthrough(filtered);
        }
        Route::PushAllTags {
            image: image
                .filter(|i| !i.is_empty())
                .map(|i| i.to_string_lossy().into_owned()),
        }
    }
}

pub struct Router<'a, I: Invoker + ?Sized> {
    invoker: &'a I,
    reporter: Reporter,
    debug: bool,
}

impl<'a, I: Invoker + ?Sized> Router<'a, I> {
    pub fn new(invoker: &'a I, reporter: Reporter, debug: bool) -> Self {
        Self {
            invoker,
            reporter,
            debug,
        }
    }

    /// Run the invocation. A passthrough returns the child's status as-is (non-zero is not
    /// an error here); the fan-out returns success or a `ShimError`.
    pub fn dispatch(&self, args: &[OsString]) -> Result<RunStatus, ShimError> {
        let route = Route::classify(args);
        if self.debug {
            debug!(?route, "classified invocation");
        }
        match route {
            Route::Passthrough(forward) => self.invoker.stream(&forward),
            Route::PushAllTags { image } => {
                self.reporter
                    .info("Unsupported flag detected for push command, invoking shim...");
                let image = image.ok_or(ShimError::MissingImage)?;
                self.reporter
                    .info(&format!("Pushing all tags for image: {image}"));
                FanOutPusher::new(self.invoker, self.reporter, self.debug)
                    .push_all_tags(&image)?;
                Ok(RunStatus::from_code(0))
            }
        }
    }
}
