//! `push --all-tags` emulation: push every local tag of an image, one at a time.

use std::ffi::OsString;

use tracing::{debug, info};

use crate::color::Reporter;
use crate::errors::ShimError;
use crate::runtime::Invoker;
use crate::tags::TagDiscovery;

/// `image:tag`
pub fn fully_qualified(image: &str, tag: &str) -> String {
    format!("{image}:{tag}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    pub tag: String,
    pub succeeded: bool,
}

/// Per-tag results of one fan-out, in push order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    pub outcomes: Vec<PushOutcome>,
}

impl PushReport {

    fn record(&mut self, tag: &str, succeeded: bool) {
        self.outcomes.push(PushOutcome {
            tag: tag.to_string(),
            succeeded,
        });
    }

    pub fn successful(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.successful()
    }

    pub fn summary(&self) -> String {
        format!(
            "Push completed: {} successful, {} failed",
            self.successful(),
            self.failed()
        )
    }

    /// Failure iff any tag failed.
    pub fn into_result(self) -> Result<PushReport, ShimError> {
        let failed = self.failed();
        if failed > 0 {
            return Err(ShimError::PushFailures {
                successful: self.successful(),
                failed,
            });
        }
        Ok(self)
    }
}

pub struct FanOutPusher<'a, I: Invoker + ?Sized> {
    invoker: &'a I,
    reporter: Reporter,
    debug: bool,
}

impl<'a, I: Invoker + ?Sized> FanOutPusher<'a, I> {
    pub fn new(invoker: &'a I, reporter: Reporter, debug: bool) -> Self {
        Self {
            invoker,
            reporter,
            debug,
        }
    }

    /// Discover and push every tag, returning the aggregate as an error when any push failed.
    pub fn push_all_tags(&self, image: &str) -> Result<PushReport, ShimError> {
        self.run(image)?.into_result()
    }

    /// Discover and push every tag. Only discovery errors are returned; per-tag failures
    /// are recorded in the report and never stop the loop.
    pub fn run(&self, image: &str) -> Result<PushReport, ShimError> {
        if self.debug {
            debug!(image = %image, "pushing all tags");
        }
        let tags = TagDiscovery::new(self.invoker, self.debug).discover(image)?;

        self.reporter.info(&format!("Found tags for {image}:"));
        for tag in &tags {
            self.reporter.info(&format!("  {tag}"));
        }
        self.reporter.info("Starting push operation...");

        let mut report = PushReport::default();
        for tag in &tags {
            let reference = fully_qualified(image, tag);
            self.reporter.info(&format!("Pushing {reference}..."));

            let args = [OsString::from("push"), OsString::from(&reference)];
            let failure = match self.invoker.stream(&args) {
                Ok(status) if status.success() => None,
                Ok(status) => Some(status.to_string()),
                Err(e) => Some(e.to_string()),
            };

            match failure {
                None => {
                    info!(reference = %reference, "pushed");
                    self.reporter
                        .info(&format!("Successfully pushed {reference}"));
                    report.record(tag, true);
                }
                Some(cause) => {
                    if self.debug {
                        debug!(reference = %reference, cause = %cause, "push failed");
                    }
                    self.reporter
                        .error(&format!("Failed to push {reference}: {cause}"));
                    report.record(tag, false);
                }
            }
        }

        self.reporter.info(&report.summary());
        Ok(report)
    }
}
