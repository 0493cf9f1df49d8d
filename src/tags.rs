//! Local tag discovery for an image reference.

use std::ffi::OsString;

use tracing::debug;

use crate::errors::ShimError;
use crate::runtime::Invoker;

/// Placeholder the tool prints for an untagged image.
pub const SENTINEL_NO_TAG: &str = "<none>";

/// Go template selecting only the tag column.
pub const TAG_FORMAT: &str = "{{.Tag}}";

/// Arguments for listing the local tags of `image`.
pub fn listing_args(image: &str) -> Vec<OsString> {
    vec![
        OsString::from("images"),
        OsString::from("--filter"),
        OsString::from(format!("reference={image}")),
        OsString::from("--format"),
        OsString::from(TAG_FORMAT),
    ]
}

/// Parse one-tag-per-line output, dropping blanks and the `<none>` sentinel.
/// Order is preserved as emitted.
pub fn parse_tag_listing(output: &str) -> Vec<String> {
    output
        .trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != SENTINEL_NO_TAG)
        .map(str::to_string)
        .collect()
}

pub struct TagDiscovery<'a, I: Invoker + ?Sized> {
    invoker: &'a I,
    debug: bool,
}

impl<'a, I: Invoker + ?Sized> TagDiscovery<'a, I> {
    pub fn new(invoker: &'a I, debug: bool) -> Self {
        Self { invoker, debug }
    }

    /// Return the non-empty, ordered list of local tags for `image`.
    pub fn discover(&self, image: &str) -> Result<Vec<String>, ShimError> {
        if self.debug {
            debug!(image = %image, "getting all tags");
        }
        let output = self
            .invoker
            .capture(&listing_args(image))
            .map_err(|e| {
                if self.debug {
                    debug!(image = %image, error = %e, "error getting tags");
                }
                ShimError::TagListing {
                    source: Box::new(e),
                }
            })?;

        let tags = parse_tag_listing(&output);
        if self.debug {
            debug!(image = %image, count = tags.len(), ?tags, "found tags");
        }
        if tags.is_empty() {
            return Err(ShimError::NoTags {
                image: image.to_string(),
            });
        }
        Ok(tags)
    }
}
