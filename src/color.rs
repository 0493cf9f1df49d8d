#![allow(clippy::module_name_repetitions)]
//! Color mode configuration, ANSI painting, and the stderr reporter.
//!
//! Reporter policy (stderr one-liners):
//! - Every user-visible shim message goes through `Reporter`, one line each.
//! - The `podman-shim: ` prefix is painted yellow when color is enabled;
//!   error text is painted red, info text is left as-is.
//! - Podman's own output is never routed through here.

use clap::ValueEnum;

pub const PREFIX: &str = "podman-shim: ";

const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[31;1m";

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    #[value(alias = "on")]
    #[value(alias = "true")]
    #[value(alias = "yes")]
    Always,
    #[value(alias = "off")]
    #[value(alias = "false")]
    #[value(alias = "no")]
    Never,
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<ColorMode> {
        <ColorMode as ValueEnum>::from_str(s.trim(), true).ok()
    }
}

/// Decide whether to emit color.
///
/// `NO_COLOR` wins unconditionally (https://no-color.org/); otherwise the mode decides,
/// with `Auto` following the TTY check.
pub fn color_enabled_for(mode: ColorMode, no_color: bool, is_tty: bool) -> bool {
    if no_color {
        return false;
    }
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_tty,
    }
}

pub fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

/// Wrap string with ANSI color code when enabled; otherwise return unchanged.
pub fn paint(enabled: bool, code: &str, s: &str) -> String {
    if enabled {
        format!("{code}{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

/// User-facing stderr output for the shim.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    use_color: bool,
}

impl Reporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn info_line(&self, msg: &str) -> String {
        format!("{}{}", paint(self.use_color, YELLOW, PREFIX), msg)
    }

    pub fn error_line(&self, msg: &str) -> String {
        format!(
            "{}{}",
            paint(self.use_color, YELLOW, PREFIX),
            paint(self.use_color, RED, msg)
        )
    }

    pub fn info(&self, msg: &str) {
        eprintln!("{}", self.info_line(msg));
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.error_line(msg));
    }
}
