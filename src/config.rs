//! Environment-driven configuration, read once in `main` and passed down explicitly.

use std::env;

use crate::color::{self, ColorMode};

pub const ENV_DEBUG: &str = "PODMAN_SHIM_DEBUG";
pub const ENV_PROGRAM: &str = "PODMAN_SHIM_PODMAN";
pub const ENV_COLOR: &str = "PODMAN_SHIM_COLOR";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

pub const DEFAULT_PROGRAM: &str = "podman";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimConfig {
    /// Emit debug diagnostics (any non-empty `PODMAN_SHIM_DEBUG`).
    pub debug: bool,
    /// Name or path of the wrapped tool.
    pub program: String,
    pub color: ColorMode,
    pub no_color: bool,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            debug: false,
            program: DEFAULT_PROGRAM.to_string(),
            color: ColorMode::Auto,
            no_color: false,
        }
    }
}

impl ShimConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unknown color values fall back to `auto`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = lookup(ENV_DEBUG).is_some_and(|v| !v.is_empty());
        let program = lookup(ENV_PROGRAM)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
        let color = lookup(ENV_COLOR)
            .and_then(|v| ColorMode::parse(&v))
            .unwrap_or_default();
        let no_color = lookup(ENV_NO_COLOR).is_some();
        Self {
            debug,
            program,
            color,
            no_color,
        }
    }

    pub fn color_enabled_stderr(&self) -> bool {
        color::color_enabled_for(self.color, self.no_color, color::stderr_is_tty())
    }
}
