//! The wrapped container tool: locating it on PATH and invoking it.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::debug;
use which::which;

use crate::errors::ShimError;
use crate::util::exec::{ExecRequest, ExecService, RunStatus};

/// Run the wrapped tool in one of its two modes.
///
/// `stream` connects the child to our stdio and reports its status. `capture` returns
/// its stdout and treats a non-zero exit as an error.
pub trait Invoker {
    fn stream(&self, args: &[OsString]) -> Result<RunStatus, ShimError>;
    fn capture(&self, args: &[OsString]) -> Result<String, ShimError>;
}

/// Resolve `program` to an absolute path via PATH lookup.
pub fn runtime_path(program: &str) -> Result<PathBuf, ShimError> {
    which(program).map_err(|e| {
        debug!(program = %program, error = %e, "runtime lookup failed");
        ShimError::RuntimeNotFound {
            program: program.to_string(),
        }
    })
}

#[derive(Debug, Clone)]
pub struct Runtime {
    name: String,
    path: PathBuf,
    exec: ExecService,
}

impl Runtime {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, debug: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            exec: ExecService::new(debug),
        }
    }

    /// Locate `program` on PATH and wrap it.
    pub fn locate(program: &str, debug: bool) -> Result<Self, ShimError> {
        let path = runtime_path(program)?;
        if debug {
            debug!(program = %program, path = %path.display(), "found runtime");
        }
        Ok(Self::new(program, path, debug))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Invoker for Runtime {
    fn stream(&self, args: &[OsString]) -> Result<RunStatus, ShimError> {
        let out = self
            .exec
            .run(ExecRequest::new(&self.path).args(args.iter().cloned()))?;
        Ok(out.status)
    }

    fn capture(&self, args: &[OsString]) -> Result<String, ShimError> {
        let out = self.exec.run(
            ExecRequest::new(&self.path)
                .args(args.iter().cloned())
                .capture_output(true),
        )?;
        if !out.status.success() {
            return Err(ShimError::Exit {
                program: self.name.clone(),
                status: out.status,
            });
        }
        Ok(out.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn os(parts: &[&str]) -> Vec<OsString> {
        parts.iter().map(OsString::from).collect()
    }

    #[test]
    fn missing_program_is_runtime_not_found() {
        let err = runtime_path("podman-shim-definitely-not-installed").unwrap_err();
        assert!(matches!(err, ShimError::RuntimeNotFound { .. }));
    }

    #[test]
    fn capture_nonzero_exit_is_exit_error() {
        let rt = Runtime::locate("sh", false).expect("sh on PATH");
        let err = rt.capture(&os(&["-c", "echo out; exit 2"])).unwrap_err();
        match err {
            ShimError::Exit { program, status } => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stream_reports_status_without_error() {
        let rt = Runtime::locate("sh", false).expect("sh on PATH");
        let status = rt.stream(&os(&["-c", "exit 4"])).unwrap();
        assert_eq!(status.code(), Some(4));
    }
}
