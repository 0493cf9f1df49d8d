use std::ffi::OsString;
use std::fmt;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

/// Exit status of a finished child, detached from `std::process::ExitStatus`
/// so fakes can produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    code: Option<i32>,
}

impl RunStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// Exit code for the shim process itself: the child's code when it fits a process
    /// exit byte, otherwise 1 (no code, negative, or wider than 255 as on Windows).
    pub fn exit_code(&self) -> u8 {
        self.code.and_then(|c| u8::try_from(c).ok()).unwrap_or(1)
    }
}

impl From<ExitStatus> for RunStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(c) => write!(f, "exit status {c}"),
            None => write!(f, "termination by signal"),
        }
    }
}

/// Blocking command execution with either inherited or captured stdout.
///
/// There is no timeout: a hung child hangs the caller.
#[derive(Debug, Clone, Default)]
pub struct ExecService {
    debug: bool,
}

impl ExecService {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    pub fn run(&self, request: ExecRequest) -> Result<ExecOutput> {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args);

        if self.debug {
            let preview = super::argv_preview(&request.program.to_string_lossy(), &request.args);
            debug!(
                command = %preview,
                capture = request.capture_output,
                "executing command"
            );
        }

        let started = Instant::now();
        let (status, stdout) = if request.capture_output {
            // stderr stays attached to ours so the tool's own diagnostics remain visible.
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit());
            let child = cmd.spawn().with_context(|| {
                format!(
                    "failed to spawn {:?} with args {:?}",
                    request.program, request.args
                )
            })?;
            let out = child
                .wait_with_output()
                .context("failed to wait for process")?;
            (out.status, String::from_utf8_lossy(&out.stdout).into_owned())
        } else {
            let mut child = cmd.spawn().with_context(|| {
                format!(
                    "failed to spawn {:?} with args {:?}",
                    request.program, request.args
                )
            })?;
            let status = child.wait().context("failed to wait for process")?;
            (status, String::new())
        };

        let status = RunStatus::from(status);
        if self.debug {
            let dur_ms = started.elapsed().as_millis() as u64;
            debug!(%status, dur_ms, "command finished");
        }

        Ok(ExecOutput { status, stdout })
    }
}

#[derive(Debug, Default)]
pub struct ExecRequest {
    program: OsString,
    args: Vec<OsString>,
    capture_output: bool,
}

impl ExecRequest {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }
}

#[derive(Debug)]
pub struct ExecOutput {
    pub status: RunStatus,
    /// Captured stdout; empty when the request streamed.
    pub stdout: String,
}
