/*!
Test support helpers shared across integration tests.

- FakeInvoker: scripted `Invoker` that records every call instead of spawning podman
- os_vec(parts): build an OsString argv from string slices
- write_fake_podman(dir): drop an executable shell script that logs its argv (unix)
- read_calls(dir) / read_calls_raw(dir): the script's argv log as lines or raw bytes
*/

use std::cell::RefCell;
use std::collections::HashSet;
use std::ffi::OsString;

use podman_shim::util::exec::RunStatus;
use podman_shim::{Invoker, ShimError};

#[allow(dead_code)]
pub fn os_vec(parts: &[&str]) -> Vec<OsString> {
    parts.iter().map(OsString::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Stream(Vec<String>),
    Capture(Vec<String>),
}

fn lossy(args: &[OsString]) -> Vec<String> {
    args.iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

/// Scripted stand-in for the podman runtime.
///
/// - `capture` returns `listing`, or an `Exit` error with code 125 when `listing_fails`.
/// - `stream` exits 1 for `push <ref>` when `<ref>` is in `failing_refs`, otherwise
///   returns `stream_code`.
#[allow(dead_code)]
pub struct FakeInvoker {
    pub listing: String,
    pub listing_fails: bool,
    pub failing_refs: HashSet<String>,
    pub stream_code: i32,
    calls: RefCell<Vec<Call>>,
}

#[allow(dead_code)]
impl FakeInvoker {
    pub fn new() -> Self {
        Self {
            listing: String::new(),
            listing_fails: false,
            failing_refs: HashSet::new(),
            stream_code: 0,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_listing(mut self, listing: &str) -> Self {
        self.listing = listing.to_string();
        self
    }

    pub fn with_failing_listing(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    pub fn with_failing_push(mut self, reference: &str) -> Self {
        self.failing_refs.insert(reference.to_string());
        self
    }

    pub fn with_stream_code(mut self, code: i32) -> Self {
        self.stream_code = code;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// References passed to `push`, in call order.
    pub fn pushed(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Stream(args) if args.len() == 2 && args[0] == "push" => {
                    Some(args[1].clone())
                }
                _ => None,
            })
            .collect()
    }
}

impl Invoker for FakeInvoker {
    fn stream(&self, args: &[OsString]) -> Result<RunStatus, ShimError> {
        let args = lossy(args);
        self.calls.borrow_mut().push(Call::Stream(args.clone()));
        if args.len() == 2 && args[0] == "push" && self.failing_refs.contains(&args[1]) {
            return Ok(RunStatus::from_code(1));
        }
        Ok(RunStatus::from_code(self.stream_code))
    }

    fn capture(&self, args: &[OsString]) -> Result<String, ShimError> {
        self.calls.borrow_mut().push(Call::Capture(lossy(args)));
        if self.listing_fails {
            return Err(ShimError::Exit {
                program: "podman".to_string(),
                status: RunStatus::from_code(125),
            });
        }
        Ok(self.listing.clone())
    }
}

/// Write an executable `podman` script into `dir` that appends its argv (one line per
/// call, space separated) to `<dir>/calls.log`.
///
/// - `images ...` prints `$FAKE_PODMAN_TAGS` (newline separated) and exits
///   `$FAKE_PODMAN_IMAGES_EXIT` (default 0).
/// - `push <ref>` exits 1 when `<ref>` appears in `$FAKE_PODMAN_FAIL` (space separated).
/// - anything else exits `$FAKE_PODMAN_EXIT` (default 0).
#[cfg(unix)]
#[allow(dead_code)]
pub fn write_fake_podman(dir: &std::path::Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let log = dir.join("calls.log");
    let script = format!(
        r#"#!/bin/sh
echo "$*" >> '{log}'
case "$1" in
  images)
    printf '%b' "$FAKE_PODMAN_TAGS"
    exit "${{FAKE_PODMAN_IMAGES_EXIT:-0}}"
    ;;
  push)
    for f in $FAKE_PODMAN_FAIL; do
      if [ "$2" = "$f" ]; then
        echo "push of $2 failed" >&2
        exit 1
      fi
    done
    exit 0
    ;;
esac
exit "${{FAKE_PODMAN_EXIT:-0}}"
"#,
        log = log.display()
    );
    let path = dir.join("podman");
    std::fs::write(&path, script).expect("write fake podman");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod fake podman");
    path
}

/// Raw bytes of the fake podman call log; empty when it was never invoked.
#[allow(dead_code)]
pub fn read_calls_raw(dir: &std::path::Path) -> Vec<u8> {
    std::fs::read(dir.join("calls.log")).unwrap_or_default()
}

/// Lines of the fake podman call log; empty when it was never invoked.
#[allow(dead_code)]
pub fn read_calls(dir: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.log"))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
