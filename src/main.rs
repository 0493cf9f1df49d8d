use std::env;
use std::ffi::OsString;
use std::process::ExitCode;

use tracing::debug;

use podman_shim::{exit_code_for, telemetry, Reporter, Router, Runtime, ShimConfig};

fn main() -> ExitCode {
    let config = ShimConfig::from_env();
    telemetry::init(config.debug);
    let reporter = Reporter::new(config.color_enabled_stderr());

    let args: Vec<OsString> = env::args_os().skip(1).collect();
    debug!(?args, "args");

    let runtime = match Runtime::locate(&config.program, config.debug) {
        Ok(rt) => rt,
        Err(e) => {
            reporter.error(&e.to_string());
            return ExitCode::from(exit_code_for(&e));
        }
    };

    match Router::new(&runtime, reporter, config.debug).dispatch(&args) {
        Ok(status) => {
            if !status.success() {
                debug!(%status, "{} execution failed", runtime.name());
            }
            ExitCode::from(status.exit_code())
        }
        Err(e) => {
            reporter.error(&e.to_string());
            ExitCode::from(exit_code_for(&e))
        }
    }
}
