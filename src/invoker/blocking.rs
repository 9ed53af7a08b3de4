//! Blocking execution: run to completion, return the collected outcome.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::args::ArgBuilder;

use super::error::InvokeError;
use super::options::ResolvedOptions;

/// Outcome of a blocking execution.
///
/// Reports the raw result only. Unlike the streaming path, no
/// `fail_on_stderr` / `ignore_return_code` policy is applied here; a caller
/// that needs a policy-based verdict applies it to these fields itself.
#[derive(Debug)]
#[must_use]
pub struct ExecResult {
    /// Process exit code; the `ABNORMAL_EXIT_CODE` sentinel when the
    /// process was signal-terminated or never started.
    pub code: i32,
    /// Complete captured standard output.
    pub stdout: String,
    /// Complete captured standard error.
    pub stderr: String,
    /// Present when the process could not be started.
    pub error: Option<InvokeError>,
}

/// Run the tool and block until it terminates.
pub(super) fn run(builder: &ArgBuilder, mut opts: ResolvedOptions) -> ExecResult {
    opts.echo_command(&builder.command_line());

    let mut cmd = Command::new(builder.tool());
    cmd.args(builder.argv()).stdin(Stdio::null());
    if let Some(dir) = &opts.working_dir {
        cmd.current_dir(dir);
    }
    if let Some(env) = &opts.env {
        cmd.env_clear();
        cmd.envs(env);
    }

    match cmd.output() {
        Ok(output) => {
            // Buffered visibility: bytes reach the console only after exit,
            // unlike the streaming path.
            if !opts.silent {
                let _ = opts.out_stream.write_all(&output.stdout);
                let _ = opts.out_stream.flush();
                let _ = opts.err_stream.write_all(&output.stderr);
                let _ = opts.err_stream.flush();
            }
            let code = super::exit_code(output.status);
            tracing::debug!(tool = %builder.tool(), code, "process exited");
            ExecResult {
                code,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!(tool = %builder.tool(), error = %err, "process failed to launch");
            ExecResult {
                code: super::ABNORMAL_EXIT_CODE,
                stdout: String::new(),
                stderr: String::new(),
                error: Some(InvokeError::launch(builder.tool(), err)),
            }
        }
    }
}
