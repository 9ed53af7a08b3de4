//! Per-call execution options and their defaulting step.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

/// Prefix written before the composed command line on the output stream.
pub const COMMAND_MARKER: &str = "[command]";

/// Per-call configuration for one execution. Not stored on the invocation.
///
/// Every unset field falls back to the caller process's own context:
/// current directory, environment, and standard streams. All flags default
/// to `false`.
pub struct ExecOptions {
    working_dir: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
    silent: bool,
    fail_on_stderr: bool,
    ignore_return_code: bool,
    out_stream: Option<Box<dyn Write + Send>>,
    err_stream: Option<Box<dyn Write + Send>>,
}

impl ExecOptions {
    /// Options with every default in place.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the tool in the given directory instead of the caller's.
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Replace the subprocess environment entirely with the given map.
    #[must_use]
    pub fn env(mut self, env: HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    /// Suppress the `[command]` echo and console routing of subprocess
    /// output. Chunk events and debug emission are unaffected.
    #[must_use]
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Treat any byte on the subprocess error stream as failure, even when
    /// the exit code is zero.
    #[must_use]
    pub fn fail_on_stderr(mut self, fail: bool) -> Self {
        self.fail_on_stderr = fail;
        self
    }

    /// Do not let a non-zero exit code by itself cause failure.
    #[must_use]
    pub fn ignore_return_code(mut self, ignore: bool) -> Self {
        self.ignore_return_code = ignore;
        self
    }

    /// Destination for subprocess standard-output bytes and the command
    /// echo. Defaults to the caller's standard output.
    #[must_use]
    pub fn out_stream(mut self, stream: Box<dyn Write + Send>) -> Self {
        self.out_stream = Some(stream);
        self
    }

    /// Destination for subprocess standard-error bytes when
    /// `fail_on_stderr` is set. Defaults to the caller's standard error.
    #[must_use]
    pub fn err_stream(mut self, stream: Box<dyn Write + Send>) -> Self {
        self.err_stream = Some(stream);
        self
    }

    /// Apply the shared defaulting step both execution paths perform.
    pub(crate) fn resolve(self) -> ResolvedOptions {
        ResolvedOptions {
            // None inherits the caller's current directory and environment
            // snapshot at spawn time.
            working_dir: self.working_dir,
            env: self.env,
            silent: self.silent,
            fail_on_stderr: self.fail_on_stderr,
            ignore_return_code: self.ignore_return_code,
            out_stream: self
                .out_stream
                .unwrap_or_else(|| Box::new(std::io::stdout())),
            err_stream: self
                .err_stream
                .unwrap_or_else(|| Box::new(std::io::stderr())),
        }
    }
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            working_dir: None,
            env: None,
            silent: false,
            fail_on_stderr: false,
            ignore_return_code: false,
            out_stream: None,
            err_stream: None,
        }
    }
}

impl fmt::Debug for ExecOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecOptions")
            .field("working_dir", &self.working_dir)
            .field("env", &self.env.as_ref().map(HashMap::len))
            .field("silent", &self.silent)
            .field("fail_on_stderr", &self.fail_on_stderr)
            .field("ignore_return_code", &self.ignore_return_code)
            .field("out_stream", &self.out_stream.is_some())
            .field("err_stream", &self.err_stream.is_some())
            .finish()
    }
}

/// Options after the defaulting step, owned by one execution.
pub(crate) struct ResolvedOptions {
    pub working_dir: Option<PathBuf>,
    pub env: Option<HashMap<String, String>>,
    pub silent: bool,
    pub fail_on_stderr: bool,
    pub ignore_return_code: bool,
    pub out_stream: Box<dyn Write + Send>,
    pub err_stream: Box<dyn Write + Send>,
}

impl ResolvedOptions {
    /// Write the `[command]` echo line before launch, unless silent.
    ///
    /// Echo failures never affect the verdict.
    pub(crate) fn echo_command(&mut self, command_line: &str) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.out_stream, "{COMMAND_MARKER} {command_line}");
        let _ = self.out_stream.flush();
    }
}
