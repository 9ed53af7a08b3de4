//! Process invoker: launches external tools and resolves a verdict.
//!
//! Two entry points share the same option-defaulting step. [`Invoker::exec`]
//! streams output incrementally and resolves an awaitable verdict;
//! [`Invoker::exec_sync`] blocks until exit and returns the collected
//! outcome without applying any verdict policy.

mod blocking;
mod error;
mod events;
mod options;
mod streaming;

pub use blocking::*;
pub use error::*;
pub use events::*;
pub use options::*;
pub use streaming::*;

use std::fmt;
use std::sync::Arc;

use crate::args::ArgBuilder;
use crate::sink::{DebugSink, NoopSink};

/// Exit code reported when the process was terminated by a signal or never
/// started.
pub const ABNORMAL_EXIT_CODE: i32 = -1;

/// Launches external tools and reports their outcome uniformly.
///
/// Each invocation owns its subprocess exclusively; invokers share no state
/// and may run concurrently.
pub struct Invoker {
    sink: Arc<dyn DebugSink>,
}

impl Invoker {
    /// An invoker whose debug messages go nowhere.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sink: Arc::new(NoopSink),
        }
    }

    /// An invoker that reports debug messages to the given sink.
    #[must_use]
    pub fn with_sink(sink: Arc<dyn DebugSink>) -> Self {
        Self { sink }
    }

    /// Launch the tool asynchronously, streaming its output.
    ///
    /// Returns an [`Execution`] handle exposing incremental chunk events and
    /// an awaitable verdict. Must be called within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::Launch`] when the platform cannot start the
    /// process; no exit-code logic runs in that case.
    pub fn exec(&self, builder: &ArgBuilder, options: ExecOptions) -> Result<Execution, InvokeError> {
        self.announce(builder);
        streaming::spawn(builder, options.resolve())
    }

    /// Launch the tool and block the caller until it terminates.
    ///
    /// Output reaches the configured streams only after the process has
    /// fully exited. A normal non-zero exit is reported in
    /// [`ExecResult::code`], never as an error.
    pub fn exec_sync(&self, builder: &ArgBuilder, options: ExecOptions) -> ExecResult {
        self.announce(builder);
        blocking::run(builder, options.resolve())
    }

    /// Report the tool and arguments about to run, unless the invocation
    /// is quiet.
    fn announce(&self, builder: &ArgBuilder) {
        if builder.is_quiet() {
            return;
        }
        self.sink.debug(&format!("exec tool: {}", builder.tool()));
        self.sink.debug("arguments:");
        for arg in builder.argv() {
            self.sink.debug(&format!("   {arg}"));
        }
    }
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Invoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invoker").finish_non_exhaustive()
    }
}

/// Map an exit status to its reported code.
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(ABNORMAL_EXIT_CODE)
}
