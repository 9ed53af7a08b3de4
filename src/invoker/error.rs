//! Error type for tool invocations.

use std::io;

/// Error produced while launching or resolving a tool invocation.
#[derive(thiserror::Error, Debug)]
pub enum InvokeError {
    /// The platform could not start the process (missing binary,
    /// permissions). Never retried.
    #[error("failed to launch '{tool}': {source}")]
    Launch {
        /// Tool path that failed to start.
        tool: String,
        /// Classified platform error.
        #[source]
        source: io::Error,
    },
    /// The verdict resolved to failure: a non-zero exit code, or stderr
    /// activity under `fail_on_stderr`.
    #[error("'{tool}' failed with exit code {code}")]
    Failed {
        /// Tool path that failed.
        tool: String,
        /// Exit code the process terminated with.
        code: i32,
    },
    /// Piped stdout handle was not available.
    #[error("process stdout not available")]
    NoStdout,
    /// Piped stderr handle was not available.
    #[error("process stderr not available")]
    NoStderr,
    /// Other I/O error while driving the process.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl InvokeError {
    /// Wrap a spawn failure, naming the tool and keeping the platform error.
    pub(crate) fn launch(tool: &str, source: io::Error) -> Self {
        Self::Launch {
            tool: tool.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_error_names_tool_and_cause() {
        let err = InvokeError::launch(
            "/missing/tool",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let display = err.to_string();
        assert!(display.contains("/missing/tool"));
        assert!(display.contains("no such file"));
    }

    #[test]
    fn failed_error_names_tool_and_code() {
        let err = InvokeError::Failed {
            tool: "make".to_string(),
            code: 2,
        };
        assert_eq!(err.to_string(), "'make' failed with exit code 2");
    }
}
