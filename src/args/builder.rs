//! Builder for the argument list of one tool invocation.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::sink::{DebugSink, NoopSink};

use super::lexer::split_command_line;

/// Accumulates the ordered argument tokens for one invocation of a tool.
///
/// Tokens are appended in insertion order and never transformed after the
/// fact. Each append reports the tool path and the appended value to the
/// debug sink, unless the builder is `quiet`.
pub struct ArgBuilder {
    tool: String,
    args: Vec<String>,
    quiet: bool,
    sink: Arc<dyn DebugSink>,
}

impl ArgBuilder {
    /// Create a builder for the given tool path.
    ///
    /// The tool path must be non-empty; it identifies the executable to run
    /// and is immutable once execution starts.
    #[must_use]
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            args: Vec::new(),
            quiet: false,
            sink: Arc::new(NoopSink),
        }
    }

    /// Create a builder that reports appends to the given sink.
    #[must_use]
    pub fn with_sink(tool: impl Into<String>, sink: Arc<dyn DebugSink>) -> Self {
        Self {
            tool: tool.into(),
            args: Vec::new(),
            quiet: false,
            sink,
        }
    }

    /// Suppress debug emission for this invocation.
    ///
    /// Does not affect where the subprocess output is routed.
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Append a single token, unmodified.
    ///
    /// Use this for values that must not be split, such as paths containing
    /// spaces.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.trace(&value);
        self.args.push(value);
        self
    }

    /// Append each token verbatim, no transformation.
    #[must_use]
    pub fn args<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            let token = token.into();
            self.trace(&token);
            self.args.push(token);
        }
        self
    }

    /// Append a free-text command line.
    ///
    /// When `literal` is true the whole text becomes one token; otherwise it
    /// is tokenized with [`split_command_line`] and each resulting token is
    /// appended. An empty `text` appends nothing, which is distinct from
    /// appending an empty-string token via [`ArgBuilder::arg`].
    #[must_use]
    pub fn line(mut self, text: &str, literal: bool) -> Self {
        if text.is_empty() {
            return self;
        }
        if literal {
            return self.arg(text);
        }
        for token in split_command_line(text) {
            self.trace(&token);
            self.args.push(token);
        }
        self
    }

    /// Append a single token only when `condition` holds.
    #[must_use]
    pub fn arg_if(self, condition: bool, value: impl Into<String>) -> Self {
        if condition {
            self.arg(value)
        } else {
            self
        }
    }

    /// Append a filesystem path as a single token.
    ///
    /// The path is not validated or canonicalized.
    #[must_use]
    pub fn path_arg(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_string_lossy().into_owned();
        self.arg(path)
    }

    /// The tool path this builder targets.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// The accumulated argument tokens, in insertion order.
    #[must_use]
    pub fn argv(&self) -> &[String] {
        &self.args
    }

    /// Whether debug emission is suppressed for this invocation.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The composed command line: tool path plus space-joined arguments.
    #[must_use]
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.tool.clone()
        } else {
            format!("{} {}", self.tool, self.args.join(" "))
        }
    }

    fn trace(&self, value: &str) {
        if !self.quiet {
            self.sink.debug(&format!("{} arg: {value}", self.tool));
        }
        tracing::trace!(tool = %self.tool, value, "argument appended");
    }
}

impl Clone for ArgBuilder {
    fn clone(&self) -> Self {
        Self {
            tool: self.tool.clone(),
            args: self.args.clone(),
            quiet: self.quiet,
            sink: Arc::clone(&self.sink),
        }
    }
}

impl fmt::Debug for ArgBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgBuilder")
            .field("tool", &self.tool)
            .field("args", &self.args)
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}
