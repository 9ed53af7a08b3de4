//! Integration tests for argument building and tokenization.

use std::sync::{Arc, Mutex};

use toolrun::args::{split_command_line, ArgBuilder};
use toolrun::invoker::{ExecOptions, InvokeError, Invoker, OutputChunk, OutputSource};
use toolrun::sink::{DebugSink, FnSink, NoopSink, TracingSink};

#[test]
fn tokenizer_matches_documented_properties() {
    assert_eq!(
        split_command_line("\"arg one\" two -z"),
        vec!["arg one", "two", "-z"]
    );
    assert_eq!(split_command_line("a\"b\"c"), vec!["abc"]);
    assert!(split_command_line("").is_empty());
}

#[test]
fn builder_accumulates_in_insertion_order() {
    let builder = ArgBuilder::new("tar")
        .arg("-czf")
        .path_arg("/tmp/out dir/archive.tgz")
        .line("--exclude target --exclude \"node modules\"", false)
        .arg_if(true, "--verbose")
        .arg_if(false, "--dry-run")
        .args(["src", "tests"]);

    assert_eq!(
        builder.argv(),
        [
            "-czf",
            "/tmp/out dir/archive.tgz",
            "--exclude",
            "target",
            "--exclude",
            "node modules",
            "--verbose",
            "src",
            "tests",
        ]
    );
}

#[test]
fn tokens_never_contain_quotes() {
    let builder = ArgBuilder::new("tool").line("a \"b c\" d\"e\"f \"\"", false);
    for token in builder.argv() {
        assert!(!token.contains('"'), "token {token:?} kept a quote");
    }
}

#[test]
fn literal_line_is_never_split() {
    let builder = ArgBuilder::new("sh").line("echo \"a b\"", true);
    assert_eq!(builder.argv(), ["echo \"a b\""]);
}

#[test]
fn builder_reports_appends_to_sink() {
    struct CollectSink(Mutex<Vec<String>>);

    impl DebugSink for CollectSink {
        fn debug(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    let sink = Arc::new(CollectSink(Mutex::new(Vec::new())));
    let _builder = ArgBuilder::with_sink("cargo", Arc::clone(&sink) as Arc<dyn DebugSink>)
        .arg("build")
        .arg("--release");
    assert_eq!(
        *sink.0.lock().unwrap(),
        vec!["cargo arg: build", "cargo arg: --release"]
    );
}

#[test]
fn closure_sinks_are_accepted() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let seen = Arc::clone(&seen);
        FnSink(move |message: &str| seen.lock().unwrap().push(message.to_string()))
    };
    let _builder = ArgBuilder::with_sink("git", Arc::new(sink)).arg("fetch");
    assert_eq!(*seen.lock().unwrap(), vec!["git arg: fetch"]);
}

#[test]
fn invoke_error_display_is_descriptive() {
    let errors = [InvokeError::NoStdout, InvokeError::NoStderr];
    for err in errors {
        assert!(!err.to_string().is_empty());
    }

    let failed = InvokeError::Failed {
        tool: "/bin/false".to_string(),
        code: 1,
    };
    assert!(failed.to_string().contains("/bin/false"));
    assert!(failed.to_string().contains('1'));
}

/// Verify all public types are exported from the library.
#[test]
fn test_all_public_types_exported() {
    let _ = ArgBuilder::new("tool");
    let _ = Invoker::new();
    let _ = Invoker::with_sink(Arc::new(NoopSink));
    let _ = Invoker::with_sink(Arc::new(TracingSink));
    let _ = ExecOptions::new();
    let _ = OutputChunk {
        source: OutputSource::Stdout,
        data: Vec::new(),
    };
    let _ = toolrun::invoker::COMMAND_MARKER;
    let _ = toolrun::invoker::ABNORMAL_EXIT_CODE;
    let _ = toolrun::invoker::DEFAULT_CHANNEL_BUFFER;
}
