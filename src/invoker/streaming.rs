//! Streaming execution: incremental output plus an awaitable verdict.

use std::io::Write;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::args::ArgBuilder;

use super::error::InvokeError;
use super::events::{OutputChunk, OutputSource, DEFAULT_CHANNEL_BUFFER};
use super::options::ResolvedOptions;

/// Read size for the output pipes.
const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Handle to a launched tool.
///
/// Subscribe to incremental output with [`Execution::take_events`] or
/// [`Execution::events_stream`], then await [`Execution::wait`] for the
/// verdict. The event channel is bounded; a subscriber that stops reading
/// eventually exerts backpressure on the subprocess pipes.
#[derive(Debug)]
pub struct Execution {
    events: Option<mpsc::Receiver<OutputChunk>>,
    driver: JoinHandle<Result<i32, InvokeError>>,
}

impl Execution {
    /// Take the chunk-event receiver. Returns `None` after the first call.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<OutputChunk>> {
        self.events.take()
    }

    /// Take the chunk events as an async stream. Returns `None` after the
    /// receiver has been taken.
    pub fn events_stream(&mut self) -> Option<impl futures_core::Stream<Item = OutputChunk>> {
        let rx = self.events.take()?;
        Some(futures_util::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|chunk| (chunk, rx))
        }))
    }

    /// Wait for the subprocess to terminate and resolve the verdict.
    ///
    /// Resolves to the exit code when the invocation succeeded. An
    /// unclaimed event receiver is dropped first so unconsumed events never
    /// stall the output pump.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::Failed`] when the verdict is failure, or
    /// [`InvokeError::Io`] if the platform wait itself fails.
    pub async fn wait(mut self) -> Result<i32, InvokeError> {
        drop(self.events.take());
        match self.driver.await {
            Ok(verdict) => verdict,
            Err(err) => Err(InvokeError::Io(std::io::Error::other(err))),
        }
    }
}

/// Launch the tool and start the output pump.
pub(super) fn spawn(
    builder: &ArgBuilder,
    mut opts: ResolvedOptions,
) -> Result<Execution, InvokeError> {
    opts.echo_command(&builder.command_line());

    let mut cmd = Command::new(builder.tool());
    cmd.args(builder.argv())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &opts.working_dir {
        cmd.current_dir(dir);
    }
    if let Some(env) = &opts.env {
        cmd.env_clear();
        cmd.envs(env);
    }

    let mut child = cmd
        .spawn()
        .map_err(|err| InvokeError::launch(builder.tool(), err))?;
    tracing::debug!(tool = %builder.tool(), pid = ?child.id(), "process spawned");

    let stdout = child.stdout.take().ok_or(InvokeError::NoStdout)?;
    let stderr = child.stderr.take().ok_or(InvokeError::NoStderr)?;

    let (chunk_tx, mut chunk_rx) = mpsc::channel(DEFAULT_CHANNEL_BUFFER);
    spawn_reader(stdout, OutputSource::Stdout, chunk_tx.clone());
    spawn_reader(stderr, OutputSource::Stderr, chunk_tx);

    let (event_tx, event_rx) = mpsc::channel(DEFAULT_CHANNEL_BUFFER);
    let tool = builder.tool().to_string();

    // Single pump: each chunk's echo and event emission happen atomically
    // per chunk, in arrival order, before the next chunk is processed.
    let driver = tokio::spawn(async move {
        let mut success = true;
        while let Some(chunk) = chunk_rx.recv().await {
            route_chunk(&chunk, &mut opts, &mut success);
            // The receiver may already be dropped; events are best-effort.
            let _ = event_tx.send(chunk).await;
        }

        // Both pipes hit EOF; only now does exit-code logic run.
        let status = child.wait().await?;
        let code = super::exit_code(status);
        if code != 0 && !opts.ignore_return_code {
            success = false;
        }
        tracing::debug!(tool = %tool, code, success, "process exited");

        if success {
            Ok(code)
        } else {
            Err(InvokeError::Failed { tool, code })
        }
    });

    Ok(Execution {
        events: Some(event_rx),
        driver,
    })
}

/// Route one chunk: update the success flag and echo to the console streams.
fn route_chunk(chunk: &OutputChunk, opts: &mut ResolvedOptions, success: &mut bool) {
    match chunk.source {
        OutputSource::Stdout => {
            if !opts.silent {
                let _ = opts.out_stream.write_all(&chunk.data);
                let _ = opts.out_stream.flush();
            }
        }
        OutputSource::Stderr => {
            if opts.fail_on_stderr {
                *success = false;
            }
            if !opts.silent {
                let stream = if opts.fail_on_stderr {
                    &mut opts.err_stream
                } else {
                    &mut opts.out_stream
                };
                let _ = stream.write_all(&chunk.data);
                let _ = stream.flush();
            }
        }
    }
}

/// Forward byte chunks from one pipe into the pump channel until EOF.
fn spawn_reader<R>(mut reader: R, source: OutputSource, tx: mpsc::Sender<OutputChunk>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; READ_BUFFER_SIZE];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    let chunk = OutputChunk {
                        source,
                        data: buf[..n].to_vec(),
                    };
                    if tx.send(chunk).await.is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!(?source, error = %err, "output pipe read failed");
                    break;
                }
            }
        }
    });
}
