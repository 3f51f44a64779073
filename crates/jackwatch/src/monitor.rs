//! The jack event monitor.
//!
//! Reads lines from a [`LineSource`], classifies each with
//! [`classify_line`], and reports it. There is no retry or reconnect: a
//! source that ends or fails ends monitoring with an error.

use async_trait::async_trait;
use std::future::Future;
use std::io::Write;
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, info, warn};

use crate::acpi::{classify_line, JackEvent};
use crate::error::MonitorError;
use crate::report::Reporter;

/// A lazy sequence of text lines.
#[async_trait]
pub trait LineSource: Send {
    /// Wait for the next line. `Ok(None)` means end of stream.
    async fn next_line(&mut self) -> Result<Option<String>, MonitorError>;

    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Release whatever produces the lines.
    async fn close(&mut self) {}
}

/// Newline-delimited reads that tolerate bytes which are not UTF-8.
///
/// Invalid sequences become U+FFFD so one garbled event cannot end
/// monitoring.
struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin + Send> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    async fn next_line(&mut self, name: &str) -> Result<Option<String>, MonitorError> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(|e| MonitorError::Read {
                name: name.to_string(),
                source: e,
            })?;
        if read == 0 {
            return Ok(None);
        }

        let mut line = self.buf.as_slice();
        if let Some(rest) = line.strip_suffix(b"\n") {
            line = rest;
        }
        if let Some(rest) = line.strip_suffix(b"\r") {
            line = rest;
        }

        let text = String::from_utf8_lossy(line);
        if let std::borrow::Cow::Owned(_) = text {
            warn!("{} sent a line that is not valid UTF-8", name);
        }
        Ok(Some(text.into_owned()))
    }
}

/// Lines from any async reader: stdin, a file, or an in-memory buffer.
pub struct ReaderLineSource<R> {
    name: String,
    lines: LineReader<R>,
}

impl<R: AsyncBufRead + Unpin + Send> ReaderLineSource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            lines: LineReader::new(reader),
        }
    }
}

impl ReaderLineSource<BufReader<tokio::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new("stdin", BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> LineSource for ReaderLineSource<R> {
    async fn next_line(&mut self) -> Result<Option<String>, MonitorError> {
        self.lines.next_line(&self.name).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Lines from the stdout of a child process such as `acpi_listen`.
///
/// The child is killed if this source is dropped without [`LineSource::close`].
pub struct ProcessLineSource {
    command: String,
    child: Child,
    lines: LineReader<BufReader<ChildStdout>>,
}

impl ProcessLineSource {
    /// Start `command` with `args`, stdout piped and stdin closed.
    pub fn spawn(command: &str, args: &[String]) -> Result<Self, MonitorError> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MonitorError::Spawn {
                command: command.to_string(),
                source: e,
            })?;

        let stdout = child.stdout.take().ok_or_else(|| MonitorError::MissingStdout {
            command: command.to_string(),
        })?;

        info!("Started {} (pid {:?})", command, child.id());

        Ok(Self {
            command: command.to_string(),
            child,
            lines: LineReader::new(BufReader::new(stdout)),
        })
    }
}

#[async_trait]
impl LineSource for ProcessLineSource {
    async fn next_line(&mut self) -> Result<Option<String>, MonitorError> {
        self.lines.next_line(&self.command).await
    }

    fn name(&self) -> &str {
        &self.command
    }

    async fn close(&mut self) {
        match self.child.try_wait() {
            Ok(Some(status)) => debug!("{} already exited: {}", self.command, status),
            _ => {
                if let Err(e) = self.child.kill().await {
                    warn!("Failed to stop {}: {}", self.command, e);
                }
            }
        }
    }
}

/// Counters for one monitoring run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    pub lines: u64,
    pub transitions: u64,
    pub unresolved: u64,
    pub other: u64,
}

impl MonitorStats {
    fn record(&mut self, event: &JackEvent) {
        self.lines += 1;
        match event {
            JackEvent::Plugged(_) | JackEvent::Unplugged(_) => self.transitions += 1,
            JackEvent::Unresolved(_) => self.unresolved += 1,
            JackEvent::Other => self.other += 1,
        }
    }
}

/// Report every line from `source` until it ends, fails, or `shutdown` resolves.
///
/// Returns `Ok` only on shutdown. End of stream is
/// [`MonitorError::Closed`].
pub async fn monitor_events<S, W, F>(
    source: &mut S,
    reporter: &mut Reporter<W>,
    shutdown: F,
) -> Result<MonitorStats, MonitorError>
where
    S: LineSource + ?Sized,
    W: Write,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut stats = MonitorStats::default();

    loop {
        let line = tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Monitor stopping after {} lines", stats.lines);
                return Ok(stats);
            }
            line = source.next_line() => line?,
        };

        let Some(line) = line else {
            return Err(MonitorError::Closed {
                name: source.name().to_string(),
                lines: stats.lines,
            });
        };

        let event = classify_line(&line);
        debug!(?event, "{}", line);
        reporter.event(&line, &event)?;
        stats.record(&event);
    }
}
