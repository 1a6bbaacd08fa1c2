//! Logging initialization.
//!
//! Clients call [`init_logging`] once at startup and use `tracing` macros
//! everywhere else. Events are written as JSONL to an append-only file
//! (one flushed line per event), optionally mirrored to stderr in compact form.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Append-only file writer shared by every event.
#[derive(Clone)]
pub struct CentralLogWriter {
    inner: Arc<Mutex<BufWriter<File>>>,
}

impl CentralLogWriter {
    /// Open (or create) the log file, creating parent directories as needed.
    pub fn new(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(BufWriter::with_capacity(8192, file))),
        })
    }
}

impl Write for CentralLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.inner.lock();
        let written = guard.write(buf)?;
        guard.flush()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}

impl<'a> MakeWriter<'a> for CentralLogWriter {
    type Writer = CentralLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the global tracing subscriber.
///
/// * `level` - default filter, overridden by `RUST_LOG`
/// * `log_path` - JSONL destination; `None` disables the file layer
/// * `also_stderr` - mirror events to stderr in compact form
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(level: &str, log_path: Option<PathBuf>, also_stderr: bool) {
    let mut open_error = None;
    let file_layer = log_path.as_deref().and_then(|path| {
        CentralLogWriter::new(path)
            .map_err(|e| open_error = Some((path.to_path_buf(), e)))
            .ok()
            .map(|writer| {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_target(true)
                    .with_writer(writer)
                    .with_filter(env_filter(level))
            })
    });

    let stderr_layer = also_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_writer(io::stderr)
            .with_filter(env_filter(level))
    });

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if !installed {
        return;
    }

    if let Some((path, error)) = open_error {
        tracing::warn!(
            log_path = %path.display(),
            error = %error,
            "failed to open log file, file logging disabled"
        );
    } else if let Some(path) = log_path {
        tracing::debug!(log_path = %path.display(), "logging initialized");
    }
}
