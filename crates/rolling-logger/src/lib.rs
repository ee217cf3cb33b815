//! Rolling Logger
//!
//! File logging for the desktop host:
//! - size-rotated files (`app.log`, `app.1.log`, ... `app.N.log`)
//! - an in-memory circular buffer of the most recent lines for diagnostics
//! - `tracing` subscriber wiring, with `log` records bridged in
//!
//! Call [`init_logger`] once at start-up; afterwards plain `tracing` macros
//! (or the [`info`]/[`warn`]/[`error`] helpers) end up in both sinks.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_MAX_BYTES: u64 = 2 * 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 5;
pub const DEFAULT_RECENT_LINES: usize = 500;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log directory unavailable: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Size-capped log file that shifts older files up by one on overflow
#[derive(Debug)]
pub struct RollingFile {
    dir: PathBuf,
    stem: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, stem: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{stem}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            stem: stem.to_string(),
            max_bytes: max_bytes.max(1),
            max_files: max_files.max(1),
            file,
            written,
        })
    }

    /// `index` 0 is the live file
    pub fn path(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(format!("{}.log", self.stem))
        } else {
            self.dir.join(format!("{}.{}.log", self.stem, index))
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let oldest = self.path(self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..self.max_files).rev() {
            let from = self.path(index);
            if from.exists() {
                fs::rename(&from, self.path(index + 1))?;
            }
        }
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path(0))?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[derive(Debug)]
struct Shared {
    file: Mutex<RollingFile>,
    recent: Mutex<VecDeque<String>>,
    capacity: usize,
}

/// Clonable handle writing to the rolling file and the recent-lines buffer
#[derive(Debug, Clone)]
pub struct LogSink(Arc<Shared>);

impl LogSink {
    pub fn new(file: RollingFile, capacity: usize) -> Self {
        Self(Arc::new(Shared {
            file: Mutex::new(file),
            recent: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }))
    }

    fn commit(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        {
            let mut file = lock(&self.0.file);
            // A failed log write has nowhere to be reported.
            let _ = file.write_all(bytes).and_then(|_| file.flush());
        }
        let text = String::from_utf8_lossy(bytes);
        let mut recent = lock(&self.0.recent);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            if recent.len() == self.0.capacity {
                recent.pop_front();
            }
            recent.push_back(line.to_string());
        }
    }

    /// Up to `n` most recent lines, oldest first
    pub fn recent(&self, n: usize) -> Vec<String> {
        let recent = lock(&self.0.recent);
        let skip = recent.len().saturating_sub(n);
        recent.iter().skip(skip).cloned().collect()
    }

    pub fn log_path(&self) -> PathBuf {
        lock(&self.0.file).path(0)
    }
}

/// Buffers one formatted event; committed as a unit when dropped
pub struct SinkWriter {
    sink: LogSink,
    buf: Vec<u8>,
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for SinkWriter {
    fn drop(&mut self) {
        self.sink.commit(&self.buf);
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter {
            sink: self.clone(),
            buf: Vec::new(),
        }
    }
}

static SINK: OnceLock<LogSink> = OnceLock::new();

/// File stem for an application name: `ShopDesk POS` -> `shopdesk-pos`
pub fn file_stem(app_name: &str) -> String {
    let stem: String = app_name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    if stem.is_empty() {
        "app".to_string()
    } else {
        stem
    }
}

/// Install the global subscriber. Returns the live log file path.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<PathBuf, LoggerError> {
    let file = RollingFile::open(
        log_dir.as_ref(),
        &file_stem(app_name),
        DEFAULT_MAX_BYTES,
        DEFAULT_MAX_FILES,
    )?;
    let sink = LogSink::new(file, DEFAULT_RECENT_LINES);
    let path = sink.log_path();
    SINK.set(sink.clone()).map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(sink),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;
    // `log` records reach the subscriber through the bridge; keep them at the same level
    log::set_max_level(log::LevelFilter::Info);

    tracing::info!(path = %path.display(), "logger initialized");
    Ok(path)
}

fn ensure_init() -> Result<(), LoggerError> {
    SINK.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    tracing::info!("{msg}");
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    tracing::warn!("{msg}");
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    tracing::error!("{msg}");
    Ok(())
}

/// Most recent log lines, empty before initialization
pub fn recent_lines(n: usize) -> Vec<String> {
    SINK.get().map(|sink| sink.recent(n)).unwrap_or_default()
}

pub fn log_path() -> Option<PathBuf> {
    SINK.get().map(LogSink::log_path)
}
