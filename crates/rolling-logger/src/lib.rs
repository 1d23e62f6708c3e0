//! Rolling Logger
//!
//! Size-rotated log file plus an in-memory circular buffer of the most
//! recent lines. Installs a `tracing-subscriber` fmt subscriber and bridges
//! the `log` facade, so `log::info!` from any crate lands in the same sink.
//! On Android the platform logger is used instead of the file writer.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;

/// Default size of a single log file before it is rotated (1 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
/// Default number of rotated files kept next to the live one
pub const DEFAULT_MAX_FILES: usize = 3;
/// Default number of lines kept in memory
pub const DEFAULT_BUFFER_LINES: usize = 500;

static WRITER: OnceLock<RollingWriter> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Logger not initialized")]
    NotInitialized,

    #[error("Failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Rotation and buffering limits
#[derive(Debug, Clone, Copy)]
pub struct RollingOptions {
    pub max_bytes: u64,
    pub max_files: usize,
    pub buffer_lines: usize,
}

impl Default for RollingOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_files: DEFAULT_MAX_FILES,
            buffer_lines: DEFAULT_BUFFER_LINES,
        }
    }
}

/// The live log file and its recent-lines ring
pub struct RollingFile {
    dir: PathBuf,
    prefix: String,
    options: RollingOptions,
    file: File,
    written: u64,
    recent: VecDeque<String>,
    partial: String,
}

impl RollingFile {
    /// Open (append) `<dir>/<prefix>.log`, creating the directory if needed
    pub fn open(dir: &Path, prefix: &str, options: RollingOptions) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", prefix));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            options,
            file,
            written,
            recent: VecDeque::with_capacity(options.buffer_lines),
            partial: String::new(),
        })
    }

    pub fn current_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.prefix))
    }

    pub fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}.log", self.prefix, index))
    }

    /// Lines currently held in the ring, oldest first
    pub fn recent(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.options.max_files > 0 {
            // .N is dropped, .i moves to .i+1, live file becomes .1
            for index in (1..self.options.max_files).rev() {
                let from = self.rotated_path(index);
                if from.exists() {
                    let to = self.rotated_path(index + 1);
                    if to.exists() {
                        fs::remove_file(&to)?;
                    }
                    fs::rename(&from, &to)?;
                }
            }
            let first = self.rotated_path(1);
            if first.exists() {
                fs::remove_file(&first)?;
            }
            fs::rename(self.current_path(), &first)?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.current_path())?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.options.buffer_lines == 0 {
            return;
        }
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            if self.recent.len() == self.options.buffer_lines {
                self.recent.pop_front();
            }
            self.recent.push_back(line.trim_end().to_string());
        }
    }

    pub fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.options.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        self.remember(buf);
        Ok(())
    }
}

/// Cloneable handle handed to the fmt subscriber
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<RollingFile>>,
}

impl RollingWriter {
    pub fn new(file: RollingFile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(file)),
        }
    }

    pub fn recent(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(guard) => guard.recent(),
            Err(poisoned) => poisoned.into_inner().recent(),
        }
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.inner.lock().ok().map(|guard| guard.current_path())
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        guard.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        guard.file.flush()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Initialize the global logger with default limits at `info` level
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, "info", RollingOptions::default())
}

/// Initialize the global logger
///
/// `level` is an env-filter directive such as `info` or `budget_ledger_lib=debug`.
#[cfg(not(target_os = "android"))]
pub fn init_logger_with(
    log_dir: PathBuf,
    app_name: &str,
    level: &str,
    options: RollingOptions,
) -> Result<(), LoggerError> {
    if WRITER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let file = RollingFile::open(&log_dir, app_name, options)?;
    let writer = RollingWriter::new(file);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    WRITER
        .set(writer)
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(
        app = app_name,
        dir = %log_dir.display(),
        started = %chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        "rolling logger initialized"
    );
    Ok(())
}

#[cfg(target_os = "android")]
pub fn init_logger_with(
    log_dir: PathBuf,
    app_name: &str,
    level: &str,
    options: RollingOptions,
) -> Result<(), LoggerError> {
    if WRITER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let max_level = level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info);
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(max_level)
            .with_tag(app_name.to_string()),
    );

    // Keep the file so recent_logs() behaves the same as on desktop
    let file = RollingFile::open(&log_dir, app_name, options)?;
    WRITER
        .set(RollingWriter::new(file))
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    Ok(())
}

/// Lines from the in-memory ring, oldest first (empty before init)
pub fn recent_logs() -> Vec<String> {
    WRITER.get().map(|w| w.recent()).unwrap_or_default()
}

/// Path of the live log file, if the logger is initialized
pub fn log_file_path() -> Option<PathBuf> {
    WRITER.get().and_then(|w| w.current_path())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    if WRITER.get().is_none() {
        return Err(LoggerError::NotInitialized);
    }
    Ok(())
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::error!("{}", msg);
    Ok(())
}
