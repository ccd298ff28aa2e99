//! Per-batch logger with file and callback output.
//!
//! Each conversion batch gets its own logger that writes a dedicated log
//! file and mirrors every line to an optional host callback (the
//! progress reporter of whatever front end drives the core).

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogCallback, LogConfig, LogLevel};

/// Per-batch logger with dual output (file + host callback).
pub struct BatchLogger {
    /// Book label the batch runs for.
    batch_name: String,
    /// Path to the log file.
    log_path: PathBuf,
    /// Buffered file writer; `None` after `close`.
    file_writer: Mutex<Option<BufWriter<File>>>,
    /// Optional host callback for mirroring lines.
    callback: Mutex<Option<LogCallback>>,
    config: LogConfig,
}

impl BatchLogger {
    /// Create a logger writing `{sanitized batch name}.log` in `log_dir`.
    pub fn new(
        batch_name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        callback: Option<LogCallback>,
    ) -> std::io::Result<Self> {
        let batch_name = batch_name.into();
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(format!("{}.log", sanitize_filename(&batch_name)));
        let file = File::create(&log_path)?;

        Ok(Self {
            batch_name,
            log_path,
            file_writer: Mutex::new(Some(BufWriter::new(file))),
            callback: Mutex::new(callback),
            config,
        })
    }

    pub fn batch_name(&self) -> &str {
        &self.batch_name
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }
        self.output(&self.format_message(message));
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &format!("[WARN] {}", message));
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &format!("[ERROR] {}", message));
    }

    /// Flush the log file.
    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Close the logger and release the file handle.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            let timestamp = Local::now().format("%H:%M:%S");
            format!("[{}] {}", timestamp, message)
        } else {
            message.to_string()
        }
    }

    fn output(&self, formatted: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writeln!(writer, "{}", formatted);
        }
        if let Some(ref callback) = *self.callback.lock() {
            callback(formatted);
        }
    }
}

impl Drop for BatchLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Sanitize a string to be safe for use as a filename.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
