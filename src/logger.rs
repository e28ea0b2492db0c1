use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::LoggingConfig;
use crate::constants::{LOG_FILE_NAME, LOG_MEMORY_CAPACITY};

/// Buffered writer shared between logger clones
pub type SharedWriter = Arc<Mutex<BufWriter<File>>>;

/// Shared logger that can be used across the application
///
/// Every entry is kept in a bounded in-memory buffer. When file logging is
/// enabled it is also appended to the log file.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    enabled: bool,
    file_writer: Option<SharedWriter>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            enabled: false,
            file_writer: None,
        }
    }

    /// Create a logger, opening the log file when `enabled` is set
    pub fn from_config(enabled: bool) -> Result<Self> {
        let file_writer = if enabled {
            let path = Self::get_log_file_path()?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(Arc::new(Mutex::new(BufWriter::new(file))))
        } else {
            None
        };

        Ok(Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            enabled,
            file_writer,
        })
    }

    /// Location of the log file, creating its directory if needed
    pub fn get_log_file_path() -> Result<PathBuf> {
        let dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .join("bookvault");
        std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        Ok(dir.join(LOG_FILE_NAME))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn has_file_writer(&self) -> bool {
        self.file_writer.is_some()
    }

    pub fn file_writer(&self) -> Option<&SharedWriter> {
        self.file_writer.as_ref()
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Some(writer) = &self.file_writer {
            if let Ok(mut writer) = writer.lock() {
                let _ = writeln!(writer, "{}", formatted_message);
            }
        }

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() == LOG_MEMORY_CAPACITY {
                logs.pop_front();
            }
            logs.push_back(formatted_message);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Flush buffered file output
    pub fn flush(&self) {
        if let Some(writer) = &self.file_writer {
            if let Ok(mut writer) = writer.lock() {
                let _ = writer.flush();
            }
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Route the `log` facade into a [`Logger`].
///
/// Nothing is installed when logging is disabled, so `log` macros stay
/// silent. Can only succeed once per process.
pub fn init(config: &LoggingConfig) -> Result<Logger> {
    let logger = Logger::from_config(config.enabled)?;
    if !config.enabled {
        return Ok(logger);
    }

    let sink = logger.clone();
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{:<5} {}: {}", record.level(), record.target(), message))
        })
        .level(config.level_filter())
        .level_for("sqlx", log::LevelFilter::Warn)
        .level_for("sea_orm", log::LevelFilter::Warn)
        .chain(fern::Output::call(move |record| sink.log(record.args().to_string())))
        .apply()
        .context("Failed to install logger")?;

    Ok(logger)
}
