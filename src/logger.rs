use crate::config::LoggingConfig;
use crate::constants::{APP_NAME, CONFIG_DIR_NAME, LOG_BUFFER_CAPACITY, LOG_FILE_NAME};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Shared logger that can be used across the application
///
/// Keeps the most recent entries in memory for the logs dialog. Once
/// installed it also receives every `log` record.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    file_enabled: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            file_enabled: false,
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            file_enabled: config.enabled,
            ..Self::new()
        }
    }

    /// Whether records are also written to the log file
    pub fn is_file_enabled(&self) -> bool {
        self.file_enabled
    }

    /// Add a log entry
    pub fn log(&self, message: impl Into<String>) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message.into());

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() >= LOG_BUFFER_CAPACITY {
                logs.remove(0);
            }
            logs.push(formatted_message);
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

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Default log file location under the user cache directory
    pub fn default_log_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(LOG_FILE_NAME))
    }

    /// Route `log` records into this logger, and into `log_file` when file
    /// logging is enabled.
    pub fn install(&self, log_file: Option<&Path>) -> Result<()> {
        let mut dispatch = fern::Dispatch::new()
            .level(log::LevelFilter::Info)
            .level_for(APP_NAME, log::LevelFilter::Debug)
            .level_for("reqwest", log::LevelFilter::Warn)
            .level_for("hyper_util", log::LevelFilter::Warn)
            .chain(Box::new(self.clone()) as Box<dyn log::Log>);

        if let (true, Some(path)) = (self.file_enabled, log_file) {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "{} {:<5} {}: {}",
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            );
        }

        dispatch.apply().context("Failed to install logger")?;
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        Logger::log(self, format!("{:<5} {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
