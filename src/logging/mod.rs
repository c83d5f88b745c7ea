//! Logging facility for pipeline diagnostics. Can also be used stand-alone.
//!
//! Every segment and pipeline resolves a logger for its identity string at
//! construction time. Resolution reads the environment once per distinct
//! logger name and caches the handle process-wide, so constructing the same
//! segment twice never attaches duplicate sinks.
//!
//! Configuration comes from environment variables:
//!
//! ```text
//! STDOUT_LOGLEVEL=debug LOGLEVEL=info ERROR_LOGFILE=error.log your_program
//! ```
//!
//! With the above, `error.log` captures all records of `ERROR` and higher,
//! while the console still shows everything from `INFO` on — the general
//! `LOGLEVEL` gates the logger itself, so no sink ever sees a record below
//! it, whatever the sink's own threshold says.
//!
//! A custom `SUCCESS` tier sits between `INFO` and `WARNING`:
//!
//! ```text
//! 10 - DEBUG
//! 20 - INFO
//! 25 - SUCCESS
//! 30 - WARNING
//! 40 - ERROR
//! 50 - CRITICAL
//! ```
//!
//! Console output is colorized when attached to a terminal (the `colored`
//! crate handles tty detection and `NO_COLOR`).

mod config;

pub use config::{LogConfig, Severity, LOGLEVEL_VAR, STDOUT_LOGLEVEL_VAR};

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use colored::Colorize;
use lazy_static::lazy_static;

use crate::error::ConfigError;

/// A file sink capturing one severity tier and above.
#[derive(Debug)]
struct FileSink {
    threshold: u8,
    file: Mutex<File>,
}

/// Shared state behind a [`Logger`] handle.
#[derive(Debug)]
struct LoggerCore {
    name: String,
    level: u8,
    console_level: u8,
    files: Vec<FileSink>,
}

/// Cheap-to-clone handle for emitting log records under a fixed name.
///
/// Obtained through [`resolve`] (or a [`LoggerRegistry`]); two resolutions of
/// the same name share the same underlying sinks.
#[derive(Debug, Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
}

impl Logger {
    fn build(name: &str, config: &LogConfig) -> Result<Self, ConfigError> {
        let mut files = Vec::with_capacity(config.files.len());
        for (tier, path) in &config.files {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| ConfigError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            files.push(FileSink {
                threshold: tier.value(),
                file: Mutex::new(file),
            });
        }

        Ok(Self {
            core: Arc::new(LoggerCore {
                name: name.to_string(),
                level: config.level,
                console_level: config.console_level,
                files,
            }),
        })
    }

    /// The name this logger was resolved under.
    pub fn name(&self) -> &str {
        &self.core.name
    }

    /// Emit a record at the given severity.
    ///
    /// Records below the overall threshold are dropped before any sink is
    /// consulted.
    pub fn log(&self, severity: Severity, message: &str) {
        let core = &self.core;
        if severity.value() < core.level {
            return;
        }

        if severity.value() >= core.console_level {
            println!("{}", console_line(&core.name, severity, message));
        }

        for sink in &core.files {
            if severity.value() >= sink.threshold {
                if let Ok(mut file) = sink.file.lock() {
                    let _ = writeln!(file, "{}", file_line(&core.name, severity, message));
                }
            }
        }
    }

    /// Emit at `DEBUG`.
    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    /// Emit at `INFO`.
    pub fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    /// Emit at the custom `SUCCESS` tier.
    pub fn success(&self, message: &str) {
        self.log(Severity::Success, message);
    }

    /// Emit at `WARNING`.
    pub fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    /// Emit at `ERROR`.
    pub fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    /// Emit at `CRITICAL`.
    pub fn critical(&self, message: &str) {
        self.log(Severity::Critical, message);
    }
}

fn console_line(name: &str, severity: Severity, message: &str) -> String {
    format!(
        "{}{}{}{}{}",
        format!("[{}]", severity.value()).yellow(),
        " - ".purple(),
        name.green(),
        " - ".purple(),
        message.white(),
    )
}

fn file_line(name: &str, severity: Severity, message: &str) -> String {
    format!(
        "{} - [{}] {:<8} - {} - {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        severity.value(),
        severity.as_str(),
        name,
        message,
    )
}

/// Process-wide cache of resolved loggers.
///
/// The default registry reads the environment on each first resolution of a
/// name; a registry constructed with [`LoggerRegistry::with_config`] uses a
/// fixed configuration instead, so tests can run isolated from the
/// environment.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    config: Option<LogConfig>,
    loggers: Mutex<HashMap<String, Logger>>,
}

impl LoggerRegistry {
    /// A registry that derives configuration from the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with a fixed configuration, independent of the environment.
    pub fn with_config(config: LogConfig) -> Self {
        Self {
            config: Some(config),
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve (or return the cached) logger for `name`.
    ///
    /// Idempotent: a second resolution of the same name returns the same
    /// handle and attaches no further sinks. The read-check-insert sequence
    /// is guarded so concurrent first resolutions of one name cannot race.
    pub fn resolve(&self, name: &str) -> Result<Logger, ConfigError> {
        let mut loggers = self
            .loggers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(logger) = loggers.get(name) {
            return Ok(logger.clone());
        }

        let config = match &self.config {
            Some(config) => config.clone(),
            None => LogConfig::from_env()?,
        };

        let logger = Logger::build(name, &config)?;
        loggers.insert(name.to_string(), logger.clone());
        Ok(logger)
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: LoggerRegistry = LoggerRegistry::new();
}

/// Resolve a logger from the process-wide registry.
pub fn resolve(name: &str) -> Result<Logger, ConfigError> {
    GLOBAL_REGISTRY.resolve(name)
}
