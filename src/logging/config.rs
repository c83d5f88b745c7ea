//! Severity tiers and environment-derived logging configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::{env, fmt};

use crate::error::ConfigError;

/// Environment variable holding the overall severity threshold.
pub const LOGLEVEL_VAR: &str = "LOGLEVEL";

/// Environment variable holding the console-sink severity threshold.
pub const STDOUT_LOGLEVEL_VAR: &str = "STDOUT_LOGLEVEL";

/// Log severity tiers.
///
/// Numeric values leave room between tiers; `Success` sits between `Info`
/// and `Warning` and marks successful pipeline completion, distinct from
/// ordinary informational output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Success,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Every tier, in ascending order. Used to discover `<NAME>_LOGFILE`
    /// variables.
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Success,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Numeric value of the tier.
    pub fn value(self) -> u8 {
        match self {
            Severity::Debug => 10,
            Severity::Info => 20,
            Severity::Success => 25,
            Severity::Warning => 30,
            Severity::Error => 40,
            Severity::Critical => 50,
        }
    }

    /// Uppercase name of the tier.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Success => "SUCCESS",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Name of the environment variable enabling a file sink for this tier.
    pub fn logfile_var(self) -> String {
        format!("{}_LOGFILE", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "SUCCESS" => Ok(Severity::Success),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" | "FATAL" => Ok(Severity::Critical),
            _ => Err(ConfigError::UnknownLevel(s.to_string())),
        }
    }
}

/// Parse a threshold specification: a bare integer is taken verbatim,
/// otherwise the value must be a known tier name.
fn parse_threshold(spec: &str) -> Result<u8, ConfigError> {
    if let Ok(numeric) = spec.trim().parse::<u8>() {
        return Ok(numeric);
    }
    spec.parse::<Severity>().map(Severity::value)
}

/// Resolved logging configuration for one logger.
///
/// Derived from environment variables:
///
/// | Variable | Effect |
/// |---|---|
/// | `LOGLEVEL` | overall threshold (name or integer); default `INFO` |
/// | `STDOUT_LOGLEVEL` | console threshold; default = overall |
/// | `<NAME>_LOGFILE` | file sink for that tier and above |
///
/// An explicit level that parses as neither a known name nor an integer is a
/// fatal [`ConfigError`] — resolution fails fast instead of logging with a
/// silently wrong threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Overall threshold; records below it reach no sink at all.
    pub level: u8,
    /// Console sink threshold.
    pub console_level: u8,
    /// Per-tier file destinations.
    pub files: Vec<(Severity, PathBuf)>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info.value(),
            console_level: Severity::Info.value(),
            files: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Derive a configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| env::var(key).ok())
    }

    /// Derive a configuration from an arbitrary variable lookup.
    ///
    /// Isolated from the process environment so tests can feed variables
    /// without mutating global state.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let level = match lookup(LOGLEVEL_VAR) {
            Some(spec) => parse_threshold(&spec)?,
            None => Severity::Info.value(),
        };

        let console_level = match lookup(STDOUT_LOGLEVEL_VAR) {
            Some(spec) => parse_threshold(&spec)?,
            None => level,
        };

        let mut files = Vec::new();
        for tier in Severity::ALL {
            if let Some(path) = lookup(&tier.logfile_var()) {
                files.push((tier, PathBuf::from(path)));
            }
        }

        Ok(Self {
            level,
            console_level,
            files,
        })
    }
}
