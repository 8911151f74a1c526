use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

/// Validated `EnvFilter` expression: a default level optionally followed by
/// per-target directives, e.g. `info,listq_core=debug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(expr: impl Into<String>) -> Result<Self, LoggerError> {
        let expr = expr.into();
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(LoggerError::InvalidLogLevel(expr));
        }
        EnvFilter::try_new(trimmed).map_err(|_| LoggerError::InvalidLogLevel(expr.clone()))?;
        Ok(Self(trimmed.to_string()))
    }

    /// Append a per-target directive such as `listq_core::controller=trace`.
    pub fn with_directive(self, directive: &str) -> Result<Self, LoggerError> {
        Self::new(format!("{},{}", self.0, directive.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn to_filter(&self) -> Result<EnvFilter, LoggerError> {
        EnvFilter::try_new(&self.0).map_err(|_| LoggerError::InvalidLogLevel(self.0.clone()))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LoggerLevel> for String {
    fn from(level: LoggerLevel) -> Self {
        level.0
    }
}
