use serde::{Deserialize, Serialize};

use crate::logger::error::LoggerError;
use crate::logger::format::LoggerFormat;
use crate::logger::level::LoggerLevel;

/// Environment variable holding the level expression.
pub const ENV_LEVEL: &str = "LISTQ_LOG";
/// Environment variable holding the output format.
pub const ENV_FORMAT: &str = "LISTQ_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    pub with_targets: bool,
    pub use_color: bool,
    /// Emit an event when a span closes, which puts per-fetch timings in the log.
    pub span_timings: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || atty::is(atty::Stream::Stdout);
        Self {
            format: LoggerFormat::Text,
            level: LoggerLevel::default(),
            with_targets: true,
            span_timings: false,
            use_color,
        }
    }
}

impl LoggerConfig {
    /// Defaults overridden by `LISTQ_LOG` and `LISTQ_LOG_FORMAT`; `NO_COLOR`
    /// disables colors.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoggerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoggerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(level) = lookup(ENV_LEVEL) {
            cfg.level = level.parse()?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            cfg.format = format.parse()?;
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            cfg.use_color = false;
        }
        Ok(cfg)
    }

    pub fn with_format(mut self, format: LoggerFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LoggerLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_span_timings(mut self, enabled: bool) -> Self {
        self.span_timings = enabled;
        self
    }
}
