use std::str::FromStr;

use baseproject_core::ProjectError;

use crate::log_level::LogLevel;

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_location: bool,
    pub include_thread_id: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = ProjectError;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        match format.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(ProjectError::config_error(format!("Invalid log format: {format}"))),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            format: LogFormat::Compact,
            include_location: true,
            include_thread_id: false,
        }
    }
}

impl LoggingConfig {
    /// `LOG_LEVEL` / `LOG_FORMAT` 覆盖默认值；无法解析的值被忽略
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|l| l.parse::<LogLevel>().is_ok()) {
            config.level = level.to_lowercase();
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV).and_then(|f| f.parse().ok()) {
            config.format = format;
        }
        config
    }

    /// `EnvFilter` 使用的过滤指令；FATAL 按 ERROR 输出
    pub fn filter_directive(&self) -> String {
        match self.level.parse::<LogLevel>() {
            Ok(LogLevel::Fatal) => "error".to_string(),
            Ok(level) => level.as_str().to_lowercase(),
            Err(_) => self.level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.include_location);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let env: HashMap<&str, &str> = [("LOG_LEVEL", "WARN"), ("LOG_FORMAT", "json")].into();
        let config = LoggingConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let env: HashMap<&str, &str> = [("LOG_LEVEL", "loud"), ("LOG_FORMAT", "xml")].into();
        let config = LoggingConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_fatal_filter_directive() {
        let config = LoggingConfig {
            level: "fatal".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(config.filter_directive(), "error");
    }
}
