use std::sync::Mutex;

use baseproject_core::ProjectProperties;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::log_level::LogLevel;

/// 一次日志调用的渲染结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub logger: String,
    pub session_id: String,
    pub call_site: Option<String>,
    pub message: String,
}

impl LogRecord {
    pub fn new(
        level: LogLevel,
        logger: impl Into<String>,
        session_id: impl Into<String>,
        call_site: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            logger: logger.into(),
            session_id: session_id.into(),
            call_site,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// 日志门面输出记录的目标
pub trait LogBackend: Send + Sync {
    fn is_enabled(&self, level: LogLevel) -> bool;
    fn emit(&self, record: &LogRecord);
}

macro_rules! emit_event {
    ($level:expr, $record:expr, fatal = $fatal:expr) => {
        tracing::event!(
            $level,
            fatal = $fatal,
            logger = %$record.logger,
            session_id = %$record.session_id,
            call_site = $record.call_site.as_deref().unwrap_or("-"),
            "{}",
            $record.message
        )
    };
}

/// 把记录转发给已安装的 `tracing` subscriber
#[derive(Debug, Clone, Copy)]
pub struct TracingBackend {
    threshold: LogLevel,
}

impl TracingBackend {
    pub fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }

    /// 阈值取 `log_level`；未设置时 `sql_trace_enabled` 为 TRACE，否则 DEBUG
    pub fn from_properties(properties: &ProjectProperties) -> Self {
        let fallback = if properties.sql_trace_enabled().unwrap_or(false) {
            LogLevel::Trace
        } else {
            LogLevel::Debug
        };

        let threshold = match properties.log_level() {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(log_level = raw, error = %e, "Ignoring log_level property");
                fallback
            }),
            None => fallback,
        };
        Self::new(threshold)
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }
}

impl LogBackend for TracingBackend {
    fn is_enabled(&self, level: LogLevel) -> bool {
        if level < self.threshold {
            return false;
        }
        match level {
            LogLevel::Trace => tracing::enabled!(tracing::Level::TRACE),
            LogLevel::Debug => tracing::enabled!(tracing::Level::DEBUG),
            LogLevel::Info => tracing::enabled!(tracing::Level::INFO),
            LogLevel::Warn => tracing::enabled!(tracing::Level::WARN),
            LogLevel::Error | LogLevel::Fatal => tracing::enabled!(tracing::Level::ERROR),
        }
    }

    fn emit(&self, record: &LogRecord) {
        match record.level {
            LogLevel::Trace => emit_event!(tracing::Level::TRACE, record, fatal = false),
            LogLevel::Debug => emit_event!(tracing::Level::DEBUG, record, fatal = false),
            LogLevel::Info => emit_event!(tracing::Level::INFO, record, fatal = false),
            LogLevel::Warn => emit_event!(tracing::Level::WARN, record, fatal = false),
            LogLevel::Error => emit_event!(tracing::Level::ERROR, record, fatal = false),
            LogLevel::Fatal => emit_event!(tracing::Level::ERROR, record, fatal = true),
        }
    }
}

/// 把记录保存在内存中
#[derive(Debug)]
pub struct MemoryBackend {
    threshold: LogLevel,
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryBackend {
    pub fn new(threshold: LogLevel) -> Self {
        Self {
            threshold,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl LogBackend for MemoryBackend {
    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }

    fn emit(&self, record: &LogRecord) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
    }
}
