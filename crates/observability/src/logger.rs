//! 日志门面
//!
//! [`Logger`] 在 [`LogBackend`] 之上增加调用位置标记、会话标识关联，
//! 以及生产环境下的异常邮件转发。

use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use baseproject_core::{MailDispatcher, ProjectProperties, ProjectResult};
use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::backend::{LogBackend, LogRecord, TracingBackend};
use crate::context;
use crate::failure::{render_failure, EMAIL_LINE_SEPARATOR, LOG_LINE_SEPARATOR};
use crate::log_level::LogLevel;

pub const DEFAULT_LOGGER_NAME: &str = "mainLogger";

const EXCEPTION_EVENT: &str = "encountered an exception";
const MESSAGE_EVENT: &str = "received a message to send email";

macro_rules! level_methods {
    ($level:expr, $plain:ident, $formatted:ident, $with_failure:ident) => {
        #[track_caller]
        pub fn $plain(&self, message: &str) {
            self.log($level, format_args!("{}", message), Location::caller());
        }

        #[track_caller]
        pub fn $formatted(&self, args: fmt::Arguments<'_>) {
            self.log($level, args, Location::caller());
        }

        /// 记录 `args` 和错误链；生产环境下即使级别未启用也会邮件转发
        #[track_caller]
        pub fn $with_failure(&self, failure: &(dyn Error + 'static), args: fmt::Arguments<'_>) {
            self.log_failure($level, failure, args, Location::caller());
        }
    };
}

/// 绑定项目属性的分级日志器
#[derive(Clone)]
pub struct Logger {
    name: String,
    properties: Arc<ProjectProperties>,
    backend: Arc<dyn LogBackend>,
    mailer: Arc<MailDispatcher>,
}

impl Logger {
    pub fn new(
        properties: Arc<ProjectProperties>,
        backend: Arc<dyn LogBackend>,
        mailer: Arc<MailDispatcher>,
    ) -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            properties,
            backend,
            mailer,
        }
    }

    /// 由 `properties` 配置的 `tracing` 后端和 SMTP 邮件发送器
    pub fn from_properties(properties: Arc<ProjectProperties>) -> Self {
        let backend = Arc::new(TracingBackend::from_properties(&properties));
        let mailer = Arc::new(MailDispatcher::smtp(properties.clone()));
        Self::new(properties, backend, mailer)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.backend.is_enabled(level)
    }

    /// 之后本线程（或 scope 内任务）的每条记录都带上
    /// `"<session_id> - <logger_identifier>"`
    pub fn set_session_id(&self, session_id: &str) {
        let tagged = match self.properties.logger_identifier() {
            Ok(identifier) if !identifier.is_empty() => format!("{session_id} - {identifier}"),
            _ => session_id.to_string(),
        };
        context::set_session_id(tagged);
    }

    pub fn session_id(&self) -> String {
        context::current_session_id()
    }

    level_methods!(LogLevel::Fatal, fatal, fatal_fmt, fatal_with);
    level_methods!(LogLevel::Error, error, error_fmt, error_with);
    level_methods!(LogLevel::Warn, warn, warn_fmt, warn_with);
    level_methods!(LogLevel::Info, info, info_fmt, info_with);
    level_methods!(LogLevel::Debug, debug, debug_fmt, debug_with);
    level_methods!(LogLevel::Trace, trace, trace_fmt, trace_with);

    /// 生产环境下把 `message` 发送到 `logger_email_destination`
    #[track_caller]
    pub fn send_email_on_production(&self, message: &str) {
        self.relay_on_production(MESSAGE_EVENT, || message.to_string(), Location::caller());
    }

    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>, caller: &'static Location<'static>) {
        if !self.backend.is_enabled(level) {
            return;
        }
        self.emit(level, args.to_string(), caller);
    }

    fn log_failure(
        &self,
        level: LogLevel,
        failure: &(dyn Error + 'static),
        args: fmt::Arguments<'_>,
        caller: &'static Location<'static>,
    ) {
        if self.backend.is_enabled(level) {
            self.emit(level, args.to_string(), caller);
            self.emit(level, render_failure(failure, LOG_LINE_SEPARATOR), caller);
        }
        self.relay_on_production(
            EXCEPTION_EVENT,
            || render_failure(failure, EMAIL_LINE_SEPARATOR),
            caller,
        );
    }

    fn emit(&self, level: LogLevel, message: String, caller: &'static Location<'static>) {
        let call_site = format!("{}:{}", caller.file(), caller.line());
        let session_id = context::record_call_site(&call_site);
        let record = LogRecord::new(level, &self.name, session_id, Some(call_site), message);
        self.backend.emit(&record);
    }

    fn relay_on_production(
        &self,
        event: &str,
        body: impl FnOnce() -> String,
        caller: &'static Location<'static>,
    ) {
        if let Err(e) = self.try_relay(event, body) {
            self.log(
                LogLevel::Error,
                format_args!("Caught exception trying to send exception email, message: {e}"),
                caller,
            );
        }
    }

    // 非生产环境不渲染邮件正文
    fn try_relay(&self, event: &str, body: impl FnOnce() -> String) -> ProjectResult<()> {
        if !self.properties.production()? {
            return Ok(());
        }

        let now = Utc::now();
        let subject = format!(
            "Session ({}) on {} {event} at {}!",
            context::current_session_id(),
            self.mailer.local_hostname(),
            now.to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        let recipient = self.properties.logger_email_destination()?;
        let status = self.mailer.send_html_email(recipient, &subject, &body(), now)?;
        debug!(logger = %self.name, sent = status.is_sent(), "Relayed log email");
        Ok(())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("source", &self.properties.source())
            .finish_non_exhaustive()
    }
}
