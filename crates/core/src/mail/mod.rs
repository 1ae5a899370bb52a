//! HTML email dispatch.
//!
//! [`MailDispatcher`] turns a recipient, subject and HTML body into an
//! [`EmailMessage`] using the project properties, and hands it to a
//! [`MailTransport`]. The SMTP transport lives in [`smtp`].

use chrono::{DateTime, Utc};

pub mod dispatcher;
pub mod smtp;

pub use dispatcher::MailDispatcher;
pub use smtp::SmtpMailTransport;

/// 发送器唯一支持的协议
pub const MAIL_PROTOCOL: &str = "smtp";

/// 每封邮件声明的内容类型
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=ISO-8859-1";

/// 传输会话参数；不做认证
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSession {
    pub protocol: String,
    pub host: String,
}

impl MailSession {
    pub fn smtp<S: Into<String>>(host: S) -> Self {
        Self {
            protocol: MAIL_PROTOCOL.to_string(),
            host: host.into(),
        }
    }
}

/// 一封待发送的 HTML 邮件，每次发送时构建
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub content_type: &'static str,
    pub sent_at: DateTime<Utc>,
}

/// 发送结果；传输失败在这里体现，不会作为错误抛出
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryStatus::Sent)
    }
}

/// 连接邮件主机，发送一封邮件后断开
pub trait MailTransport: Send + Sync {
    fn deliver(&self, session: &MailSession, message: &EmailMessage) -> anyhow::Result<()>;
}
