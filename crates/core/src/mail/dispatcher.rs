use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::config::ProjectProperties;
use crate::utils::host::{hostname_or_unknown, system_hostname, HostnameResolver};
use crate::ProjectResult;

use super::{
    DeliveryStatus, EmailMessage, MailSession, MailTransport, SmtpMailTransport, HTML_CONTENT_TYPE,
};

/// 根据 [`ProjectProperties`] 配置发送单封 HTML 邮件
pub struct MailDispatcher {
    properties: Arc<ProjectProperties>,
    transport: Arc<dyn MailTransport>,
    resolve_hostname: HostnameResolver,
}

impl MailDispatcher {
    pub fn new(properties: Arc<ProjectProperties>, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            properties,
            transport,
            resolve_hostname: system_hostname,
        }
    }

    /// 使用 [`SmtpMailTransport`] 的发送器
    pub fn smtp(properties: Arc<ProjectProperties>) -> Self {
        Self::new(properties, Arc::new(SmtpMailTransport))
    }

    pub fn with_hostname_resolver(mut self, resolver: HostnameResolver) -> Self {
        self.resolve_hostname = resolver;
        self
    }

    pub fn properties(&self) -> &ProjectProperties {
        &self.properties
    }

    /// 本机主机名，无法解析时为 `"null"`
    pub fn local_hostname(&self) -> String {
        hostname_or_unknown(self.resolve_hostname)
    }

    /// 生产环境为 `""`，否则为 `"(<nonproduction_prefix>@<hostname>) "`
    pub fn subject_prefix(&self) -> ProjectResult<String> {
        if self.properties.production()? {
            return Ok(String::new());
        }
        Ok(format!(
            "({}@{}) ",
            self.properties.nonproduction_prefix()?,
            self.local_hostname()
        ))
    }

    /// 发送一封 HTML 邮件
    ///
    /// 缺少配置键时返回错误；传输失败只记录日志，并返回 [`DeliveryStatus::Failed`]。
    pub fn send_html_email(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        sent_at: DateTime<Utc>,
    ) -> ProjectResult<DeliveryStatus> {
        let subject = format!("{}{subject}", self.subject_prefix()?);
        let session = MailSession::smtp(self.properties.smtp_host()?);
        let message = EmailMessage {
            from: self.properties.email_from_field()?.to_string(),
            recipient: recipient.to_string(),
            subject,
            html_body: html_body.to_string(),
            content_type: HTML_CONTENT_TYPE,
            sent_at,
        };

        match self.transport.deliver(&session, &message) {
            Ok(()) => {
                debug!(recipient, subject = %message.subject, "Email sent");
                Ok(DeliveryStatus::Sent)
            }
            Err(e) => {
                error!(
                    recipient,
                    smtp_host = %session.host,
                    error = %e,
                    "Unable to send email!"
                );
                Ok(DeliveryStatus::Failed)
            }
        }
    }
}
