use std::time::SystemTime;

use anyhow::{anyhow, bail, Result};
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, SinglePart};
use lettre::{Message, SmtpTransport, Transport};
use tracing::debug;

use super::{EmailMessage, MailSession, MailTransport, MAIL_PROTOCOL};

/// 基于 lettre 阻塞传输的普通 SMTP
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpMailTransport;

impl SmtpMailTransport {
    pub fn new() -> Self {
        Self
    }

    /// 构建 MIME 邮件，不访问网络
    pub fn build_message(message: &EmailMessage) -> Result<Message> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| anyhow!("Invalid sender {}: {e}", message.from))?;
        let to: Mailbox = message
            .recipient
            .parse()
            .map_err(|e| anyhow!("Invalid recipient {}: {e}", message.recipient))?;
        let content_type = ContentType::parse(message.content_type)
            .map_err(|e| anyhow!("Invalid content type {}: {e}", message.content_type))?;

        let body = SinglePart::builder()
            .header(content_type)
            .body(encode_latin1(&message.html_body));

        Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.as_str())
            .date(SystemTime::from(message.sent_at))
            .singlepart(body)
            .map_err(|e| anyhow!("Failed to build email: {e}"))
    }
}

impl MailTransport for SmtpMailTransport {
    fn deliver(&self, session: &MailSession, message: &EmailMessage) -> Result<()> {
        if session.protocol != MAIL_PROTOCOL {
            bail!("Unsupported mail protocol: {}", session.protocol);
        }

        let email = Self::build_message(message)?;
        let transport = SmtpTransport::builder_dangerous(session.host.as_str()).build();

        if !transport.test_connection()? {
            bail!("Unable to connect to SMTP host {}", session.host);
        }
        transport.send(&email)?;

        debug!(host = %session.host, recipient = %message.recipient, "Email handed to SMTP host");
        Ok(())
    }
}

// The declared charset is ISO-8859-1; characters outside it become '?'.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::HTML_CONTENT_TYPE;
    use chrono::{TimeZone, Utc};

    fn message() -> EmailMessage {
        EmailMessage {
            from: "noreply@example.com".to_string(),
            recipient: "ops@example.com".to_string(),
            subject: "(dev1@box) Nightly report".to_string(),
            html_body: "<b>done</b>".to_string(),
            content_type: HTML_CONTENT_TYPE,
            sent_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_build_message_headers() {
        let built = SmtpMailTransport::build_message(&message()).unwrap();
        let raw = String::from_utf8_lossy(&built.formatted()).to_lowercase();

        assert!(raw.contains("from: noreply@example.com"));
        assert!(raw.contains("to: ops@example.com"));
        assert!(raw.contains("subject: (dev1@box) nightly report"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("charset=iso-8859-1"));
        assert!(raw.contains("01 mar 2024 12:00:00"));
    }

    #[test]
    fn test_build_message_rejects_bad_address() {
        let mut bad = message();
        bad.recipient = "not an address".to_string();
        assert!(SmtpMailTransport::build_message(&bad).is_err());
    }

    #[test]
    fn test_unsupported_protocol() {
        let session = MailSession {
            protocol: "imap".to_string(),
            host: "localhost".to_string(),
        };
        assert!(SmtpMailTransport.deliver(&session, &message()).is_err());
    }

    #[test]
    fn test_encode_latin1() {
        assert_eq!(encode_latin1("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_latin1("€"), vec![b'?']);
    }
}
