use crate::adapters::http::{build_client, endpoint, ensure_success};
use crate::config::MailConfig;
use crate::domain::model::OutgoingEmail;
use crate::domain::ports::Mailer;
use crate::utils::error::{AuditError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use reqwest::Client;
use url::Url;

/// 透過 Gmail API 寄信
pub struct GmailMailer {
    client: Client,
    base_url: Url,
    access_token: String,
    sender: String,
}

impl GmailMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            base_url: Url::parse(&config.base_url)?,
            access_token: config.access_token.clone(),
            sender: config.sender.clone(),
        })
    }
}

#[async_trait]
impl Mailer for GmailMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let url = endpoint(
            &self.base_url,
            &["gmail", "v1", "users", self.sender.as_str(), "messages", "send"],
        )?;
        let raw = URL_SAFE.encode(build_message(email)?);

        tracing::debug!("📧 Sending '{}' to {}", email.subject, email.to);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await?;
        ensure_success(response).await?;

        Ok(())
    }
}

/// 組出 RFC 822 純文字信件
pub fn build_message(email: &OutgoingEmail) -> Result<String> {
    let mut message = format!("To: {}\r\n", header_value("To", &email.to)?);
    if !email.cc.is_empty() {
        let cc = email
            .cc
            .iter()
            .map(|address| header_value("Cc", address))
            .collect::<Result<Vec<_>>>()?;
        message.push_str(&format!("Cc: {}\r\n", cc.join(",")));
    }
    let subject = header_value("Subject", &email.subject)?;
    message.push_str(&format!("Subject: {}\r\n", encode_header(subject)));
    message.push_str("MIME-Version: 1.0\r\n");
    message.push_str("Content-Type: text/plain; charset=UTF-8\r\n");
    message.push_str("\r\n");
    message.push_str(&email.body.replace("\r\n", "\n").replace('\n', "\r\n"));
    Ok(message)
}

/// Annotated users are free text; a CR or LF would start a new header.
fn header_value<'a>(header: &str, value: &'a str) -> Result<&'a str> {
    if value.contains(['\r', '\n']) {
        return Err(AuditError::InvalidHeaderError {
            header: header.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Non-ASCII header values use RFC 2047 encoded-words.
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(value))
    }
}
