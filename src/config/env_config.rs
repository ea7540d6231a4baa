use crate::config::{
    AuditConfig, AuditSettings, DirectoryConfig, MailConfig, DEFAULT_DIRECTORY_BASE_URL,
    DEFAULT_GMAIL_BASE_URL, DEFAULT_MAIL_SENDER, DEFAULT_TIMEOUT_SECONDS,
};
use crate::utils::error::{AuditError, Result};

pub const REFERENCE_USER: &str = "REFERENCE_USER";
/// JSON array, e.g. `["it@example.com","security@example.com"]`
pub const REPORT_RECIPIENTS: &str = "REPORT_RECIPIENTS";
/// JSON boolean
pub const NOTIFY_USERS: &str = "NOTIFY_USERS";
pub const GOOGLE_ACCESS_TOKEN: &str = "GOOGLE_ACCESS_TOKEN";
pub const DIRECTORY_BASE_URL: &str = "DIRECTORY_BASE_URL";
pub const GMAIL_BASE_URL: &str = "GMAIL_BASE_URL";
pub const MAIL_SENDER: &str = "MAIL_SENDER";
pub const HTTP_TIMEOUT_SECONDS: &str = "HTTP_TIMEOUT_SECONDS";

impl AuditConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 從任意 key/value 來源建立配置，方便測試
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| AuditError::MissingConfigError {
                field: key.to_string(),
            })
        };

        let report_recipients: Vec<String> = serde_json::from_str(&required(REPORT_RECIPIENTS)?)?;
        let notify_users = match lookup(NOTIFY_USERS) {
            Some(raw) => serde_json::from_str::<bool>(&raw)?,
            None => false,
        };

        let timeout_seconds = match lookup(HTTP_TIMEOUT_SECONDS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| AuditError::InvalidConfigValueError {
                    field: HTTP_TIMEOUT_SECONDS.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        let access_token = required(GOOGLE_ACCESS_TOKEN)?;

        Ok(Self {
            audit: AuditSettings {
                reference_user: required(REFERENCE_USER)?,
                report_recipients,
                notify_users,
            },
            directory: DirectoryConfig {
                base_url: lookup(DIRECTORY_BASE_URL)
                    .unwrap_or_else(|| DEFAULT_DIRECTORY_BASE_URL.to_string()),
                access_token: access_token.clone(),
                timeout_seconds,
            },
            mail: MailConfig {
                base_url: lookup(GMAIL_BASE_URL).unwrap_or_else(|| DEFAULT_GMAIL_BASE_URL.to_string()),
                access_token,
                sender: lookup(MAIL_SENDER).unwrap_or_else(|| DEFAULT_MAIL_SENDER.to_string()),
                timeout_seconds,
            },
        })
    }
}
