#[cfg(feature = "cli")]
pub mod cli;
pub mod env_config;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_email_list, validate_non_empty_string, validate_range, validate_resolved, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIRECTORY_BASE_URL: &str = "https://admin.googleapis.com";
pub const DEFAULT_GMAIL_BASE_URL: &str = "https://gmail.googleapis.com";
pub const DEFAULT_MAIL_SENDER: &str = "me";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    pub audit: AuditSettings,
    pub directory: DirectoryConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Any user in the organization; its customer id scopes the device queries.
    pub reference_user: String,
    pub report_recipients: Vec<String>,
    #[serde(default)]
    pub notify_users: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_directory_base_url")]
    pub base_url: String,
    pub access_token: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_gmail_base_url")]
    pub base_url: String,
    pub access_token: String,
    /// Gmail user id the messages are sent as.
    #[serde(default = "default_mail_sender")]
    pub sender: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_directory_base_url() -> String {
    DEFAULT_DIRECTORY_BASE_URL.to_string()
}

fn default_gmail_base_url() -> String {
    DEFAULT_GMAIL_BASE_URL.to_string()
}

fn default_mail_sender() -> String {
    DEFAULT_MAIL_SENDER.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl ConfigProvider for AuditConfig {
    fn reference_user(&self) -> &str {
        &self.audit.reference_user
    }

    fn report_recipients(&self) -> &[String] {
        &self.audit.report_recipients
    }

    fn notify_users(&self) -> bool {
        self.audit.notify_users
    }
}

impl Validate for AuditConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("audit.reference_user", &self.audit.reference_user)?;
        validate_email_list("audit.report_recipients", &self.audit.report_recipients)?;

        validate_url("directory.base_url", &self.directory.base_url)?;
        validate_non_empty_string("directory.access_token", &self.directory.access_token)?;
        validate_resolved("directory.access_token", &self.directory.access_token)?;
        validate_range("directory.timeout_seconds", self.directory.timeout_seconds, 1, 300)?;

        validate_url("mail.base_url", &self.mail.base_url)?;
        validate_non_empty_string("mail.access_token", &self.mail.access_token)?;
        validate_resolved("mail.access_token", &self.mail.access_token)?;
        validate_non_empty_string("mail.sender", &self.mail.sender)?;
        validate_range("mail.timeout_seconds", self.mail.timeout_seconds, 1, 300)?;

        Ok(())
    }
}
