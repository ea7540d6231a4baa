use crate::config::AuditConfig;
use crate::utils::error::{AuditError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

impl AuditConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuditError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AuditError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// 替換環境變數 (例如 ${GOOGLE_ACCESS_TOKEN})；找不到的變數保留原樣
fn substitute_env_vars(content: &str) -> String {
    ENV_VAR_PATTERN
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC_CONFIG: &str = r#"
[audit]
reference_user = "admin@example.com"
report_recipients = ["it@example.com", "security@example.com"]
notify_users = true

[directory]
access_token = "directory-token"

[mail]
access_token = "mail-token"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = AuditConfig::from_toml_str(BASIC_CONFIG).unwrap();

        assert_eq!(config.reference_user(), "admin@example.com");
        assert_eq!(config.report_recipients().len(), 2);
        assert!(config.notify_users());
        assert_eq!(config.directory.base_url, "https://admin.googleapis.com");
        assert_eq!(config.directory.timeout_seconds, 30);
        assert_eq!(config.mail.base_url, "https://gmail.googleapis.com");
        assert_eq!(config.mail.sender, "me");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_notify_users_defaults_to_false() {
        let toml_content = r#"
[audit]
reference_user = "admin@example.com"
report_recipients = ["it@example.com"]

[directory]
access_token = "t"

[mail]
access_token = "t"
"#;

        let config = AuditConfig::from_toml_str(toml_content).unwrap();
        assert!(!config.notify_users());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DEVICE_AUDIT_TEST_TOKEN", "ya29.secret");

        let toml_content = r#"
[audit]
reference_user = "admin@example.com"
report_recipients = ["it@example.com"]

[directory]
access_token = "${DEVICE_AUDIT_TEST_TOKEN}"

[mail]
access_token = "${DEVICE_AUDIT_TEST_TOKEN}"
"#;

        let config = AuditConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.directory.access_token, "ya29.secret");
        assert_eq!(config.mail.access_token, "ya29.secret");

        std::env::remove_var("DEVICE_AUDIT_TEST_TOKEN");
    }

    #[test]
    fn test_unresolved_env_var_fails_validation() {
        let toml_content = r#"
[audit]
reference_user = "admin@example.com"
report_recipients = ["it@example.com"]

[directory]
access_token = "${DEVICE_AUDIT_TEST_UNSET_VARIABLE}"

[mail]
access_token = "t"
"#;

        let config = AuditConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.directory.access_token, "${DEVICE_AUDIT_TEST_UNSET_VARIABLE}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[audit]
reference_user = "admin@example.com"
report_recipients = []

[directory]
base_url = "invalid-url"
access_token = "t"

[mail]
access_token = "t"
"#;

        let config = AuditConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let err = AuditConfig::from_toml_str("[audit]\nreference_user = \"a@example.com\"\n").unwrap_err();
        assert!(matches!(err, AuditError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC_CONFIG.as_bytes()).unwrap();

        let config = AuditConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.audit.reference_user, "admin@example.com");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AuditConfig::from_file("/nonexistent/device-audit.toml").unwrap_err();
        assert!(matches!(err, AuditError::IoError(_)));
    }
}
