use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status} for {url}: {body}")]
    HttpStatusError {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid version '{input}': {reason}")]
    VersionParseError { input: String, reason: String },

    #[error("No iOS version found in OS descriptor '{descriptor}'")]
    PatternMismatch { descriptor: String },

    #[error("Line break in '{header}' header value {value:?}")]
    InvalidHeaderError { header: String, value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AuditError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuditError::ApiError(_) | AuditError::HttpStatusError { .. } => ErrorCategory::Network,
            AuditError::UrlError(_)
            | AuditError::ConfigError { .. }
            | AuditError::ConfigValidationError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AuditError::SerializationError(_)
            | AuditError::VersionParseError { .. }
            | AuditError::PatternMismatch { .. }
            | AuditError::InvalidHeaderError { .. } => ErrorCategory::Data,
            AuditError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常重跑即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AuditError::ApiError(_) => "Check network connectivity and re-run the audit",
            AuditError::HttpStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Refresh the access token and make sure it carries the directory and gmail scopes"
            }
            AuditError::HttpStatusError { .. } => "Inspect the API response body and re-run the audit",
            AuditError::UrlError(_) => "Fix the base_url values in the configuration",
            AuditError::IoError(_) => "Check file paths and permissions",
            AuditError::SerializationError(_) => {
                "The API response or a JSON-encoded setting could not be decoded"
            }
            AuditError::VersionParseError { .. } | AuditError::PatternMismatch { .. } => {
                "A device reported a malformed OS version; inspect the device record in the admin console"
            }
            AuditError::InvalidHeaderError { .. } => {
                "An owner address contains a line break; fix the annotated user in the admin console"
            }
            AuditError::ConfigError { .. }
            | AuditError::ConfigValidationError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. } => {
                "Review the configuration file or environment variables"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the directory or mail API: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Unexpected device data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
