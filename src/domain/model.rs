use crate::domain::version::PatchDate;
use std::fmt;

/// 目錄服務回傳的一台裝置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceRecord {
    Android {
        owners: Vec<String>,
        /// `"0"` means the device has never reported a patch level.
        security_patch_level: String,
    },
    IosSync {
        owners: Vec<String>,
        os: String,
    },
    ChromeOs {
        annotated_user: String,
        os_version: String,
    },
    /// Any other mobile device type, e.g. `GOOGLE_SYNC`.
    Other {
        kind: String,
    },
}

pub const UNREPORTED_PATCH_LEVEL: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Android,
    Ios,
    ChromeOs,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Android => "Android",
            DeviceKind::Ios => "iOS",
            DeviceKind::ChromeOs => "ChromeOS",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedVersion {
    PatchDate(PatchDate),
    Version(String),
}

impl fmt::Display for ObservedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservedVersion::PatchDate(date) => write!(f, "{}", date),
            ObservedVersion::Version(version) => f.write_str(version),
        }
    }
}

/// 低於門檻的裝置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub owner: String,
    pub observed: ObservedVersion,
    pub kind: DeviceKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationError {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Finding(Finding),
    Error(ClassificationError),
    /// Compliant, or no version to judge.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationResult {
    pub total_devices_seen: usize,
    pub findings: Vec<Finding>,
    pub errors: Vec<ClassificationError>,
}

impl EnumerationResult {
    pub fn record(&mut self, classification: Classification) {
        self.total_devices_seen += 1;
        match classification {
            Classification::Finding(finding) => self.findings.push(finding),
            Classification::Error(error) => self.errors.push(error),
            Classification::Skip => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStream {
    Mobile,
    ChromeOs,
}

impl DeviceStream {
    pub fn label(&self) -> &'static str {
        match self {
            DeviceStream::Mobile => "mobile",
            DeviceStream::ChromeOs => "ChromeOS",
        }
    }

    pub fn page_size(&self) -> u32 {
        match self {
            DeviceStream::Mobile => 100,
            DeviceStream::ChromeOs => 200,
        }
    }
}

/// 一頁目錄查詢結果；`records` 為 `None` 表示回應中沒有該集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevicePage {
    pub records: Option<Vec<DeviceRecord>>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_every_device() {
        let mut result = EnumerationResult::default();
        result.record(Classification::Skip);
        result.record(Classification::Error(ClassificationError {
            message: "Unexpected type: OTHER".to_string(),
        }));
        result.record(Classification::Finding(Finding {
            owner: "a@example.com".to_string(),
            observed: ObservedVersion::Version("13.1".to_string()),
            kind: DeviceKind::Ios,
        }));

        assert_eq!(result.total_devices_seen, 3);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.errors.len(), 1);
    }
}
