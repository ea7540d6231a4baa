use crate::utils::error::{AuditError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// 以點分隔的作業系統版本，例如 `78.0.3904.92` → `[78, 0, 3904, 92]`
///
/// Ordering is lexicographic over the shared prefix; when the shared prefix is
/// equal the shorter version sorts first (`13.2 < 13.2.1`). Trailing zeros are
/// significant (`13.2 < 13.2.0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OsVersion(Vec<u64>);

impl OsVersion {
    pub fn new(components: Vec<u64>) -> Self {
        Self(components)
    }

    pub fn parse(input: &str) -> Result<Self> {
        let components = input
            .split('.')
            .map(|component| {
                component
                    .parse::<u64>()
                    .map_err(|e| AuditError::VersionParseError {
                        input: input.to_string(),
                        reason: format!("component '{}' is not a number: {}", component, e),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self(components))
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }

    pub fn compare(&self, other: &OsVersion) -> Ordering {
        self.cmp(other)
    }
}

impl FromStr for OsVersion {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", rendered.join("."))
    }
}

/// Android 安全性修補程式等級
///
/// The directory reports it as milliseconds since the Unix epoch, in string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PatchDate(DateTime<Utc>);

impl PatchDate {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let millis = match trimmed.parse::<i64>() {
            Ok(millis) => millis,
            Err(_) => {
                let value = trimmed
                    .parse::<f64>()
                    .map_err(|e| AuditError::VersionParseError {
                        input: input.to_string(),
                        reason: format!("not an epoch timestamp: {}", e),
                    })?;
                if !value.is_finite() {
                    return Err(AuditError::VersionParseError {
                        input: input.to_string(),
                        reason: "not a finite timestamp".to_string(),
                    });
                }
                value.trunc() as i64
            }
        };

        DateTime::from_timestamp_millis(millis)
            .map(Self)
            .ok_or_else(|| AuditError::VersionParseError {
                input: input.to_string(),
                reason: "timestamp out of range".to_string(),
            })
    }

    /// 當天 00:00 UTC
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc())
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for PatchDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
