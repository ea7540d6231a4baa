use crate::domain::model::{DeviceStream, EnumerationResult};
use crate::domain::thresholds::Thresholds;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub const REPORT_SUBJECT: &str = "Device OS report";

const MILLIS_PER_DAY: i64 = 86_400_000;

/// 單一裝置串流的報告；錯誤另外收集，最後附在整份報告尾端
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub message: String,
    pub errors: String,
}

pub fn build_stream_report(result: &EnumerationResult, label: &str) -> StreamReport {
    let mut message = format!("Found {} {} devices.\n", result.total_devices_seen, label);

    if result.findings.is_empty() {
        message.push_str(&format!("No outdated {} devices\n", label));
    } else {
        message.push_str(&format!(
            "{} outdated {} devices owned by:\n",
            result.findings.len(),
            label
        ));
        for finding in &result.findings {
            message.push_str(&format!("- {} ({})\n", finding.owner, finding.observed));
        }
    }

    let errors = result
        .errors
        .iter()
        .map(|error| format!("- {}\n", error.message))
        .collect();

    StreamReport { message, errors }
}

/// Whole days between `last_updated` (midnight UTC) and `now`, floored.
/// Negative when `last_updated` lies in the future.
pub fn days_since(last_updated: NaiveDate, now: DateTime<Utc>) -> i64 {
    let reference = last_updated.and_time(NaiveTime::MIN).and_utc();
    (now - reference).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

pub fn days_since_updated(label: &str, last_updated: NaiveDate, now: DateTime<Utc>) -> String {
    format!(
        "It has been {} days since {} was updated.\n",
        days_since(last_updated, now),
        label
    )
}

pub fn build_audit_report(
    mobile: &EnumerationResult,
    chromeos: &EnumerationResult,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> String {
    let mut body = String::new();
    let mut errors = String::new();

    body.push_str(&days_since_updated("iOS", thresholds.ios_last_update, now));
    body.push_str(&days_since_updated("Android", thresholds.android_last_update, now));
    let mobile_report = build_stream_report(mobile, DeviceStream::Mobile.label());
    body.push_str(&mobile_report.message);
    errors.push_str(&mobile_report.errors);
    body.push('\n');

    body.push_str(&days_since_updated(
        "ChromeOS",
        thresholds.chromeos_last_update,
        now,
    ));
    let chromeos_report = build_stream_report(chromeos, DeviceStream::ChromeOs.label());
    body.push_str(&chromeos_report.message);
    errors.push_str(&chromeos_report.errors);

    body + &errors
}
