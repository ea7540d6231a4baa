use crate::domain::model::{
    Classification, ClassificationError, DeviceKind, DeviceRecord, Finding, ObservedVersion,
    UNREPORTED_PATCH_LEVEL,
};
use crate::domain::thresholds::Thresholds;
use crate::domain::version::{OsVersion, PatchDate};
use crate::utils::error::{AuditError, Result};
use regex::Regex;
use std::sync::LazyLock;

static IOS_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"iOS ([\d.]+)").expect("iOS version pattern compiles"));

/// 依裝置種類判斷是否低於最低版本
///
/// Returns `Err` only for malformed version data, which aborts the run. An
/// unrecognised mobile device type is an `Ok(Classification::Error)` so the
/// remaining devices are still reported.
pub fn classify(record: &DeviceRecord, thresholds: &Thresholds) -> Result<Classification> {
    match record {
        DeviceRecord::Android {
            owners,
            security_patch_level,
        } => {
            if security_patch_level == UNREPORTED_PATCH_LEVEL {
                return Ok(Classification::Skip);
            }

            let patch_date = PatchDate::parse(security_patch_level)?;
            if patch_date < thresholds.minimum_android_patch {
                return Ok(Classification::Finding(Finding {
                    owner: first_owner(owners),
                    observed: ObservedVersion::PatchDate(patch_date),
                    kind: DeviceKind::Android,
                }));
            }
            Ok(Classification::Skip)
        }
        DeviceRecord::IosSync { owners, os } => {
            if os.is_empty() {
                return Ok(Classification::Skip);
            }

            let token = extract_ios_version(os)?;
            let version = OsVersion::parse(token)?;
            if version < thresholds.minimum_ios {
                return Ok(Classification::Finding(Finding {
                    owner: first_owner(owners),
                    observed: ObservedVersion::Version(token.to_string()),
                    kind: DeviceKind::Ios,
                }));
            }
            Ok(Classification::Skip)
        }
        DeviceRecord::ChromeOs {
            annotated_user,
            os_version,
        } => {
            let version = OsVersion::parse(os_version)?;
            if version < thresholds.minimum_chromeos {
                return Ok(Classification::Finding(Finding {
                    owner: annotated_user.clone(),
                    observed: ObservedVersion::Version(os_version.clone()),
                    kind: DeviceKind::ChromeOs,
                }));
            }
            Ok(Classification::Skip)
        }
        DeviceRecord::Other { kind } => Ok(Classification::Error(ClassificationError {
            message: format!("Unexpected type: {}", kind),
        })),
    }
}

/// 從 `"iOS 13.1.2"` 這類描述中取出版本號
pub fn extract_ios_version(descriptor: &str) -> Result<&str> {
    IOS_VERSION_PATTERN
        .captures(descriptor)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| AuditError::PatternMismatch {
            descriptor: descriptor.to_string(),
        })
}

fn first_owner(owners: &[String]) -> String {
    owners.first().cloned().unwrap_or_default()
}
