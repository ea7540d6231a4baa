//! Minimum acceptable OS versions.
//!
//! Bump the minimum and its `*_LAST_UPDATE` date together whenever a vendor
//! ships a security release; the report prints how stale each one is.

use crate::domain::version::{OsVersion, PatchDate};
use chrono::NaiveDate;

/// (year, month, day)
pub type CalendarDate = (i32, u32, u32);

pub const MINIMUM_ANDROID_PATCH: CalendarDate = (2019, 11, 5);
pub const ANDROID_LAST_UPDATE: CalendarDate = (2019, 11, 4);

pub const MINIMUM_IOS_VERSION: &[u64] = &[13, 2];
pub const IOS_LAST_UPDATE: CalendarDate = (2019, 10, 29);

pub const MINIMUM_CHROMEOS_VERSION: &[u64] = &[78, 0, 3904, 92];
pub const CHROMEOS_LAST_UPDATE: CalendarDate = (2019, 11, 6);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds {
    pub minimum_android_patch: PatchDate,
    pub android_last_update: NaiveDate,
    pub minimum_ios: OsVersion,
    pub ios_last_update: NaiveDate,
    pub minimum_chromeos: OsVersion,
    pub chromeos_last_update: NaiveDate,
}

impl Thresholds {
    /// 目前編譯進來的門檻值
    pub fn current() -> Self {
        Self {
            minimum_android_patch: PatchDate::from_date(date(MINIMUM_ANDROID_PATCH)),
            android_last_update: date(ANDROID_LAST_UPDATE),
            minimum_ios: OsVersion::new(MINIMUM_IOS_VERSION.to_vec()),
            ios_last_update: date(IOS_LAST_UPDATE),
            minimum_chromeos: OsVersion::new(MINIMUM_CHROMEOS_VERSION.to_vec()),
            chromeos_last_update: date(CHROMEOS_LAST_UPDATE),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::current()
    }
}

fn date((year, month, day): CalendarDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("threshold constants are valid calendar dates")
}
