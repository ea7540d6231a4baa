pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{DryRunMailer, GmailMailer, GoogleDirectoryClient};
pub use config::AuditConfig;
pub use core::audit::{AuditSummary, DeviceAudit};
pub use domain::thresholds::Thresholds;
pub use utils::error::{AuditError, Result};
