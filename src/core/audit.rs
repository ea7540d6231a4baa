use crate::core::enumerator::DeviceEnumerator;
use crate::core::notifier::Notifier;
use crate::core::report::{build_audit_report, REPORT_SUBJECT};
use crate::domain::model::{DeviceStream, EnumerationResult, OutgoingEmail};
use crate::domain::ports::{ConfigProvider, DirectoryClient, Mailer};
use crate::domain::thresholds::Thresholds;
use crate::utils::error::{AuditError, Result};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSummary {
    pub customer_id: String,
    pub mobile: EnumerationResult,
    pub chromeos: EnumerationResult,
    pub report: String,
    pub notifications_sent: usize,
}

impl AuditSummary {
    pub fn total_devices(&self) -> usize {
        self.mobile.total_devices_seen + self.chromeos.total_devices_seen
    }

    pub fn total_findings(&self) -> usize {
        self.mobile.findings.len() + self.chromeos.findings.len()
    }

    pub fn total_errors(&self) -> usize {
        self.mobile.errors.len() + self.chromeos.errors.len()
    }
}

pub struct DeviceAudit<D: DirectoryClient, M: Mailer> {
    directory: D,
    mailer: M,
    thresholds: Thresholds,
}

impl<D: DirectoryClient, M: Mailer> DeviceAudit<D, M> {
    pub fn new(directory: D, mailer: M) -> Self {
        Self::with_thresholds(directory, mailer, Thresholds::current())
    }

    pub fn with_thresholds(directory: D, mailer: M, thresholds: Thresholds) -> Self {
        Self {
            directory,
            mailer,
            thresholds,
        }
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    pub async fn run<C: ConfigProvider>(&self, config: &C, now: DateTime<Utc>) -> Result<AuditSummary> {
        tracing::info!("🚀 Starting device OS audit");

        tracing::info!("📡 Resolving customer from {}", config.reference_user());
        let customer_id = self
            .directory
            .resolve_customer_id(config.reference_user())
            .await?;
        tracing::debug!("Customer id: {}", customer_id);

        let enumerator = DeviceEnumerator::new(&self.directory, &self.thresholds);
        let mobile = enumerator.enumerate(DeviceStream::Mobile, &customer_id).await?;
        let chromeos = enumerator.enumerate(DeviceStream::ChromeOs, &customer_id).await?;

        let report = build_audit_report(&mobile, &chromeos, &self.thresholds, now);
        let report_email = report_email(config.report_recipients(), &report)?;
        tracing::info!(
            "📧 Sending report to {} (cc: {})",
            report_email.to,
            report_email.cc.len()
        );
        self.mailer.send(&report_email).await?;

        let mut notifications_sent = 0;
        if config.notify_users() {
            let notifier = Notifier::new(&self.mailer);
            notifications_sent += notifier.notify_owners(&mobile.findings).await?;
            notifications_sent += notifier.notify_owners(&chromeos.findings).await?;
            tracing::info!("📧 Sent {} owner notifications", notifications_sent);
        } else {
            tracing::info!("Owner notifications disabled");
        }

        Ok(AuditSummary {
            customer_id,
            mobile,
            chromeos,
            report,
            notifications_sent,
        })
    }
}

/// 第一位收件人為 `to`，其餘放在 `cc`
pub fn report_email(recipients: &[String], report: &str) -> Result<OutgoingEmail> {
    let (to, cc) = recipients
        .split_first()
        .ok_or_else(|| AuditError::MissingConfigError {
            field: "audit.report_recipients".to_string(),
        })?;

    Ok(OutgoingEmail {
        to: to.clone(),
        cc: cc.to_vec(),
        subject: REPORT_SUBJECT.to_string(),
        body: report.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_email_splits_recipients() {
        let recipients = vec![
            "it@example.com".to_string(),
            "sec@example.com".to_string(),
            "cto@example.com".to_string(),
        ];

        let email = report_email(&recipients, "body").unwrap();

        assert_eq!(email.to, "it@example.com");
        assert_eq!(email.cc, vec!["sec@example.com", "cto@example.com"]);
        assert_eq!(email.subject, "Device OS report");
        assert_eq!(email.body, "body");
    }

    #[test]
    fn test_report_email_requires_a_recipient() {
        assert!(matches!(
            report_email(&[], "body"),
            Err(AuditError::MissingConfigError { .. })
        ));
    }
}
