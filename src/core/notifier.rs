use crate::domain::model::{DeviceKind, Finding, OutgoingEmail};
use crate::domain::ports::Mailer;
use crate::utils::error::Result;

const ANDROID_OUTDATED_MESSAGE: &str = "Hello,

It appears that you have an out of date Android on your device.

To update, follow the instructions here: https://support.google.com/android/answer/7680439

Remember that keeping your devices up to date is important for our security.

Thanks!";

const IOS_OUTDATED_MESSAGE: &str = "Hello,

It appears that you have an out of date iOS on your device.

To update, follow the instructions here: https://support.apple.com/en-us/HT204204

Remember that keeping your devices up to date is important for our security.

Thanks!";

const CHROMEOS_OUTDATED_MESSAGE: &str = "Hello,

It appears that you have an out of date ChromeOS on your device.

To update, follow the instructions here: https://support.google.com/chromebook/answer/177889

Remember that keeping your devices up to date is important for our security.

Thanks!";

pub fn remediation_message(kind: DeviceKind) -> &'static str {
    match kind {
        DeviceKind::Android => ANDROID_OUTDATED_MESSAGE,
        DeviceKind::Ios => IOS_OUTDATED_MESSAGE,
        DeviceKind::ChromeOs => CHROMEOS_OUTDATED_MESSAGE,
    }
}

pub fn remediation_email(finding: &Finding) -> OutgoingEmail {
    OutgoingEmail {
        to: finding.owner.clone(),
        cc: Vec::new(),
        subject: format!("Outdated {}", finding.kind),
        body: remediation_message(finding.kind).to_string(),
    }
}

/// 通知裝置擁有者更新系統
pub struct Notifier<'a, M: Mailer> {
    mailer: &'a M,
}

impl<'a, M: Mailer> Notifier<'a, M> {
    pub fn new(mailer: &'a M) -> Self {
        Self { mailer }
    }

    /// 每個 finding 寄一封信，回傳實際寄出的數量
    pub async fn notify_owners(&self, findings: &[Finding]) -> Result<usize> {
        let mut sent = 0;

        for finding in findings {
            if finding.owner.trim().is_empty() {
                tracing::warn!(
                    "⚠️ Outdated {} device ({}) has no owner, skipping notification",
                    finding.kind,
                    finding.observed
                );
                continue;
            }

            let email = remediation_email(finding);
            tracing::debug!("📧 Notifying {} about outdated {}", email.to, finding.kind);
            self.mailer.send(&email).await?;
            sent += 1;
        }

        Ok(sent)
    }
}
