use crate::domain::model::OutgoingEmail;
use crate::domain::ports::Mailer;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// `--dry-run` 用：只記錄，不寄信
#[derive(Debug, Default)]
pub struct DryRunMailer {
    outbox: Mutex<Vec<OutgoingEmail>>,
}

impl DryRunMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outbox(&self) -> Vec<OutgoingEmail> {
        self.lock_outbox().clone()
    }

    // 收件匣只會 push，鎖中毒時內容仍然完整
    fn lock_outbox(&self) -> MutexGuard<'_, Vec<OutgoingEmail>> {
        self.outbox.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Mailer for DryRunMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        tracing::info!(
            "📧 [dry run] would send '{}' to {}{}",
            email.subject,
            email.to,
            if email.cc.is_empty() {
                String::new()
            } else {
                format!(" (cc: {})", email.cc.join(","))
            }
        );
        self.lock_outbox().push(email.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_collects_instead_of_sending() {
        let mailer = DryRunMailer::new();
        let email = OutgoingEmail {
            to: "a@example.com".to_string(),
            cc: vec![],
            subject: "Outdated iOS".to_string(),
            body: "Hello,".to_string(),
        };

        mailer.send(&email).await.unwrap();
        mailer.send(&email).await.unwrap();

        assert_eq!(mailer.outbox(), vec![email.clone(), email]);
    }

    #[tokio::test]
    async fn test_outbox_survives_poisoned_lock() {
        let mailer = DryRunMailer::new();
        let email = OutgoingEmail {
            to: "it@example.com".to_string(),
            cc: vec![],
            subject: "Device OS report".to_string(),
            body: "Found 0 mobile devices.".to_string(),
        };
        mailer.send(&email).await.unwrap();

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = mailer.outbox.lock().unwrap();
            panic!("panic while holding the outbox");
        }));
        assert!(mailer.outbox.is_poisoned());

        mailer.send(&email).await.unwrap();
        assert_eq!(mailer.outbox().len(), 2);
    }
}
