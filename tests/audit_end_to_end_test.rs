use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use device_audit::core::{ConfigProvider, DeviceRecord, DirectoryClient};
use device_audit::domain::model::DevicePage;
use device_audit::{AuditError, DeviceAudit, DryRunMailer};

/// 記憶體內的目錄服務：每個串流只有一頁
struct InMemoryDirectory {
    mobile: Vec<DeviceRecord>,
    chromeos: Option<Vec<DeviceRecord>>,
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn resolve_customer_id(&self, reference_user: &str) -> device_audit::Result<String> {
        if reference_user == "admin@example.com" {
            Ok("C0123".to_string())
        } else {
            Err(AuditError::HttpStatusError {
                status: 404,
                url: format!("/admin/directory/v1/users/{}", reference_user),
                body: "Resource Not Found: userKey".to_string(),
            })
        }
    }

    async fn list_mobile_devices(
        &self,
        customer_id: &str,
        _page_size: u32,
        _page_token: Option<&str>,
    ) -> device_audit::Result<DevicePage> {
        assert_eq!(customer_id, "C0123");
        Ok(DevicePage {
            records: Some(self.mobile.clone()),
            next_page_token: None,
        })
    }

    async fn list_chromeos_devices(
        &self,
        customer_id: &str,
        _page_size: u32,
        _page_token: Option<&str>,
        _active_only: bool,
    ) -> device_audit::Result<DevicePage> {
        assert_eq!(customer_id, "C0123");
        Ok(DevicePage {
            records: self.chromeos.clone(),
            next_page_token: None,
        })
    }
}

struct TestConfig {
    reference_user: String,
    recipients: Vec<String>,
    notify_users: bool,
}

impl TestConfig {
    fn new(notify_users: bool) -> Self {
        Self {
            reference_user: "admin@example.com".to_string(),
            recipients: vec!["it@example.com".to_string(), "security@example.com".to_string()],
            notify_users,
        }
    }
}

impl ConfigProvider for TestConfig {
    fn reference_user(&self) -> &str {
        &self.reference_user
    }

    fn report_recipients(&self) -> &[String] {
        &self.recipients
    }

    fn notify_users(&self) -> bool {
        self.notify_users
    }
}

fn mixed_fleet() -> InMemoryDirectory {
    InMemoryDirectory {
        mobile: vec![
            // 2019-09-01，早於最低修補等級
            DeviceRecord::Android {
                owners: vec!["alice@example.com".to_string()],
                security_patch_level: "1567296000000".to_string(),
            },
            DeviceRecord::IosSync {
                owners: vec!["bob@example.com".to_string()],
                os: "iOS 13.2.3".to_string(),
            },
            DeviceRecord::Other {
                kind: "OTHER".to_string(),
            },
        ],
        chromeos: None,
    }
}

#[tokio::test]
async fn test_mixed_fleet_report_without_notifications() -> Result<()> {
    let audit = DeviceAudit::new(mixed_fleet(), DryRunMailer::new());
    let now = Utc.with_ymd_and_hms(2019, 11, 20, 9, 0, 0).unwrap();

    let summary = audit.run(&TestConfig::new(false), now).await?;

    assert_eq!(summary.customer_id, "C0123");
    assert_eq!(summary.mobile.total_devices_seen, 3);
    assert_eq!(summary.chromeos.total_devices_seen, 0);
    assert_eq!(summary.notifications_sent, 0);

    let report = &summary.report;
    assert!(report.contains("Found 3 mobile devices.\n"));
    assert!(report.contains("1 outdated mobile devices owned by:\n"));
    assert_eq!(report.matches("- alice@example.com (2019-09-01)\n").count(), 1);
    assert!(!report.contains("bob@example.com"));
    assert!(report.contains("Found 0 ChromeOS devices.\nNo outdated ChromeOS devices\n"));
    assert!(report.ends_with("- Unexpected type: OTHER\n"));
    assert!(report.starts_with("It has been 22 days since iOS was updated.\n"));

    let outbox = audit.mailer().outbox();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].to, "it@example.com");
    assert_eq!(outbox[0].cc, vec!["security@example.com"]);
    assert_eq!(outbox[0].subject, "Device OS report");
    assert_eq!(&outbox[0].body, report);

    Ok(())
}

#[tokio::test]
async fn test_mixed_fleet_notifies_outdated_owner() -> Result<()> {
    let audit = DeviceAudit::new(mixed_fleet(), DryRunMailer::new());

    let summary = audit.run(&TestConfig::new(true), Utc::now()).await?;

    assert_eq!(summary.notifications_sent, 1);
    let outbox = audit.mailer().outbox();
    assert_eq!(outbox.len(), 2);
    // 先寄報告，再通知擁有者
    assert_eq!(outbox[0].subject, "Device OS report");
    assert_eq!(outbox[1].to, "alice@example.com");
    assert_eq!(outbox[1].subject, "Outdated Android");
    assert!(outbox[1].body.contains("out of date Android"));

    Ok(())
}

#[tokio::test]
async fn test_notifications_cover_both_streams_in_order() -> Result<()> {
    let directory = InMemoryDirectory {
        mobile: vec![DeviceRecord::IosSync {
            owners: vec!["bob@example.com".to_string()],
            os: "iOS 12.4.1".to_string(),
        }],
        chromeos: Some(vec![
            DeviceRecord::ChromeOs {
                annotated_user: "carol@example.com".to_string(),
                os_version: "76.0.3809.136".to_string(),
            },
            DeviceRecord::ChromeOs {
                annotated_user: "dan@example.com".to_string(),
                os_version: "78.0.3904.106".to_string(),
            },
        ]),
    };
    let audit = DeviceAudit::new(directory, DryRunMailer::new());

    let summary = audit.run(&TestConfig::new(true), Utc::now()).await?;

    assert!(summary.report.contains("Found 2 ChromeOS devices.\n1 outdated ChromeOS devices owned by:\n- carol@example.com (76.0.3809.136)\n"));
    let subjects: Vec<(String, String)> = audit
        .mailer()
        .outbox()
        .into_iter()
        .map(|email| (email.to, email.subject))
        .collect();
    assert_eq!(
        subjects,
        vec![
            ("it@example.com".to_string(), "Device OS report".to_string()),
            ("bob@example.com".to_string(), "Outdated iOS".to_string()),
            ("carol@example.com".to_string(), "Outdated ChromeOS".to_string()),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_malformed_device_aborts_without_report() {
    let directory = InMemoryDirectory {
        mobile: vec![DeviceRecord::IosSync {
            owners: vec!["bob@example.com".to_string()],
            os: "iPadOS".to_string(),
        }],
        chromeos: None,
    };
    let audit = DeviceAudit::new(directory, DryRunMailer::new());

    let result = audit.run(&TestConfig::new(true), Utc::now()).await;

    assert!(matches!(result, Err(AuditError::PatternMismatch { .. })));
    assert!(audit.mailer().outbox().is_empty());
}

#[tokio::test]
async fn test_unknown_reference_user_aborts() {
    let audit = DeviceAudit::new(mixed_fleet(), DryRunMailer::new());
    let mut config = TestConfig::new(false);
    config.reference_user = "ghost@example.com".to_string();

    let result = audit.run(&config, Utc::now()).await;

    assert!(matches!(result, Err(AuditError::HttpStatusError { status: 404, .. })));
    assert!(audit.mailer().outbox().is_empty());
}
