#[cfg(feature = "lambda")]
use anyhow::Context;
#[cfg(feature = "lambda")]
use chrono::Utc;
#[cfg(feature = "lambda")]
use device_audit::core::Mailer;
#[cfg(feature = "lambda")]
use device_audit::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use device_audit::{AuditConfig, DeviceAudit, DryRunMailer, GmailMailer, GoogleDirectoryClient};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Debug, Deserialize, Default)]
pub struct Request {
    /// Scheduled events carry no payload; `{"dry_run": true}` skips sending.
    #[serde(default)]
    pub dry_run: bool,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub message: String,
    pub total_devices: usize,
    pub outdated_devices: usize,
    pub unclassifiable_devices: usize,
    pub notifications_sent: usize,
}

/// 排程事件沒有 payload 時採預設值；格式錯誤則直接失敗，不可當成正式寄送
#[cfg(feature = "lambda")]
fn decode_request(payload: serde_json::Value) -> anyhow::Result<Request> {
    if payload.is_null() {
        return Ok(Request::default());
    }
    serde_json::from_value(payload).context("decoding request payload")
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<serde_json::Value>) -> Result<Response, Error> {
    tracing::info!("🚀 Starting device audit Lambda function");

    let request = decode_request(event.payload)?;

    // 排程執行時配置全部來自環境變數
    let config = AuditConfig::from_env().context("loading configuration from environment")?;
    config.validate().context("validating configuration")?;

    let response = if request.dry_run {
        audit(&config, DryRunMailer::new()).await?
    } else {
        audit(&config, GmailMailer::new(&config.mail)?).await?
    };

    tracing::info!("✅ Device audit Lambda function completed successfully");
    Ok(response)
}

#[cfg(feature = "lambda")]
async fn audit<M: Mailer>(config: &AuditConfig, mailer: M) -> Result<Response, Error> {
    let directory = GoogleDirectoryClient::new(&config.directory)?;
    let summary = DeviceAudit::new(directory, mailer)
        .run(config, Utc::now())
        .await
        .context("running device audit")?;

    Ok(Response {
        message: "Device audit completed successfully".to_string(),
        total_devices: summary.total_devices(),
        outdated_devices: summary.total_findings(),
        unclassifiable_devices: summary.total_errors(),
        notifications_sent: summary.notifications_sent,
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();
    run(service_fn(function_handler)).await
}

#[cfg(all(test, feature = "lambda"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_payload_defaults_to_real_run() {
        assert!(!decode_request(serde_json::Value::Null).unwrap().dry_run);
        assert!(!decode_request(json!({})).unwrap().dry_run);
    }

    #[test]
    fn test_dry_run_payload() {
        assert!(decode_request(json!({ "dry_run": true })).unwrap().dry_run);
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        let err = decode_request(json!({ "dry_run": "true" })).unwrap_err();
        assert!(err.to_string().contains("decoding request payload"));
    }
}

#[cfg(not(feature = "lambda"))]
fn main() {
    eprintln!("Lambda feature not enabled. Build with --features lambda");
    std::process::exit(1);
}
