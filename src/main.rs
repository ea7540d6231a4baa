use chrono::Utc;
use clap::Parser;
use device_audit::core::Mailer;
use device_audit::utils::error::ErrorSeverity;
use device_audit::utils::{logger, validation::Validate};
use device_audit::{
    AuditConfig, AuditError, AuditSummary, CliConfig, DeviceAudit, DryRunMailer, GmailMailer,
    GoogleDirectoryClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("🚀 Starting device-audit");
    tracing::debug!("CLI config: {:?}", cli);

    // 載入配置
    let loaded = if cli.from_env {
        tracing::info!("📁 Loading configuration from environment");
        AuditConfig::from_env()
    } else {
        tracing::info!("📁 Loading configuration from: {}", cli.config);
        AuditConfig::from_file(&cli.config)
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    let result = if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no email will be sent");
        run_audit(&config, DryRunMailer::new()).await
    } else {
        match GmailMailer::new(&config.mail) {
            Ok(mailer) => run_audit(&config, mailer).await,
            Err(e) => Err(e),
        }
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                "✅ Audit completed: {} devices, {} outdated, {} unclassifiable, {} notifications",
                summary.total_devices(),
                summary.total_findings(),
                summary.total_errors(),
                summary.notifications_sent
            );
            if cli.dry_run {
                println!("{}", summary.report);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Audit failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2, // 可重試
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run_audit<M: Mailer>(config: &AuditConfig, mailer: M) -> Result<AuditSummary, AuditError> {
    let directory = GoogleDirectoryClient::new(&config.directory)?;
    let audit = DeviceAudit::new(directory, mailer);
    audit.run(config, Utc::now()).await
}
