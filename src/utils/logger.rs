use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "device_audit";

/// 預設只看本程式的事件；HTTP 堆疊（reqwest/hyper）僅保留警告
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,{}={},lambda={}", CRATE_TARGET, level, level)
}

/// `RUST_LOG` 優先，否則用預設
fn audit_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(audit_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                // verbose 時顯示 target，方便分辨是目錄查詢還是寄信
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(audit_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json() // CloudWatch 解析 JSON 格式較方便
                .with_current_span(false),
        )
        .init();
}
