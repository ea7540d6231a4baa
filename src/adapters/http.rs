use crate::utils::error::{AuditError, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

pub fn build_client(timeout_seconds: u64) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?)
}

/// 在 base URL 後面接上路徑片段；每個片段都會被 percent-encode
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AuditError::ConfigError {
            message: format!("Base URL cannot carry a path: {}", base),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// 非 2xx 的回應轉成錯誤，保留 body 方便除錯
pub async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    tracing::error!("❌ {} returned {}", url, status);
    Err(AuditError::HttpStatusError {
        status: status.as_u16(),
        url,
        body,
    })
}
