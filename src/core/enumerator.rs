use crate::core::classifier::classify;
use crate::domain::model::{DevicePage, DeviceStream, EnumerationResult};
use crate::domain::ports::DirectoryClient;
use crate::domain::thresholds::Thresholds;
use crate::utils::error::Result;

/// 分頁列出裝置並逐一分類
pub struct DeviceEnumerator<'a, D: DirectoryClient> {
    directory: &'a D,
    thresholds: &'a Thresholds,
}

impl<'a, D: DirectoryClient> DeviceEnumerator<'a, D> {
    pub fn new(directory: &'a D, thresholds: &'a Thresholds) -> Self {
        Self {
            directory,
            thresholds,
        }
    }

    pub async fn enumerate(&self, stream: DeviceStream, customer_id: &str) -> Result<EnumerationResult> {
        let mut result = EnumerationResult::default();
        let mut page_token: Option<String> = None;
        let mut page_number = 0usize;

        loop {
            page_number += 1;
            let page = self.fetch_page(stream, customer_id, page_token.as_deref()).await?;

            let records = match page.records {
                Some(records) => records,
                None if stream == DeviceStream::ChromeOs => {
                    if page_number == 1 {
                        tracing::info!("ℹ️ ChromeOS devices are not enabled for this customer");
                    } else {
                        tracing::warn!(
                            "⚠️ ChromeOS page {} had no device collection, stopping",
                            page_number
                        );
                    }
                    break;
                }
                None => Vec::new(),
            };

            tracing::debug!(
                "📡 {} page {}: {} devices",
                stream.label(),
                page_number,
                records.len()
            );

            for record in &records {
                result.record(classify(record, self.thresholds)?);
            }

            // 空字串的 token 也代表沒有下一頁
            page_token = page.next_page_token.filter(|token| !token.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        tracing::info!(
            "📊 {}: {} devices seen, {} outdated, {} unclassifiable",
            stream.label(),
            result.total_devices_seen,
            result.findings.len(),
            result.errors.len()
        );

        Ok(result)
    }

    async fn fetch_page(
        &self,
        stream: DeviceStream,
        customer_id: &str,
        page_token: Option<&str>,
    ) -> Result<DevicePage> {
        match stream {
            DeviceStream::Mobile => {
                self.directory
                    .list_mobile_devices(customer_id, stream.page_size(), page_token)
                    .await
            }
            DeviceStream::ChromeOs => {
                self.directory
                    .list_chromeos_devices(customer_id, stream.page_size(), page_token, true)
                    .await
            }
        }
    }
}
