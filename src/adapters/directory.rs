use crate::adapters::http::{build_client, endpoint, ensure_success};
use crate::config::DirectoryConfig;
use crate::domain::model::{DevicePage, DeviceRecord, UNREPORTED_PATCH_LEVEL};
use crate::domain::ports::DirectoryClient;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

const ACTIVE_DEVICES_QUERY: &str = "status:ACTIVE";

/// Google Admin SDK Directory API
pub struct GoogleDirectoryClient {
    client: Client,
    base_url: Url,
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserResponse {
    customer_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MobileDevicesResponse {
    mobiledevices: Option<Vec<RawMobileDevice>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMobileDevice {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    email: Vec<String>,
    #[serde(default)]
    os: String,
    security_patch_level: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChromeOsDevicesResponse {
    chromeosdevices: Option<Vec<RawChromeOsDevice>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChromeOsDevice {
    #[serde(default)]
    annotated_user: String,
    #[serde(default)]
    os_version: String,
}

impl From<RawMobileDevice> for DeviceRecord {
    fn from(device: RawMobileDevice) -> Self {
        match device.kind.as_str() {
            "ANDROID" => DeviceRecord::Android {
                owners: device.email,
                // 沒回報過修補等級的裝置沒有這個欄位
                security_patch_level: device
                    .security_patch_level
                    .unwrap_or_else(|| UNREPORTED_PATCH_LEVEL.to_string()),
            },
            "IOS_SYNC" => DeviceRecord::IosSync {
                owners: device.email,
                os: device.os,
            },
            _ => DeviceRecord::Other { kind: device.kind },
        }
    }
}

impl From<RawChromeOsDevice> for DeviceRecord {
    fn from(device: RawChromeOsDevice) -> Self {
        DeviceRecord::ChromeOs {
            annotated_user: device.annotated_user,
            os_version: device.os_version,
        }
    }
}

impl GoogleDirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            base_url: Url::parse(&config.base_url)?,
            access_token: config.access_token.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        tracing::debug!("📡 GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    fn page_query(page_size: u32, page_token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut query = vec![("maxResults", page_size.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }
        query
    }
}

#[async_trait]
impl DirectoryClient for GoogleDirectoryClient {
    async fn resolve_customer_id(&self, reference_user: &str) -> Result<String> {
        let url = endpoint(
            &self.base_url,
            &["admin", "directory", "v1", "users", reference_user],
        )?;
        let user: UserResponse = self.get_json(url, &[]).await?;
        Ok(user.customer_id)
    }

    async fn list_mobile_devices(
        &self,
        customer_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<DevicePage> {
        let url = endpoint(
            &self.base_url,
            &["admin", "directory", "v1", "customer", customer_id, "devices", "mobile"],
        )?;
        let query = Self::page_query(page_size, page_token);
        let page: MobileDevicesResponse = self.get_json(url, &query).await?;

        Ok(DevicePage {
            records: page
                .mobiledevices
                .map(|devices| devices.into_iter().map(DeviceRecord::from).collect()),
            next_page_token: page.next_page_token,
        })
    }

    async fn list_chromeos_devices(
        &self,
        customer_id: &str,
        page_size: u32,
        page_token: Option<&str>,
        active_only: bool,
    ) -> Result<DevicePage> {
        let url = endpoint(
            &self.base_url,
            &["admin", "directory", "v1", "customer", customer_id, "devices", "chromeos"],
        )?;
        let mut query = Self::page_query(page_size, page_token);
        if active_only {
            query.push(("query", ACTIVE_DEVICES_QUERY.to_string()));
        }
        let page: ChromeOsDevicesResponse = self.get_json(url, &query).await?;

        Ok(DevicePage {
            records: page
                .chromeosdevices
                .map(|devices| devices.into_iter().map(DeviceRecord::from).collect()),
            next_page_token: page.next_page_token,
        })
    }
}
