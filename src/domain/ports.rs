use crate::domain::model::{DevicePage, OutgoingEmail};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn resolve_customer_id(&self, reference_user: &str) -> Result<String>;

    async fn list_mobile_devices(
        &self,
        customer_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<DevicePage>;

    async fn list_chromeos_devices(
        &self,
        customer_id: &str,
        page_size: u32,
        page_token: Option<&str>,
        active_only: bool,
    ) -> Result<DevicePage>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn reference_user(&self) -> &str;
    fn report_recipients(&self) -> &[String];
    fn notify_users(&self) -> bool;
}
