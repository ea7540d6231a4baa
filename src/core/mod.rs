pub mod audit;
pub mod classifier;
pub mod enumerator;
pub mod notifier;
pub mod report;

pub use crate::domain::model::{
    Classification, DeviceRecord, DeviceStream, EnumerationResult, Finding, OutgoingEmail,
};
pub use crate::domain::ports::{ConfigProvider, DirectoryClient, Mailer};
pub use crate::utils::error::Result;
