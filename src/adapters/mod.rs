// Adapters layer: concrete implementations of the domain ports.

pub mod directory;
pub mod dry_run;
pub mod gmail;
pub mod http;

pub use directory::GoogleDirectoryClient;
pub use dry_run::DryRunMailer;
pub use gmail::GmailMailer;
