use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "device-audit")]
#[command(about = "Audit mobile and ChromeOS devices against minimum OS versions")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "device-audit.toml")]
    pub config: String,

    /// Read configuration from environment variables instead of a file
    #[arg(long)]
    pub from_env: bool,

    /// Build the report and log every email instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
