#[cfg(feature = "cli")]
pub mod layered;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_host, validate_interface_name, validate_non_empty_string, validate_range,
    validate_ssid,
};

#[cfg(feature = "cli")]
use crate::domain::model::Credential;
#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "airlink")]
#[command(about = "Scan nearby Wi-Fi networks and Bluetooth devices and connect to a target")]
pub struct CliConfig {
    /// Wi-Fi network to join
    #[arg(long)]
    pub ssid: Option<String>,

    /// Wi-Fi passphrase (prefer `${VAR}` in the config file)
    #[arg(long)]
    pub password: Option<Credential>,

    /// Bluetooth device to connect to, matched on its advertised name
    #[arg(long)]
    pub bt_device_name: Option<String>,

    /// Wireless interface passed to the connect command
    #[arg(long)]
    pub interface: Option<String>,

    /// Host pinged after a successful connection
    #[arg(long)]
    pub probe_host: Option<String>,

    #[arg(long)]
    pub ping_count: Option<u32>,

    /// Seconds before an external command is killed
    #[arg(long)]
    pub command_timeout: Option<u64>,

    #[arg(long)]
    pub bt_scan_seconds: Option<u64>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub skip_probe: bool,

    #[arg(long)]
    pub skip_bluetooth: bool,

    /// Print the run report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 檢查任何設定來源合併後的值
pub fn validate_settings<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    if let Some(ssid) = config.target_ssid() {
        validate_ssid("wifi.ssid", ssid)?;
    }
    if let Some(name) = config.bt_device_name() {
        validate_non_empty_string("bluetooth.device_name", name)?;
    }
    validate_interface_name("wifi.interface", config.interface())?;
    validate_host("connectivity.host", config.probe_host())?;
    validate_range("connectivity.ping_count", config.ping_count(), 1, 20)?;
    validate_range(
        "commands.timeout_seconds",
        config.command_timeout().as_secs(),
        1,
        600,
    )?;
    validate_range(
        "bluetooth.scan_seconds",
        config.bt_scan_duration().as_secs(),
        1,
        120,
    )?;
    Ok(())
}
