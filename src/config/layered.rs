use crate::config::toml_config::TomlConfig;
use crate::config::CliConfig;
use crate::core::inventory::InventoryCommand;
use crate::core::parser::InventorySchema;
use crate::core::ConfigProvider;
use crate::domain::model::Credential;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_required_field, Validate};
use std::time::Duration;

/// 命令列參數優先，其次是設定檔，最後是內建預設值
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    cli: CliConfig,
    file: TomlConfig,
}

impl LayeredConfig {
    pub fn new(cli: CliConfig, file: TomlConfig) -> Self {
        Self { cli, file }
    }

    /// Loads the file named by `--config`, if any.
    pub fn load(cli: CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(Self::new(cli, file))
    }

    pub fn cli(&self) -> &CliConfig {
        &self.cli
    }

    pub fn file(&self) -> &TomlConfig {
        &self.file
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose || self.file.logging.verbose.unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.cli
            .log_format
            .or(self.file.logging.format)
            .unwrap_or_default()
    }

    pub fn json_output(&self) -> bool {
        self.cli.json
    }

    pub fn inventory_command(&self) -> InventoryCommand {
        self.file.inventory_command()
    }

    pub fn connect_program(&self) -> &str {
        self.file.connect_program()
    }

    pub fn schema(&self) -> &InventorySchema {
        self.file.schema()
    }
}

impl ConfigProvider for LayeredConfig {
    fn target_ssid(&self) -> Option<&str> {
        self.cli.ssid.as_deref().or(self.file.target_ssid())
    }

    fn credential(&self) -> Credential {
        self.cli
            .password
            .clone()
            .unwrap_or_else(|| self.file.credential())
    }

    fn bt_device_name(&self) -> Option<&str> {
        self.cli
            .bt_device_name
            .as_deref()
            .or(self.file.bt_device_name())
    }

    fn interface(&self) -> &str {
        self.cli
            .interface
            .as_deref()
            .unwrap_or_else(|| self.file.interface())
    }

    fn probe_host(&self) -> &str {
        self.cli
            .probe_host
            .as_deref()
            .unwrap_or_else(|| self.file.probe_host())
    }

    fn ping_count(&self) -> u32 {
        self.cli.ping_count.unwrap_or_else(|| self.file.ping_count())
    }

    fn command_timeout(&self) -> Duration {
        self.cli
            .command_timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.file.command_timeout())
    }

    fn bt_scan_duration(&self) -> Duration {
        self.cli
            .bt_scan_seconds
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.file.bt_scan_duration())
    }

    fn probe_enabled(&self) -> bool {
        !self.cli.skip_probe && self.file.probe_enabled()
    }

    fn bluetooth_enabled(&self) -> bool {
        !self.cli.skip_bluetooth && self.file.bluetooth_enabled()
    }
}

impl Validate for LayeredConfig {
    /// 只驗證合併後的值，命令列可以修正設定檔中的錯誤值
    fn validate(&self) -> Result<()> {
        self.file.validate_file_only()?;
        if self.file.bluetooth_required() && self.bluetooth_enabled() {
            validate_required_field("bluetooth.device_name", &self.bt_device_name())?;
        }
        crate::config::validate_settings(self)
    }
}
