use crate::adapters::bluetooth::DEFAULT_BT_SCAN_DURATION;
use crate::adapters::ping::{DEFAULT_PING_COUNT, DEFAULT_PROBE_HOST};
use crate::adapters::process::DEFAULT_COMMAND_TIMEOUT;
use crate::core::connection::{DEFAULT_CONNECT_PROGRAM, DEFAULT_INTERFACE};
use crate::core::inventory::InventoryCommand;
use crate::core::parser::InventorySchema;
use crate::core::ConfigProvider;
use crate::domain::model::Credential;
use crate::utils::error::{AirlinkError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_path, validate_required_field, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub wifi: WifiSection,
    pub bluetooth: BluetoothSection,
    pub connectivity: ConnectivitySection,
    pub commands: CommandsSection,
    pub schema: InventorySchema,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WifiSection {
    pub ssid: Option<String>,
    pub password: Option<Credential>,
    pub interface: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BluetoothSection {
    pub enabled: Option<bool>,
    pub device_name: Option<String>,
    pub scan_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectivitySection {
    pub enabled: Option<bool>,
    pub host: Option<String>,
    pub ping_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommandsSection {
    pub timeout_seconds: Option<u64>,
    pub connect_program: Option<String>,
    pub inventory: Option<InventoryCommand>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        validate_path("config", &path.to_string_lossy())?;
        let content = std::fs::read_to_string(path).map_err(AirlinkError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut document: toml::Table =
            toml::from_str(content).map_err(|e| AirlinkError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;

        // 解析後才替換環境變數，值中的引號與反斜線不會被 TOML 轉義處理
        let pattern = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AirlinkError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;
        for (key, value) in document.iter_mut() {
            Self::substitute_env_vars(&pattern, key, value)?;
        }

        toml::Value::Table(document)
            .try_into::<Self>()
            .map_err(|e| AirlinkError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })
    }

    /// 替換所有字串值中的環境變數 (例如 ${WIFI_PASSWORD})
    fn substitute_env_vars(pattern: &Regex, path: &str, value: &mut toml::Value) -> Result<()> {
        match value {
            toml::Value::String(text) if pattern.is_match(text.as_str()) => {
                let mut resolved = String::with_capacity(text.len());
                let mut last = 0;
                for caps in pattern.captures_iter(text) {
                    let Some(whole) = caps.get(0) else { continue };
                    let var_name = &caps[1];
                    let var_value = std::env::var(var_name).map_err(|_| {
                        tracing::warn!("Environment variable {} is not set", var_name);
                        AirlinkError::MissingConfigError {
                            field: format!("{} (environment variable {})", path, var_name),
                        }
                    })?;
                    resolved.push_str(&text[last..whole.start()]);
                    resolved.push_str(&var_value);
                    last = whole.end();
                }
                resolved.push_str(&text[last..]);
                *text = resolved;
            }
            toml::Value::Array(items) => {
                for (i, item) in items.iter_mut().enumerate() {
                    Self::substitute_env_vars(pattern, &format!("{}[{}]", path, i), item)?;
                }
            }
            toml::Value::Table(table) => {
                for (key, item) in table.iter_mut() {
                    Self::substitute_env_vars(pattern, &format!("{}.{}", path, key), item)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn inventory_command(&self) -> InventoryCommand {
        self.commands.inventory.clone().unwrap_or_default()
    }

    pub fn connect_program(&self) -> &str {
        self.commands
            .connect_program
            .as_deref()
            .unwrap_or(DEFAULT_CONNECT_PROGRAM)
    }

    pub fn schema(&self) -> &InventorySchema {
        &self.schema
    }
}

impl ConfigProvider for TomlConfig {
    fn target_ssid(&self) -> Option<&str> {
        self.wifi.ssid.as_deref()
    }

    fn credential(&self) -> Credential {
        self.wifi.password.clone().unwrap_or_default()
    }

    fn bt_device_name(&self) -> Option<&str> {
        self.bluetooth.device_name.as_deref()
    }

    fn interface(&self) -> &str {
        self.wifi.interface.as_deref().unwrap_or(DEFAULT_INTERFACE)
    }

    fn probe_host(&self) -> &str {
        self.connectivity.host.as_deref().unwrap_or(DEFAULT_PROBE_HOST)
    }

    fn ping_count(&self) -> u32 {
        self.connectivity.ping_count.unwrap_or(DEFAULT_PING_COUNT)
    }

    fn command_timeout(&self) -> Duration {
        self.commands
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_COMMAND_TIMEOUT)
    }

    fn bt_scan_duration(&self) -> Duration {
        self.bluetooth
            .scan_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_BT_SCAN_DURATION)
    }

    fn probe_enabled(&self) -> bool {
        self.connectivity.enabled.unwrap_or(true)
    }

    fn bluetooth_enabled(&self) -> bool {
        self.bluetooth.enabled.unwrap_or(true)
    }
}

impl TomlConfig {
    /// 明確啟用藍牙時必須指定裝置名稱
    pub(crate) fn bluetooth_required(&self) -> bool {
        self.bluetooth.enabled == Some(true)
    }

    /// 只能在設定檔中設定的欄位
    pub(crate) fn validate_file_only(&self) -> Result<()> {
        if let Some(inventory) = &self.commands.inventory {
            crate::utils::validation::validate_non_empty_string(
                "commands.inventory.program",
                &inventory.program,
            )?;
        }
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if self.bluetooth_required() {
            validate_required_field("bluetooth.device_name", &self.bluetooth.device_name)?;
        }
        self.validate_file_only()?;
        crate::config::validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inventory::InventoryFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.target_ssid(), None);
        assert_eq!(config.interface(), "en0");
        assert_eq!(config.probe_host(), "8.8.8.8");
        assert_eq!(config.ping_count(), 4);
        assert_eq!(config.command_timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_program(), "networksetup");
        assert_eq!(config.inventory_command(), InventoryCommand::default());
        assert_eq!(config.schema(), &InventorySchema::default());
        assert!(config.probe_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[wifi]
ssid = "Home"
password = "correct horse"
interface = "en1"

[bluetooth]
device_name = "Nordic_Keyboard"
scan_seconds = 8

[connectivity]
host = "1.1.1.1"
ping_count = 2

[commands]
timeout_seconds = 45

[commands.inventory]
program = "wifi-inventory"
args = ["--json"]
format = "json"

[schema]
items = "adapters"

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.target_ssid(), Some("Home"));
        assert_eq!(config.credential().expose(), "correct horse");
        assert_eq!(config.interface(), "en1");
        assert_eq!(config.bt_device_name(), Some("Nordic_Keyboard"));
        assert_eq!(config.bt_scan_duration(), Duration::from_secs(8));
        assert_eq!(config.probe_host(), "1.1.1.1");
        assert_eq!(config.command_timeout(), Duration::from_secs(45));
        assert_eq!(config.inventory_command().format, InventoryFormat::Json);
        assert_eq!(config.schema().items, "adapters");
        assert_eq!(config.schema().name, "_name");
        assert_eq!(config.logging.format, Some(LogFormat::Json));
        assert!(!format!("{:?}", config).contains("correct horse"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AIRLINK_TEST_WIFI_PASSWORD", "from-env");

        let toml_content = r#"
[wifi]
ssid = "Home"
password = "${AIRLINK_TEST_WIFI_PASSWORD}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.credential().expose(), "from-env");

        std::env::remove_var("AIRLINK_TEST_WIFI_PASSWORD");
    }

    #[test]
    fn test_env_var_with_quotes_and_backslashes_is_kept_verbatim() {
        std::env::set_var("AIRLINK_TEST_QUOTED_PASSWORD", r#"pa"ss\nw0rd c:\pw"#);
        std::env::set_var("AIRLINK_TEST_PROBE_HOST", "1.1.1.1");

        let toml_content = r#"
# ${NOT_A_VALUE} in a comment is left alone
[wifi]
ssid = "Home"
password = "${AIRLINK_TEST_QUOTED_PASSWORD}"

[connectivity]
host = "${AIRLINK_TEST_PROBE_HOST}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.credential().expose(), r#"pa"ss\nw0rd c:\pw"#);
        assert_eq!(config.probe_host(), "1.1.1.1");

        std::env::remove_var("AIRLINK_TEST_QUOTED_PASSWORD");
        std::env::remove_var("AIRLINK_TEST_PROBE_HOST");
    }

    #[test]
    fn test_unset_env_var_is_missing_config() {
        let toml_content = r#"
[wifi]
ssid = "Home"
password = "${AIRLINK_TEST_NEVER_SET_PASSWORD}"
"#;

        match TomlConfig::from_toml_str(toml_content) {
            Err(AirlinkError::MissingConfigError { field }) => {
                assert!(field.contains("wifi.password"));
                assert!(field.contains("AIRLINK_TEST_NEVER_SET_PASSWORD"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[commands]\ntimeout_seconds = 0").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[bluetooth]\nenabled = true").unwrap();
        assert!(matches!(
            config.validate(),
            Err(AirlinkError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[wifi\nssid = ");
        assert!(matches!(result, Err(AirlinkError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[wifi]\nssid = \"Office\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.target_ssid(), Some("Office"));
    }
}
