use airlink::app;
use airlink::core::workflow::WifiStage;
use airlink::utils::{logger, validation::Validate};
use airlink::{CliConfig, LayeredConfig};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 設定檔要先載入，才知道日誌格式
    let config = match LayeredConfig::load(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let _log_guard = logger::init_cli_logger(config.verbose(), config.log_format());

    tracing::info!("Starting airlink");
    if config.verbose() {
        tracing::debug!("Config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let json_output = config.json_output();
    let workflow = app::build_workflow(config);
    let report = workflow.run().await;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report.wifi {
            WifiStage::ScanFailed { reason } => eprintln!("❌ Wi-Fi scan failed: {}", reason),
            WifiStage::ScanOnly { networks } => println!("📡 Found {} networks", networks),
            WifiStage::TargetNotFound { ssid } => {
                println!("Network '{}' not found in the scan.", ssid)
            }
            WifiStage::ConnectFailed { ssid, reason } => {
                eprintln!("❌ Failed to connect to '{}': {}", ssid, reason)
            }
            WifiStage::Connected { ssid } => println!("✅ Connected to '{}'", ssid),
        }
    }

    let exit_code = report.exit_code();
    tracing::info!("Finished with exit code {}", exit_code);
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
