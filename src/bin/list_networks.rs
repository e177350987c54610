use airlink::app;
use airlink::utils::{logger, validation::Validate};
use airlink::{CliConfig, LayeredConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "list-networks")]
#[command(about = "Scan nearby Wi-Fi networks and print them without connecting")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Seconds before the inventory command is killed
    #[arg(long)]
    command_timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let cli = CliConfig {
        config: args.config,
        command_timeout: args.command_timeout,
        json: args.json,
        verbose: args.verbose,
        ..CliConfig::default()
    };
    let config = match LayeredConfig::load(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let _log_guard = logger::init_cli_logger(config.verbose(), config.log_format());

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let scanner = app::build_scanner(&config);
    let summary = match scanner.scan().await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    if config.json_output() {
        println!("{}", summary.catalog.to_json()?);
        return Ok(());
    }

    if let Some(signal) = summary.signal {
        println!("⚠️ {}", signal);
    }
    println!("{}", summary.catalog.render());
    println!(
        "📡 {} networks, scanned at {}",
        summary.catalog.len(),
        summary.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}
