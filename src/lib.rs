pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{layered::LayeredConfig, CliConfig};

pub use config::toml_config::TomlConfig;
pub use core::{
    connection::ConnectionDriver, inventory::InventoryInvoker, parser::NetworkTreeParser,
    scanner::WifiScanner, workflow::ConnectWorkflow,
};
pub use domain::catalog::NetworkCatalog;
pub use utils::error::{AirlinkError, Result};
