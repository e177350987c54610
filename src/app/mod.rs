// Application layer: wires the system adapters into the core components.

use crate::adapters::bluetooth;
use crate::adapters::ping::PingProbe;
use crate::adapters::process::SystemProcessRunner;
use crate::config::layered::LayeredConfig;
use crate::core::connection::ConnectionDriver;
use crate::core::inventory::InventoryInvoker;
use crate::core::parser::NetworkTreeParser;
use crate::core::scanner::WifiScanner;
use crate::core::workflow::ConnectWorkflow;
use crate::core::ConfigProvider;

pub fn build_scanner(config: &LayeredConfig) -> WifiScanner<SystemProcessRunner> {
    let runner = SystemProcessRunner::new(config.command_timeout());
    let invoker = InventoryInvoker::new(runner, config.inventory_command());
    WifiScanner::new(invoker, NetworkTreeParser::new(config.schema().clone()))
}

/// 以真實的系統指令組裝完整流程
pub fn build_workflow(config: LayeredConfig) -> ConnectWorkflow<SystemProcessRunner, LayeredConfig> {
    let runner = SystemProcessRunner::new(config.command_timeout());
    let scanner = build_scanner(&config);
    let driver = ConnectionDriver::new(runner.clone(), config.interface())
        .with_program(config.connect_program());
    let probe = Box::new(PingProbe::new(runner, config.ping_count()));
    let bluetooth = bluetooth::default_connector(config.bt_scan_duration());

    ConnectWorkflow::new(scanner, driver, probe, bluetooth, config)
}
