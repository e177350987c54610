use crate::domain::model::{BluetoothOutcome, Credential, Reachability};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Captured result of one finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// 執行外部指令的能力，測試時以假的實作取代
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` to completion. A non-zero exit is still `Ok`; only
    /// spawn failures and timeouts are errors.
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput>;
}

#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn probe(&self, host: &str) -> Reachability;
}

#[async_trait]
pub trait BluetoothConnector: Send + Sync {
    async fn scan_and_connect(&self, target_name: &str) -> BluetoothOutcome;
}

pub trait ConfigProvider: Send + Sync {
    fn target_ssid(&self) -> Option<&str>;
    fn credential(&self) -> Credential;
    fn bt_device_name(&self) -> Option<&str>;
    fn interface(&self) -> &str;
    fn probe_host(&self) -> &str;
    fn ping_count(&self) -> u32;
    fn command_timeout(&self) -> Duration;
    fn bt_scan_duration(&self) -> Duration;
    fn probe_enabled(&self) -> bool;
    fn bluetooth_enabled(&self) -> bool;
}
