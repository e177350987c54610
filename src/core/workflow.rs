use crate::core::connection::ConnectionDriver;
use crate::core::scanner::{ScanSummary, WifiScanner};
use crate::domain::model::{BluetoothOutcome, ConnectionAttempt, Reachability};
use crate::domain::ports::{BluetoothConnector, ConfigProvider, ProcessRunner, ReachabilityProbe};
use serde::Serialize;

/// What happened on the Wi-Fi side of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WifiStage {
    ScanFailed { reason: String },
    ScanOnly { networks: usize },
    TargetNotFound { ssid: String },
    ConnectFailed { ssid: String, reason: String },
    Connected { ssid: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub wifi: WifiStage,
    pub connectivity: Option<Reachability>,
    pub bluetooth: Option<BluetoothOutcome>,
}

impl RunReport {
    pub fn wifi_ok(&self) -> bool {
        matches!(
            self.wifi,
            WifiStage::ScanOnly { .. } | WifiStage::Connected { .. }
        ) && self.connectivity != Some(Reachability::Unreachable)
    }

    pub fn bluetooth_ok(&self) -> bool {
        self.bluetooth
            .as_ref()
            .map(BluetoothOutcome::is_connected)
            .unwrap_or(true)
    }

    /// 0 成功，2 Wi-Fi 失敗，3 只有藍牙失敗
    pub fn exit_code(&self) -> i32 {
        if !self.wifi_ok() {
            2
        } else if !self.bluetooth_ok() {
            3
        } else {
            0
        }
    }
}

/// 掃描 → 顯示 → 連線 → 連通檢查 → 藍牙
pub struct ConnectWorkflow<R: ProcessRunner, C: ConfigProvider> {
    scanner: WifiScanner<R>,
    driver: ConnectionDriver<R>,
    probe: Box<dyn ReachabilityProbe>,
    bluetooth: Box<dyn BluetoothConnector>,
    config: C,
}

impl<R: ProcessRunner, C: ConfigProvider> ConnectWorkflow<R, C> {
    pub fn new(
        scanner: WifiScanner<R>,
        driver: ConnectionDriver<R>,
        probe: Box<dyn ReachabilityProbe>,
        bluetooth: Box<dyn BluetoothConnector>,
        config: C,
    ) -> Self {
        Self {
            scanner,
            driver,
            probe,
            bluetooth,
            config,
        }
    }

    pub fn scanner(&self) -> &WifiScanner<R> {
        &self.scanner
    }

    pub async fn run(&self) -> RunReport {
        let (wifi, connectivity) = self.run_wifi().await;
        let bluetooth = self.run_bluetooth().await;

        RunReport {
            wifi,
            connectivity,
            bluetooth,
        }
    }

    async fn run_wifi(&self) -> (WifiStage, Option<Reachability>) {
        let summary: ScanSummary = match self.scanner.scan().await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                return (
                    WifiStage::ScanFailed {
                        reason: e.to_string(),
                    },
                    None,
                );
            }
        };

        let catalog = summary.catalog;
        if !catalog.is_empty() {
            tracing::info!("\n{}", catalog.render());
        }

        let Some(ssid) = self.config.target_ssid() else {
            return (
                WifiStage::ScanOnly {
                    networks: catalog.len(),
                },
                None,
            );
        };

        if !catalog.contains(ssid) {
            tracing::warn!("Network '{}' not found in the scan.", ssid);
            return (
                WifiStage::TargetNotFound {
                    ssid: ssid.to_string(),
                },
                None,
            );
        }

        tracing::info!("Network '{}' found. Attempting to connect...", ssid);
        let attempt = ConnectionAttempt::new(ssid, self.config.credential());
        if let Err(e) = self.driver.connect(&catalog, &attempt).await {
            tracing::error!("Failed to connect to the network.");
            return (
                WifiStage::ConnectFailed {
                    ssid: ssid.to_string(),
                    reason: e.to_string(),
                },
                None,
            );
        }

        let connectivity = if self.config.probe_enabled() {
            Some(self.probe.probe(self.config.probe_host()).await)
        } else {
            tracing::debug!("Connectivity probe disabled");
            None
        };

        (
            WifiStage::Connected {
                ssid: ssid.to_string(),
            },
            connectivity,
        )
    }

    async fn run_bluetooth(&self) -> Option<BluetoothOutcome> {
        if !self.config.bluetooth_enabled() {
            return None;
        }
        let name = self.config.bt_device_name()?;
        Some(self.bluetooth.scan_and_connect(name).await)
    }
}
