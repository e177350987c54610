use crate::domain::model::BluetoothOutcome;
use crate::domain::ports::BluetoothConnector;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_BT_SCAN_DURATION: Duration = Duration::from_secs(5);

#[cfg(feature = "bluetooth")]
pub use self::btle::BtleplugConnector;

#[cfg(feature = "bluetooth")]
mod btle {
    use super::*;
    use btleplug::api::{Central, Manager as _, Peripheral as _, ScanFilter};
    use btleplug::platform::Manager;

    /// 掃描 BLE 裝置並依廣播名稱連線
    pub struct BtleplugConnector {
        scan_duration: Duration,
    }

    impl BtleplugConnector {
        pub fn new(scan_duration: Duration) -> Self {
            Self { scan_duration }
        }

        async fn try_scan_and_connect(
            &self,
            target_name: &str,
        ) -> std::result::Result<BluetoothOutcome, btleplug::Error> {
            let manager = Manager::new().await?;
            let central = match manager.adapters().await?.into_iter().next() {
                Some(adapter) => adapter,
                None => {
                    return Ok(BluetoothOutcome::ConnectError {
                        reason: "no Bluetooth adapter available".to_string(),
                    })
                }
            };

            tracing::info!("Scanning for Bluetooth devices...");
            central.start_scan(ScanFilter::default()).await?;
            tokio::time::sleep(self.scan_duration).await;
            let peripherals = central.peripherals().await?;
            central.stop_scan().await?;

            for peripheral in peripherals {
                let Some(properties) = peripheral.properties().await? else {
                    continue;
                };
                if properties.local_name.as_deref() != Some(target_name) {
                    continue;
                }

                let address = properties.address.to_string();
                tracing::info!("Found device: {} ({})", target_name, address);

                if let Err(e) = peripheral.connect().await {
                    tracing::error!("Error connecting to {}: {}", address, e);
                    return Ok(BluetoothOutcome::ConnectError {
                        reason: e.to_string(),
                    });
                }

                let connected = peripheral.is_connected().await?;
                if let Err(e) = peripheral.disconnect().await {
                    tracing::debug!("Disconnect from {} failed: {}", address, e);
                }

                return if connected {
                    tracing::info!("Connected to {}", address);
                    Ok(BluetoothOutcome::Connected { address })
                } else {
                    tracing::error!("Failed to connect to {}", address);
                    Ok(BluetoothOutcome::ConnectError {
                        reason: format!("{} did not report a connection", address),
                    })
                };
            }

            tracing::warn!("No device named {} found.", target_name);
            Ok(BluetoothOutcome::NotFound)
        }
    }

    #[async_trait]
    impl BluetoothConnector for BtleplugConnector {
        async fn scan_and_connect(&self, target_name: &str) -> BluetoothOutcome {
            match self.try_scan_and_connect(target_name).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Bluetooth error while looking for {}: {}", target_name, e);
                    BluetoothOutcome::ConnectError {
                        reason: e.to_string(),
                    }
                }
            }
        }
    }
}

/// Stand-in used when the crate is built without the `bluetooth` feature.
#[derive(Debug, Default)]
pub struct UnavailableBluetooth;

#[async_trait]
impl BluetoothConnector for UnavailableBluetooth {
    async fn scan_and_connect(&self, target_name: &str) -> BluetoothOutcome {
        tracing::warn!(
            "Cannot look for {}: built without the `bluetooth` feature",
            target_name
        );
        BluetoothOutcome::ConnectError {
            reason: "Bluetooth support not compiled in".to_string(),
        }
    }
}

/// 依編譯選項建立藍牙連線器
pub fn default_connector(scan_duration: Duration) -> Box<dyn BluetoothConnector> {
    #[cfg(feature = "bluetooth")]
    {
        Box::new(BtleplugConnector::new(scan_duration))
    }
    #[cfg(not(feature = "bluetooth"))]
    {
        let _ = scan_duration;
        Box::new(UnavailableBluetooth)
    }
}
