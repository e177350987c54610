use crate::core::inventory::InventoryInvoker;
use crate::core::parser::{NetworkTreeParser, ParseReport};
use crate::domain::catalog::NetworkCatalog;
use crate::domain::model::ParseSignal;
use crate::domain::ports::ProcessRunner;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub catalog: Arc<NetworkCatalog>,
    pub signal: Option<ParseSignal>,
    pub scanned_at: DateTime<Utc>,
}

/// 持有最近一次掃描的目錄
///
/// Each scan builds a fresh catalog and swaps it in whole; readers keep the
/// `Arc` they were handed and never see a half-built catalog.
pub struct WifiScanner<R: ProcessRunner> {
    invoker: InventoryInvoker<R>,
    parser: NetworkTreeParser,
    current: RwLock<Arc<NetworkCatalog>>,
}

impl<R: ProcessRunner> WifiScanner<R> {
    pub fn new(invoker: InventoryInvoker<R>, parser: NetworkTreeParser) -> Self {
        Self {
            invoker,
            parser,
            current: RwLock::new(Arc::new(NetworkCatalog::new())),
        }
    }

    /// Runs the inventory command and replaces the catalog.
    ///
    /// A failed invocation leaves the previous catalog untouched.
    pub async fn scan(&self) -> Result<ScanSummary> {
        tracing::info!("Scanning for Wi-Fi networks...");
        let raw = match self.invoker.invoke().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Error scanning networks: {}", e);
                return Err(e);
            }
        };

        let ParseReport { catalog, signal } = self.parser.parse(&raw);
        let catalog = Arc::new(catalog);
        self.replace(catalog.clone());

        Ok(ScanSummary {
            catalog,
            signal,
            scanned_at: Utc::now(),
        })
    }

    pub fn catalog(&self) -> Arc<NetworkCatalog> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    fn replace(&self, catalog: Arc<NetworkCatalog>) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = catalog;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inventory::{InventoryCommand, InventoryFormat};
    use crate::domain::ports::ProcessOutput;
    use crate::utils::error::AirlinkError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Hands out queued outputs in order.
    struct QueueRunner {
        outputs: Mutex<Vec<ProcessOutput>>,
    }

    impl QueueRunner {
        fn new(stdouts: &[(i32, &str)]) -> Self {
            let outputs = stdouts
                .iter()
                .rev()
                .map(|(code, stdout)| ProcessOutput {
                    exit_code: Some(*code),
                    stdout: stdout.as_bytes().to_vec(),
                    stderr: Vec::new(),
                })
                .collect();
            Self {
                outputs: Mutex::new(outputs),
            }
        }
    }

    #[async_trait]
    impl ProcessRunner for QueueRunner {
        async fn run(&self, _program: &str, _args: &[String]) -> Result<ProcessOutput> {
            Ok(self.outputs.lock().unwrap().pop().unwrap_or_default())
        }
    }

    fn scanner(runner: QueueRunner) -> WifiScanner<QueueRunner> {
        let command = InventoryCommand {
            format: InventoryFormat::Json,
            ..InventoryCommand::default()
        };
        WifiScanner::new(InventoryInvoker::new(runner, command), NetworkTreeParser::default())
    }

    const HOME: &str = r#"[{"_items":[{"spairport_airport_interfaces":[{"spairport_airport_local_wireless_networks":[{"_name":"Home"}]}]}]}]"#;
    const OFFICE: &str = r#"[{"_items":[{"spairport_airport_interfaces":[{"spairport_airport_local_wireless_networks":[{"_name":"Office"}]}]}]}]"#;

    #[tokio::test]
    async fn test_new_scan_replaces_catalog_wholesale() {
        let scanner = scanner(QueueRunner::new(&[(0, HOME), (0, OFFICE)]));

        scanner.scan().await.unwrap();
        let first = scanner.catalog();
        assert!(first.contains("Home"));

        scanner.scan().await.unwrap();
        let second = scanner.catalog();
        assert!(second.contains("Office"));
        assert!(!second.contains("Home"));

        // earlier readers keep their snapshot
        assert!(first.contains("Home"));
    }

    #[tokio::test]
    async fn test_failed_scan_keeps_previous_catalog() {
        let scanner = scanner(QueueRunner::new(&[(0, HOME), (1, "")]));

        scanner.scan().await.unwrap();
        let err = scanner.scan().await.unwrap_err();

        assert!(matches!(err, AirlinkError::ProcessError { .. }));
        assert!(scanner.catalog().contains("Home"));
    }

    #[tokio::test]
    async fn test_empty_inventory_reports_signal() {
        let scanner = scanner(QueueRunner::new(&[(0, "[]")]));

        let summary = scanner.scan().await.unwrap();
        assert!(summary.catalog.is_empty());
        assert_eq!(summary.signal, Some(ParseSignal::EmptyInput));
    }
}
