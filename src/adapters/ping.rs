use crate::domain::model::Reachability;
use crate::domain::ports::{ProcessRunner, ReachabilityProbe};
use async_trait::async_trait;

pub const DEFAULT_PROBE_HOST: &str = "8.8.8.8";
pub const DEFAULT_PING_COUNT: u32 = 4;

/// 以 `ping -c <count> <host>` 檢查連線
pub struct PingProbe<R: ProcessRunner> {
    runner: R,
    count: u32,
}

impl<R: ProcessRunner> PingProbe<R> {
    pub fn new(runner: R, count: u32) -> Self {
        Self { runner, count }
    }
}

#[async_trait]
impl<R: ProcessRunner> ReachabilityProbe for PingProbe<R> {
    async fn probe(&self, host: &str) -> Reachability {
        let args = vec!["-c".to_string(), self.count.to_string(), host.to_string()];

        match self.runner.run("ping", &args).await {
            Ok(output) if output.success() => {
                tracing::info!("Connectivity test passed. Ping to {} successful.", host);
                Reachability::Reachable
            }
            Ok(output) => {
                tracing::warn!(
                    "Connectivity test failed: ping to {} exited with {:?}",
                    host,
                    output.exit_code
                );
                Reachability::Unreachable
            }
            Err(e) => {
                tracing::error!("Unexpected error during connectivity test: {}", e);
                Reachability::Unreachable
            }
        }
    }
}
