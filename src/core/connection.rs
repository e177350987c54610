use crate::domain::catalog::NetworkCatalog;
use crate::domain::model::ConnectionAttempt;
use crate::domain::ports::ProcessRunner;
use crate::utils::error::{AirlinkError, Result};

pub const DEFAULT_CONNECT_PROGRAM: &str = "networksetup";
pub const DEFAULT_INTERFACE: &str = "en0";

/// 對目錄中的網路發起一次連線
///
/// Success only means the connect command exited with status 0. Whether the
/// link actually carries traffic is checked separately by a reachability probe.
pub struct ConnectionDriver<R: ProcessRunner> {
    runner: R,
    program: String,
    interface: String,
}

impl<R: ProcessRunner> ConnectionDriver<R> {
    pub fn new(runner: R, interface: impl Into<String>) -> Self {
        Self {
            runner,
            program: DEFAULT_CONNECT_PROGRAM.to_string(),
            interface: interface.into(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub async fn connect(&self, catalog: &NetworkCatalog, attempt: &ConnectionAttempt) -> Result<()> {
        let ssid = attempt.ssid.as_str();

        if !catalog.contains(ssid) {
            tracing::warn!("SSID '{}' not found in scanned networks.", ssid);
            return Err(AirlinkError::UnknownTarget {
                ssid: ssid.to_string(),
            });
        }

        let mut args = vec![
            "-setairportnetwork".to_string(),
            self.interface.clone(),
            ssid.to_string(),
        ];
        if !attempt.credential.is_empty() {
            args.push(attempt.credential.expose().to_string());
        }

        tracing::debug!("Associating {} with '{}'", self.interface, ssid);
        let output = match self.runner.run(&self.program, &args).await {
            Ok(output) => output,
            Err(e) => {
                let e = e.into_process_error(&self.program);
                tracing::error!("Error connecting to {}: {}", ssid, e);
                return Err(e);
            }
        };

        if !output.success() {
            let reason = match output.exit_code {
                Some(code) => format!("exit status {}: {}", code, output.stderr_text()),
                None => "terminated by signal".to_string(),
            };
            tracing::error!("Error connecting to {}: {}", ssid, reason);
            return Err(AirlinkError::process(&self.program, reason));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!("{} output: {}", self.program, stdout.trim());
        }
        tracing::info!("Successfully connected to {}.", ssid);
        Ok(())
    }
}
