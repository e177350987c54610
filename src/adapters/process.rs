use crate::domain::ports::{ProcessOutput, ProcessRunner};
use crate::utils::error::{AirlinkError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Spawns real child processes, each bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct SystemProcessRunner {
    timeout: Duration,
}

impl SystemProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // 逾時後 future 被 drop，子程序會一併被終止
        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(AirlinkError::process(program, format!("failed to start: {}", e)));
            }
            Err(_) => {
                tracing::warn!("{} did not finish within {:?}", program, self.timeout);
                return Err(AirlinkError::ProcessTimeout {
                    command: program.to_string(),
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        tracing::debug!("{} exited with {}", program, output.status);
        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let runner = SystemProcessRunner::default();

        let output = runner.run("sh", &sh("echo hello; exit 3")).await.unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[tokio::test]
    async fn test_missing_program_is_process_error() {
        let runner = SystemProcessRunner::default();

        let err = runner
            .run("airlink-definitely-not-installed", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AirlinkError::ProcessError { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let runner = SystemProcessRunner::new(Duration::from_millis(100));

        let err = runner.run("sh", &sh("sleep 5")).await.unwrap_err();
        assert!(matches!(err, AirlinkError::ProcessTimeout { .. }));
        assert!(err.is_process_error());
    }
}
