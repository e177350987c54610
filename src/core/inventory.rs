use crate::domain::model::RawNode;
use crate::domain::ports::ProcessRunner;
use crate::utils::error::{AirlinkError, Result};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Serialization produced by the inventory command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryFormat {
    /// XML or binary property list
    #[default]
    Plist,
    Json,
}

impl InventoryFormat {
    pub fn name(&self) -> &'static str {
        match self {
            InventoryFormat::Plist => "plist",
            InventoryFormat::Json => "json",
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<RawNode> {
        match self {
            InventoryFormat::Plist => plist::Value::from_reader(Cursor::new(bytes))
                .map(RawNode::from)
                .map_err(|e| AirlinkError::decode(self.name(), e)),
            InventoryFormat::Json => serde_json::from_slice::<serde_json::Value>(bytes)
                .map(RawNode::from)
                .map_err(|e| AirlinkError::decode(self.name(), e)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub format: InventoryFormat,
}

impl Default for InventoryCommand {
    fn default() -> Self {
        Self {
            program: "system_profiler".to_string(),
            args: vec!["SPAirPortDataType".to_string(), "-xml".to_string()],
            format: InventoryFormat::Plist,
        }
    }
}

/// 執行系統盤點指令並解碼輸出
pub struct InventoryInvoker<R: ProcessRunner> {
    runner: R,
    command: InventoryCommand,
}

impl<R: ProcessRunner> InventoryInvoker<R> {
    pub fn new(runner: R, command: InventoryCommand) -> Self {
        Self { runner, command }
    }

    pub fn command(&self) -> &InventoryCommand {
        &self.command
    }

    pub async fn invoke(&self) -> Result<RawNode> {
        tracing::debug!(
            "Running inventory command: {} {}",
            self.command.program,
            self.command.args.join(" ")
        );

        let output = self
            .runner
            .run(&self.command.program, &self.command.args)
            .await
            .map_err(|e| e.into_process_error(&self.command.program))?;

        if !output.success() {
            let reason = match output.exit_code {
                Some(code) => format!("exit status {}: {}", code, output.stderr_text()),
                None => "terminated by signal".to_string(),
            };
            return Err(AirlinkError::process(&self.command.program, reason));
        }

        tracing::debug!("Inventory command produced {} bytes", output.stdout.len());
        let raw = self.command.format.decode(&output.stdout)?;
        tracing::info!("Raw data obtained successfully.");
        Ok(raw)
    }
}
