use thiserror::Error;

#[derive(Error, Debug)]
pub enum AirlinkError {
    #[error("Command `{command}` failed: {reason}")]
    ProcessError { command: String, reason: String },

    #[error("Command `{command}` timed out after {seconds}s")]
    ProcessTimeout { command: String, seconds: u64 },

    #[error("Failed to decode {format} output: {reason}")]
    DecodeError { format: String, reason: String },

    #[error("Network '{ssid}' was not found in the last scan")]
    UnknownTarget { ssid: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Process,
    Decode,
    Target,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AirlinkError {
    pub fn process(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProcessError {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// 執行外部指令的任何失敗都以 ProcessError 回報，逾時秒數保留在 reason
    pub fn into_process_error(self, command: &str) -> Self {
        match self {
            Self::ProcessError { .. } => self,
            Self::ProcessTimeout { seconds, .. } => {
                Self::process(command, format!("timed out after {}s", seconds))
            }
            other => Self::process(command, other.to_string()),
        }
    }

    pub fn decode(format: impl Into<String>, reason: impl ToString) -> Self {
        Self::DecodeError {
            format: format.into(),
            reason: reason.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProcessError { .. } | Self::ProcessTimeout { .. } => ErrorCategory::Process,
            Self::DecodeError { .. } | Self::SerializationError(_) => ErrorCategory::Decode,
            Self::UnknownTarget { .. } => ErrorCategory::Target,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Target => ErrorSeverity::Low,
            ErrorCategory::Process => ErrorSeverity::Medium,
            ErrorCategory::Decode | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 是否屬於外部程序失敗 (包含逾時)
    pub fn is_process_error(&self) -> bool {
        self.category() == ErrorCategory::Process
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ProcessError { .. } => {
                "Check that the system tool is installed and that you have permission to run it"
            }
            Self::ProcessTimeout { .. } => "Retry, or raise --command-timeout",
            Self::DecodeError { .. } => {
                "Check that the inventory command and inventory format settings match"
            }
            Self::UnknownTarget { .. } => {
                "Move closer to the access point or check the SSID spelling, then scan again"
            }
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => "Report the output that could not be serialized",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file or command line flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ProcessError { command, .. } => {
                format!("Could not run the system command `{}`", command)
            }
            Self::ProcessTimeout { seconds, .. } => {
                format!("A system command did not finish within {}s", seconds)
            }
            Self::DecodeError { format, .. } => {
                format!("The network inventory was not valid {}", format)
            }
            Self::UnknownTarget { ssid } => format!("Network '{}' is not in range", ssid),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AirlinkError>;
