use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("File watch error: {0}")]
    WatchError(#[from] notify::Error),

    #[error("Invalid glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Directory traversal error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Failed to start command `{command}`: {source}")]
    CommandSpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` failed: {status}")]
    CommandFailedError {
        command: String,
        status: String,
        code: Option<i32>,
    },

    #[error("Release version not found in {path}")]
    MissingVersionError { path: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown task: {name}")]
    UnknownTaskError { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Filesystem,
    Process,
    Release,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 可重新執行
    Medium,
    /// 建置失敗
    High,
    /// 環境或配置問題
    Critical,
}

impl BuildError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BuildError::IoError(_)
            | BuildError::SerializationError(_)
            | BuildError::WatchError(_)
            | BuildError::WalkError(_) => ErrorCategory::Filesystem,
            BuildError::CommandSpawnError { .. } | BuildError::CommandFailedError { .. } => {
                ErrorCategory::Process
            }
            BuildError::MissingVersionError { .. } => ErrorCategory::Release,
            BuildError::PatternError(_)
            | BuildError::ConfigValidationError { .. }
            | BuildError::InvalidConfigValueError { .. }
            | BuildError::UnknownTaskError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BuildError::WatchError(_) | BuildError::IoError(_) | BuildError::WalkError(_) => {
                ErrorSeverity::Medium
            }
            BuildError::CommandFailedError { .. }
            | BuildError::MissingVersionError { .. }
            | BuildError::SerializationError(_) => ErrorSeverity::High,
            BuildError::CommandSpawnError { .. }
            | BuildError::PatternError(_)
            | BuildError::ConfigValidationError { .. }
            | BuildError::InvalidConfigValueError { .. }
            | BuildError::UnknownTaskError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 行程結束碼：外部命令失敗時沿用其結束碼
    pub fn exit_code(&self) -> i32 {
        if let BuildError::CommandFailedError {
            code: Some(code), ..
        } = self
        {
            if *code != 0 {
                return *code;
            }
        }

        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BuildError::IoError(_) | BuildError::WalkError(_) => {
                "Check file permissions, then run `clean` followed by `build`"
            }
            BuildError::SerializationError(_) => {
                "Make sure the packaging manifest is valid JSON"
            }
            BuildError::WatchError(_) => {
                "Make sure the watched directory exists and the watch limit is not exhausted"
            }
            BuildError::CommandSpawnError { .. } => {
                "Make sure the package manager is installed and on PATH"
            }
            BuildError::CommandFailedError { .. } => {
                "Inspect the command output above, then re-run the task"
            }
            BuildError::MissingVersionError { .. } => {
                "Add a version such as \"0.1.0\" to the version source file"
            }
            BuildError::PatternError(_)
            | BuildError::ConfigValidationError { .. }
            | BuildError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again"
            }
            BuildError::UnknownTaskError { .. } => "Run `list` to see the available tasks",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BuildError::CommandFailedError { command, status, .. } => {
                format!("`{}` did not finish successfully ({})", command, status)
            }
            BuildError::CommandSpawnError { command, .. } => {
                format!("Could not start `{}`", command)
            }
            BuildError::MissingVersionError { path } => {
                format!("release version error in {}", path)
            }
            BuildError::UnknownTaskError { name } => format!("Task '{}' is not defined", name),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failure_keeps_child_exit_code() {
        let err = BuildError::CommandFailedError {
            command: "yarn css:build".to_string(),
            status: "exit status: 7".to_string(),
            code: Some(7),
        };
        assert_eq!(err.exit_code(), 7);
        assert_eq!(err.category(), ErrorCategory::Process);
    }

    #[test]
    fn test_signal_termination_falls_back_to_severity() {
        let err = BuildError::CommandFailedError {
            command: "yarn electron:dev".to_string(),
            status: "signal: 9".to_string(),
            code: None,
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_version_message() {
        let err = BuildError::MissingVersionError {
            path: "src/main/frontend/version.cljs".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Release);
        assert!(err.user_friendly_message().contains("version.cljs"));
        assert_eq!(err.exit_code(), 1);
    }
}
