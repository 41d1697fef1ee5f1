use crate::domain::model::{StepKind, TaskContext};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// 一個交由 shell 執行的外部命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub command: String,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cwd: None,
        }
    }

    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// 執行外部命令並等待結束，非零結束碼視為錯誤
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<()>;
}

#[async_trait]
pub trait Step: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> StepKind;

    /// 組合步驟的子步驟
    fn children(&self) -> &[Arc<dyn Step>] {
        &[]
    }

    async fn run(&self, ctx: &TaskContext) -> Result<()>;
}
