use crate::core::{CommandSpec, Step, StepKind, TaskContext};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// 執行外部命令直到結束
pub struct CommandStep {
    name: String,
    spec: CommandSpec,
}

impl CommandStep {
    pub fn new(name: impl Into<String>, spec: CommandSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}

#[async_trait]
impl Step for CommandStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StepKind {
        StepKind::Command
    }

    async fn run(&self, ctx: &TaskContext) -> Result<()> {
        ctx.runner().run(&self.spec).await
    }
}

/// 依賴目錄不存在時才執行安裝命令
pub struct EnsureDependenciesStep {
    name: String,
    dependencies: PathBuf,
    install: CommandSpec,
}

impl EnsureDependenciesStep {
    pub fn new(name: impl Into<String>, dependencies: impl Into<PathBuf>, install: CommandSpec) -> Self {
        Self {
            name: name.into(),
            dependencies: dependencies.into(),
            install,
        }
    }
}

#[async_trait]
impl Step for EnsureDependenciesStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StepKind {
        StepKind::EnsureDependencies
    }

    async fn run(&self, ctx: &TaskContext) -> Result<()> {
        if self.dependencies.exists() {
            tracing::debug!("Dependencies present at {}", self.dependencies.display());
            return Ok(());
        }
        tracing::info!("📥 Installing dependencies ({} is missing)", self.dependencies.display());
        ctx.runner().run(&self.install).await
    }
}
