use crate::core::{Step, StepKind, TaskContext};
use crate::utils::error::Result;
use crate::utils::fileset::FileSet;
use async_trait::async_trait;
use std::path::PathBuf;

/// 將一或多組檔案複製到目標目錄（覆寫既有檔案）
pub struct CopyStep {
    name: String,
    sources: Vec<FileSet>,
    dest: PathBuf,
}

impl CopyStep {
    pub fn new(name: impl Into<String>, sources: Vec<FileSet>, dest: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            sources,
            dest: dest.into(),
        }
    }
}

#[async_trait]
impl Step for CopyStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StepKind {
        StepKind::Copy
    }

    async fn run(&self, _ctx: &TaskContext) -> Result<()> {
        let mut copied = 0;
        for source in &self.sources {
            copied += source.copy_to(&self.dest)?;
        }
        tracing::info!("📦 {}: copied {} files to {}", self.name, copied, self.dest.display());
        Ok(())
    }
}
