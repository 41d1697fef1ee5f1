use crate::core::{Step, StepKind, TaskContext};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// 清空目錄內容，保留白名單中的路徑（相對於該目錄）
pub struct CleanStep {
    name: String,
    dir: PathBuf,
    keep: Vec<PathBuf>,
}

impl CleanStep {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>, keep: &[String]) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            keep: keep.iter().map(PathBuf::from).collect(),
        }
    }
}

#[async_trait]
impl Step for CleanStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StepKind {
        StepKind::Clean
    }

    async fn run(&self, _ctx: &TaskContext) -> Result<()> {
        let removed = clean_directory(&self.dir, &self.keep)?;
        tracing::info!("🧹 Removed {} entries from {}", removed, self.dir.display());
        Ok(())
    }
}

/// 回傳刪除的項目數；目錄不存在或已為空時不視為錯誤
pub fn clean_directory(dir: &Path, keep: &[PathBuf]) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let mut removed = 0;
    clean_level(dir, Path::new(""), keep, &mut removed)?;
    Ok(removed)
}

fn clean_level(root: &Path, relative: &Path, keep: &[PathBuf], removed: &mut usize) -> Result<()> {
    for entry in fs::read_dir(root.join(relative))? {
        let entry = entry?;
        let entry_relative = relative.join(entry.file_name());

        if keep.iter().any(|k| k == &entry_relative) {
            tracing::debug!("Keeping {}", entry_relative.display());
            continue;
        }

        let file_type = entry.file_type()?;
        let holds_kept_path = keep.iter().any(|k| k.starts_with(&entry_relative));
        if file_type.is_dir() && holds_kept_path {
            clean_level(root, &entry_relative, keep, removed)?;
            continue;
        }

        if file_type.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
        *removed += 1;
    }
    Ok(())
}
