use crate::core::{Step, StepKind, TaskContext};
use crate::utils::error::Result;
use crate::utils::fileset::FileSet;
use async_trait::async_trait;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// 監看一組檔案，變動時重新執行目標步驟；不處理啟動當下已存在的檔案。
/// 只會在外部終止行程時結束。
pub struct WatchStep {
    name: String,
    files: FileSet,
    target: Arc<dyn Step>,
    debounce: Duration,
}

impl WatchStep {
    pub fn new(
        name: impl Into<String>,
        files: FileSet,
        target: Arc<dyn Step>,
        debounce: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            files,
            target,
            debounce,
        }
    }

    fn is_relevant(&self, event: &Event, roots: &[PathBuf]) -> bool {
        if !matches!(
            event.kind,
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
        ) {
            return false;
        }
        event.paths.iter().any(|path| {
            roots
                .iter()
                .filter_map(|root| path.strip_prefix(root).ok())
                .any(|relative| self.files.matches(relative))
        })
    }
}

#[async_trait]
impl Step for WatchStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StepKind {
        StepKind::Watch
    }

    async fn run(&self, ctx: &TaskContext) -> Result<()> {
        let base = self.files.base().to_path_buf();
        // 事件路徑可能是正規化後的絕對路徑
        let roots = vec![base.clone(), fs::canonicalize(&base)?];

        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    let _ = tx.send(event);
                }
                Err(e) => tracing::warn!("⚠️ Watch error: {}", e),
            }
        })?;

        // 只監看 include 涵蓋的子目錄，避免遞迴進入 node_modules 之類的大目錄
        for dir in self.files.watch_roots() {
            fs::create_dir_all(&dir)?;
            watcher.watch(&dir, RecursiveMode::Recursive)?;
            tracing::info!("👀 {}: watching {}", self.name, dir.display());
        }

        while let Some(event) = rx.recv().await {
            if !self.is_relevant(&event, &roots) {
                continue;
            }

            // 合併短時間內連續發生的事件
            tokio::time::sleep(self.debounce).await;
            while rx.try_recv().is_ok() {}

            // 重新同步不寫入步驟紀錄，長時間監看時紀錄才不會持續增長
            let target = self.target.name();
            tracing::info!("🔁 {}: change detected, re-running '{}'", self.name, target);
            let start_time = Instant::now();
            match self.target.run(ctx).await {
                Ok(()) => tracing::info!(
                    "✅ {}: '{}' finished in {:?}",
                    self.name,
                    target,
                    start_time.elapsed()
                ),
                Err(e) => tracing::error!("❌ {}: '{}' failed: {}", self.name, target, e),
            }
        }

        Ok(())
    }
}
