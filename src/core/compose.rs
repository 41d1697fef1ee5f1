use crate::core::{Step, StepKind, TaskContext};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// 執行單一步驟並記錄耗時；葉節點會寫入 trace
pub async fn run_step(step: &dyn Step, ctx: &TaskContext) -> Result<()> {
    let start_time = Instant::now();
    if step.children().is_empty() {
        ctx.trace().record(step.name());
    }
    tracing::info!("▶️ Starting '{}'", step.name());

    match step.run(ctx).await {
        Ok(()) => {
            tracing::info!(
                "✅ Finished '{}' (duration: {:?})",
                step.name(),
                start_time.elapsed()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ '{}' errored after {:?}: {}",
                step.name(),
                start_time.elapsed(),
                e
            );
            Err(e)
        }
    }
}

/// 依序執行，前一步完成後才開始下一步；任何失敗立即中止
pub struct Series {
    name: String,
    steps: Vec<Arc<dyn Step>>,
}

impl Series {
    pub fn new(name: impl Into<String>, steps: Vec<Arc<dyn Step>>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }
}

#[async_trait]
impl Step for Series {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StepKind {
        StepKind::Series
    }

    fn children(&self) -> &[Arc<dyn Step>] {
        &self.steps
    }

    async fn run(&self, ctx: &TaskContext) -> Result<()> {
        for step in &self.steps {
            run_step(step.as_ref(), ctx).await?;
        }
        Ok(())
    }
}

/// 在同一個 task 上同時輪詢所有子步驟，不保證彼此順序
pub struct Parallel {
    name: String,
    steps: Vec<Arc<dyn Step>>,
}

impl Parallel {
    pub fn new(name: impl Into<String>, steps: Vec<Arc<dyn Step>>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }
}

#[async_trait]
impl Step for Parallel {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StepKind {
        StepKind::Parallel
    }

    fn children(&self) -> &[Arc<dyn Step>] {
        &self.steps
    }

    async fn run(&self, ctx: &TaskContext) -> Result<()> {
        futures::future::try_join_all(self.steps.iter().map(|step| run_step(step.as_ref(), ctx)))
            .await?;
        Ok(())
    }
}

/// 以縮排樹狀列出步驟結構
pub fn render_plan(step: &dyn Step) -> String {
    let mut lines = Vec::new();
    render_level(step, 0, &mut lines);
    lines.join("\n")
}

fn render_level(step: &dyn Step, depth: usize, lines: &mut Vec<String>) {
    lines.push(format!("{}{} ({})", "  ".repeat(depth), step.name(), step.kind()));
    for child in step.children() {
        render_level(child.as_ref(), depth + 1, lines);
    }
}
