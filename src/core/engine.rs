use crate::core::compose::{render_plan, run_step};
use crate::core::registry::TaskRegistry;
use crate::core::{CommandRunner, RunSummary, TaskContext};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Instant;

pub struct TaskRunner {
    registry: TaskRegistry,
    context: TaskContext,
}

impl TaskRunner {
    pub fn new(registry: TaskRegistry, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            registry,
            context: TaskContext::new(runner),
        }
    }

    pub fn context(&self) -> &TaskContext {
        &self.context
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// 每次執行都從空的步驟紀錄開始；失敗後紀錄仍保留到下一次執行
    pub async fn run(&self, task: &str) -> Result<RunSummary> {
        let step = self.registry.get(task)?;
        self.context.trace().clear();
        let start_time = Instant::now();
        tracing::info!("🚀 Running task '{}'", task);

        run_step(step.as_ref(), &self.context).await?;

        Ok(RunSummary {
            task: task.to_string(),
            steps: self.context.trace().snapshot(),
            duration: start_time.elapsed(),
        })
    }

    /// 不執行，只列出任務的步驟樹
    pub fn plan(&self, task: &str) -> Result<String> {
        let step = self.registry.get(task)?;
        Ok(render_plan(step.as_ref()))
    }
}
