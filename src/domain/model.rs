use crate::domain::ports::CommandRunner;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 步驟種類，用於列出任務結構
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Clean,
    Copy,
    Watch,
    Command,
    EnsureDependencies,
    OptimizeCss,
    StampVersion,
    Series,
    Parallel,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepKind::Clean => "clean",
            StepKind::Copy => "copy",
            StepKind::Watch => "watch",
            StepKind::Command => "command",
            StepKind::EnsureDependencies => "ensure-dependencies",
            StepKind::OptimizeCss => "optimize-css",
            StepKind::StampVersion => "stamp-version",
            StepKind::Series => "series",
            StepKind::Parallel => "parallel",
        };
        f.write_str(label)
    }
}

/// 依啟動順序記錄葉節點步驟名稱
#[derive(Debug, Clone, Default)]
pub struct StepTrace {
    entries: Arc<Mutex<Vec<String>>>,
}

impl StepTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, step_name: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(step_name.to_string());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

/// 步驟執行時共用的環境
#[derive(Clone)]
pub struct TaskContext {
    runner: Arc<dyn CommandRunner>,
    trace: StepTrace,
}

impl TaskContext {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            trace: StepTrace::new(),
        }
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    pub fn trace(&self) -> &StepTrace {
        &self.trace
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub task: String,
    pub steps: Vec<String>,
    pub duration: Duration,
}

impl RunSummary {
    /// 執行摘要
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "task": self.task,
            "total_steps": self.steps.len(),
            "executed_steps": self.steps,
            "total_duration_ms": self.duration.as_millis() as u64,
        })
    }
}
