#![allow(dead_code)]

use async_trait::async_trait;
use desk_build::core::{CommandRunner, CommandSpec};
use desk_build::{standard_tasks, BuildConfig, BuildError, ProjectLayout, TaskRunner};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 記錄所有命令；可指定失敗的命令與執行時寫出的檔案
#[derive(Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<CommandSpec>>,
    failing: Vec<String>,
    outputs: Vec<(String, PathBuf, String)>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, command: &str) -> Self {
        self.failing.push(command.to_string());
        self
    }

    pub fn writing(mut self, command: &str, path: &Path, content: &str) -> Self {
        self.outputs
            .push((command.to_string(), path.to_path_buf(), content.to_string()));
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|spec| spec.command.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> desk_build::Result<()> {
        self.calls.lock().unwrap().push(spec.clone());

        if self.failing.contains(&spec.command) {
            return Err(BuildError::CommandFailedError {
                command: spec.command.clone(),
                status: "exit status: 1".to_string(),
                code: Some(1),
            });
        }

        for (command, path, content) in &self.outputs {
            if command == &spec.command {
                fs::create_dir_all(path.parent().unwrap())?;
                fs::write(path, content)?;
            }
        }
        Ok(())
    }
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn default_layout(root: &Path) -> ProjectLayout {
    BuildConfig::default().layout(root)
}

pub fn task_runner(root: &Path, runner: Arc<ScriptedRunner>) -> TaskRunner {
    let registry = standard_tasks(&default_layout(root)).unwrap();
    TaskRunner::new(registry, runner)
}

/// 列出目錄下所有檔案的相對路徑（排序後）
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
