use crate::core::{CommandRunner, CommandSpec};
use crate::utils::error::{BuildError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// 透過系統 shell 執行命令，標準輸入輸出直接繼承自目前行程
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<()> {
        let mut cmd = shell_command(&spec.command);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }
        // 行程被中止時一併結束子行程
        cmd.kill_on_drop(true);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        match &spec.cwd {
            Some(cwd) => tracing::info!("💻 $ {} (in {})", spec.command, cwd.display()),
            None => tracing::info!("💻 $ {}", spec.command),
        }

        let mut child = cmd.spawn().map_err(|source| BuildError::CommandSpawnError {
            command: spec.command.clone(),
            source,
        })?;
        let status = child.wait().await?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildError::CommandFailedError {
                command: spec.command.clone(),
                status: status.to_string(),
                code: status.code(),
            })
        }
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}
