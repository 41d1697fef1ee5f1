pub mod build_config;

pub use build_config::{BuildConfig, ProjectLayout};

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "desk-build")]
#[command(about = "Build, watch and package the desktop application shell")]
pub struct CliConfig {
    /// Project root; all configured paths are relative to it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Path to TOML configuration file (defaults to <root>/desk-build.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines (for CI)
    #[arg(long)]
    pub json_logs: bool,

    /// Print the step tree of the task without running it
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: TaskCommand,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum TaskCommand {
    /// Remove build output except the lockfile and dependencies
    Clean,
    /// Clean, sync static files and build optimized CSS
    Build,
    /// Sync static files, then keep them in sync while the CSS watcher runs
    Watch,
    /// Launch the desktop shell in development mode
    Electron,
    /// Build a release and package the desktop application
    #[command(name = "electron-maker", alias = "electronMaker")]
    ElectronMaker,
    /// List the available tasks and their steps
    List,
}

#[cfg(feature = "cli")]
impl TaskCommand {
    pub fn task_name(&self) -> Option<&'static str> {
        match self {
            TaskCommand::Clean => Some("clean"),
            TaskCommand::Build => Some("build"),
            TaskCommand::Watch => Some("watch"),
            TaskCommand::Electron => Some("electron"),
            TaskCommand::ElectronMaker => Some("electron-maker"),
            TaskCommand::List => None,
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_command() {
        let config = CliConfig::parse_from(["desk-build", "--root", "/project", "build"]);
        assert_eq!(config.root, PathBuf::from("/project"));
        assert_eq!(config.command.task_name(), Some("build"));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_electron_maker_alias() {
        let config = CliConfig::parse_from(["desk-build", "--dry-run", "electronMaker"]);
        assert_eq!(config.command, TaskCommand::ElectronMaker);
        assert!(config.dry_run);
    }

    #[test]
    fn test_list_has_no_task() {
        let config = CliConfig::parse_from(["desk-build", "-v", "list"]);
        assert!(config.verbose);
        assert_eq!(config.command.task_name(), None);
    }
}
