pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, TaskCommand};

pub use adapters::process::ShellRunner;
pub use app::tasks::standard_tasks;
pub use config::{BuildConfig, ProjectLayout};
pub use crate::core::{engine::TaskRunner, registry::TaskRegistry};
pub use utils::error::{BuildError, Result};
