pub mod compose;
pub mod engine;
pub mod registry;

pub use crate::domain::model::{RunSummary, StepKind, StepTrace, TaskContext};
pub use crate::domain::ports::{CommandRunner, CommandSpec, Step};
pub use crate::utils::error::Result;
