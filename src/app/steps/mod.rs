pub mod clean;
pub mod command;
pub mod css;
pub mod release;
pub mod sync;
pub mod watch;

pub use clean::CleanStep;
pub use command::{CommandStep, EnsureDependenciesStep};
pub use css::OptimizeCssStep;
pub use release::StampVersionStep;
pub use sync::CopyStep;
pub use watch::WatchStep;
