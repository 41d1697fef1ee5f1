use crate::core::{Step, StepKind, TaskContext};
use crate::utils::css::minify_css;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;

/// 就地壓縮樣式表
pub struct OptimizeCssStep {
    name: String,
    stylesheet: PathBuf,
}

impl OptimizeCssStep {
    pub fn new(name: impl Into<String>, stylesheet: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            stylesheet: stylesheet.into(),
        }
    }
}

#[async_trait]
impl Step for OptimizeCssStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StepKind {
        StepKind::OptimizeCss
    }

    async fn run(&self, _ctx: &TaskContext) -> Result<()> {
        let original = fs::read_to_string(&self.stylesheet)?;
        let minified = minify_css(&original);
        fs::write(&self.stylesheet, &minified)?;

        tracing::info!(
            "🎨 Optimized {} ({} -> {} bytes)",
            self.stylesheet.display(),
            original.len(),
            minified.len()
        );
        Ok(())
    }
}
