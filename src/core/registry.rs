use crate::core::Step;
use crate::utils::error::{BuildError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// 對外公開的具名任務
#[derive(Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Arc<dyn Step>>,
    aliases: BTreeMap<String, String>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, step: Arc<dyn Step>) {
        self.tasks.insert(name.into(), step);
    }

    pub fn alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases.insert(alias.into(), target.into());
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Step>> {
        let resolved = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.tasks
            .get(resolved)
            .cloned()
            .ok_or_else(|| BuildError::UnknownTaskError {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.tasks.keys().map(String::as_str).collect()
    }
}
