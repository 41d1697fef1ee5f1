use crate::core::{Step, StepKind, TaskContext};
use crate::utils::error::{BuildError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const VERSION_PATTERN: &str = r"[0-9.]{3,}";

/// 取第一段「數字與點」序列，去掉頭尾的點後仍含數字且長度至少 3 者。
/// 純點號（如刪節號）與黏在版本旁的標點都不會被當成版本。
pub fn extract_version(text: &str) -> Option<String> {
    static VERSION: OnceLock<Regex> = OnceLock::new();
    let re = VERSION.get_or_init(|| Regex::new(VERSION_PATTERN).expect("valid version pattern"));

    re.find_iter(text)
        .map(|m| m.as_str().trim_matches('.'))
        .find(|candidate| candidate.len() >= 3 && candidate.chars().any(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

/// 從原始碼讀出版本並寫回打包清單的 `version` 欄位（兩格縮排、保留欄位順序）。
/// 找不到版本時回傳錯誤，清單保持不變。
pub fn stamp_manifest_version(manifest: &Path, version_source: &Path) -> Result<String> {
    let mut package: serde_json::Value = serde_json::from_str(&fs::read_to_string(manifest)?)?;

    let source = fs::read_to_string(version_source)?;
    let version = extract_version(&source).ok_or_else(|| BuildError::MissingVersionError {
        path: version_source.display().to_string(),
    })?;

    let fields = package
        .as_object_mut()
        .ok_or_else(|| BuildError::InvalidConfigValueError {
            field: "paths.manifest".to_string(),
            value: manifest.display().to_string(),
            reason: "Manifest must be a JSON object".to_string(),
        })?;
    fields.insert(
        "version".to_string(),
        serde_json::Value::String(version.clone()),
    );

    fs::write(manifest, serde_json::to_string_pretty(&package)?)?;
    Ok(version)
}

pub struct StampVersionStep {
    name: String,
    manifest: PathBuf,
    version_source: PathBuf,
}

impl StampVersionStep {
    pub fn new(
        name: impl Into<String>,
        manifest: impl Into<PathBuf>,
        version_source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            manifest: manifest.into(),
            version_source: version_source.into(),
        }
    }
}

#[async_trait]
impl Step for StampVersionStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StepKind {
        StepKind::StampVersion
    }

    async fn run(&self, _ctx: &TaskContext) -> Result<()> {
        let version = stamp_manifest_version(&self.manifest, &self.version_source)?;
        tracing::info!("🏷️ Release version {} written to {}", version, self.manifest.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_version() {
        assert_eq!(extract_version("... v1.2.34 ...").as_deref(), Some("1.2.34"));
        assert_eq!(
            extract_version("(defonce version \"0.10.9\")").as_deref(),
            Some("0.10.9")
        );
        assert_eq!(extract_version("build 2024 and 1.0").as_deref(), Some("2024"));
    }

    #[test]
    fn test_extract_version_requires_three_characters() {
        assert_eq!(extract_version("v1.2"), Some("1.2".to_string()));
        assert_eq!(extract_version("v1."), None);
        assert_eq!(extract_version("no version here..."), None);
        assert_eq!(extract_version(""), None);
        assert_eq!(extract_version("1.. then 2.0.1"), Some("2.0.1".to_string()));
    }

    #[test]
    fn test_extract_version_trims_surrounding_dots() {
        assert_eq!(extract_version("see ..1.2").as_deref(), Some("1.2"));
        assert_eq!(extract_version("version v1.2.3.").as_deref(), Some("1.2.3"));
        assert_eq!(extract_version("...0.10.9...").as_deref(), Some("0.10.9"));
    }
}
