use crate::utils::error::{BuildError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 專案根目錄下自動載入的設定檔名稱
pub const DEFAULT_CONFIG_FILE: &str = "desk-build.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub paths: PathsConfig,
    pub commands: CommandsConfig,
    pub clean: CleanConfig,
    pub assets: AssetsConfig,
    pub watch: WatchConfig,
}

/// `output`、`resources`、`public_static`、`assets`、`version_source` 相對於專案根目錄；
/// 其餘相對於 `output`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub output: String,
    pub resources: String,
    pub public_static: String,
    pub assets: String,
    pub version_source: String,
    pub assets_output: String,
    pub stylesheet: String,
    pub manifest: String,
    pub dependencies: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output: "static".to_string(),
            resources: "resources".to_string(),
            public_static: "public/static".to_string(),
            assets: "node_modules/@excalidraw/excalidraw/dist/excalidraw-assets".to_string(),
            version_source: "src/main/frontend/version.cljs".to_string(),
            assets_output: "js/excalidraw-assets".to_string(),
            stylesheet: "css/style.css".to_string(),
            manifest: "package.json".to_string(),
            dependencies: "node_modules".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub install: String,
    pub css_build: String,
    pub css_watch: String,
    pub electron_dev: String,
    pub release_build: String,
    pub electron_make: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            install: "yarn".to_string(),
            css_build: "yarn css:build".to_string(),
            css_watch: "yarn css:watch".to_string(),
            electron_dev: "yarn electron:dev".to_string(),
            release_build: "yarn cljs:release-electron".to_string(),
            electron_make: "yarn electron:make".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// 相對於輸出目錄，清理時保留
    pub keep: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            keep: vec!["yarn.lock".to_string(), "node_modules".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub exclude: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["**/i18n-*.js".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 200 }
    }
}

/// 解析成絕對路徑後的專案配置
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub output: PathBuf,
    pub resources: PathBuf,
    pub public_static: PathBuf,
    pub assets: PathBuf,
    pub assets_output: PathBuf,
    pub stylesheet: PathBuf,
    pub version_source: PathBuf,
    pub manifest: PathBuf,
    pub dependencies: PathBuf,
    pub clean_keep: Vec<String>,
    pub asset_excludes: Vec<String>,
    pub watch_debounce: Duration,
    pub commands: CommandsConfig,
}

impl BuildConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BuildError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BuildError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 指定檔案優先；否則讀取根目錄的 desk-build.toml，不存在時使用預設值
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            return Self::from_file(path);
        }

        let candidate = root.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::info!("📁 Loading configuration from: {}", candidate.display());
            Self::from_file(candidate)
        } else {
            tracing::debug!("No {} found, using default layout", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// 替換環境變數 (例如 ${YARN})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn layout(&self, root: &Path) -> ProjectLayout {
        let paths = &self.paths;
        let output = root.join(&paths.output);
        ProjectLayout {
            root: root.to_path_buf(),
            resources: root.join(&paths.resources),
            public_static: root.join(&paths.public_static),
            assets: root.join(&paths.assets),
            version_source: root.join(&paths.version_source),
            assets_output: output.join(&paths.assets_output),
            stylesheet: output.join(&paths.stylesheet),
            manifest: output.join(&paths.manifest),
            dependencies: output.join(&paths.dependencies),
            output,
            clean_keep: self.clean.keep.clone(),
            asset_excludes: self.assets.exclude.clone(),
            watch_debounce: Duration::from_millis(self.watch.debounce_ms),
            commands: self.commands.clone(),
        }
    }
}

impl Validate for BuildConfig {
    fn validate(&self) -> Result<()> {
        let paths = &self.paths;
        for (field, value) in [
            ("paths.output", &paths.output),
            ("paths.resources", &paths.resources),
            ("paths.public_static", &paths.public_static),
            ("paths.assets", &paths.assets),
            ("paths.version_source", &paths.version_source),
        ] {
            validation::validate_path(field, value)?;
        }

        for (field, value) in [
            ("paths.assets_output", &paths.assets_output),
            ("paths.stylesheet", &paths.stylesheet),
            ("paths.manifest", &paths.manifest),
            ("paths.dependencies", &paths.dependencies),
        ] {
            validation::validate_relative_path(field, value)?;
        }

        let commands = &self.commands;
        for (field, value) in [
            ("commands.install", &commands.install),
            ("commands.css_build", &commands.css_build),
            ("commands.css_watch", &commands.css_watch),
            ("commands.electron_dev", &commands.electron_dev),
            ("commands.release_build", &commands.release_build),
            ("commands.electron_make", &commands.electron_make),
        ] {
            validation::validate_non_empty_string(field, value)?;
        }

        for keep in &self.clean.keep {
            validation::validate_relative_path("clean.keep", keep)?;
        }

        for pattern in &self.assets.exclude {
            validation::validate_glob("assets.exclude", pattern)?;
        }

        if paths.output == paths.public_static {
            return Err(BuildError::InvalidConfigValueError {
                field: "paths.public_static".to_string(),
                value: paths.public_static.clone(),
                reason: "Must differ from paths.output".to_string(),
            });
        }

        Ok(())
    }
}
