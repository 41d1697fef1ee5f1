use crate::utils::error::Result;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// `*` 不跨越目錄，`**` 才會
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// 以基準目錄為根的一組檔案：符合任一 include 且不符合任何 exclude
#[derive(Debug, Clone)]
pub struct FileSet {
    base: PathBuf,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileSet {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(Pattern::new(pattern)?);
        Ok(self)
    }

    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(Pattern::new(pattern)?);
        Ok(self)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// `relative` 為相對於基準目錄的路徑
    pub fn matches(&self, relative: &Path) -> bool {
        let candidate = to_slash(relative);
        self.include
            .iter()
            .any(|p| p.matches_with(&candidate, MATCH_OPTIONS))
            && !self.is_excluded(&candidate)
    }

    fn is_excluded(&self, candidate: &str) -> bool {
        self.exclude
            .iter()
            .any(|p| p.matches_with(candidate, MATCH_OPTIONS))
    }

    /// 監看時需要的目錄：每個 include 開頭不含萬用字元的部分，
    /// 已被其他目錄涵蓋的會被略過
    pub fn watch_roots(&self) -> Vec<PathBuf> {
        let mut prefixes: Vec<PathBuf> = self
            .include
            .iter()
            .map(|pattern| literal_dir_prefix(pattern.as_str()))
            .collect();
        prefixes.sort();
        prefixes.dedup();

        let mut roots: Vec<PathBuf> = Vec::new();
        for prefix in prefixes {
            if roots.iter().any(|root| prefix.starts_with(root)) {
                continue;
            }
            roots.push(prefix);
        }
        roots
            .into_iter()
            .map(|prefix| {
                if prefix.as_os_str().is_empty() {
                    self.base.clone()
                } else {
                    self.base.join(prefix)
                }
            })
            .collect()
    }

    /// 列出符合的檔案（相對路徑，依名稱排序）；基準目錄不存在時為空
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        if !self.base.is_dir() {
            tracing::warn!("⚠️ Source directory not found: {}", self.base.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.base)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return true;
                }
                match entry.path().strip_prefix(&self.base) {
                    Ok(relative) => !self.is_excluded(&to_slash(relative)),
                    Err(_) => true,
                }
            });

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.base) else {
                continue;
            };
            if self.matches(relative) {
                files.push(relative.to_path_buf());
            }
        }

        Ok(files)
    }

    /// 複製到目標目錄並保留相對結構，已存在的檔案會被覆寫
    pub fn copy_to(&self, dest: &Path) -> Result<usize> {
        let files = self.files()?;
        for relative in &files {
            let target = dest.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(self.base.join(relative), &target)?;
            tracing::debug!("📄 {} -> {}", relative.display(), target.display());
        }
        Ok(files.len())
    }
}

// 最後一段可能是檔名，因此不列入
fn literal_dir_prefix(pattern: &str) -> PathBuf {
    let mut segments: Vec<&str> = pattern.split('/').collect();
    segments.pop();
    segments
        .into_iter()
        .take_while(|segment| !segment.contains(['*', '?', '[']))
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
