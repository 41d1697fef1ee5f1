use crate::utils::error::{BuildError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 清理時保留的路徑必須位於輸出目錄之內
pub fn validate_relative_path(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    let candidate = std::path::Path::new(path);
    let escapes = candidate
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir));
    if candidate.is_absolute() || escapes {
        return Err(BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path must be relative and stay inside its base directory".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_glob(field_name: &str, pattern: &str) -> Result<()> {
    validate_non_empty_string(field_name, pattern)?;
    glob::Pattern::new(pattern).map_err(|e| BuildError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: pattern.to_string(),
        reason: format!("Invalid glob: {}", e),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("paths.output", "static").is_ok());
        assert!(validate_path("paths.output", "").is_err());
        assert!(validate_path("paths.output", "sta\0tic").is_err());
    }

    #[test]
    fn test_validate_relative_path() {
        assert!(validate_relative_path("clean.keep", "node_modules").is_ok());
        assert!(validate_relative_path("clean.keep", "../yarn.lock").is_err());
        assert!(validate_relative_path("clean.keep", "/etc/passwd").is_err());
    }

    #[test]
    fn test_validate_glob() {
        assert!(validate_glob("assets.exclude", "**/i18n-*.js").is_ok());
        assert!(validate_glob("assets.exclude", "[").is_err());
        assert!(validate_glob("assets.exclude", "  ").is_err());
    }
}
