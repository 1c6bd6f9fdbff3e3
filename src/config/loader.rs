//! Configuration loading and discovery for `pixscene.toml`
//!
//! Provides functions to find, load, and override configuration.

use super::schema::{PixsceneConfig, CONFIG_FILE_NAME};
use crate::numeric::NumericPolicy;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pixscene.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Force strict numeric handling
    pub strict: Option<bool>,
    /// Override scale factor
    pub scale: Option<u8>,
}

/// Find pixscene.toml by walking up from a directory.
///
/// # Returns
/// - `Some(path)` for the nearest config file
/// - `None` if no ancestor holds one
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Find the config that applies to a scene file.
///
/// The search starts in the directory containing `input`.
pub fn find_config_for_input(input: &Path) -> Option<PathBuf> {
    let input_abs = fs::canonicalize(input).unwrap_or_else(|_| input.to_path_buf());
    let start_dir = match input_abs.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    find_config_from(start_dir)
}

/// Load configuration from a specific file path.
///
/// # Returns
/// - `Ok(PixsceneConfig)` on success
/// - `Err(ConfigError)` if the file cannot be read, parsed or validated
pub fn load_config_file(path: &Path) -> Result<PixsceneConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PixsceneConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Load configuration for a scene file.
///
/// An explicit path is loaded as-is. Otherwise the nearest `pixscene.toml`
/// above the input is used, falling back to defaults when there is none.
/// Returns the config and the file it came from, if any.
pub fn load_config(
    explicit: Option<&Path>,
    input: &Path,
) -> Result<(PixsceneConfig, Option<PathBuf>), ConfigError> {
    let config_path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => find_config_for_input(input),
    };

    match config_path {
        Some(p) => Ok((load_config_file(&p)?, Some(p))),
        None => Ok((PixsceneConfig::default(), None)),
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PixsceneConfig, overrides: &CliOverrides) {
    if let Some(strict) = overrides.strict {
        config.parse.numbers = if strict {
            NumericPolicy::Strict
        } else {
            NumericPolicy::Lenient
        };
    }

    if let Some(scale) = overrides.scale {
        config.draw.scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FilenamePolicy;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(path: &Path, content: &str) {
        File::create(path)
            .expect("should create file")
            .write_all(content.as_bytes())
            .expect("should write content");
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        write_file(&config_path, "[parse]\nnumbers = \"strict\"");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        write_file(&config_path, "");

        let subdir = temp.path().join("scenes").join("nested");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_for_input_uses_input_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let scenes = temp.path().join("scenes");
        fs::create_dir_all(&scenes).unwrap();
        let config_path = scenes.join(CONFIG_FILE_NAME);
        write_file(&config_path, "");
        let input = scenes.join("scene.txt");
        write_file(&input, "png 1 1 a.png\n");

        let found = find_config_for_input(&input).expect("config should be found");
        assert_eq!(
            fs::canonicalize(found).unwrap(),
            fs::canonicalize(config_path).unwrap()
        );
    }

    #[test]
    fn test_load_config_explicit() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join("custom.toml");
        write_file(
            &config_path,
            "[parse]\nheader_filename = \"last-non-numeric\"\n[draw]\nscale = 3\n",
        );

        let (config, source) =
            load_config(Some(config_path.as_path()), Path::new("missing.txt")).unwrap();
        assert_eq!(source, Some(config_path));
        assert_eq!(config.parse.header_filename, FilenamePolicy::LastNonNumeric);
        assert_eq!(config.draw.scale, 3);
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let missing = temp.path().join("nope.toml");
        let result = load_config(Some(missing.as_path()), Path::new("x.txt"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        write_file(&config_path, "[parse\nnumbers = ");

        let result = load_config_file(&config_path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        write_file(&config_path, "[draw]\nscale = 0\n");

        let err = load_config_file(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("draw.scale"));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = PixsceneConfig::default();
        merge_cli_overrides(
            &mut config,
            &CliOverrides {
                strict: Some(true),
                scale: Some(8),
            },
        );
        assert!(config.is_strict());
        assert_eq!(config.draw.scale, 8);

        // Absent overrides leave the file values alone
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert!(config.is_strict());
        assert_eq!(config.draw.scale, 8);
    }
}
