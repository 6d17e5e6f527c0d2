//! Per-project configuration.
//!
//! Settings are layered with figment:
//! - Default values
//! - `<project>/.luadex/settings.toml`
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `LUADEX_` and use double
//! underscores to separate nested levels:
//! - `LUADEX_LOGGING__DEFAULT=debug` sets `logging.default`
//! - `LUADEX_DEBUG__DUMP_PATH=out/index.json` sets `debug.dump_path`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::{IndexError, IndexResult};

/// Directory holding project-local luadex files.
pub const CONFIG_DIR: &str = ".luadex";
pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub indexing: IndexingConfig,

    #[serde(default)]
    pub debug: DebugConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IndexingConfig {
    /// Directories holding Lua modules, relative to the project root.
    /// Module paths are computed relative to these.
    #[serde(default = "default_source_roots")]
    pub source_roots: Vec<PathBuf>,

    /// Glob patterns excluded from the walk
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DebugConfig {
    /// Where `dump` writes the index snapshot, relative to the project root
    #[serde(default = "default_dump_path")]
    pub dump_path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Level for every target without an explicit entry
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `luadex = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_version() -> u32 {
    1
}
fn default_source_roots() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}
fn default_ignore_patterns() -> Vec<String> {
    vec![".git/**".to_string(), ".luadex/**".to_string()]
}
fn default_dump_path() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("index-debug.json")
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            indexing: IndexingConfig::default(),
            debug: DebugConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            source_roots: default_source_roots(),
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            dump_path: default_dump_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Path of the settings file for `project_root`.
    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_DIR).join(SETTINGS_FILE)
    }

    /// Load and validate the settings of a project.
    ///
    /// A missing settings file yields the defaults.
    pub fn load_for_project(project_root: &Path) -> IndexResult<Self> {
        let settings = Self::load_from(Self::config_path(project_root))?;
        settings.validate(project_root)?;
        Ok(settings)
    }

    /// Load configuration from a specific file, without validation
    pub fn load_from(path: impl AsRef<Path>) -> IndexResult<Self> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("LUADEX_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".") // Double underscore becomes dot
                    .into()
            }))
            .extract()
            .map_err(|e| IndexError::Config(Box::new(e)))
    }

    /// Check the source roots of a project.
    ///
    /// Roots must be relative and stay inside the project. An empty list
    /// means the project is not configured.
    pub fn validate(&self, project_root: &Path) -> IndexResult<()> {
        if self.indexing.source_roots.is_empty() {
            return Err(IndexError::MissingConfiguration {
                project: project_root.to_path_buf(),
            });
        }

        for root in &self.indexing.source_roots {
            if root.is_absolute() {
                return Err(IndexError::InvalidSourceRoot {
                    root: root.clone(),
                    reason: "source roots must be relative to the project root".to_string(),
                });
            }
            if root.components().any(|c| matches!(c, Component::ParentDir)) {
                return Err(IndexError::InvalidSourceRoot {
                    root: root.clone(),
                    reason: "source roots must not leave the project".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under `project_root`
    pub fn init_config_file(
        project_root: &Path,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = Self::config_path(project_root);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.indexing.source_roots, vec![PathBuf::from(".")]);
        assert_eq!(settings.logging.default, "warn");
        assert!(settings.validate(Path::new("/p")).is_ok());
    }

    #[test]
    fn test_load_for_project_without_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_for_project(temp_dir.path()).unwrap();
        assert_eq!(settings.indexing.source_roots, vec![PathBuf::from(".")]);
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Settings::config_path(temp_dir.path());
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();

        let toml_content = r#"
[indexing]
source_roots = ["src", "scripts/lua"]

[logging]
default = "info"

[logging.modules]
luadex = "debug"
"#;
        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_for_project(temp_dir.path()).unwrap();
        assert_eq!(
            settings.indexing.source_roots,
            vec![PathBuf::from("src"), PathBuf::from("scripts/lua")]
        );
        assert_eq!(settings.logging.default, "info");
        assert_eq!(settings.logging.modules["luadex"], "debug");
        // Untouched sections keep defaults
        assert!(!settings.indexing.ignore_patterns.is_empty());
        assert_eq!(settings.debug.dump_path, default_dump_path());
    }

    #[test]
    fn test_empty_source_roots_is_missing_configuration() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Settings::config_path(temp_dir.path());
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "[indexing]\nsource_roots = []\n").unwrap();

        let err = Settings::load_for_project(temp_dir.path()).unwrap_err();
        assert!(matches!(err, IndexError::MissingConfiguration { .. }));
    }

    #[test]
    fn test_invalid_source_roots() {
        let mut settings = Settings::default();
        settings.indexing.source_roots = vec![PathBuf::from("../outside")];
        assert!(matches!(
            settings.validate(Path::new("/p")),
            Err(IndexError::InvalidSourceRoot { .. })
        ));

        settings.indexing.source_roots = vec![PathBuf::from("/abs")];
        assert!(matches!(
            settings.validate(Path::new("/p")),
            Err(IndexError::InvalidSourceRoot { .. })
        ));
    }

    #[test]
    fn test_corrupted_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[indexing\nsource_roots = 3").unwrap();

        assert!(matches!(
            Settings::load_from(&config_path),
            Err(IndexError::Config(_))
        ));
    }

    #[test]
    fn test_init_and_reload() {
        let temp_dir = TempDir::new().unwrap();

        let path = Settings::init_config_file(temp_dir.path(), false).unwrap();
        assert!(path.exists());
        assert!(Settings::init_config_file(temp_dir.path(), false).is_err());
        assert!(Settings::init_config_file(temp_dir.path(), true).is_ok());

        let loaded = Settings::load_for_project(temp_dir.path()).unwrap();
        assert_eq!(loaded.indexing.source_roots, vec![PathBuf::from(".")]);
    }
}
