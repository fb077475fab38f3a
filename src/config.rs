//! TOML configuration: category-table overrides and file filtering rules.
//!
//! # Configuration File Format
//!
//! ```toml
//! [categories]
//! # extension -> category name; extends or overrides the built-in table
//! log = "Documents"
//! rs = "Code"
//!
//! [filters]
//! include_hidden = false
//! exclude_filenames = [".DS_Store", "Thumbs.db"]
//! exclude_extensions = ["tmp", "bak"]
//! exclude_patterns = ["node_modules/**"]
//! ```
//!
//! Glob patterns are matched against the path relative to the source root,
//! so `node_modules/**` works no matter where the source tree lives.

use crate::category::{Category, CategoryMap};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading or compiling configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the explicitly given path.
    NotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    Invalid(String),
    /// Invalid glob pattern in `exclude_patterns`.
    InvalidGlobPattern(String),
    /// A `[categories]` entry names a category that does not exist.
    UnknownCategory {
        /// The extension being mapped.
        extension: String,
        /// The unrecognized category name.
        name: String,
    },
    /// IO error while reading the configuration file.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::UnknownCategory { extension, name } => {
                write!(
                    f,
                    "Unknown category '{}' for extension '{}' (expected one of: Images, Documents, Audio, Video, Archives, Code, CAD, Other)",
                    name, extension
                )
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Extension to category-name overrides applied on top of the defaults.
    #[serde(default)]
    pub categories: HashMap<String, String>,

    /// File filtering rules.
    #[serde(default)]
    pub filters: FilterRules,
}

/// Rules deciding which files are visible to a run at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether to process hidden files (names starting with `.`).
    #[serde(default)]
    pub include_hidden: bool,

    /// Exact filenames to exclude (e.g. `.DS_Store`, `Thumbs.db`).
    #[serde(default)]
    pub exclude_filenames: Vec<String>,

    /// File extensions to exclude (e.g. `tmp`, `bak`).
    #[serde(default)]
    pub exclude_extensions: Vec<String>,

    /// Glob patterns to exclude, matched against the source-relative path.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl AppConfig {
    /// Load configuration, falling back to defaults.
    ///
    /// Lookup order:
    /// 1. The explicitly provided path, if any
    /// 2. `.tidymove.toml` in the current directory
    /// 3. `~/.config/tidymove/config.toml`
    /// 4. Built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error only when an explicitly provided file is missing or
    /// unreadable, or when any found file fails to parse.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".tidymove.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("tidymove")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Applies `[categories]` overrides to a category map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCategory`] if an entry names a category
    /// that does not exist.
    pub fn apply_categories(&self, map: &mut CategoryMap) -> Result<(), ConfigError> {
        for (extension, name) in &self.categories {
            let category =
                Category::from_name(name).ok_or_else(|| ConfigError::UnknownCategory {
                    extension: extension.clone(),
                    name: name.clone(),
                })?;
            map.add_mapping(extension, category);
        }
        Ok(())
    }

    /// Compiles the filter rules into matcher structures.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob pattern is invalid.
    pub fn compile_filters(&self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(&self.filters)
    }
}

/// Pre-compiled filter rules for efficient per-file matching.
pub struct CompiledFilters {
    include_hidden: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
}

impl CompiledFilters {
    fn new(rules: &FilterRules) -> Result<Self, ConfigError> {
        let exclude_patterns = rules
            .exclude_patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_hidden: rules.include_hidden,
            exclude_filenames: rules.exclude_filenames.iter().cloned().collect(),
            exclude_extensions: rules
                .exclude_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_patterns,
        })
    }

    /// Decides whether a file takes part in the run.
    ///
    /// `relative_path` is the file's path relative to the source root.
    /// Checks, in order with early exit: hidden-file toggle, exact filename,
    /// extension, glob patterns; files are included by default.
    pub fn should_include(&self, relative_path: &Path) -> bool {
        let file_name = relative_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if !self.include_hidden && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = relative_path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext_lower) {
                return false;
            }
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative_path))
        {
            return false;
        }

        true
    }
}

impl Default for CompiledFilters {
    /// Filters with no exclusion rules; hidden files are still skipped.
    fn default() -> Self {
        Self {
            include_hidden: false,
            exclude_filenames: HashSet::new(),
            exclude_extensions: HashSet::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_skips_hidden_files() {
        let config = AppConfig::default();
        assert!(!config.filters.include_hidden);

        let compiled = config.compile_filters().unwrap();
        assert!(!compiled.should_include(Path::new(".DS_Store")));
        assert!(compiled.should_include(Path::new("photo.jpg")));
    }

    #[test]
    fn test_include_hidden_enables_dotfiles() {
        let config = AppConfig {
            filters: FilterRules {
                include_hidden: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let compiled = config.compile_filters().unwrap();
        assert!(compiled.should_include(Path::new(".gitignore")));
    }

    #[test]
    fn test_exclude_exact_filename() {
        let config = AppConfig {
            filters: FilterRules {
                exclude_filenames: vec!["Thumbs.db".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let compiled = config.compile_filters().unwrap();
        assert!(!compiled.should_include(Path::new("Thumbs.db")));
        assert!(!compiled.should_include(Path::new("sub/Thumbs.db")));
        assert!(compiled.should_include(Path::new("image.jpg")));
    }

    #[test]
    fn test_exclude_extensions_case_insensitive() {
        let config = AppConfig {
            filters: FilterRules {
                exclude_extensions: vec!["bak".to_string(), ".tmp".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let compiled = config.compile_filters().unwrap();
        assert!(!compiled.should_include(Path::new("file.bak")));
        assert!(!compiled.should_include(Path::new("file.BAK")));
        assert!(!compiled.should_include(Path::new("file.tmp")));
        assert!(compiled.should_include(Path::new("file.txt")));
    }

    #[test]
    fn test_exclude_glob_patterns_respect_directories() {
        let config = AppConfig {
            filters: FilterRules {
                exclude_patterns: vec!["node_modules/**".to_string(), "*.cache".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let compiled = config.compile_filters().unwrap();
        assert!(!compiled.should_include(Path::new("node_modules/pkg/index.js")));
        assert!(!compiled.should_include(Path::new("data.cache")));
        assert!(compiled.should_include(Path::new("my_node_modules/pkg/index.js")));
        assert!(compiled.should_include(Path::new("src/main.js")));
    }

    #[test]
    fn test_invalid_glob_pattern_is_an_error() {
        let config = AppConfig {
            filters: FilterRules {
                exclude_patterns: vec!["[invalid".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.compile_filters().is_err());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_text = r#"
            [categories]
            log = "Documents"
            rs = "Code"

            [filters]
            include_hidden = true
            exclude_filenames = [".DS_Store"]
            exclude_extensions = ["tmp"]
            exclude_patterns = ["target/**"]
        "#;
        let config: AppConfig = toml::from_str(toml_text).unwrap();
        assert_eq!(config.categories.len(), 2);
        assert!(config.filters.include_hidden);
        assert_eq!(config.filters.exclude_filenames, vec![".DS_Store"]);
    }

    #[test]
    fn test_apply_categories_overrides_map() {
        use crate::category::Category;

        let mut config = AppConfig::default();
        config
            .categories
            .insert("log".to_string(), "Documents".to_string());
        config
            .categories
            .insert("txt".to_string(), "Code".to_string());

        let mut map = CategoryMap::default();
        config.apply_categories(&mut map).unwrap();

        assert_eq!(map.category_for(Some("log")), Category::Document);
        assert_eq!(map.category_for(Some("txt")), Category::Code);
    }

    #[test]
    fn test_apply_categories_rejects_unknown_name() {
        let mut config = AppConfig::default();
        config
            .categories
            .insert("dat".to_string(), "Miscellany".to_string());

        let mut map = CategoryMap::default();
        let err = config.apply_categories(&mut map).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCategory { .. }));
    }

    #[test]
    fn test_load_explicit_missing_path_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/no/such/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
