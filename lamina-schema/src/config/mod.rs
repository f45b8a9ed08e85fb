//! Configuration file parsing for `lamina.toml`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{SchemaError, SchemaResult};
use crate::resource::{IncludeConfig, PageConfig};

/// Main configuration structure for `lamina.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LaminaConfig {
    /// Inclusion settings.
    #[serde(default)]
    pub include: IncludeSettings,

    /// Pagination settings.
    #[serde(default)]
    pub pagination: PageSettings,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugSettings,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentOverride>,
}

impl LaminaConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        // First, expand environment variables
        let expanded = expand_env_vars(content);

        toml::from_str(&expanded).map_err(|e| SchemaError::TomlError { source: e })
    }

    /// Apply environment-specific overrides.
    pub fn with_environment(mut self, env: &str) -> Self {
        if let Some(overrides) = self.environments.remove(env) {
            if let Some(pagination) = overrides.pagination {
                if let Some(size) = pagination.default_size {
                    self.pagination.default_size = size;
                }
                if let Some(size) = pagination.max_size {
                    self.pagination.max_size = size;
                }
            }
            if let Some(debug) = overrides.debug {
                if let Some(level) = debug.log_level {
                    self.debug.log_level = Some(level);
                }
                if let Some(log_includes) = debug.log_includes {
                    self.debug.log_includes = log_includes;
                }
            }
        }
        self
    }

    /// Build the per-type include configuration these settings describe.
    pub fn include_config(&self) -> IncludeConfig {
        IncludeConfig::all().query_key(self.include.query_key.as_str())
    }

    /// Build the per-type pagination configuration these settings describe.
    pub fn page_config(&self) -> PageConfig {
        PageConfig::default()
            .page_param(self.pagination.page_param.as_str())
            .size_param(self.pagination.size_param.as_str())
            .default_size(self.pagination.default_size)
            .max_size(self.pagination.max_size)
    }
}

/// Inclusion settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IncludeSettings {
    /// Query-string key carrying include names.
    #[serde(default = "default_query_key")]
    pub query_key: String,
}

impl Default for IncludeSettings {
    fn default() -> Self {
        Self {
            query_key: default_query_key(),
        }
    }
}

fn default_query_key() -> String {
    "include".to_string()
}

/// Pagination settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PageSettings {
    /// Query parameter carrying the 1-based page number.
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Query parameter carrying the requested page size.
    #[serde(default = "default_size_param")]
    pub size_param: String,

    /// Page size used when the client does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_size: u64,

    /// Server-enforced page-size ceiling.
    #[serde(default = "default_max_page_size")]
    pub max_size: u64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_param: default_page_param(),
            size_param: default_size_param(),
            default_size: default_page_size(),
            max_size: default_max_page_size(),
        }
    }
}

fn default_page_param() -> String {
    "page[number]".to_string()
}

fn default_size_param() -> String {
    "page[size]".to_string()
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    50
}

/// Debug/logging settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugSettings {
    /// Log level override (trace, debug, info, warn, error).
    #[serde(default)]
    pub log_level: Option<String>,

    /// Log every resolved include set at debug level.
    #[serde(default)]
    pub log_includes: bool,
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverride {
    /// Pagination overrides.
    #[serde(default)]
    pub pagination: Option<PageOverride>,

    /// Debug overrides.
    #[serde(default)]
    pub debug: Option<DebugOverride>,
}

/// Pagination override fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PageOverride {
    /// Default page size override.
    pub default_size: Option<u64>,
    /// Maximum page size override.
    pub max_size: Option<u64>,
}

/// Debug override fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugOverride {
    /// Log level override.
    pub log_level: Option<String>,
    /// Include-logging override.
    pub log_includes: Option<bool>,
}

/// Expand `${VAR}` references from the process environment.
fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}").unwrap();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let full_match = &cap[0];

        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(full_match, &value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LaminaConfig::default();
        assert_eq!(config.include.query_key, "include");
        assert_eq!(config.pagination.page_param, "page[number]");
        assert_eq!(config.pagination.max_size, 50);
    }

    #[test]
    fn test_parse_config() {
        let config = LaminaConfig::from_str(
            r#"
            [include]
            query_key = "expand"

            [pagination]
            default_size = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.include.query_key, "expand");
        assert_eq!(config.pagination.default_size, 25);
        // Unspecified fields keep their defaults
        assert_eq!(config.pagination.max_size, 50);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = LaminaConfig::from_str("[include]\nquery_keey = \"x\"\n").unwrap_err();
        assert!(matches!(err, SchemaError::TomlError { .. }));
    }

    #[test]
    fn test_environment_overrides() {
        let config = LaminaConfig::from_str(
            r#"
            [pagination]
            default_size = 10

            [environments.production.pagination]
            default_size = 50
            max_size = 100
            "#,
        )
        .unwrap()
        .with_environment("production");

        assert_eq!(config.pagination.default_size, 50);
        assert_eq!(config.pagination.max_size, 100);
    }

    #[test]
    fn test_env_var_expansion() {
        // SAFETY: test-local variable, no concurrent env access in this test binary.
        unsafe { std::env::set_var("LAMINA_TEST_KEY", "expand") };
        let config =
            LaminaConfig::from_str("[include]\nquery_key = \"${LAMINA_TEST_KEY}\"\n").unwrap();
        assert_eq!(config.include.query_key, "expand");
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[pagination]\nmax_size = 20\n").unwrap();

        let config = LaminaConfig::from_file(file.path()).unwrap();
        assert_eq!(config.pagination.max_size, 20);
        assert_eq!(config.page_config().max_size, 20);
    }
}
