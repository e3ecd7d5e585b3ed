//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file. A missing file yields the
    /// default configuration.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g. `~/.marksort`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.storage.data_dir, "~/.marksort");
        assert!(config.classifier.api_key.is_empty());
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [classifier]
            api_key = "sk-test"
            base_url = "https://api.deepseek.com"
            model = "deepseek-chat"

            [storage]
            data_dir = "/tmp/marksort"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.classifier.api_key, "sk-test");
        assert_eq!(config.classifier.base_url, "https://api.deepseek.com");
        assert_eq!(config.classifier.model, "deepseek-chat");
        assert_eq!(config.storage.data_dir, "/tmp/marksort");
    }

    #[test]
    fn test_env_var_expansion() {
        unsafe { std::env::set_var("MARKSORT_TEST_KEY", "from-env") };
        let content = r#"
            [classifier]
            api_key = "${MARKSORT_TEST_KEY}"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.classifier.api_key, "from-env");
    }

    #[test]
    fn test_env_var_missing_is_an_error() {
        let content = r#"
            [classifier]
            api_key = "${MARKSORT_DEFINITELY_UNSET_VAR}"
        "#;
        let err = ConfigLoader::load_str(content).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotSet(_)));
    }

    #[test]
    fn test_expand_path() {
        let expanded = ConfigLoader::expand_path("~/.marksort");
        assert!(!expanded.starts_with('~'));
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config = ConfigLoader::load(Path::new("/nonexistent/marksort.toml")).unwrap();
        assert!(config.classifier.api_key.is_empty());
    }
}
