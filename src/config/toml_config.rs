use crate::core::ConfigProvider;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_BASE_URL: &str = "COMPANY_FINDER_BASE_URL";
pub const ENV_API_HOST: &str = "COMPANY_FINDER_API_HOST";
pub const ENV_API_KEY: &str = "COMPANY_FINDER_API_KEY";
pub const ENV_DATA_DIR: &str = "COMPANY_FINDER_DATA_DIR";
pub const ENV_TIMEOUT: &str = "COMPANY_FINDER_TIMEOUT_SECONDS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_host: String,
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// `$HOME/.local/share/company-finder`, or `./data` when HOME is unset.
pub fn default_data_dir() -> String {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("company-finder")
            .to_string_lossy()
            .into_owned(),
        Err(_) => "./data".to_string(),
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FinderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FinderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 從環境變數載入配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| FinderError::MissingConfigError {
                    field: name.to_string(),
                })
        };

        let timeout_seconds = match lookup(ENV_TIMEOUT) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                FinderError::InvalidConfigValueError {
                    field: ENV_TIMEOUT.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            api: ApiConfig {
                base_url: required(ENV_BASE_URL)?,
                api_host: required(ENV_API_HOST)?,
                api_key: required(ENV_API_KEY)?,
                timeout_seconds,
            },
            storage: StorageConfig {
                data_dir: lookup(ENV_DATA_DIR).unwrap_or_else(default_data_dir),
            },
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FinderError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }
}

impl ConfigProvider for AppConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn api_host(&self) -> &str {
        &self.api.api_host
    }

    fn api_key(&self) -> &str {
        &self.api.api_key
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_non_empty_string("api.api_host", &self.api.api_host)?;
        validate_non_empty_string("api.api_key", &self.api.api_key)?;

        // 未替換的 ${VAR} 代表環境變數沒有設定
        for (field, value) in [
            ("api.api_host", &self.api.api_host),
            ("api.api_key", &self.api.api_key),
        ] {
            if value.contains("${") {
                return Err(FinderError::MissingConfigError {
                    field: format!("{} (unresolved ${{...}} placeholder)", field),
                });
            }
        }

        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        validate_path("storage.data_dir", &self.storage.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://reviews.example.com"
api_host = "reviews.example.com"
api_key = "abc123"
timeout_seconds = 10

[storage]
data_dir = "./favorites"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "https://reviews.example.com");
        assert_eq!(config.api_key(), "abc123");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.data_dir(), "./favorites");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_section_is_optional() {
        let toml_content = r#"
[api]
base_url = "https://reviews.example.com"
api_host = "reviews.example.com"
api_key = "abc123"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.request_timeout(), None);
        assert!(!config.data_dir().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_FINDER_API_KEY", "from-env");

        let toml_content = r#"
[api]
base_url = "https://reviews.example.com"
api_host = "reviews.example.com"
api_key = "${TEST_FINDER_API_KEY}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.api_key, "from-env");

        std::env::remove_var("TEST_FINDER_API_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_fails_validation() {
        let toml_content = r#"
[api]
base_url = "https://reviews.example.com"
api_host = "reviews.example.com"
api_key = "${TEST_FINDER_UNSET_KEY_9F2}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(FinderError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unresolved_host_placeholder_fails_validation() {
        let toml_content = r#"
[api]
base_url = "https://reviews.example.com"
api_host = "${TEST_FINDER_UNSET_HOST_4C1}"
api_key = "abc123"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        match config.validate() {
            Err(FinderError::MissingConfigError { field }) => {
                assert!(field.starts_with("api.api_host"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[api]
base_url = "invalid-url"
api_host = "reviews.example.com"
api_key = "abc123"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_section_is_parse_error() {
        let result = AppConfig::from_toml_str("[storage]\ndata_dir = \"x\"\n");
        assert!(matches!(
            result,
            Err(FinderError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
base_url = "https://reviews.example.com"
api_host = "reviews.example.com"
api_key = "file-key"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.api_key, "file-key");
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_URL, "https://reviews.example.com"),
            (ENV_API_HOST, "reviews.example.com"),
            (ENV_API_KEY, "k"),
            (ENV_DATA_DIR, "/tmp/favs"),
            (ENV_TIMEOUT, "30"),
        ]);

        let config = AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(config.data_dir(), "/tmp/favs");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_URL, "https://reviews.example.com"),
            (ENV_API_HOST, "reviews.example.com"),
        ]);

        match AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())) {
            Err(FinderError::MissingConfigError { field }) => assert_eq!(field, ENV_API_KEY),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
