use crate::core::ConfigProvider;
use crate::domain::vocab::DEFAULT_OSLC_VERSION;
use crate::utils::error::{OslcError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub client: ClientConfig,
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub query: QueryDefaults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    pub oslc_version: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    /// Sent with every request, e.g. `X-Jazz-CSRF-Prevent`.
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub catalog_url: Option<String>,
    pub service_provider_title: Option<String>,
    pub service_provider_url: Option<String>,
    pub domain: Option<String>,
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryDefaults {
    pub page_size: Option<u32>,
    pub max_pages: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OslcError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OslcError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OSLC_PASSWORD})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OslcError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("client.oslc_version", self.oslc_version())?;

        if let Some(timeout) = self.client.timeout_seconds {
            validation::validate_range("client.timeout_seconds", timeout, 1, 600)?;
        }

        if let Some(headers) = &self.client.headers {
            for name in headers.keys() {
                validation::validate_header_name("client.headers", name)?;
            }
        }

        if let Some(auth) = &self.auth {
            validation::validate_non_empty_string("auth.username", &auth.username)?;
        }

        if let Some(url) = &self.provider.catalog_url {
            validation::validate_url("provider.catalog_url", url)?;
        }
        if let Some(url) = &self.provider.service_provider_url {
            validation::validate_url("provider.service_provider_url", url)?;
        }
        if self.provider.service_provider_title.is_some() {
            validation::validate_required_field("provider.catalog_url", &self.provider.catalog_url)?;
        }

        if let Some(max_pages) = self.query.max_pages {
            validation::validate_range("query.max_pages", max_pages, 1, 10_000)?;
        }

        Ok(())
    }

    pub fn oslc_version(&self) -> &str {
        self.client
            .oslc_version
            .as_deref()
            .unwrap_or(DEFAULT_OSLC_VERSION)
    }

    pub fn page_size(&self) -> u32 {
        self.query.page_size.unwrap_or(0)
    }

    pub fn max_pages(&self) -> Option<usize> {
        self.query.max_pages
    }
}

impl ConfigProvider for TomlConfig {
    fn oslc_version(&self) -> &str {
        self.oslc_version()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.client.timeout_seconds
    }

    fn user_agent(&self) -> Option<&str> {
        self.client.user_agent.as_deref()
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        self.auth
            .as_ref()
            .map(|a| (a.username.as_str(), a.password.as_str()))
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        self.client
            .headers
            .as_ref()
            .map(|h| h.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[client]
oslc_version = "2.0"
timeout_seconds = 30
user_agent = "oslc-client-test"

[client.headers]
X-Jazz-CSRF-Prevent = "abc"

[auth]
username = "alice"
password = "secret"

[provider]
catalog_url = "https://jazz.example.com/ccm/oslc/workitems/catalog"
service_provider_title = "JKE Banking"
domain = "http://open-services.net/ns/cm#"

[query]
page_size = 50
max_pages = 3
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_seconds(), Some(30));
        assert_eq!(config.credentials(), Some(("alice", "secret")));
        assert_eq!(
            config.extra_headers(),
            vec![("X-Jazz-CSRF-Prevent".to_string(), "abc".to_string())]
        );
        assert_eq!(config.page_size(), 50);
        assert_eq!(config.max_pages(), Some(3));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(ConfigProvider::oslc_version(&config), "2.0");
        assert_eq!(config.page_size(), 0);
        assert!(config.credentials().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("OSLC_TEST_PASSWORD", "from-env");

        let toml_content = r#"
[auth]
username = "bob"
password = "${OSLC_TEST_PASSWORD}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.credentials(), Some(("bob", "from-env")));

        std::env::remove_var("OSLC_TEST_PASSWORD");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[provider]\ncatalog_url = \"not-a-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let title_without_catalog =
            TomlConfig::from_toml_str("[provider]\nservice_provider_title = \"JKE\"\n").unwrap();
        assert!(matches!(
            title_without_catalog.validate(),
            Err(OslcError::MissingConfigError { .. })
        ));

        let bad_timeout = TomlConfig::from_toml_str("[client]\ntimeout_seconds = 0\n").unwrap();
        assert!(bad_timeout.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[provider]\nservice_provider_url = \"https://example.com/sp/1\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.provider.service_provider_url.as_deref(),
            Some("https://example.com/sp/1")
        );
    }
}
