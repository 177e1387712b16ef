use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PrefixError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use clap::Parser;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "https://api.test.datacite.org/prefixes";
pub const MAX_PAGE_SIZE: u32 = 1000;

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_output_dir() -> String {
    ".".to_string()
}

/// `fetch_prefixes` 的 TOML 設定，所有欄位都有預設值
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FetchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            timeout_seconds: default_timeout_seconds(),
            output_dir: default_output_dir(),
            headers: HashMap::new(),
        }
    }
}

impl FetchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| PrefixError::FileAccessError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PrefixError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATACITE_TOKEN})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PrefixError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於檔案設定
    pub fn apply_overrides(&mut self, args: &FetchArgs) {
        if let Some(endpoint) = &args.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(page_size) = args.page_size {
            self.page_size = page_size;
        }
        if let Some(output_dir) = &args.output_dir {
            self.output_dir = output_dir.clone();
        }
    }
}

impl Validate for FetchConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_range("page_size", self.page_size, 1, MAX_PAGE_SIZE)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        validate_path("output_dir", &self.output_dir)?;

        for (name, value) in &self.headers {
            validate_non_empty_string("headers", name)?;
            validate_non_empty_string(&format!("headers.{}", name), value)?;
        }

        Ok(())
    }
}

impl ConfigProvider for FetchConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "fetch_prefixes")]
#[command(about = "Download one page of the DataCite prefix listing as JSON")]
pub struct FetchArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Page number to request (page[number])
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Override page[size] from config
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Override the output directory from config
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the API endpoint from config
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl FetchArgs {
    /// 載入設定檔 (如有) 並套用命令列覆蓋
    pub fn resolve_config(&self) -> Result<FetchConfig> {
        let mut config = match &self.config {
            Some(path) => FetchConfig::from_file(path)?,
            None => FetchConfig::default(),
        };
        config.apply_overrides(self);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> FetchArgs {
        let mut argv = vec!["fetch_prefixes"];
        argv.extend_from_slice(extra);
        FetchArgs::parse_from(argv)
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = FetchConfig::from_toml_str("").unwrap();

        assert_eq!(config, FetchConfig::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.page_size, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml() {
        let config = FetchConfig::from_toml_str(
            r#"
            endpoint = "https://api.datacite.org/prefixes"
            page_size = 250
            timeout_seconds = 10
            output_dir = "pages"

            [headers]
            Accept = "application/vnd.api+json"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://api.datacite.org/prefixes");
        assert_eq!(config.page_size, 250);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.output_dir, "pages");
        assert_eq!(
            config.headers.get("Accept").map(String::as_str),
            Some("application/vnd.api+json")
        );
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("DOI_PREFIXES_TEST_DIR", "from-env");
        let config = FetchConfig::from_toml_str(r#"output_dir = "${DOI_PREFIXES_TEST_DIR}""#)
            .unwrap();
        assert_eq!(config.output_dir, "from-env");

        let config =
            FetchConfig::from_toml_str(r#"output_dir = "${DOI_PREFIXES_UNSET_VAR_XYZ}""#).unwrap();
        assert_eq!(config.output_dir, "${DOI_PREFIXES_UNSET_VAR_XYZ}");
    }

    #[test]
    fn test_invalid_toml() {
        let err = FetchConfig::from_toml_str("page_size = \"many\"").unwrap_err();
        assert!(matches!(err, PrefixError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = FetchConfig::default();
        config.page_size = 5000;
        assert!(config.validate().is_err());

        let mut config = FetchConfig::default();
        config.endpoint = "ftp://api.test.datacite.org/prefixes".to_string();
        assert!(config.validate().is_err());

        let mut config = FetchConfig::default();
        config.headers.insert("Accept".to_string(), " ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let args = args(&[
            "--page",
            "3",
            "--page-size",
            "500",
            "--output-dir",
            "out",
            "--endpoint",
            "http://localhost:9000/prefixes",
        ]);
        let config = args.resolve_config().unwrap();

        assert_eq!(args.page, 3);
        assert_eq!(config.page_size, 500);
        assert_eq!(config.output_dir, "out");
        assert_eq!(config.endpoint, "http://localhost:9000/prefixes");
    }

    #[test]
    fn test_resolve_config_validates() {
        let args = args(&["--page-size", "0"]);
        assert!(args.resolve_config().is_err());
    }
}
