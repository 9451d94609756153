use std::{fs::File, io::BufReader};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::DEFAULT_BASE_URL;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Request timeout handed to the HTTP client. None leaves it unbounded.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    pub fn read(path: &str) -> anyhow::Result<Self> {
        let file = File::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to open config file {}: {}", path, e))?;
        let reader = BufReader::new(file);
        let config: Config = serde_yaml::from_reader(reader)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {}", path, e))?;
        let config = config.postprocess();
        debug!("Loaded config from {}: base_url={}", path, config.base_url);
        Ok(config)
    }

    fn postprocess(mut self) -> Self {
        self.base_url = self.base_url.trim().to_string();
        if self.user_agent.as_deref().is_some_and(|ua| ua.trim().is_empty()) {
            self.user_agent = None;
        }
        self
    }

    pub fn empty() -> Self {
        Self {
            debug: false,
            base_url: default_base_url(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_empty() {
        let config = Config::empty();
        assert_eq!(config.debug, false);
        assert_eq!(config.base_url, "https://scrapbox.io/");
        assert!(config.user_agent.is_none());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_config_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path().to_str().unwrap();

        let yaml = r#"
debug: true
base_url: " http://localhost:8080/proxy/ "
user_agent: "scrapbox-tests"
timeout_secs: 30
"#;
        fs::write(config_path, yaml).unwrap();

        let config = Config::read(config_path).unwrap();
        assert_eq!(config.debug, true);
        assert_eq!(config.base_url, "http://localhost:8080/proxy/");
        assert_eq!(config.user_agent, Some("scrapbox-tests".to_string()));
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn test_config_missing_keys_use_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path().to_str().unwrap();
        fs::write(config_path, "user_agent: \"\"\n").unwrap();

        let config = Config::read(config_path).unwrap();
        assert_eq!(config, Config::empty());
    }

    #[test]
    fn test_config_missing_file() {
        let err = Config::read("/nonexistent/scrapbox.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }
}
