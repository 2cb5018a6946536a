use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ghsearch_core::ClientConfig;
use ghsearch_core::client::DEFAULT_BASE_URL;

use super::paths;

const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub network: NetworkSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 个人访问令牌；未配置时匿名访问，搜索限流更严
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// 连通性探测的 TCP 端点
    #[serde(default = "default_probe_addr")]
    pub probe_addr: String,
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_probe_addr() -> String {
    "api.github.com:443".to_string()
}
fn default_probe_interval_secs() -> u64 {
    15
}
fn default_probe_timeout_ms() -> u64 {
    1500
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            probe_addr: default_probe_addr(),
            probe_interval_secs: default_probe_interval_secs(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path = paths::config_file()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::parse(&content).with_context(|| format!("invalid config: {}", path.display()))
        } else {
            let settings = Self::default();
            settings.save()?;
            Ok(settings)
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = paths::config_file()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 环境变量中的 token 优先于配置文件
    pub fn client_config(&self) -> ClientConfig {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .or_else(|| self.api.token.clone())
            .filter(|t| !t.is_empty());
        ClientConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
            token,
        }
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.network.probe_interval_secs.max(1))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.network.probe_timeout_ms)
    }
}
