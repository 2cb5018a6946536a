use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::SearchError;
use crate::model::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// HTTP 客户端构造参数
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token: None,
        }
    }
}

#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: ClientConfig) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ghsearch/", env!("CARGO_PKG_VERSION"))),
        );

        // 超时按传输失败处理
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.filter(|t| !t.is_empty()),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    /// 按状态码分类响应，非 2xx 时尽量取出 GitHub 的 `message` 字段
    fn parse_response<T: serde::de::DeserializeOwned>(
        path: &str,
        status: StatusCode,
        rate_limited: bool,
        text: &str,
    ) -> Result<T, SearchError> {
        if !status.is_success() {
            let message = if rate_limited {
                "API rate limit exceeded".to_string()
            } else {
                match serde_json::from_str::<ApiError>(text) {
                    Ok(err) => err.to_string(),
                    Err(_) => text.chars().take(200).collect(),
                }
            };
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                message: format!("[{path}] {message}"),
            });
        }

        serde_json::from_str(text).map_err(|e| SearchError::Decode(format!("[{path}] {e}")))
    }

    /// GET 请求（带查询参数）
    pub async fn get_with_query<Q: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, SearchError> {
        let url = self.url(path);
        let mut req = self.http.get(&url).query(query);
        if let Some(auth) = self.auth_header() {
            req = req.header(AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let rate_limited = status == StatusCode::FORBIDDEN
            && resp
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v.as_bytes() == b"0");
        let text = resp.text().await?;
        debug!(path, status = status.as_u16(), bytes = text.len(), "response received");
        Self::parse_response(path, status, rate_limited, &text)
    }
}
