pub mod user;

use serde::Deserialize;

/// GitHub 错误响应体，如 `{"message":"Validation Failed","documentation_url":"..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.documentation_url {
            Some(url) => write!(f, "{} ({})", self.message, url),
            None => write!(f, "{}", self.message),
        }
    }
}
