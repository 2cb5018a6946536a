use thiserror::Error;

/// 搜索失败分类。空查询和空结果不是错误，均以 `on_no_result` 结束。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// 超时、DNS、连接重置、读取 body 失败等
    #[error("transport failure: {0}")]
    Transport(String),

    /// 收到了非 2xx 响应
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// 2xx 但 body 不是预期的 JSON
    #[error("malformed response: {0}")]
    Decode(String),
}

impl SearchError {
    /// 收到响应之前就失败的错误
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if let (true, Some(status)) = (e.is_status(), e.status()) {
            Self::Upstream {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            Self::Transport(e.to_string())
        }
    }
}
