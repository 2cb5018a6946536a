use async_trait::async_trait;
use serde::Serialize;

use super::client::GithubClient;
use crate::controller::SearchTransport;
use crate::error::SearchError;
use crate::model::user::SearchUserResp;

// — 查询参数结构 —

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSearchQuery {
    pub q: String,
    pub page: u32,
    pub per_page: u32,
}

impl GithubClient {
    // — 用户搜索 —

    pub async fn search_users(&self, query: &UserSearchQuery) -> Result<SearchUserResp, SearchError> {
        self.get_with_query("/search/users", query).await
    }
}

#[async_trait]
impl SearchTransport for GithubClient {
    async fn search_users(&self, query: &UserSearchQuery) -> Result<SearchUserResp, SearchError> {
        GithubClient::search_users(self, query).await
    }
}
