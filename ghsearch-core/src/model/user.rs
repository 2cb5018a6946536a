use serde::{Deserialize, Serialize};

/// 单条用户搜索结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "login")]
    pub account: String,
    /// 仅作为渲染时的稳定 key，不参与合并
    pub id: i64,
    pub avatar_url: String,
}

/// `GET /search/users` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchUserResp {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default, rename = "incomplete_results")]
    pub is_incomplete: bool,
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_github_wire_shape() {
        let body = r#"{
            "total_count": 2,
            "incomplete_results": true,
            "items": [
                {"login": "octocat", "id": 583231, "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4", "type": "User"},
                {"login": "octo-org", "id": 6811672, "avatar_url": ""}
            ]
        }"#;
        let resp: SearchUserResp = serde_json::from_str(body).unwrap();
        assert_eq!(resp.total_count, 2);
        assert!(resp.is_incomplete);
        assert_eq!(resp.items[0].account, "octocat");
        assert_eq!(resp.items[1].id, 6811672);
        assert!(resp.items[1].avatar_url.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let resp: SearchUserResp = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.total_count, 0);
        assert!(!resp.is_incomplete);
        assert!(resp.items.is_empty());
    }
}
