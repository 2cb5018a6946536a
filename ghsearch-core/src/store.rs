use crate::model::user::SearchResult;

/// 当前查询跨页累积的结果集，按上游返回顺序、第 1 页在前
#[derive(Debug, Default)]
pub struct SearchResultStore {
    results: Vec<SearchResult>,
}

impl SearchResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.results.clear();
    }

    /// 追加一页，返回追加后的完整视图
    pub fn append(&mut self, items: impl IntoIterator<Item = SearchResult>) -> &[SearchResult] {
        self.results.extend(items);
        &self.results
    }

    /// 第 1 页：整体替换
    pub fn replace(&mut self, items: impl IntoIterator<Item = SearchResult>) -> &[SearchResult] {
        self.reset();
        self.append(items)
    }

    pub fn current(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(account: &str, id: i64) -> SearchResult {
        SearchResult {
            account: account.to_string(),
            id,
            avatar_url: format!("https://avatars.example/{id}"),
        }
    }

    #[test]
    fn append_concatenates_in_order() {
        let mut store = SearchResultStore::new();
        store.append(vec![user("a", 1), user("b", 2)]);
        let view = store.append(vec![user("c", 3)]);

        let accounts: Vec<&str> = view.iter().map(|u| u.account.as_str()).collect();
        assert_eq!(accounts, ["a", "b", "c"]);
    }

    #[test]
    fn append_keeps_duplicate_ids() {
        // 合并不按 id 去重，上游翻页时返回重复项也原样保留
        let mut store = SearchResultStore::new();
        store.append(vec![user("a", 1)]);
        store.append(vec![user("a", 1)]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_discards_previous_results() {
        let mut store = SearchResultStore::new();
        store.append(vec![user("old", 9)]);
        let view = store.replace(vec![user("new", 1)]);
        assert_eq!(view, [user("new", 1)]);
    }

    #[test]
    fn reset_clears() {
        let mut store = SearchResultStore::new();
        store.append(vec![user("a", 1)]);
        store.reset();
        assert!(store.is_empty());
        assert!(store.current().is_empty());
    }
}
