use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::connectivity::Connectivity;
use crate::endpoints::UserSearchQuery;
use crate::error::SearchError;
use crate::model::user::{SearchResult, SearchUserResp};
use crate::store::SearchResultStore;

pub const PAGE_SIZE: u32 = 30;
/// 距已加载末尾不超过该条数时预取下一页
pub const AUTO_RELOAD_THRESHOLD: u32 = 5;
pub const FIRST_PAGE: u32 = 1;

/// 远端搜索传输层，测试中替换为假实现
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search_users(&self, query: &UserSearchQuery) -> Result<SearchUserResp, SearchError>;
}

/// 展示层回调。每次完成的获取尝试恰好触发其中一个
/// （包括空查询和断网这两种同步短路）。
pub trait SearchObserver {
    fn on_no_result(&mut self);
    fn on_search_error(&mut self, error: &SearchError);
    fn on_no_network(&mut self);
    fn on_results_updated(&mut self, items: &[SearchResult]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// 上游报告的总匹配数
    pub total_count: u64,
    /// 上游索引只搜索了一部分
    pub is_incomplete: bool,
    pub current_page: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            total_count: 0,
            is_incomplete: false,
            current_page: FIRST_PAGE,
        }
    }
}

impl PaginationState {
    /// 已请求条目的上界（不含）
    pub fn max_position(&self) -> u64 {
        u64::from(self.current_page) * u64::from(PAGE_SIZE)
    }

    pub fn has_more(&self) -> bool {
        self.total_count > self.max_position()
    }

    /// `position` 是观察者已到达的最后一条的下标（从 0 开始）。
    /// 超出 `max_position` 的位置视为过期上报，不触发加载。
    pub fn should_load(&self, position: usize) -> bool {
        let max = self.max_position();
        let position = position as u64;
        position <= max && max - position <= u64::from(AUTO_RELOAD_THRESHOLD)
    }
}

/// 后台获取任务的结果，投递回持有 controller 的上下文后再应用
#[derive(Debug)]
pub struct PageFetched {
    pub generation: u64,
    pub page: u32,
    pub result: Result<SearchUserResp, SearchError>,
}

pub struct SearchController<O: SearchObserver> {
    transport: Arc<dyn SearchTransport>,
    connectivity: Arc<dyn Connectivity>,
    observer: O,
    store: SearchResultStore,
    query: String,
    pagination: PaginationState,
    /// 每次 `search_user` 自增，用于识别过期响应
    generation: u64,
    /// 当前代正在获取的页
    in_flight: Option<u32>,
    completion_tx: mpsc::UnboundedSender<PageFetched>,
    completion_rx: Option<mpsc::UnboundedReceiver<PageFetched>>,
}

impl<O: SearchObserver> SearchController<O> {
    pub fn new(
        transport: Arc<dyn SearchTransport>,
        connectivity: Arc<dyn Connectivity>,
        observer: O,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            transport,
            connectivity,
            observer,
            store: SearchResultStore::new(),
            query: String::new(),
            pagination: PaginationState::default(),
            generation: 0,
            in_flight: None,
            completion_tx,
            completion_rx: Some(completion_rx),
        }
    }

    /// 取走完成通道的接收端，由事件循环收取后交给 `handle_completion`
    pub fn take_completion_receiver(&mut self) -> mpsc::UnboundedReceiver<PageFetched> {
        self.completion_rx
            .take()
            .expect("completion receiver already taken")
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn results(&self) -> &[SearchResult] {
        self.store.current()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    // — 搜索 —

    /// 开始新查询。旧查询仍在途的响应到达后会被丢弃。
    /// 需在 tokio 运行时内调用。
    pub fn search_user(&mut self, query: &str) {
        let query = query.trim();

        self.generation += 1;
        self.in_flight = None;
        self.store.reset();
        self.pagination = PaginationState::default();
        self.query = query.to_string();

        if query.is_empty() {
            debug!(generation = self.generation, "empty query, not searching");
            self.observer.on_no_result();
            return;
        }

        self.fetch_page(FIRST_PAGE);
    }

    /// 观察者上报消费位置，接近已加载末尾且还有更多时预取下一页。
    /// 返回是否发起了获取。
    pub fn check_load_next_page(&mut self, position: usize) -> bool {
        if let Some(page) = self.in_flight {
            debug!(page, position, "page fetch in flight, skipping load-more");
            return false;
        }
        if !(self.pagination.has_more() && self.pagination.should_load(position)) {
            return false;
        }

        let previous = self.pagination.current_page;
        self.pagination.current_page += 1;
        if !self.fetch_page(self.pagination.current_page) {
            // 未发出请求，不改变状态
            self.pagination.current_page = previous;
            return false;
        }
        true
    }

    fn fetch_page(&mut self, page: u32) -> bool {
        if !self.connectivity.is_connected() {
            warn!(query = %self.query, page, "no network connection");
            self.observer.on_no_network();
            return false;
        }

        let generation = self.generation;
        let request = UserSearchQuery {
            q: self.query.clone(),
            page,
            per_page: PAGE_SIZE,
        };
        let transport = Arc::clone(&self.transport);
        let tx = self.completion_tx.clone();
        self.in_flight = Some(page);
        debug!(query = %request.q, page, generation, "fetching page");

        // 内层任务 panic 时也要回送一个结果，否则 in_flight 永远不会清除
        tokio::spawn(async move {
            let result = match tokio::spawn(async move { transport.search_users(&request).await })
                .await
            {
                Ok(result) => result,
                Err(e) => Err(SearchError::Transport(format!("search task aborted: {e}"))),
            };
            let _ = tx.send(PageFetched {
                generation,
                page,
                result,
            });
        });
        true
    }

    /// 应用一次获取结果。过期代或非在途页的结果直接丢弃。
    pub fn handle_completion(&mut self, fetched: PageFetched) {
        let PageFetched {
            generation,
            page,
            result,
        } = fetched;

        if generation != self.generation {
            debug!(generation, current = self.generation, page, "discarding stale response");
            return;
        }
        if self.in_flight != Some(page) {
            debug!(page, in_flight = ?self.in_flight, "discarding unexpected page");
            return;
        }
        self.in_flight = None;

        match result {
            Err(e) => {
                warn!(query = %self.query, page, error = %e, "search failed");
                // 已展示的前几页保留，回退页码以便下次重试该页
                if page > FIRST_PAGE {
                    self.pagination.current_page = page - 1;
                }
                self.observer.on_search_error(&e);
            }
            Ok(resp) => {
                self.pagination.total_count = resp.total_count;
                self.pagination.is_incomplete = resp.is_incomplete;

                let received = resp.items.len();
                let view = if page == FIRST_PAGE {
                    self.store.replace(resp.items)
                } else {
                    self.store.append(resp.items)
                };
                info!(
                    query = %self.query,
                    page,
                    received,
                    accumulated = view.len(),
                    total = resp.total_count,
                    "page applied"
                );

                if view.is_empty() {
                    self.observer.on_no_result();
                } else {
                    self.observer.on_results_updated(view);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(total_count: u64, current_page: u32) -> PaginationState {
        PaginationState {
            total_count,
            is_incomplete: false,
            current_page,
        }
    }

    #[test]
    fn threshold_boundary() {
        let s = state(100, 1);
        assert!(s.has_more());
        assert!(s.should_load(25));
        assert!(!s.should_load(24));
        assert!(s.should_load(30));
    }

    #[test]
    fn position_beyond_loaded_range_does_not_load() {
        let s = state(100, 1);
        assert!(!s.should_load(31));
        assert!(!s.should_load(usize::MAX));
    }

    #[test]
    fn has_more_is_strict() {
        assert!(!state(30, 1).has_more());
        assert!(state(31, 1).has_more());
        assert!(!state(0, 1).has_more());
    }

    #[test]
    fn has_more_follows_total_count_past_a_thousand() {
        // 34 * 30 = 1020
        assert!(state(5_000, 34).has_more());
        assert!(state(1_021, 34).has_more());
        assert!(!state(1_020, 34).has_more());
    }
}
