pub mod client;
pub mod connectivity;
pub mod controller;
pub mod endpoints;
pub mod error;
pub mod model;
pub mod store;

pub use client::{ClientConfig, GithubClient};
pub use connectivity::{Connectivity, NetworkMonitor};
pub use controller::{
    AUTO_RELOAD_THRESHOLD, FIRST_PAGE, PAGE_SIZE, PageFetched, PaginationState, SearchController,
    SearchObserver, SearchTransport,
};
pub use error::SearchError;
pub use model::user::{SearchResult, SearchUserResp};
pub use store::SearchResultStore;
