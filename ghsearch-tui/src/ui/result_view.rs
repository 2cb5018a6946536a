use ghsearch_core::{SearchError, SearchObserver, SearchResult};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::log_view::LogLevel;
use super::theme::Theme;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMessage {
    NoResult,
    SearchError,
    NoNetwork,
}

impl ResultMessage {
    pub fn text(&self) -> &'static str {
        match self {
            Self::NoResult => "No users found",
            Self::SearchError => "Search failed, press r to retry",
            Self::NoNetwork => "No network connection",
        }
    }
}

/// 搜索结果列表的展示状态，同时作为 controller 的观察者
pub struct ResultView {
    pub items: Vec<SearchResult>,
    pub message: Option<ResultMessage>,
    pub list_state: ListState,
    /// 上一帧可见的最后一行下标，驱动翻页预取
    pub last_visible: Option<usize>,
    notices: Vec<(LogLevel, String)>,
}

impl ResultView {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            message: None,
            list_state: ListState::default(),
            last_visible: None,
            notices: Vec::new(),
        }
    }

    /// 取走待写入日志面板的通知
    pub fn take_notices(&mut self) -> Vec<(LogLevel, String)> {
        std::mem::take(&mut self.notices)
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn select_next(&mut self) {
        self.move_by(1);
    }

    pub fn select_prev(&mut self) {
        self.move_by(-1);
    }

    pub fn move_by(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        let cur = self.selected().unwrap_or(0);
        let next = cur.saturating_add_signed(delta).min(last);
        self.list_state.select(Some(next));
    }

    pub fn select_top(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_bottom(&mut self) {
        if let Some(last) = self.items.len().checked_sub(1) {
            self.list_state.select(Some(last));
        }
    }

    /// 提交新查询前清空，旧结果不再展示
    pub fn reset(&mut self) {
        self.clear_items();
        self.message = None;
    }

    fn clear_items(&mut self) {
        self.items.clear();
        self.list_state = ListState::default();
        self.last_visible = None;
    }
}

impl SearchObserver for ResultView {
    fn on_no_result(&mut self) {
        self.clear_items();
        self.message = Some(ResultMessage::NoResult);
    }

    fn on_search_error(&mut self, error: &SearchError) {
        // 已展示的结果保留，只叠加错误提示
        self.message = Some(ResultMessage::SearchError);
        self.notices.push((LogLevel::Error, error.to_string()));
    }

    fn on_no_network(&mut self) {
        self.message = Some(ResultMessage::NoNetwork);
        self.notices
            .push((LogLevel::Warn, ResultMessage::NoNetwork.text().to_string()));
    }

    fn on_results_updated(&mut self, items: &[SearchResult]) {
        let first_page = self.items.is_empty();
        self.items = items.to_vec();
        self.message = None;
        if first_page || self.selected().is_none() {
            self.list_state = ListState::default().with_selected(Some(0));
        }
    }
}

/// 渲染结果列表和底部状态行，并记录本帧可见的最后一行
pub fn render(frame: &mut Frame, area: Rect, view: &mut ResultView, loading: bool, tick: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::secondary());

    if view.items.is_empty() {
        view.last_visible = None;
        let (text, style) = match (loading, view.message) {
            (true, _) => ("Searching…", Theme::secondary()),
            (false, Some(ResultMessage::NoResult)) => {
                (ResultMessage::NoResult.text(), Theme::secondary())
            }
            (false, Some(msg)) => (msg.text(), Theme::error()),
            (false, None) => ("Press / to search GitHub users", Theme::secondary()),
        };
        let inner_h = chunks[0].height.saturating_sub(2);
        let mut lines = vec![Line::from(""); (inner_h / 2) as usize];
        lines.push(Line::from(Span::styled(text, style)));
        let p = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(p, chunks[0]);
    } else {
        let number_width = view.items.len().to_string().len();
        let rows: Vec<ListItem> = view
            .items
            .iter()
            .enumerate()
            .map(|(i, user)| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {:>width$}  ", i + 1, width = number_width),
                        Theme::secondary(),
                    ),
                    Span::raw(user.account.clone()),
                    Span::styled(format!("  #{}", user.id), Theme::secondary()),
                ]))
            })
            .collect();

        let list = List::new(rows)
            .block(block)
            .highlight_style(Theme::selected_row());
        frame.render_stateful_widget(list, chunks[0], &mut view.list_state);

        let visible_rows = chunks[0].height.saturating_sub(2) as usize;
        let end = (view.list_state.offset() + visible_rows).min(view.items.len());
        view.last_visible = end.checked_sub(1);
    }

    let status = if loading {
        let frame_str = SPINNER[tick as usize % SPINNER.len()];
        Line::from(Span::styled(format!(" {frame_str} Loading…"), Theme::active()))
    } else if let (false, Some(msg)) = (view.items.is_empty(), view.message) {
        Line::from(Span::styled(format!(" {}", msg.text()), Theme::error()))
    } else if let Some(sel) = view.selected().filter(|_| !view.items.is_empty()) {
        Line::from(Span::styled(
            format!(" {}/{}", sel + 1, view.items.len()),
            Theme::secondary(),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(status), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(n: i64) -> Vec<SearchResult> {
        (0..n)
            .map(|i| SearchResult {
                account: format!("user{i}"),
                id: i,
                avatar_url: String::new(),
            })
            .collect()
    }

    #[test]
    fn error_keeps_displayed_results() {
        let mut view = ResultView::new();
        view.on_results_updated(&users(30));
        view.on_search_error(&SearchError::Transport("reset".into()));

        assert_eq!(view.items.len(), 30);
        assert_eq!(view.message, Some(ResultMessage::SearchError));
        let notices = view.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, LogLevel::Error);
        assert!(view.take_notices().is_empty());
    }

    #[test]
    fn no_result_clears_list() {
        let mut view = ResultView::new();
        view.on_results_updated(&users(3));
        view.on_no_result();

        assert!(view.items.is_empty());
        assert_eq!(view.selected(), None);
        assert_eq!(view.message, Some(ResultMessage::NoResult));
    }

    #[test]
    fn appended_page_keeps_selection() {
        let mut view = ResultView::new();
        view.on_results_updated(&users(30));
        view.list_state.select(Some(27));
        view.on_results_updated(&users(60));

        assert_eq!(view.selected(), Some(27));
        assert_eq!(view.message, None);
    }

    #[test]
    fn new_query_resets_selection() {
        let mut view = ResultView::new();
        view.on_results_updated(&users(30));
        view.list_state.select(Some(20));
        view.reset();
        assert_eq!(view.message, None);
        view.on_results_updated(&users(30));

        assert_eq!(view.selected(), Some(0));
    }

    #[test]
    fn movement_is_clamped() {
        let mut view = ResultView::new();
        view.select_next();
        assert_eq!(view.selected(), None);

        view.on_results_updated(&users(4));
        view.move_by(10);
        assert_eq!(view.selected(), Some(3));
        view.move_by(-10);
        assert_eq!(view.selected(), Some(0));
        view.select_bottom();
        assert_eq!(view.selected(), Some(3));
    }
}
