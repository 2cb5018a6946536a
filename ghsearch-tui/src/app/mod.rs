mod event;
mod render;

const UI_TICK_MS: u64 = 120;

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::Event;
use tokio::sync::mpsc;

use ghsearch_core::{GithubClient, NetworkMonitor, PageFetched, SearchController};

use crate::config::settings::Settings;
use crate::ui::log_view::{LogLevel, LogStore};
use crate::ui::result_view::ResultView;

/// 异步消息，从后台任务发送到主循环
pub enum AppMessage {
    /// 终端事件（由持久后台线程读取）
    TermEvent(Event),
    /// UI 定时 tick（驱动加载动画）
    Tick,
    /// 某一页搜索完成
    SearchCompleted(PageFetched),
}

/// 输入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// 搜索框编辑状态，`cursor_pos` 以字符计
pub struct SearchInput {
    pub text: String,
    pub cursor_pos: usize,
}

impl SearchInput {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor_pos: 0,
        }
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor_pos);
        self.text.insert(idx, c);
        self.cursor_pos += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let idx = self.byte_index(self.cursor_pos);
            self.text.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor_pos = (self.cursor_pos + 1).min(self.text.chars().count());
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_pos = 0;
    }
}

pub struct App {
    pub running: bool,
    pub settings: Settings,
    pub client: GithubClient,
    pub controller: SearchController<ResultView>,
    pub input: SearchInput,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub show_logs: bool,
    pub logs: LogStore,
    pub tick: u16,
    /// 上次上报的 (可见末行, 已加载条数)，未变化时不重复检查
    reported_position: Option<(usize, usize)>,
    pub msg_tx: mpsc::UnboundedSender<AppMessage>,
    msg_rx: mpsc::UnboundedReceiver<AppMessage>,
}

impl App {
    pub async fn new() -> Result<Self> {
        let settings = Settings::load()?;
        let client = GithubClient::new(settings.client_config())?;
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();

        let monitor = NetworkMonitor::start(
            settings.network.probe_addr.clone(),
            settings.probe_interval(),
            settings.probe_timeout(),
        )
        .await;

        let controller = SearchController::new(
            Arc::new(client.clone()),
            Arc::new(monitor),
            ResultView::new(),
        );

        let mut logs = LogStore::new();
        if !client.is_authenticated() {
            logs.push(
                LogLevel::Info,
                "No GitHub token configured, using anonymous rate limits".to_string(),
            );
            logs.mark_read();
        }

        Ok(Self {
            running: true,
            settings,
            client,
            controller,
            input: SearchInput::new(),
            input_mode: InputMode::Search,
            show_help: false,
            show_logs: false,
            logs,
            tick: 0,
            reported_position: None,
            msg_tx,
            msg_rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        let result = self.main_loop(&mut terminal).await;
        ratatui::restore();
        result
    }

    async fn main_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        // 启动持久的事件读取线程，避免 select! + spawn_blocking 丢事件
        let event_tx = self.msg_tx.clone();
        std::thread::spawn(move || {
            loop {
                match crossterm::event::read() {
                    Ok(ev) => {
                        if event_tx.send(AppMessage::TermEvent(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        let tick_tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_millis(UI_TICK_MS));
            loop {
                interval.tick().await;
                if tick_tx.send(AppMessage::Tick).is_err() {
                    break;
                }
            }
        });

        // 搜索结果转发为 AppMessage，保证所有状态变更都在主循环里串行发生
        let search_tx = self.msg_tx.clone();
        let mut completion_rx = self.controller.take_completion_receiver();
        tokio::spawn(async move {
            while let Some(fetched) = completion_rx.recv().await {
                if search_tx.send(AppMessage::SearchCompleted(fetched)).is_err() {
                    break;
                }
            }
        });

        while self.running {
            terminal.draw(|f| self.render(f))?;
            self.report_position();

            // 等待至少一条消息
            if let Some(msg) = self.msg_rx.recv().await {
                self.handle_message(msg);
            }
            // 批量处理所有已积压的消息，避免每条消息都触发一次 draw
            while let Ok(msg) = self.msg_rx.try_recv() {
                self.handle_message(msg);
            }
        }
        Ok(())
    }

    pub(crate) fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::TermEvent(ev) => self.handle_event(ev),
            AppMessage::Tick => {
                self.tick = self.tick.wrapping_add(1);
            }
            AppMessage::SearchCompleted(fetched) => {
                self.controller.handle_completion(fetched);
                self.drain_notices();
            }
        }
    }

    pub(crate) fn view_mut(&mut self) -> &mut ResultView {
        self.controller.observer_mut()
    }

    // — 搜索 —

    pub(crate) fn submit_search(&mut self) {
        let query = self.input.text.clone();
        self.controller.observer_mut().reset();
        self.controller.search_user(&query);
        self.drain_notices();
        if !query.trim().is_empty() {
            self.logs
                .push(LogLevel::Info, format!("search \"{}\"", query.trim()));
            self.logs.mark_read();
        }
    }

    /// 重新执行当前查询（断网或出错后的手动重试）
    pub(crate) fn retry_search(&mut self) {
        let query = self.controller.query().to_string();
        if query.is_empty() {
            return;
        }
        // 已有结果时只重试失败的下一页
        if !self.controller.observer().items.is_empty() {
            if let Some(position) = self.controller.observer().last_visible {
                self.controller.check_load_next_page(position);
                self.drain_notices();
                return;
            }
        }
        self.controller.observer_mut().reset();
        self.controller.search_user(&query);
        self.drain_notices();
    }

    /// 渲染出的最后一行即消费位置
    fn report_position(&mut self) {
        let view = self.controller.observer();
        let Some(position) = view.last_visible else {
            return;
        };
        let key = (position, view.items.len());
        if self.reported_position == Some(key) {
            return;
        }
        self.reported_position = Some(key);
        self.controller.check_load_next_page(position);
        self.drain_notices();
    }

    fn drain_notices(&mut self) {
        for (level, message) in self.controller.observer_mut().take_notices() {
            self.logs.push(level, message);
        }
    }
}
