use std::collections::VecDeque;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
};

use super::overlay;
use super::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
}

impl LogLevel {
    fn label(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
        }
    }

    fn style(&self) -> Style {
        match self {
            Self::Error => Theme::error(),
            Self::Warn => Theme::warning(),
            Self::Info => Theme::normal(),
        }
    }
}

pub struct LogEntry {
    pub time: chrono::DateTime<chrono::Local>,
    pub level: LogLevel,
    pub message: String,
}

const MAX_MEMORY_ENTRIES: usize = 200;

/// 面板里展示给用户的日志；完整日志由 tracing 写入文件
pub struct LogStore {
    pub entries: VecDeque<LogEntry>,
    pub unread_count: usize,
    pub scroll: usize,
}

impl LogStore {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            unread_count: 0,
            scroll: 0,
        }
    }

    pub fn push(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
        }

        let time = chrono::Local::now();
        self.entries.push_back(LogEntry { time, level, message });
        if self.entries.len() > MAX_MEMORY_ENTRIES {
            self.entries.pop_front();
        }
        self.unread_count += 1;
    }

    pub fn mark_read(&mut self) {
        self.unread_count = 0;
    }

    /// 从最新一条往前数，跳过 `scroll` 条后取至多 `rows` 条
    pub fn newest_first(&self, rows: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev().skip(self.scroll).take(rows)
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = self.entries.len().saturating_sub(1);
        if self.scroll < max {
            self.scroll += 1;
        }
    }
}

/// 面板内容行数 = 面板高度 - 边框 2 行 - 底部提示 2 行
const PANEL_HEIGHT: u16 = 20;

pub fn render(frame: &mut Frame, area: Rect, store: &LogStore) {
    let panel = overlay::centered(area, 72, PANEL_HEIGHT, 2);
    let rows = panel.height.saturating_sub(4) as usize;

    let lines: Vec<Line> = if store.entries.is_empty() {
        vec![Line::from(Span::styled(" No logs yet", Theme::secondary()))]
    } else {
        store
            .newest_first(rows)
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", entry.time.format("%H:%M:%S")),
                        Theme::secondary(),
                    ),
                    Span::styled(format!("{:>5} ", entry.level.label()), entry.level.style()),
                    Span::raw(entry.message.as_str()),
                ])
            })
            .collect()
    };

    let title = format!("Logs {}/{}", store.entries.len(), MAX_MEMORY_ENTRIES);
    overlay::render_panel(frame, panel, &title, lines, "j/k scroll · Esc/! close");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_recent_entries() {
        let mut store = LogStore::new();
        for i in 0..MAX_MEMORY_ENTRIES + 10 {
            store.push(LogLevel::Info, format!("entry {i}"));
        }
        assert_eq!(store.entries.len(), MAX_MEMORY_ENTRIES);
        assert_eq!(store.entries.front().unwrap().message, "entry 10");
        assert_eq!(store.unread_count, MAX_MEMORY_ENTRIES + 10);

        store.mark_read();
        assert_eq!(store.unread_count, 0);
    }

    #[test]
    fn scroll_is_bounded() {
        let mut store = LogStore::new();
        store.scroll_up();
        assert_eq!(store.scroll, 0);

        store.push(LogLevel::Warn, "a".into());
        store.push(LogLevel::Error, "b".into());
        store.scroll_down();
        store.scroll_down();
        store.scroll_down();
        assert_eq!(store.scroll, 1);
    }

    #[test]
    fn newest_entries_come_first() {
        let mut store = LogStore::new();
        for i in 0..5 {
            store.push(LogLevel::Info, format!("entry {i}"));
        }
        let shown: Vec<&str> = store.newest_first(2).map(|e| e.message.as_str()).collect();
        assert_eq!(shown, ["entry 4", "entry 3"]);

        store.scroll_down();
        let shown: Vec<&str> = store.newest_first(2).map(|e| e.message.as_str()).collect();
        assert_eq!(shown, ["entry 3", "entry 2"]);
    }
}
