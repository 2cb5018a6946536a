use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use ghsearch_core::client::DEFAULT_BASE_URL;

use crate::ui::theme::Theme;

use super::{App, InputMode};

impl App {
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_search_bar(frame, chunks[1]);

        let loading = self.controller.is_loading();
        let tick = self.tick;
        crate::ui::result_view::render(frame, chunks[2], self.view_mut(), loading, tick);

        if self.show_logs {
            crate::ui::log_view::render(frame, frame.area(), &self.logs);
        }

        if self.show_help {
            crate::ui::help::render(frame, frame.area());
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title_span = Span::styled("  GHSEARCH", Theme::title());

        let auth = if self.client.is_authenticated() {
            "  token"
        } else {
            "  anonymous"
        };
        let mut left_spans = vec![title_span, Span::styled(auth, Theme::secondary())];
        if self.settings.api.base_url != DEFAULT_BASE_URL {
            left_spans.push(Span::styled(
                format!("  {}", self.client.base_url()),
                Theme::secondary(),
            ));
        }

        let block_bg = Style::default().fg(Color::Black).bg(Color::DarkGray);
        let block_accent = Style::default().fg(Color::Black).bg(Color::Cyan);

        let mut right_spans: Vec<Span> = Vec::new();

        if self.logs.unread_count > 0 {
            right_spans.push(Span::styled(
                format!(" ! {} ", self.logs.unread_count),
                Style::default().fg(Color::White).bg(Color::Red),
            ));
        }

        let pagination = self.controller.pagination();
        if !self.controller.query().is_empty() {
            let loaded = self.controller.results().len();
            right_spans.push(Span::styled(
                format!(" {loaded}/{} ", pagination.total_count),
                block_accent,
            ));
            right_spans.push(Span::styled(
                format!(" p{} ", pagination.current_page),
                block_bg,
            ));
            if pagination.is_incomplete {
                right_spans.push(Span::styled(
                    " incomplete ",
                    Style::default().fg(Color::Black).bg(Color::Yellow),
                ));
            }
        }
        let time_str = chrono::Local::now().format(" %H:%M ").to_string();
        right_spans.push(Span::styled(time_str, block_bg));

        let right_width: u16 = right_spans
            .iter()
            .map(|s| s.content.width() as u16)
            .sum();

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(right_width)])
            .split(area);

        frame.render_widget(Paragraph::new(Line::from(left_spans)), cols[0]);
        frame.render_widget(
            Paragraph::new(Line::from(right_spans)).alignment(Alignment::Right),
            cols[1],
        );
    }

    fn render_search_bar(&self, frame: &mut Frame, area: Rect) {
        let editing = self.input_mode == InputMode::Search;
        let border_style = if editing {
            Theme::active()
        } else {
            Theme::secondary()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(" Search users ", Theme::title()));

        let content = if self.input.text.is_empty() && !editing {
            Line::from(Span::styled(" press / to type a username", Theme::secondary()))
        } else {
            Line::from(vec![
                Span::styled(" ", Theme::normal()),
                Span::styled(self.input.text.as_str(), Theme::highlight()),
            ])
        };
        frame.render_widget(Paragraph::new(content).block(block), area);

        if editing {
            let before: String = self.input.text.chars().take(self.input.cursor_pos).collect();
            let x = area.x + 2 + before.width() as u16;
            let max_x = area.x + area.width.saturating_sub(2);
            frame.set_cursor_position(Position::new(x.min(max_x), area.y + 1));
        }
    }
}
