use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, InputMode};

/// Ctrl+d / Ctrl+u 的移动行数
const HALF_PAGE: isize = 10;

impl App {
    pub(crate) fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        // 帮助浮层打开时，只响应关闭操作
        if self.show_help {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // 日志浮层打开时，只响应滚动和关闭
        if self.show_logs {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('!') | KeyCode::Esc => {
                    self.show_logs = false;
                }
                KeyCode::Char('j') | KeyCode::Down => self.logs.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => self.logs.scroll_up(),
                _ => {}
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search => self.handle_search_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                self.running = false;
            }
            (_, KeyCode::Char('?')) => {
                self.show_help = true;
            }
            (_, KeyCode::Char('!')) => {
                self.show_logs = true;
                self.logs.mark_read();
            }
            (_, KeyCode::Char('/')) => {
                self.input_mode = InputMode::Search;
            }
            (_, KeyCode::Char('r')) => {
                self.retry_search();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => self.view_mut().move_by(HALF_PAGE),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.view_mut().move_by(-HALF_PAGE),
            (_, KeyCode::Char('j') | KeyCode::Down) => self.view_mut().select_next(),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.view_mut().select_prev(),
            (_, KeyCode::Char('g') | KeyCode::Home) => self.view_mut().select_top(),
            (_, KeyCode::Char('G') | KeyCode::End) => self.view_mut().select_bottom(),
            (_, KeyCode::PageDown) => self.view_mut().move_by(HALF_PAGE * 2),
            (_, KeyCode::PageUp) => self.view_mut().move_by(-HALF_PAGE * 2),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                self.running = false;
            }
            (_, KeyCode::Esc) => {
                self.input_mode = InputMode::Normal;
            }
            (_, KeyCode::Enter) => {
                self.input_mode = InputMode::Normal;
                self.submit_search();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.input.clear();
            }
            (_, KeyCode::Backspace) => self.input.backspace(),
            (_, KeyCode::Left) => self.input.move_left(),
            (_, KeyCode::Right) => self.input.move_right(),
            (_, KeyCode::Char(c)) => self.input.insert(c),
            _ => {}
        }
    }
}
