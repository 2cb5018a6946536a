use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme::Theme;

/// 在 `area` 中居中放置 `width` x `height` 的面板，四周至少留 `margin`
pub fn centered(area: Rect, width: u16, height: u16, margin: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(margin * 2));
    let h = height.min(area.height.saturating_sub(margin * 2));
    Rect::new(
        area.x + area.width.saturating_sub(w) / 2,
        area.y + area.height.saturating_sub(h) / 2,
        w,
        h,
    )
}

/// 清空底层内容后画一个带标题和底部提示的浮层
pub fn render_panel(
    frame: &mut Frame,
    panel: Rect,
    title: &str,
    mut body: Vec<Line>,
    hint: &str,
) {
    frame.render_widget(Clear, panel);

    body.push(Line::from(""));
    body.push(Line::from(Span::styled(hint.to_string(), Theme::secondary())).centered());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::secondary())
        .title(Span::styled(format!(" {title} "), Theme::title()));
    frame.render_widget(Paragraph::new(body).block(block), panel);
}
