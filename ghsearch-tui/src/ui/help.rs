use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
};

use super::overlay;
use super::theme::Theme;

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("q / Ctrl+C", "Quit"),
            ("/", "Search"),
            ("r", "Retry current search"),
            ("?", "This help"),
            ("!", "Logs"),
        ],
    ),
    (
        "Results",
        &[
            ("j / k", "Down / Up"),
            ("Ctrl+d / Ctrl+u", "Half page down / up"),
            ("g / G", "Top / Bottom"),
        ],
    ),
    (
        "Search",
        &[
            ("Enter", "Submit"),
            ("Ctrl+u", "Clear input"),
            ("Esc", "Exit search"),
        ],
    ),
];

/// 按键列宽取最长的按键描述
fn key_column_width() -> usize {
    HELP_SECTIONS
        .iter()
        .flat_map(|(_, bindings)| bindings.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0)
        + 2
}

fn help_lines() -> Vec<Line<'static>> {
    let key_width = key_column_width();
    let mut lines = Vec::new();
    for (i, (section, bindings)) in HELP_SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(format!(" {section}"), Theme::title())));
        lines.extend(bindings.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("   {key:<key_width$}"), Theme::active()),
                Span::raw(*desc),
            ])
        }));
    }
    lines
}

pub fn render(frame: &mut Frame, area: Rect) {
    let lines = help_lines();
    // 边框 2 行 + 提示前空行与提示 2 行
    let height = lines.len() as u16 + 4;
    let panel = overlay::centered(area, 48, height, 1);
    overlay::render_panel(frame, panel, "Key Bindings", lines, "? / Esc close");
}
