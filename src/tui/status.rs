use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::tui::theme::Theme;

/// Left: app name, version and loaded file. Right: display capability.
pub fn render_status_bar(frame: &mut Frame, area: Rect, file: Option<(&str, u32, u32)>, graphics: &str) {
    let version = env!("CARGO_PKG_VERSION");
    let left_text = match file {
        Some((name, w, h)) => format!(" SimuColorMix v{} | {} ({}x{})", version, name, w, h),
        None => format!(" SimuColorMix v{}", version),
    };
    let right_text = format!("{} ", graphics);

    let width = area.width as usize;
    let padding = width.saturating_sub(left_text.chars().count() + right_text.chars().count());

    let line = Line::from(vec![
        Span::styled(left_text, Theme::status_bar()),
        Span::styled(" ".repeat(padding), Theme::status_bar()),
        Span::styled(right_text, Theme::status_bar()),
    ]);

    frame.render_widget(line, area);
}
