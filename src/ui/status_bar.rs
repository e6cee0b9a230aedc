use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Focus};
use super::styles;

/// Render the bottom status bar: a transient message when present,
/// otherwise key hints for the focused widget.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(ref msg) = app.message {
        Line::from(Span::styled(format!(" {}", msg), styles::message_style()))
    } else {
        let hints = match app.focus {
            Focus::Selector => " ←→/jk choose file · Tab focus panes · q quit",
            Focus::Left | Focus::Right => {
                " ↑↓/jk scroll · ←→/hl columns · PgUp/PgDn page · g/G edges · n/N file · Tab focus · q quit"
            }
        };
        Line::from(Span::styled(hints, styles::key_hint_style()))
    };

    let bar = Paragraph::new(line)
        .style(ratatui::style::Style::default().bg(styles::PANEL));
    f.render_widget(bar, area);
}
