use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Focus};
use super::styles;

/// Render the one-row file selector: current filename, position in the
/// selection list, and change counts.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Selector;

    let line = match app.current_file() {
        Some(file) => {
            let marker = if focused { "◀ " } else { "  " };
            let marker_end = if focused { " ▶" } else { "  " };
            Line::from(vec![
                Span::styled(" File: ", styles::selector_style(focused)),
                Span::styled(marker, styles::selector_style(focused)),
                Span::styled(file.filename.clone(), styles::selector_style(focused)),
                Span::styled(marker_end, styles::selector_style(focused)),
                Span::styled(
                    format!(
                        "  [{}/{}]",
                        app.selected_index() + 1,
                        app.files().len()
                    ),
                    styles::selector_style(false),
                ),
                Span::styled(
                    format!("  +{}", file.adds),
                    ratatui::style::Style::default().fg(styles::GREEN).bg(styles::PANEL),
                ),
                Span::styled(
                    format!(" -{}", file.dels),
                    ratatui::style::Style::default().fg(styles::RED).bg(styles::PANEL),
                ),
            ])
        }
        None => Line::from(Span::styled(
            " No changed files",
            styles::selector_style(false),
        )),
    };

    let bar = Paragraph::new(line)
        .style(ratatui::style::Style::default().bg(styles::PANEL));
    f.render_widget(bar, area);
}
