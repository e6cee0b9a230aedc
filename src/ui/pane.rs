use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus, PaneId, RowTint};
use super::styles;

/// Render one diff pane: gutter line numbers plus tinted content, offset by
/// the pane's scroll cursor.
pub fn render(f: &mut Frame, area: Rect, app: &App, pane: PaneId) {
    let buf = app.pane(pane);
    let focused = matches!(
        (pane, app.focus),
        (PaneId::Left, Focus::Left) | (PaneId::Right, Focus::Right)
    );
    let title = match pane {
        PaneId::Left => " Original ",
        PaneId::Right => " Modified ",
    };

    let show_numbers = app.config.display.line_numbers;
    let num_width = buf
        .rows()
        .iter()
        .filter_map(|r| r.number)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    let lines: Vec<Line> = buf
        .rows()
        .iter()
        .map(|row| {
            let text_style = tint_style(row.tint);
            let mut spans: Vec<Span> = Vec::with_capacity(2);

            if show_numbers {
                let gutter = match row.number {
                    Some(n) => format!("{:>num_width$} │ ", n),
                    None => format!("{:>num_width$} │ ", ""),
                };
                spans.push(Span::styled(gutter, gutter_style(row.tint)));
            }
            spans.push(Span::styled(row.text.as_str(), text_style));

            Line::from(spans).style(text_style)
        })
        .collect();

    let (row, col) = buf.offset();
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused))
                .title(Span::styled(
                    title,
                    Style::default().fg(if focused { styles::BRIGHT } else { styles::MUTED }),
                )),
        )
        .style(styles::default_style())
        .scroll((row.min(u16::MAX as usize) as u16, col.min(u16::MAX as usize) as u16));

    f.render_widget(paragraph, area);
}

fn tint_style(tint: RowTint) -> Style {
    match tint {
        RowTint::Added => styles::add_style(),
        RowTint::Removed => styles::del_style(),
        RowTint::Modified => styles::mod_style(),
        RowTint::None => styles::default_style(),
    }
}

fn gutter_style(tint: RowTint) -> Style {
    match tint {
        RowTint::Added => Style::default().fg(styles::DIM).bg(styles::ADD_BG),
        RowTint::Removed => Style::default().fg(styles::DIM).bg(styles::DEL_BG),
        RowTint::Modified => Style::default().fg(styles::DIM).bg(styles::MOD_BG),
        RowTint::None => styles::gutter_style(),
    }
}
