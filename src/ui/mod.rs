mod pane;
mod selector;
mod status_bar;
mod styles;

use crate::app::{App, PaneId};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// Render the entire UI: selector bar, the two diff panes, status bar.
pub fn draw(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // file selector
            Constraint::Min(1),    // diff panes
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    selector::render(f, outer[0], app);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(outer[1]);

    pane::render(f, panes[0], app, PaneId::Left);
    pane::render(f, panes[1], app, PaneId::Right);

    status_bar::render(f, outer[2], app);
}
