use crate::align::{DiffFile, LineState};
use crate::config::Config;
use std::rc::Rc;

use super::sync::ScrollSync;

// ── Enums ──

/// One of the two diff panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneId {
    Left,
    Right,
}

impl PaneId {
    pub fn other(self) -> PaneId {
        match self {
            PaneId::Left => PaneId::Right,
            PaneId::Right => PaneId::Left,
        }
    }
}

/// Which widget receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Selector,
    Left,
    Right,
}

impl Focus {
    /// Cycle selector → left → right → selector.
    pub fn next(self) -> Focus {
        match self {
            Focus::Selector => Focus::Left,
            Focus::Left => Focus::Right,
            Focus::Right => Focus::Selector,
        }
    }
}

/// Visual class of a rendered row; the presentation layer maps this to
/// color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTint {
    None,
    Added,
    Removed,
    Modified,
}

// ── Pane buffer ──

/// One row of a pane's rendering: line number (blank for the absent side),
/// content, and tint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub number: Option<usize>,
    pub text: String,
    pub tint: RowTint,
}

/// A scrollable text buffer for one pane: rendered rows plus a (row, col)
/// cursor. Offsets never go negative; the row offset is also clamped to
/// the last row.
#[derive(Debug, Default)]
pub struct PaneBuffer {
    rows: Vec<RenderedRow>,
    row: usize,
    col: usize,
}

impl PaneBuffer {
    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn offset(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn set_rows(&mut self, rows: Vec<RenderedRow>) {
        self.rows = rows;
        self.row = 0;
        self.col = 0;
    }

    /// Move the cursor to an absolute offset, clamped. Returns whether the
    /// offset actually changed — the caller treats that as this pane's
    /// change notification.
    pub fn scroll_to(&mut self, row: usize, col: usize) -> bool {
        let row = row.min(self.rows.len().saturating_sub(1));
        let changed = row != self.row || col != self.col;
        self.row = row;
        self.col = col;
        changed
    }

    /// Move the cursor by a delta, clamped at zero and at the last row.
    pub fn scroll_by(&mut self, row_delta: isize, col_delta: isize) -> bool {
        let row = self.row.saturating_add_signed(row_delta);
        let col = self.col.saturating_add_signed(col_delta);
        self.scroll_to(row, col)
    }
}

// ── Application state ──

/// Single-actor view model: all mutation happens on the event-handling
/// path, one event at a time. The diff files are built once at startup and
/// never change.
pub struct App {
    files: Vec<DiffFile>,
    selected: usize,

    pub left: PaneBuffer,
    pub right: PaneBuffer,
    pub focus: Focus,

    sync: Rc<ScrollSync>,
    sync_columns: bool,

    pub config: Config,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(files: Vec<DiffFile>, config: Config) -> Self {
        let mut app = App {
            files,
            selected: 0,
            left: PaneBuffer::default(),
            right: PaneBuffer::default(),
            focus: Focus::Selector,
            sync: Rc::new(ScrollSync::new()),
            sync_columns: config.sync.columns,
            config,
            message: None,
            should_quit: false,
        };
        app.render_panes();
        app
    }

    // ── File selection ──

    pub fn files(&self) -> &[DiffFile] {
        &self.files
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn current_file(&self) -> Option<&DiffFile> {
        self.files.get(self.selected)
    }

    /// Swap the active file. Out-of-range indices are a no-op; otherwise
    /// both scroll cursors reset to the top and the panes re-render.
    pub fn select_file(&mut self, index: usize) {
        if index >= self.files.len() {
            return;
        }
        self.selected = index;
        self.render_panes();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.files.len() {
            self.select_file(self.selected + 1);
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.select_file(self.selected - 1);
        }
    }

    // ── Rendering ──

    /// Rebuild both panes' rows from the selected file. Row i on the left
    /// and row i on the right always describe the same aligned line, which
    /// is what makes row synchronization meaningful.
    fn render_panes(&mut self) {
        let (left_rows, right_rows) = match self.current_file() {
            Some(file) => {
                let mut left = Vec::with_capacity(file.lines.len());
                let mut right = Vec::with_capacity(file.lines.len());
                for line in &file.lines {
                    left.push(RenderedRow {
                        number: line.left_num,
                        text: line.left_content.clone(),
                        tint: match line.state {
                            LineState::Removed => RowTint::Removed,
                            LineState::Modified => RowTint::Modified,
                            LineState::Normal | LineState::Added => RowTint::None,
                        },
                    });
                    right.push(RenderedRow {
                        number: line.right_num,
                        text: line.right_content.clone(),
                        tint: match line.state {
                            LineState::Added => RowTint::Added,
                            LineState::Modified => RowTint::Modified,
                            LineState::Normal | LineState::Removed => RowTint::None,
                        },
                    });
                }
                (left, right)
            }
            None => (Vec::new(), Vec::new()),
        };

        self.left.set_rows(left_rows);
        self.right.set_rows(right_rows);
    }

    // ── Scrolling ──

    pub fn pane(&self, id: PaneId) -> &PaneBuffer {
        match id {
            PaneId::Left => &self.left,
            PaneId::Right => &self.right,
        }
    }

    fn pane_mut(&mut self, id: PaneId) -> &mut PaneBuffer {
        match id {
            PaneId::Left => &mut self.left,
            PaneId::Right => &mut self.right,
        }
    }

    /// Scroll one pane by a delta. A row change is propagated to the other
    /// pane through the sync guard; a pure column change stays local unless
    /// column coupling is on.
    pub fn scroll(&mut self, pane: PaneId, row_delta: isize, col_delta: isize) {
        let needs_sync = row_delta != 0 || self.sync_columns;
        if self.pane_mut(pane).scroll_by(row_delta, col_delta) && needs_sync {
            self.pane_scrolled(pane);
        }
    }

    /// Jump the focused pane to the top or bottom.
    pub fn scroll_to_edge(&mut self, pane: PaneId, bottom: bool) {
        let row = if bottom {
            self.pane(pane).rows.len().saturating_sub(1)
        } else {
            0
        };
        let col = self.pane(pane).col;
        if self.pane_mut(pane).scroll_to(row, col) {
            self.pane_scrolled(pane);
        }
    }

    /// A pane's offset changed: copy its row (and, in coupled mode, its
    /// column) onto the other pane. Setting the other pane's offset fires
    /// that pane's own notification recursively; the guard is still held at
    /// that point, so the echo is dropped and the loop terminates after one
    /// propagation.
    fn pane_scrolled(&mut self, pane: PaneId) {
        let sync = Rc::clone(&self.sync);
        let Some(_token) = sync.begin() else {
            return;
        };

        let (row, col) = self.pane(pane).offset();
        let other = pane.other();
        let target_col = if self.sync_columns {
            col
        } else {
            self.pane(other).offset().1
        };

        if self.pane_mut(other).scroll_to(row, target_col) {
            self.pane_scrolled(other);
        }
    }

    #[cfg(test)]
    pub(crate) fn sync_state(&self) -> super::sync::SyncState {
        self.sync.state()
    }

    // ── Misc ──

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn notify(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
    }
}
