mod state;
mod sync;

pub use state::{App, Focus, PaneId, RenderedRow, RowTint};
