mod align;
mod app;
mod config;
mod git;
mod ui;

use anyhow::{Context, Result};
use app::{App, Focus, PaneId};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;

use crate::align::DiffFile;
use crate::git::FilePatch;

/// Side-by-side git diff viewer with synchronized scrolling
#[derive(Parser)]
#[command(name = "ddiff", version, about)]
struct Cli {
    /// Revision to diff the working tree against
    #[arg(long, default_value = "HEAD")]
    base: String,

    /// Context lines passed to git diff (overrides config)
    #[arg(long)]
    context: Option<usize>,

    /// Couple horizontal scrolling between the panes
    #[arg(long)]
    sync_columns: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let repo_root = git::repo_root_in(&cwd.to_string_lossy())?;

    let mut config = config::load_config(&repo_root);
    if let Some(context) = cli.context {
        config.diff.context_lines = context;
    }
    if cli.sync_columns {
        config.sync.columns = true;
    }

    // Failing to obtain the file list is the one fatal startup error;
    // everything past this point degrades to partial data
    let (files, skipped) = load_files(&repo_root, &cli.base, config.diff.context_lines)?;

    if files.is_empty() && skipped == 0 {
        println!("No changes against {}", cli.base);
        return Ok(());
    }

    let mut app = App::new(files, config);
    if skipped > 0 {
        app.notify(&format!(
            "{} file{} skipped (git diff failed)",
            skipped,
            if skipped == 1 { "" } else { "s" }
        ));
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Build one aligned DiffFile per changed path. Content fetch failures
/// become empty sides (pure creation/deletion); a failed per-file diff
/// skips that path and is reported, not fatal.
fn load_files(repo_root: &str, base: &str, context: usize) -> Result<(Vec<DiffFile>, usize)> {
    let paths = git::changed_files(repo_root, base)?;

    let mut files = Vec::with_capacity(paths.len());
    let mut skipped = 0usize;

    for path in paths {
        let raw = match git::diff_raw_file(repo_root, base, &path, context) {
            Ok(raw) => raw,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        let patch = git::parse_diff(&raw)
            .into_iter()
            .next()
            .unwrap_or(FilePatch {
                filename: path.clone(),
                hunks: Vec::new(),
            });

        let old_content = git::file_at_ref(repo_root, base, &path);
        let new_content = git::working_file(repo_root, &path);

        files.push(align::align_file(&patch, &old_content, &new_content));
    }

    Ok((files, skipped))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        // Borders plus selector and status bars eat four rows
        let page = terminal.size()?.height.saturating_sub(4).max(1) as isize;

        if let Event::Key(key) = event::read()? {
            handle_key(app, key, page);
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, page: isize) {
    // Clear the transient message on any input
    app.message = None;

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Char('n') => app.select_next(),
        KeyCode::Char('N') => app.select_prev(),
        _ => match app.focus {
            Focus::Selector => handle_selector_key(app, key),
            Focus::Left => handle_pane_key(app, PaneId::Left, key, page),
            Focus::Right => handle_pane_key(app, PaneId::Right, key, page),
        },
    }
}

fn handle_selector_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
            app.select_next()
        }
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
            app.select_prev()
        }
        _ => {}
    }
}

fn handle_pane_key(app: &mut App, pane: PaneId, key: KeyEvent, page: isize) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.scroll(pane, -1, 0),
        KeyCode::Down | KeyCode::Char('j') => app.scroll(pane, 1, 0),
        KeyCode::Left | KeyCode::Char('h') => app.scroll(pane, 0, -1),
        KeyCode::Right | KeyCode::Char('l') => app.scroll(pane, 0, 1),
        KeyCode::PageUp => app.scroll(pane, -page, 0),
        KeyCode::PageDown => app.scroll(pane, page, 0),
        KeyCode::Char('g') => app.scroll_to_edge(pane, false),
        KeyCode::Char('G') => app.scroll_to_edge(pane, true),
        _ => {}
    }
}
