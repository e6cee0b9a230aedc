use ratatui::style::{Color, Modifier, Style};

// ── Background colors ──
pub const BG: Color = Color::Rgb(12, 12, 12);
pub const PANEL: Color = Color::Rgb(26, 26, 26);
pub const BORDER: Color = Color::Rgb(42, 42, 42);

// ── Text colors ──
pub const TEXT: Color = Color::Rgb(200, 200, 200);
pub const DIM: Color = Color::Rgb(102, 102, 102);
pub const MUTED: Color = Color::Rgb(136, 136, 136);
pub const BRIGHT: Color = Color::Rgb(232, 232, 232);

// ── Accent colors ──
pub const BLUE: Color = Color::Rgb(96, 165, 250);
pub const GREEN: Color = Color::Rgb(74, 222, 128);
pub const RED: Color = Color::Rgb(248, 113, 113);
pub const YELLOW: Color = Color::Rgb(250, 204, 21);

// ── Diff tints ──
pub const ADD_BG: Color = Color::Rgb(16, 62, 40);
pub const ADD_TEXT: Color = Color::Rgb(120, 240, 160);
pub const DEL_BG: Color = Color::Rgb(68, 16, 24);
pub const DEL_TEXT: Color = Color::Rgb(255, 140, 140);
pub const MOD_BG: Color = Color::Rgb(58, 48, 10);
pub const MOD_TEXT: Color = Color::Rgb(250, 220, 120);

// ── Composed styles ──

pub fn default_style() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn add_style() -> Style {
    Style::default().fg(ADD_TEXT).bg(ADD_BG)
}

pub fn del_style() -> Style {
    Style::default().fg(DEL_TEXT).bg(DEL_BG)
}

pub fn mod_style() -> Style {
    Style::default().fg(MOD_TEXT).bg(MOD_BG)
}

pub fn gutter_style() -> Style {
    Style::default().fg(DIM).bg(BG)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BLUE)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn selector_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(BRIGHT)
            .bg(PANEL)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED).bg(PANEL)
    }
}

pub fn key_hint_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn message_style() -> Style {
    Style::default().fg(YELLOW)
}
