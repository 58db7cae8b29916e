//! Muted slate palette with an amber accent, and the semantic styles built on it.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const SLATE: Color = Color::Rgb(167, 171, 202); // #a7abca
pub const SLATE_DIM: Color = Color::Rgb(68, 74, 102); // #444a66
pub const AMBER: Color = Color::Rgb(205, 161, 98); // #cda162
pub const MINT: Color = Color::Rgb(125, 207, 160); // #7dcfa0
pub const ROSE: Color = Color::Rgb(230, 110, 120); // #e66e78
pub const SKY: Color = Color::Rgb(122, 178, 232); // #7ab2e8

// ── Backgrounds ───────────────────────────────────────────────────────

pub const BG_PANEL: Color = Color::Rgb(28, 30, 40); // #1c1e28
pub const BG_SELECTED: Color = Color::Rgb(48, 52, 70); // #303446

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Border for the box that owns the selection.
pub fn border_focused() -> Style {
    Style::default().fg(SLATE)
}

pub fn border_default() -> Style {
    Style::default().fg(SLATE_DIM)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default().fg(SLATE).add_modifier(Modifier::BOLD)
}

pub fn table_row() -> Style {
    Style::default().fg(SLATE)
}

/// Selected row inside the focused box.
pub fn table_selected() -> Style {
    Style::default()
        .fg(AMBER)
        .bg(BG_SELECTED)
        .add_modifier(Modifier::BOLD)
}

/// Rows added optimistically and not yet confirmed by a refresh.
pub fn table_pending() -> Style {
    Style::default().fg(SLATE_DIM).add_modifier(Modifier::ITALIC)
}

/// Connected / powered state.
pub fn state_ok() -> Style {
    Style::default().fg(MINT)
}

/// Transitional state (connecting, scanning).
pub fn state_busy() -> Style {
    Style::default().fg(AMBER)
}

/// Disconnected / powered off.
pub fn state_off() -> Style {
    Style::default().fg(SLATE_DIM)
}

pub fn error_style() -> Style {
    Style::default().fg(ROSE).add_modifier(Modifier::BOLD)
}

/// Key hint text (e.g., "q quit  r rescan").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE_DIM)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(SKY).add_modifier(Modifier::BOLD)
}
