//! Atlantic palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const OCEAN_TEAL: Color = Color::Rgb(54, 194, 206); // #36c2ce
pub const WARM_AMBER: Color = Color::Rgb(255, 183, 77); // #ffb74d
pub const SOFT_LILAC: Color = Color::Rgb(186, 157, 255); // #ba9dff
pub const SUCCESS_GREEN: Color = Color::Rgb(102, 221, 134); // #66dd86
pub const ERROR_RED: Color = Color::Rgb(245, 101, 101); // #f56565

// ── Extended Palette ──────────────────────────────────────────────────

pub const FOG_WHITE: Color = Color::Rgb(205, 211, 222); // #cdd3de
pub const SLATE_GRAY: Color = Color::Rgb(96, 110, 140); // #606e8c
pub const BG_HIGHLIGHT: Color = Color::Rgb(36, 40, 52); // #242834
pub const MUTED: Color = Color::Rgb(130, 140, 160); // #828ca0

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(OCEAN_TEAL).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(WARM_AMBER)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(SLATE_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(OCEAN_TEAL)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(FOG_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(WARM_AMBER)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(WARM_AMBER).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(FOG_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(OCEAN_TEAL).add_modifier(Modifier::BOLD)
}

/// Dim placeholder text (empty pickers, empty tables).
pub fn placeholder() -> Style {
    Style::default().fg(MUTED)
}

/// Error text (failed searches, failed submissions).
pub fn error_text() -> Style {
    Style::default().fg(ERROR_RED)
}

/// A resolved selection chip.
pub fn chip() -> Style {
    Style::default().fg(SOFT_LILAC).bg(BG_HIGHLIGHT)
}

/// A chip whose label is still resolving.
pub fn chip_resolving() -> Style {
    Style::default().fg(MUTED).bg(BG_HIGHLIGHT)
}
