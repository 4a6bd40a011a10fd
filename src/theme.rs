//! Palette-backed styles and Nerd Font glyph helpers.
//!
//! Design principles:
//! - **No hardcoded backgrounds.** Every style uses `Color::Reset` (or omits
//!   `.bg()`) so the terminal's native background shines through.
//! - All colours resolve through the configured palette, so a user theme
//!   restyles every widget at once.

use ratatui::style::{Color, Modifier, Style};

use crate::config;

fn palette() -> &'static config::Palette {
    &config::get().theme.palette
}

// ─── Palette accessors ──────────────────────────────────────────────────────

/// Primary accent — headers, active borders, active tab.
pub fn accent() -> Color {
    palette().accent_primary
}

/// Secondary accent — selected rows, overlay borders.
pub fn accent_secondary() -> Color {
    palette().accent_secondary
}

/// Error accent.
pub fn accent_error() -> Color {
    palette().accent_error
}

// ─── Composite styles ───────────────────────────────────────────────────────

/// Title / header style.
pub fn title() -> Style {
    Style::default().fg(accent()).add_modifier(Modifier::BOLD)
}

/// Normal list item.
pub fn list_item() -> Style {
    Style::default().fg(palette().text_primary)
}

/// Dimmed / secondary label.
pub fn dim() -> Style {
    Style::default().fg(palette().text_dim)
}

/// Currently selected row highlight.
pub fn selected() -> Style {
    Style::default()
        .fg(accent_secondary())
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

/// Error / failure message.
pub fn error() -> Style {
    Style::default()
        .fg(accent_error())
        .add_modifier(Modifier::BOLD)
}

/// Active border (focused pane).
pub fn border_active() -> Style {
    Style::default().fg(accent())
}

/// Inactive border.
pub fn border_inactive() -> Style {
    Style::default().fg(palette().border_inactive)
}

// ─── Rating helpers ─────────────────────────────────────────────────────────

/// Colour for a 0–10 rating: high ratings glow, low ratings warn.
pub fn rating_color(rating: Option<f64>) -> Color {
    match rating {
        Some(r) if r >= 7.5 => palette().rating_high,
        Some(r) if r >= 5.0 => palette().rating_mid,
        Some(_) => palette().rating_low,
        None => palette().text_dim,
    }
}

/// A five-block bar for a 0–10 rating.
pub fn rating_bar(rating: Option<f64>) -> &'static str {
    match rating {
        Some(r) if r >= 9.0 => "█████",
        Some(r) if r >= 7.0 => "████░",
        Some(r) if r >= 5.0 => "███░░",
        Some(r) if r >= 3.0 => "██░░░",
        Some(_) => "█░░░░",
        None => "░░░░░",
    }
}

// ─── Section glyphs ─────────────────────────────────────────────────────────

/// Nerd Font glyph for each tab.
pub fn section_icon(section: crate::api::types::Section) -> &'static str {
    use crate::api::types::Section;
    match section {
        Section::Daily => "󰃭",      // calendar
        Section::Hot => "󰈸",        // flame
        Section::Upcoming => "󰼛",   // clapperboard
        Section::Preference => "󰋑", // heart
    }
}

// ─── Spinner frames ─────────────────────────────────────────────────────────

/// Braille-dot spinner frames for the loading animation.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Get the current spinner frame for a given tick count.
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bar_scales_with_rating() {
        assert_eq!(rating_bar(Some(9.3)), "█████");
        assert_eq!(rating_bar(Some(6.1)), "███░░");
        assert_eq!(rating_bar(Some(0.2)), "█░░░░");
        assert_eq!(rating_bar(None), "░░░░░");
    }

    #[test]
    fn spinner_wraps_around() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len() as u64));
    }
}
