//! Top-level UI render dispatch.
//!
//! Splits the terminal frame into four regions:
//! - Status bar (top, 3 lines)
//! - Tab bar (1 line)
//! - Active section's card list
//! - Key hints bar (bottom, 1 line)
//! Overlays (genre picker, detail modal, popups) render last, on top.

pub mod card_list;
pub mod detail;
pub mod genre_select;
pub mod help;
pub mod key_bar;
pub mod layout;
pub mod popup;
pub mod status_bar;
pub mod tab_bar;

use ratatui::Frame;

use crate::app::{App, InputMode};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let regions = layout::screen(frame.area());

    status_bar::render(frame, app, regions.status);
    tab_bar::render(frame, app, regions.tabs);
    card_list::render(frame, app, regions.content);
    key_bar::render(frame, app, regions.key_bar);

    // ── Overlays (rendered last so they're on top) ──────────────────────
    if app.input_mode == InputMode::Genres {
        genre_select::render(frame, app);
    }
    if app.input_mode == InputMode::Detail {
        detail::render(frame, app);
    }
    if let Some(ref popup_data) = app.active_popup {
        popup::render(frame, app, popup_data);
    }
}
