//! Genre checklist overlay for the preference section.
//!
//! Space (or a click on a row) toggles a genre; Enter submits. Submission
//! with nothing checked is rejected by the app with a blocking prompt.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{App, GENRES};
use crate::theme;

const OVERLAY_WIDTH: u16 = 34;

/// The overlay's screen rectangle; clicks outside it close the picker.
pub fn overlay_rect(area: Rect) -> Rect {
    // Genre rows + borders + hint line.
    let height = (GENRES.len() as u16 + 3).min(area.height);
    let width = OVERLAY_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Map a terminal row inside the overlay to a genre index. `None` for the
/// borders and the hint line.
pub fn genre_at(overlay: Rect, row: u16) -> Option<usize> {
    let top = overlay.y + 1;
    if row < top {
        return None;
    }
    let index = (row - top) as usize;
    let visible = overlay.height.saturating_sub(3) as usize;
    if index < GENRES.len().min(visible) {
        Some(index)
    } else {
        None
    }
}

/// Render the genre picker.
pub fn render(frame: &mut Frame, app: &App) {
    let area = overlay_rect(frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" 󰋑 Pick Genres ", theme::title()))
        .borders(Borders::ALL)
        .border_style(theme::border_active());

    let mut lines = Vec::with_capacity(GENRES.len() + 1);
    for (i, genre) in GENRES.iter().enumerate() {
        let mark = if app.genre_checked[i] { "[x]" } else { "[ ]" };
        let style = if i == app.genre_cursor {
            theme::selected()
        } else if app.genre_checked[i] {
            theme::list_item()
        } else {
            theme::dim()
        };
        lines.push(Line::from(Span::styled(format!(" {mark} {genre}"), style)));
    }
    lines.push(Line::from(Span::styled(
        " Space toggle · Enter submit",
        theme::dim(),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_map_to_genres_in_catalog_order() {
        let overlay = overlay_rect(Rect::new(0, 0, 80, 40));
        assert_eq!(genre_at(overlay, overlay.y), None); // top border
        assert_eq!(genre_at(overlay, overlay.y + 1), Some(0));
        assert_eq!(
            genre_at(overlay, overlay.y + GENRES.len() as u16),
            Some(GENRES.len() - 1)
        );
        // Hint line and bottom border miss.
        assert_eq!(genre_at(overlay, overlay.y + GENRES.len() as u16 + 1), None);
        assert_eq!(genre_at(overlay, overlay.y + overlay.height - 1), None);
    }
}
