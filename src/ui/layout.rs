//! Pure frame geometry, shared by the renderer and mouse hit-testing so
//! click targets cannot drift from what is drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of one rendered card (title line, meta line, spacer).
pub const CARD_HEIGHT: u16 = 3;

/// The four fixed regions of the screen.
pub struct ScreenLayout {
    pub status: Rect,
    pub tabs: Rect,
    pub content: Rect,
    pub key_bar: Rect,
}

/// Split the terminal frame into its regions.
pub fn screen(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // status bar
            Constraint::Length(1), // tab bar
            Constraint::Min(0),    // section content
            Constraint::Length(1), // key hints bar
        ])
        .split(area);

    ScreenLayout {
        status: rows[0],
        tabs: rows[1],
        content: rows[2],
        key_bar: rows[3],
    }
}

/// How many whole cards fit inside the content pane (borders excluded).
pub fn visible_cards(content: Rect) -> usize {
    (content.height.saturating_sub(2) / CARD_HEIGHT) as usize
}

/// Map a terminal row inside the content pane to a card index, taking the
/// current scroll offset into account. `None` for the border rows.
pub fn card_at(content: Rect, row: u16, scroll: usize) -> Option<usize> {
    let top = content.y + 1;
    let bottom = (content.y + content.height).saturating_sub(1);
    if row < top || row >= bottom {
        return None;
    }
    Some(scroll + ((row - top) / CARD_HEIGHT) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_tile_the_frame() {
        let l = screen(Rect::new(0, 0, 80, 24));
        assert_eq!(l.status.height, 3);
        assert_eq!(l.tabs.y, 3);
        assert_eq!(l.content.height, 19);
        assert_eq!(l.key_bar.y, 23);
    }

    #[test]
    fn card_hit_accounts_for_borders_and_scroll() {
        let content = Rect::new(0, 4, 80, 19);
        // Border rows miss.
        assert_eq!(card_at(content, 4, 0), None);
        assert_eq!(card_at(content, 22, 0), None);
        // First card spans three rows.
        assert_eq!(card_at(content, 5, 0), Some(0));
        assert_eq!(card_at(content, 7, 0), Some(0));
        assert_eq!(card_at(content, 8, 0), Some(1));
        // Scroll shifts the mapping.
        assert_eq!(card_at(content, 5, 4), Some(4));
    }

    #[test]
    fn visible_cards_rounds_down() {
        assert_eq!(visible_cards(Rect::new(0, 0, 80, 19)), 5);
        assert_eq!(visible_cards(Rect::new(0, 0, 80, 2)), 0);
    }
}
